//! Track and streaming-link reference data.
//!
//! Loaded once per session from a JSON manifest. Any load failure substitutes
//! the built-in fallback data; the manifest is display content, never a hard
//! dependency.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub streaming_links: StreamingLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Duration label, e.g. "3:42". Display data, never parsed.
    pub duration: String,
    /// Audio file name under the host's asset root.
    pub file: String,
}

/// The supported streaming services.
///
/// A closed set: hosts render a fixed button row and unknown services have no
/// artwork anyway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingLinks {
    pub spotify: Option<StreamingLink>,
    pub apple_music: Option<StreamingLink>,
    pub youtube_music: Option<StreamingLink>,
    pub amazon_music: Option<StreamingLink>,
    pub tidal: Option<StreamingLink>,
    pub bugs: Option<StreamingLink>,
    pub flo: Option<StreamingLink>,
    pub melon: Option<StreamingLink>,
    pub vibe: Option<StreamingLink>,
    pub genie: Option<StreamingLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingLink {
    pub name: String,
    pub url: String,
    /// CSS color for the service button.
    pub color: String,
}

impl StreamingLinks {
    /// Present services in a fixed display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StreamingLink)> + '_ {
        [
            ("spotify", &self.spotify),
            ("appleMusic", &self.apple_music),
            ("youtubeMusic", &self.youtube_music),
            ("amazonMusic", &self.amazon_music),
            ("tidal", &self.tidal),
            ("bugs", &self.bugs),
            ("flo", &self.flo),
            ("melon", &self.melon),
            ("vibe", &self.vibe),
            ("genie", &self.genie),
        ]
        .into_iter()
        .filter_map(|(key, link)| Some((key, link.as_ref()?)))
    }
}

impl Manifest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let _span = tracy_client::span!("Manifest::load");

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("error reading {path:?}"))?;
        let manifest =
            serde_json::from_str(&text).with_context(|| format!("error parsing {path:?}"))?;
        Ok(manifest)
    }

    /// Loads the manifest, substituting the fallback data on any failure.
    pub fn load_or_fallback(path: &Path) -> Self {
        match Self::load(path) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!("error loading manifest, using fallback data: {err:#}");
                Self::fallback()
            }
        }
    }

    /// The built-in dataset: thirteen tracks, ten streaming services.
    pub fn fallback() -> Self {
        fn track(id: &str, title: &str, duration: &str, file: &str) -> Track {
            Track {
                id: String::from(id),
                title: String::from(title),
                duration: String::from(duration),
                file: String::from(file),
            }
        }

        fn link(name: &str, url: &str, color: &str) -> Option<StreamingLink> {
            Some(StreamingLink {
                name: String::from(name),
                url: String::from(url),
                color: String::from(color),
            })
        }

        Self {
            tracks: vec![
                track("t01", "Boot Sequence", "1:12", "01-boot-sequence.mp3"),
                track("t02", "Dial Tone", "3:48", "02-dial-tone.mp3"),
                track("t03", "Screen Glow", "4:05", "03-screen-glow.mp3"),
                track("t04", "Pixel Rain", "3:21", "04-pixel-rain.mp3"),
                track("t05", "Modem Dreams", "4:44", "05-modem-dreams.mp3"),
                track("t06", "Desktop Flowers", "2:58", "06-desktop-flowers.mp3"),
                track("t07", "Save File", "3:33", "07-save-file.mp3"),
                track("t08", "Cursor Waltz", "3:07", "08-cursor-waltz.mp3"),
                track("t09", "Static Bloom", "4:18", "09-static-bloom.mp3"),
                track("t10", "Shutdown Lullaby", "2:40", "10-shutdown-lullaby.mp3"),
                track("t11", "Recycle Bin", "3:15", "11-recycle-bin.mp3"),
                track("t12", "Wallpaper Sky", "4:02", "12-wallpaper-sky.mp3"),
                track("t13", "After Hours (CRT Mix)", "5:11", "13-after-hours-crt-mix.mp3"),
            ],
            streaming_links: StreamingLinks {
                spotify: link("Spotify", "https://open.spotify.com/album/vitrine", "#1db954"),
                apple_music: link("Apple Music", "https://music.apple.com/album/vitrine", "#fa243c"),
                youtube_music: link(
                    "YouTube Music",
                    "https://music.youtube.com/playlist?list=vitrine",
                    "#ff0000",
                ),
                amazon_music: link(
                    "Amazon Music",
                    "https://music.amazon.com/albums/vitrine",
                    "#25d1da",
                ),
                tidal: link("TIDAL", "https://tidal.com/album/vitrine", "#000000"),
                bugs: link("Bugs", "https://music.bugs.co.kr/album/vitrine", "#ff3b28"),
                flo: link("FLO", "https://www.music-flo.com/album/vitrine", "#3f3fff"),
                melon: link("Melon", "https://www.melon.com/album/vitrine", "#00cd3c"),
                vibe: link("VIBE", "https://vibe.naver.com/album/vitrine", "#e61b5b"),
                genie: link("Genie", "https://www.genie.co.kr/album/vitrine", "#3183ff"),
            },
        }
    }

    /// Reports content problems without failing the load.
    pub fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (i, track) in self.tracks.iter().enumerate() {
            if self.tracks[..i].iter().any(|other| other.id == track.id) {
                problems.push(format!("duplicate track id: {:?}", track.id));
            }
            if track.file.is_empty() {
                problems.push(format!("track {:?} has no audio file", track.id));
            }
        }

        for (key, link) in self.streaming_links.iter() {
            if csscolorparser::parse(&link.color).is_err() {
                problems.push(format!("{key}: invalid color {:?}", link.color));
            }
            if !link.url.starts_with("http://") && !link.url.starts_with("https://") {
                problems.push(format!("{key}: url is not absolute: {:?}", link.url));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_shape() {
        let manifest = Manifest::fallback();
        assert_eq!(manifest.tracks.len(), 13);
        assert_eq!(manifest.streaming_links.iter().count(), 10);
        assert!(manifest.lint().is_empty());
    }

    #[test]
    fn parses_camel_case_keys() {
        let manifest: Manifest = serde_json::from_str(
            r##"{
                "tracks": [
                    {"id": "t1", "title": "One", "duration": "2:00", "file": "one.mp3"}
                ],
                "streamingLinks": {
                    "appleMusic": {"name": "Apple Music", "url": "https://example.org", "color": "#fa243c"}
                }
            }"##,
        )
        .unwrap();

        assert_eq!(manifest.tracks[0].id, "t1");
        let apple = manifest.streaming_links.apple_music.as_ref().unwrap();
        assert_eq!(apple.name, "Apple Music");
        assert!(manifest.streaming_links.spotify.is_none());
    }

    #[test]
    fn missing_streaming_links_default_to_empty() {
        let manifest: Manifest = serde_json::from_str(r#"{"tracks": []}"#).unwrap();
        assert_eq!(manifest.streaming_links, StreamingLinks::default());
    }

    #[test]
    fn serializes_camel_case_keys() {
        let value = serde_json::to_value(Manifest::fallback()).unwrap();
        assert!(value.get("streamingLinks").is_some());
        assert!(value["streamingLinks"].get("appleMusic").is_some());
    }

    #[test]
    fn lint_reports_problems() {
        let mut manifest = Manifest::fallback();
        manifest.tracks.push(manifest.tracks[0].clone());
        manifest.streaming_links.spotify = Some(StreamingLink {
            name: String::from("Spotify"),
            url: String::from("open.spotify.com"),
            color: String::from("chartreuse-ish"),
        });

        let problems = manifest.lint();
        assert_eq!(problems.len(), 3);
    }
}
