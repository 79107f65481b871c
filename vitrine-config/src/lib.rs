//! Desktop shell configuration in KDL format.
//!
//! The config file declares the icon set, the per-component window sizing
//! registry, taskbar metrics, breakpoints and theme colors. Every section has
//! complete defaults equal to the stock desktop, so a missing file yields a
//! fully working shell.

mod apps;
mod icons;

use std::ffi::OsStr;
use std::path::Path;

use knuffel::errors::DecodeError;
use miette::{Context, IntoDiagnostic};
use tracing::debug;

pub use crate::apps::{App, SizeOverride};
pub use crate::icons::{Icon, IconId, Launch};

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub breakpoints: Breakpoints,
    #[knuffel(child, default)]
    pub desktop: DesktopPart,
    #[knuffel(child, default)]
    pub taskbar: Taskbar,
    #[knuffel(child, default)]
    pub theme: Theme,
    #[knuffel(children(name = "icon"))]
    pub icons: Vec<Icon>,
    #[knuffel(children(name = "app"))]
    pub apps: Vec<App>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            desktop: DesktopPart::default(),
            taskbar: Taskbar::default(),
            theme: Theme::default(),
            icons: Icon::defaults(),
            apps: App::defaults(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracy_client::span!("Config::load");

        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;

        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");

        let mut config: Self = knuffel::parse(filename, text)?;

        // A config that declares no icons or no apps keeps the stock set. The
        // desktop is never intentionally empty, and this keeps a minimal
        // config (say, just a theme) fully functional.
        if config.icons.is_empty() {
            config.icons = Icon::defaults();
        }
        if config.apps.is_empty() {
            config.apps = App::defaults();
        }

        Ok(config)
    }

    /// Looks up the sizing entry for a window component.
    pub fn app(&self, component: &str) -> Option<&App> {
        self.apps.iter().find(|app| app.component == component)
    }

    /// Looks up an icon declaration by id.
    pub fn icon(&self, id: &str) -> Option<&Icon> {
        self.icons.iter().find(|icon| icon.id.0 == id)
    }
}

/// Viewport-width thresholds that switch layout constants.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    /// Widths at or above this are at least tablet.
    #[knuffel(child, unwrap(argument), default = Self::default().tablet)]
    pub tablet: f64,
    /// Widths at or above this are desktop.
    #[knuffel(child, unwrap(argument), default = Self::default().desktop)]
    pub desktop: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet: 768.,
            desktop: 1024.,
        }
    }
}

/// Desktop surface metrics: padding and icon placement tuning.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct DesktopPart {
    /// Inset from the working area edges to the icon region.
    #[knuffel(child, unwrap(argument), default = Self::default().padding)]
    pub padding: f64,
    /// Extra clearance required between icon bounding boxes.
    #[knuffel(child, unwrap(argument), default = Self::default().icon_gap)]
    pub icon_gap: f64,
    /// Factor on the combined half-extents for the center distance rule.
    #[knuffel(child, unwrap(argument), default = Self::default().icon_spacing)]
    pub icon_spacing: f64,
    /// Icon glyph size per breakpoint.
    #[knuffel(child, default)]
    pub icon_size: IconSize,
    /// Label width when a title has no override.
    #[knuffel(child, unwrap(argument), default = Self::default().label_width)]
    pub label_width: f64,
    /// Measured label widths for specific titles.
    #[knuffel(children(name = "label"))]
    pub labels: Vec<LabelWidth>,
}

impl Default for DesktopPart {
    fn default() -> Self {
        Self {
            padding: 24.,
            icon_gap: 6.,
            icon_spacing: 1.,
            icon_size: IconSize::default(),
            label_width: 52.,
            labels: LabelWidth::defaults(),
        }
    }
}

/// Icon glyph size per breakpoint.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct IconSize {
    #[knuffel(property, default = Self::default().mobile)]
    pub mobile: f64,
    #[knuffel(property, default = Self::default().tablet)]
    pub tablet: f64,
    #[knuffel(property, default = Self::default().desktop)]
    pub desktop: f64,
}

impl Default for IconSize {
    fn default() -> Self {
        Self {
            mobile: 40.,
            tablet: 48.,
            desktop: 56.,
        }
    }
}

/// Measured label width for one icon title.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct LabelWidth {
    #[knuffel(argument)]
    pub title: String,
    #[knuffel(property)]
    pub width: f64,
}

impl LabelWidth {
    fn new(title: &str, width: f64) -> Self {
        Self {
            title: String::from(title),
            width,
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::new("Now Playing", 66.),
            Self::new("Metronome", 62.),
            Self::new("Credits", 54.),
            Self::new("Contact", 54.),
            Self::new("README", 58.),
        ]
    }
}

/// Taskbar strip metrics.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Taskbar {
    /// Which viewport edge the strip docks to.
    #[knuffel(child, unwrap(argument), default)]
    pub position: TaskbarPosition,
    #[knuffel(child, unwrap(argument), default = Self::default().height)]
    pub height: f64,
    /// Estimated width of one window button.
    #[knuffel(child, unwrap(argument), default = Self::default().button_width)]
    pub button_width: f64,
    /// Width of the "+N" chip shown when buttons overflow.
    #[knuffel(child, unwrap(argument), default = Self::default().overflow_width)]
    pub overflow_width: f64,
    /// Strip space reserved before the buttons (logo zone).
    #[knuffel(child, unwrap(argument), default = Self::default().reserved_start)]
    pub reserved_start: f64,
    /// Strip space reserved after the buttons (clock zone).
    #[knuffel(child, unwrap(argument), default = Self::default().reserved_end)]
    pub reserved_end: f64,
}

impl Default for Taskbar {
    fn default() -> Self {
        Self {
            position: TaskbarPosition::Top,
            height: 32.,
            button_width: 160.,
            overflow_width: 44.,
            reserved_start: 56.,
            reserved_end: 88.,
        }
    }
}

#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarPosition {
    #[default]
    Top,
    Bottom,
}

/// Colors handed to the host renderer.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    #[knuffel(child, unwrap(argument), default = Self::default().background)]
    pub background: Color,
    #[knuffel(child, unwrap(argument), default = Self::default().taskbar)]
    pub taskbar: Color,
    #[knuffel(child, unwrap(argument), default = Self::default().window_chrome)]
    pub window_chrome: Color,
    #[knuffel(child, unwrap(argument), default = Self::default().icon_label)]
    pub icon_label: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::new_unpremul(0., 128. / 255., 128. / 255., 1.),
            taskbar: Color::new_unpremul(192. / 255., 192. / 255., 192. / 255., 1.),
            window_chrome: Color::new_unpremul(212. / 255., 208. / 255., 200. / 255., 1.),
            icon_label: Color::new_unpremul(1., 1., 1., 1.),
        }
    }
}

/// RGBA color with unpremultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new_unpremul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array_unpremul(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<csscolorparser::Color> for Color {
    fn from(value: csscolorparser::Color) -> Self {
        let [r, g, b, a] = value.to_array();
        Self::new_unpremul(r, g, b, a)
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for Color {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Color, DecodeError<S>> {
        match &**val {
            knuffel::ast::Literal::String(ref s) => match csscolorparser::parse(s) {
                Ok(color) => Ok(Self::from(color)),
                Err(err) => {
                    ctx.emit_error(DecodeError::unexpected(
                        val,
                        "color",
                        format!("invalid color: {err}"),
                    ));
                    Ok(Self::new_unpremul(0., 0., 0., 1.))
                }
            },
            _ => {
                ctx.emit_error(DecodeError::unsupported(val, "colors must be strings"));
                Ok(Self::new_unpremul(0., 0., 0., 1.))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn parse() {
        let parsed = do_parse(
            r##"
            breakpoints {
                tablet 700
                desktop 1100
            }

            desktop {
                padding 16
                icon-gap 4
                icon-spacing 0.9
                icon-size mobile=32 tablet=44 desktop=52
                label-width 60
                label "Jukebox" width=72
            }

            taskbar {
                position "bottom"
                height 40
                button-width 140
                overflow-width 36
                reserved-start 48
                reserved-end 64
            }

            theme {
                background "#008080"
            }

            icon "jukebox" title="Jukebox" sound="open" {
                window "jukebox"
            }
            icon "shop" title="Shop" sound="link" {
                open-url "https://example.org/shop"
            }

            app "jukebox" width=400 height=500 {
                mobile width=320
            }
            "##,
        );

        assert_eq!(
            parsed.breakpoints,
            Breakpoints {
                tablet: 700.,
                desktop: 1100.,
            },
        );
        assert_eq!(
            parsed.desktop,
            DesktopPart {
                padding: 16.,
                icon_gap: 4.,
                icon_spacing: 0.9,
                icon_size: IconSize {
                    mobile: 32.,
                    tablet: 44.,
                    desktop: 52.,
                },
                label_width: 60.,
                labels: vec![LabelWidth::new("Jukebox", 72.)],
            },
        );
        assert_eq!(
            parsed.taskbar,
            Taskbar {
                position: TaskbarPosition::Bottom,
                height: 40.,
                button_width: 140.,
                overflow_width: 36.,
                reserved_start: 48.,
                reserved_end: 64.,
            },
        );
        assert_eq!(parsed.theme.background, Color::new_unpremul(0., 128. / 255., 128. / 255., 1.));
        assert_eq!(
            parsed.icons,
            vec![
                Icon {
                    id: IconId(String::from("jukebox")),
                    title: String::from("Jukebox"),
                    sound: Some(String::from("open")),
                    double_click: false,
                    launch: vec![Launch::Window(String::from("jukebox"))],
                },
                Icon {
                    id: IconId(String::from("shop")),
                    title: String::from("Shop"),
                    sound: Some(String::from("link")),
                    double_click: false,
                    launch: vec![Launch::OpenUrl(String::from("https://example.org/shop"))],
                },
            ],
        );
        assert_eq!(
            parsed.apps,
            vec![App {
                component: String::from("jukebox"),
                title: None,
                width: 400.,
                height: 500.,
                mobile: Some(SizeOverride {
                    width: Some(320.),
                    height: None,
                }),
                tablet: None,
            }],
        );
    }

    #[test]
    fn can_create_default_config() {
        let _ = Config::default();
    }

    #[test]
    fn empty_config_matches_default() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn default_icons_have_sizing_entries() {
        let config = Config::default();
        for icon in &config.icons {
            if let Some(Launch::Window(component)) = icon.launch() {
                assert!(
                    config.app(component).is_some(),
                    "icon {:?} launches unknown component {component:?}",
                    icon.id.0,
                );
            }
        }
    }

    #[test]
    fn default_icon_ids_are_stable() {
        let ids: Vec<_> = Config::default()
            .icons
            .iter()
            .map(|icon| icon.id.0.clone())
            .collect();
        insta::assert_debug_snapshot!(ids, @r###"
        [
            "player",
            "lyrics",
            "gallery",
            "paint",
            "quiz",
            "tuner",
            "metronome",
            "streaming",
            "about",
            "credits",
            "readme",
            "contact",
            "store",
        ]
        "###);
    }

    #[test]
    fn duplicate_icon_ids_rejected() {
        let result = Config::parse(
            "test.kdl",
            r#"
            icon "player" title="Player"
            icon "player" title="Player Again"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_color_rejected() {
        let result = Config::parse(
            "test.kdl",
            r#"
            theme {
                background "not-a-color"
            }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_node_rejected() {
        assert!(Config::parse("test.kdl", "wallpaper \"dunes\"").is_err());
    }
}
