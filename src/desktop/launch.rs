//! Icon activation.
//!
//! Translates a click on a desktop icon into its effects (sound cue, external
//! URL, mail composition) and, for window icons, an `open_window` with an
//! adaptive size from the app registry and a seeded spawn position.

use fastrand::Rng;
use tracing::debug;
use vitrine_config::{App, Launch};

use super::{Desktop, WindowDescriptor};
use crate::geometry::{Point, Rect, Size};
use crate::icons::placement;
use crate::utils::{center_preferring_top_left_in_area, clamp_preferring_top_left_in_area};
use crate::viewport::Breakpoint;

/// Spawn rects keep this far from the working area edges.
const SPAWN_MARGIN: f64 = 16.;

/// Size for components without a registry entry.
const DEFAULT_WINDOW_SIZE: Size = Size { w: 400., h: 300. };

/// Which gesture activated the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// A side effect the host must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Play this sound cue.
    Sound(String),
    /// Open this URL in a new browsing context.
    OpenUrl(String),
    /// Open a mail composer addressed here.
    ComposeMail(String),
}

/// What activating an icon produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOutcome {
    pub effects: Vec<Effect>,
    /// Id of the window that was opened, if any.
    pub window: Option<String>,
}

impl Desktop {
    /// Activates a desktop icon.
    ///
    /// The sound cue plays on any click. The launch target fires only when
    /// the click kind matches the icon's configuration: double-click icons
    /// ignore single clicks (and vice versa), so a single click on the photo
    /// viewer still clicks, it just opens nothing.
    pub fn launch(&mut self, icon_id: &str, kind: ClickKind) -> LaunchOutcome {
        let config = self.config.clone();
        let Some(icon) = config.icon(icon_id) else {
            debug!("launch: no icon {icon_id:?}");
            return LaunchOutcome::default();
        };

        let mut outcome = LaunchOutcome::default();
        if let Some(sound) = &icon.sound {
            outcome.effects.push(Effect::Sound(sound.clone()));
        }

        let wants = if icon.double_click {
            ClickKind::Double
        } else {
            ClickKind::Single
        };
        if kind != wants {
            return outcome;
        }

        match icon.launch() {
            Some(Launch::Window(component)) => {
                let app = config.app(component);
                let size = self.adaptive_size(app);

                let serial = self.spawn_serial;
                self.spawn_serial += 1;
                let pos = self.spawn_position(icon_id, serial, size);

                let id = format!("{icon_id}-{serial}");
                let title = app
                    .and_then(|app| app.title.clone())
                    .unwrap_or_else(|| icon.title.clone());

                self.open_window(WindowDescriptor {
                    id: id.clone(),
                    title,
                    component: component.clone(),
                    x: pos.x,
                    y: pos.y,
                    width: size.w,
                    height: size.h,
                    minimized: false,
                    maximized: false,
                });
                outcome.window = Some(id);
            }
            Some(Launch::OpenUrl(url)) => outcome.effects.push(Effect::OpenUrl(url.clone())),
            Some(Launch::Mail(address)) => {
                outcome.effects.push(Effect::ComposeMail(address.clone()));
            }
            None => {}
        }

        outcome
    }

    /// Window size for a component at the current breakpoint.
    fn adaptive_size(&self, app: Option<&App>) -> Size {
        let Some(app) = app else {
            return DEFAULT_WINDOW_SIZE;
        };

        let mut size = Size::new(app.width, app.height);
        let over = match self.breakpoint() {
            Breakpoint::Mobile => app.mobile,
            Breakpoint::Tablet => app.tablet,
            Breakpoint::Desktop => None,
        };
        if let Some(over) = over {
            if let Some(w) = over.width {
                size.w = w;
            }
            if let Some(h) = over.height {
                size.h = h;
            }
        }

        // Never larger than the working area itself.
        let area = self.working_area();
        size.w = f64::min(size.w, area.size.w);
        size.h = f64::min(size.h, area.size.h);
        size
    }

    /// Seeded spawn position inside the working area.
    ///
    /// Jitter around the center, scaled down on smaller breakpoints so mobile
    /// windows come up near-centered while desktop ones scatter.
    fn spawn_position(&self, icon_id: &str, serial: u64, size: Size) -> Point {
        let area = self.working_area().inset(SPAWN_MARGIN);
        let center = center_preferring_top_left_in_area(area, size);

        let jitter = match self.breakpoint() {
            Breakpoint::Mobile => 0.1,
            Breakpoint::Tablet => 0.35,
            Breakpoint::Desktop => 0.6,
        };
        let free_w = f64::max(area.size.w - size.w, 0.);
        let free_h = f64::max(area.size.h - size.h, 0.);

        let mut rng = Rng::with_seed(placement::seed("spawn", icon_id, serial));
        let pos = Point::new(
            center.x + (rng.f64() - 0.5) * free_w * jitter,
            center.y + (rng.f64() - 0.5) * free_h * jitter,
        );

        let mut rect = Rect::new(pos, size);
        clamp_preferring_top_left_in_area(area, &mut rect);
        rect.loc
    }
}
