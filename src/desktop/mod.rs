//! The window stack.
//!
//! `Desktop` is the single source of truth for open windows: who exists, where
//! they are, and who is on top. Consumers (frames, taskbar) read projections
//! and route every change back through the operations here, so there is never
//! a second copy of window state to drift.
//!
//! ```text
//! desktop/
//! ├── mod.rs        - Desktop struct, Window, frame projection
//! ├── operations.rs - open/close/focus/move/resize/minimize/maximize
//! ├── sessions.rs   - interactive move and resize
//! └── launch.rs     - icon activation and adaptive spawning
//! ```

mod launch;
mod operations;
mod sessions;

use std::rc::Rc;

use serde::Serialize;
use vitrine_config::{App, Config};

use crate::geometry::{Rect, Size};
use crate::viewport::{working_area, Breakpoint};

pub use launch::{ClickKind, Effect, LaunchOutcome};
pub(crate) use sessions::Session;

/// How many logical pixels of a window must stay reachable during a drag.
pub const MIN_VISIBLE: f64 = 50.;

/// Smallest size interactive resize will go down to.
pub const MIN_WINDOW_SIZE: Size = Size { w: 200., h: 150. };

/// One open window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    pub id: String,
    pub title: String,
    /// Tag identifying which content renderer the host mounts.
    pub component: String,
    /// Stored geometry. The origin may go negative during off-screen drags.
    pub rect: Rect,
    /// Stacking key; unique among live windows, never reused.
    pub z: u64,
    pub minimized: bool,
    pub maximized: bool,
    /// Geometry snapshotted on maximize and restored on unmaximize.
    saved_geometry: Option<Rect>,
}

/// Caller-facing description of a window to open.
///
/// `z` is always store-assigned and never appears here.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor {
    pub id: String,
    pub title: String,
    pub component: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub minimized: bool,
    pub maximized: bool,
}

/// The authoritative window registry.
#[derive(Debug)]
pub struct Desktop {
    /// Windows in open order.
    windows: Vec<Window>,
    /// Next z to assign. Read then incremented, never reused.
    next_z: u64,
    /// Serial for window ids minted by `launch`.
    spawn_serial: u64,
    /// Ongoing interactive move or resize. At most one at a time.
    session: Option<Session>,
    view_size: Size,
    config: Rc<Config>,
}

impl Desktop {
    pub fn new(view_size: Size, config: Rc<Config>) -> Self {
        Self {
            windows: Vec::new(),
            next_z: 1,
            spawn_serial: 0,
            session: None,
            view_size,
            config,
        }
    }

    /// Windows in open order.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window(&self, id: &str) -> Option<&Window> {
        self.windows.iter().find(|win| win.id == id)
    }

    pub(crate) fn idx_of(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|win| win.id == id)
    }

    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Updates the viewport size.
    ///
    /// Stored geometry is left alone; maximized frames pick up the new
    /// working area on the next projection.
    pub fn set_view_size(&mut self, view_size: Size) {
        self.view_size = view_size;
    }

    pub fn config(&self) -> &Rc<Config> {
        &self.config
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.view_size.w, &self.config.breakpoints)
    }

    pub fn working_area(&self) -> Rect {
        working_area(self.view_size, &self.config.taskbar)
    }

    /// Id of the window the user perceives as focused: the topmost one that
    /// isn't minimized.
    pub fn focused_id(&self) -> Option<&str> {
        self.windows
            .iter()
            .filter(|win| !win.minimized)
            .max_by_key(|win| win.z)
            .map(|win| win.id.as_str())
    }

    /// Projects the stack into paint order.
    ///
    /// Minimized windows are excluded; maximized ones take the working area
    /// instead of their stored geometry. Later frames draw on top.
    pub fn frames(&self) -> Vec<Frame<'_>> {
        let area = self.working_area();

        let mut visible: Vec<&Window> = self.windows.iter().filter(|win| !win.minimized).collect();
        visible.sort_by_key(|win| win.z);

        let top_z = visible.last().map(|win| win.z);
        visible
            .into_iter()
            .map(|win| Frame {
                id: &win.id,
                title: &win.title,
                rect: if win.maximized { area } else { win.rect },
                z: win.z,
                maximized: win.maximized,
                focused: Some(win.z) == top_z,
                content: match self.config.app(&win.component) {
                    Some(app) => Content::App(app),
                    None => Content::Unknown(&win.component),
                },
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn verify_invariants(&self) {
        for (i, win) in self.windows.iter().enumerate() {
            assert!(win.z < self.next_z, "assigned z must stay below the counter");
            assert!(
                win.rect.size.w >= 0. && win.rect.size.h >= 0.,
                "window sizes can't go negative"
            );
            if win.saved_geometry.is_some() {
                assert!(win.maximized, "geometry snapshots exist only while maximized");
            }
            for other in &self.windows[..i] {
                assert_ne!(win.z, other.z, "live windows must have distinct z");
            }
        }

        if let Some(session) = &self.session {
            let target = self.window(session.id());
            let target = target.expect("sessions must target a live window");
            assert!(!target.maximized, "sessions never run on maximized windows");
            assert!(!target.minimized, "sessions never run on minimized windows");
        }
    }
}

/// One window in paint order, ready for the host to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub rect: Rect,
    pub z: u64,
    pub maximized: bool,
    pub focused: bool,
    pub content: Content<'a>,
}

/// What a frame's component tag resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content<'a> {
    /// A registered app with its sizing entry.
    App(&'a App),
    /// No registry entry; the host renders its placeholder.
    Unknown(&'a str),
}
