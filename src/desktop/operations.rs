//! Window stack operations.
//!
//! Every operation on an absent id is a silent no-op logged at debug level:
//! stale ids from a host that raced a close are expected, not errors.

use tracing::{debug, warn};

use super::{Desktop, Window, WindowDescriptor};
use crate::geometry::{Point, Rect, Size};

impl Desktop {
    /// Opens a window on top of the stack.
    ///
    /// Duplicate ids are the caller's bug; both entries coexist, and id-keyed
    /// operations will only ever reach the first one.
    pub fn open_window(&mut self, desc: WindowDescriptor) {
        if self.idx_of(&desc.id).is_some() {
            warn!("opening duplicate window id {:?}", desc.id);
        }

        let z = self.next_z;
        self.next_z += 1;

        debug!("open {:?} ({:?}) at z={z}", desc.id, desc.component);
        self.windows.push(Window {
            id: desc.id,
            title: desc.title,
            component: desc.component,
            rect: Rect::new(
                Point::new(desc.x, desc.y),
                Size::new(desc.width, desc.height),
            ),
            z,
            minimized: desc.minimized,
            maximized: desc.maximized,
            saved_geometry: None,
        });
    }

    /// Removes the window entirely. Close is irrevocable.
    pub fn close_window(&mut self, id: &str) {
        let Some(idx) = self.idx_of(id) else {
            debug!("close: no window {id:?}");
            return;
        };

        self.windows.remove(idx);
        if self.session.as_ref().is_some_and(|s| s.id() == id) {
            self.session = None;
        }
        debug!("closed {id:?}");
    }

    /// Raises the window to the top of the stack.
    ///
    /// Always assigns a fresh z, even for a window that is already topmost.
    pub fn focus_window(&mut self, id: &str) {
        let Some(idx) = self.idx_of(id) else {
            debug!("focus: no window {id:?}");
            return;
        };

        self.windows[idx].z = self.next_z;
        self.next_z += 1;
    }

    /// Overwrites the window origin. No bounds validation here; interactive
    /// sessions clamp before calling in.
    pub fn move_window(&mut self, id: &str, x: f64, y: f64) {
        let Some(idx) = self.idx_of(id) else {
            debug!("move: no window {id:?}");
            return;
        };

        self.windows[idx].rect.loc = Point::new(x, y);
    }

    /// Overwrites the window size. No bounds validation here either.
    pub fn resize_window(&mut self, id: &str, width: f64, height: f64) {
        let Some(idx) = self.idx_of(id) else {
            debug!("resize: no window {id:?}");
            return;
        };

        self.windows[idx].rect.size = Size::new(width, height);
    }

    /// Toggles minimized state; a second call restores the window.
    ///
    /// A minimized window keeps its z and geometry for the restore.
    pub fn minimize_window(&mut self, id: &str) {
        let Some(idx) = self.idx_of(id) else {
            debug!("minimize: no window {id:?}");
            return;
        };

        let win = &mut self.windows[idx];
        win.minimized = !win.minimized;
        if win.minimized && self.session.as_ref().is_some_and(|s| s.id() == id) {
            self.session = None;
        }
    }

    /// Toggles maximized state.
    ///
    /// Maximize snapshots the current geometry; unmaximize restores it
    /// unconditionally, discarding any store-level move/resize that happened
    /// in between.
    pub fn maximize_window(&mut self, id: &str) {
        let Some(idx) = self.idx_of(id) else {
            debug!("maximize: no window {id:?}");
            return;
        };

        let win = &mut self.windows[idx];
        if win.maximized {
            win.maximized = false;
            if let Some(rect) = win.saved_geometry.take() {
                win.rect = rect;
            }
        } else {
            win.saved_geometry = Some(win.rect);
            win.maximized = true;
            if self.session.as_ref().is_some_and(|s| s.id() == id) {
                self.session = None;
            }
        }
    }

    /// What a taskbar button click does: restore a minimized window, minimize
    /// the focused one, raise anything else.
    pub fn taskbar_activate(&mut self, id: &str) {
        let Some(idx) = self.idx_of(id) else {
            debug!("taskbar activate: no window {id:?}");
            return;
        };

        if self.windows[idx].minimized {
            self.minimize_window(id);
            self.focus_window(id);
        } else if self.focused_id() == Some(id) {
            self.minimize_window(id);
        } else {
            self.focus_window(id);
        }
    }
}
