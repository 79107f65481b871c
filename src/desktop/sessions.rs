//! Interactive move and resize sessions.
//!
//! A session is explicit state held by the `Desktop`, created by a begin call
//! and dropped on release or when its window goes away. This replaces scoped
//! pointer-event listeners: at most one session exists at a time, so there is
//! nothing to leak.

use tracing::debug;

use super::{Desktop, MIN_VISIBLE, MIN_WINDOW_SIZE};
use crate::geometry::{Point, Size};
use crate::utils::ResizeEdge;

#[derive(Debug)]
pub(crate) enum Session {
    Move(MoveSession),
    Resize(ResizeSession),
}

impl Session {
    pub fn id(&self) -> &str {
        match self {
            Session::Move(m) => &m.id,
            Session::Resize(r) => &r.id,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MoveSession {
    id: String,
    /// Pointer offset from the window origin at grab time.
    grab_offset: Point,
}

#[derive(Debug)]
pub(crate) struct ResizeSession {
    id: String,
    edges: ResizeEdge,
    start_pointer: Point,
    start_size: Size,
}

impl Desktop {
    /// Starts dragging a window by its title bar.
    ///
    /// Rejected while another session is active or the window is maximized.
    /// Dragging never changes focus; a body click does that separately.
    pub fn begin_move(&mut self, id: &str, pointer: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(win) = self.window(id) else {
            debug!("begin move: no window {id:?}");
            return false;
        };
        if win.maximized || win.minimized {
            return false;
        }

        self.session = Some(Session::Move(MoveSession {
            id: id.to_owned(),
            grab_offset: pointer - win.rect.loc,
        }));
        true
    }

    /// Starts a corner-handle resize.
    pub fn begin_resize(&mut self, id: &str, edges: ResizeEdge, pointer: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(win) = self.window(id) else {
            debug!("begin resize: no window {id:?}");
            return false;
        };
        if win.maximized || win.minimized {
            return false;
        }

        self.session = Some(Session::Resize(ResizeSession {
            id: id.to_owned(),
            edges,
            start_pointer: pointer,
            start_size: win.rect.size,
        }));
        true
    }

    /// Feeds a pointer position into the active session, if any.
    pub fn pointer_motion(&mut self, pointer: Point) {
        let Some(session) = &self.session else {
            return;
        };

        match session {
            Session::Move(m) => {
                let id = m.id.clone();
                let Some(win) = self.window(&id) else {
                    return;
                };
                let size = win.rect.size;
                let pos = pointer - m.grab_offset;

                // The window may hang off-screen, but at least `MIN_VISIBLE`
                // of it must stay reachable on each axis.
                let view = self.view_size;
                let x = clamp(pos.x, MIN_VISIBLE - size.w, view.w - MIN_VISIBLE);
                let y = clamp(pos.y, MIN_VISIBLE - size.h, view.h - MIN_VISIBLE);
                self.move_window(&id, x, y);
            }
            Session::Resize(r) => {
                let id = r.id.clone();
                let delta = pointer - r.start_pointer;

                // The corner handle adjusts size only, never position.
                let mut size = r.start_size;
                if r.edges.contains(ResizeEdge::RIGHT) {
                    size.w += delta.x;
                } else if r.edges.contains(ResizeEdge::LEFT) {
                    size.w -= delta.x;
                }
                if r.edges.contains(ResizeEdge::BOTTOM) {
                    size.h += delta.y;
                } else if r.edges.contains(ResizeEdge::TOP) {
                    size.h -= delta.y;
                }

                let w = f64::max(size.w, MIN_WINDOW_SIZE.w);
                let h = f64::max(size.h, MIN_WINDOW_SIZE.h);
                self.resize_window(&id, w, h);
            }
        }
    }

    /// Ends the active session. The last applied geometry stands.
    pub fn end_session(&mut self) {
        self.session = None;
    }

    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }
}

/// Like `f64::clamp` but tolerant of an inverted range: the lower bound wins.
fn clamp(x: f64, min: f64, max: f64) -> f64 {
    f64::max(f64::min(x, max), min)
}
