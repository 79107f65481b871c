//! Icon gesture disambiguation.
//!
//! A press arms the gesture; motion past the threshold turns it into a drag;
//! release either commits the drag as a position override or lets the host's
//! click report through. The trailing click a toolkit synthesizes after a
//! drag-release is swallowed by a one-shot suppression flag, consumed by the
//! next click report for that icon. A wall-clock timer would do the same job
//! but would make the state machine untestable.

use tracing::trace;

use super::IconField;
use crate::geometry::{Point, Rect};
use crate::utils::clamp_preferring_top_left_in_area;

/// Pointer travel in logical pixels that turns a press into a drag.
pub const DRAG_THRESHOLD: f64 = 5.;

#[derive(Debug)]
pub(super) struct Gesture {
    icon: String,
    /// Pointer position at press time.
    press: Point,
    /// Pointer offset from the icon origin at press time.
    grab_offset: Point,
    dragging: bool,
}

impl IconField {
    /// Arms a gesture on an icon. Returns false for unknown icons or when a
    /// gesture is already in progress.
    pub fn pointer_down(&mut self, id: &str, pointer: Point) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(idx) = self.idx_of(id) else {
            trace!("pointer down on unknown icon {id:?}");
            return false;
        };

        self.gesture = Some(Gesture {
            icon: id.to_owned(),
            press: pointer,
            grab_offset: pointer - self.icons[idx].pos,
            dragging: false,
        });
        true
    }

    /// Feeds pointer motion into the armed gesture, if any.
    pub fn pointer_motion(&mut self, pointer: Point) {
        let Some(gesture) = &mut self.gesture else {
            return;
        };

        if !gesture.dragging {
            let travel_sq = gesture.press.distance_sq(pointer);
            if travel_sq <= DRAG_THRESHOLD * DRAG_THRESHOLD {
                return;
            }
            gesture.dragging = true;
        }

        let id = gesture.icon.clone();
        let pos = pointer - gesture.grab_offset;
        let Some(idx) = self.idx_of(&id) else {
            return;
        };

        let mut rect = Rect::new(pos, self.icons[idx].size);
        clamp_preferring_top_left_in_area(self.region, &mut rect);
        self.icons[idx].pos = rect.loc;
    }

    /// Releases the gesture. Returns true when a drag was committed, in which
    /// case the next click report for that icon is suppressed.
    pub fn pointer_up(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };

        if gesture.dragging {
            self.suppress_click = Some(gesture.icon);
            true
        } else {
            false
        }
    }

    /// Whether a click report on this icon should be handled.
    ///
    /// Consumes the post-drag suppression flag when it matches.
    pub fn click(&mut self, id: &str) -> bool {
        if self.suppress_click.as_deref() == Some(id) {
            self.suppress_click = None;
            return false;
        }
        true
    }
}
