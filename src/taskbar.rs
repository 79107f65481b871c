//! Taskbar reflow.
//!
//! A pure computation over the window stack: one button per open window in
//! open order (minimized included, so a minimized window can be restored from
//! here), truncated to a "+N" overflow chip when the strip runs out of room.
//! The chip carries the hidden window ids so a host can offer a drill-down.

use serde::Serialize;

use crate::desktop::Desktop;

/// One window button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskbarButton<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub minimized: bool,
    pub focused: bool,
}

/// Buttons that didn't fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskbarOverflow<'a> {
    pub count: usize,
    /// Ids of the hidden windows, still in open order.
    pub ids: Vec<&'a str>,
}

/// The computed strip contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskbarLayout<'a> {
    pub buttons: Vec<TaskbarButton<'a>>,
    pub overflow: Option<TaskbarOverflow<'a>>,
}

/// Lays out the taskbar strip for the current stack and viewport width.
pub fn reflow(desktop: &Desktop) -> TaskbarLayout<'_> {
    let config = &desktop.config().taskbar;
    let focused = desktop.focused_id();

    let available = f64::max(
        desktop.view_size().w - config.reserved_start - config.reserved_end,
        0.,
    );

    let windows = desktop.windows();
    let count = windows.len();

    let visible = if count as f64 * config.button_width <= available {
        count
    } else {
        // The chip takes its own slice of the strip.
        let room = f64::max(available - config.overflow_width, 0.);
        (room / config.button_width).floor() as usize
    };

    let buttons = windows[..visible]
        .iter()
        .map(|win| TaskbarButton {
            id: &win.id,
            title: &win.title,
            minimized: win.minimized,
            focused: Some(win.id.as_str()) == focused,
        })
        .collect();

    let hidden = &windows[visible..];
    let overflow = (!hidden.is_empty()).then(|| TaskbarOverflow {
        count: hidden.len(),
        ids: hidden.iter().map(|win| win.id.as_str()).collect(),
    });

    TaskbarLayout { buttons, overflow }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use vitrine_config::Config;

    use crate::desktop::{Desktop, WindowDescriptor};
    use crate::geometry::Size;

    use super::*;

    fn desktop(view_w: f64, windows: usize) -> Desktop {
        let mut desktop = Desktop::new(Size::new(view_w, 800.), Rc::new(Config::default()));
        for i in 0..windows {
            desktop.open_window(WindowDescriptor {
                id: format!("w{i}"),
                title: format!("Window {i}"),
                component: String::from("player"),
                x: 50.,
                y: 50.,
                width: 400.,
                height: 300.,
                minimized: false,
                maximized: false,
            });
        }
        desktop
    }

    // Default strip metrics: 56 + 88 reserved, 160 per button, 44 chip.

    #[test]
    fn everything_fits_on_a_wide_strip() {
        let desktop = desktop(1280., 7);
        let layout = reflow(&desktop);
        assert_eq!(layout.buttons.len(), 7);
        assert!(layout.overflow.is_none());
    }

    #[test]
    fn overflow_truncates_in_open_order() {
        // 1280 - 144 = 1136 available; 8 * 160 = 1280 doesn't fit.
        // (1136 - 44) / 160 = 6.825 -> 6 visible, 2 hidden.
        let desktop = desktop(1280., 8);
        let layout = reflow(&desktop);

        assert_eq!(layout.buttons.len(), 6);
        let overflow = layout.overflow.unwrap();
        assert_eq!(overflow.count, 2);
        assert_eq!(overflow.ids, vec!["w6", "w7"]);
    }

    #[test]
    fn narrow_strip_can_hide_everything() {
        let desktop = desktop(180., 3);
        let layout = reflow(&desktop);

        assert!(layout.buttons.is_empty());
        assert_eq!(layout.overflow.unwrap().count, 3);
    }

    #[test]
    fn minimized_windows_keep_their_button() {
        let mut desktop = desktop(1280., 3);
        desktop.minimize_window("w1");

        let layout = reflow(&desktop);
        assert_eq!(layout.buttons.len(), 3);
        assert!(layout.buttons[1].minimized);
        assert!(!layout.buttons[0].minimized);
    }

    #[test]
    fn focused_flag_follows_the_topmost_live_window() {
        let mut desktop = desktop(1280., 3);
        let layout = reflow(&desktop);
        assert!(layout.buttons[2].focused);

        desktop.focus_window("w0");
        let layout = reflow(&desktop);
        assert!(layout.buttons[0].focused);
        assert!(!layout.buttons[2].focused);

        // Minimizing the focused window passes focus down the stack.
        desktop.minimize_window("w0");
        let layout = reflow(&desktop);
        assert!(!layout.buttons[0].focused);
        assert!(layout.buttons[2].focused);
    }

    #[test]
    fn empty_stack_is_an_empty_strip() {
        let desktop = desktop(1280., 0);
        let layout = reflow(&desktop);
        assert!(layout.buttons.is_empty());
        assert!(layout.overflow.is_none());
    }
}
