//! Breakpoint classification and derived screen regions.

use serde::Serialize;
use vitrine_config::{Breakpoints, Config, Taskbar, TaskbarPosition};

use crate::geometry::{Point, Rect, Size};

/// Layout tier derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(width: f64, breakpoints: &Breakpoints) -> Self {
        if width < breakpoints.tablet {
            Self::Mobile
        } else if width < breakpoints.desktop {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

/// The viewport minus the taskbar strip.
pub fn working_area(view_size: Size, taskbar: &Taskbar) -> Rect {
    let height = f64::max(view_size.h - taskbar.height, 0.);
    let top = match taskbar.position {
        TaskbarPosition::Top => taskbar.height,
        TaskbarPosition::Bottom => 0.,
    };
    Rect::new(Point::new(0., top), Size::new(view_size.w, height))
}

/// The working area inset by the desktop padding; icons live here.
pub fn icon_region(view_size: Size, config: &Config) -> Rect {
    working_area(view_size, &config.taskbar).inset(config.desktop.padding)
}
