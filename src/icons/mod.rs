//! The desktop icon field.
//!
//! Owns the computed icon layout for the current viewport, plus any manual
//! drag overrides on top of it. Overrides live only until the next
//! viewport-driven relayout, which recomputes every position from scratch.
//!
//! ```text
//! icons/
//! ├── mod.rs       - IconField: layout state, relayout, overrides
//! ├── placement.rs - seeded scatter algorithm
//! └── gesture.rs   - click / double-click / drag disambiguation
//! ```

mod gesture;
pub mod placement;

use std::rc::Rc;

use serde::Serialize;
use vitrine_config::Config;

use crate::geometry::{Point, Rect, Size};
use crate::viewport::{icon_region, Breakpoint};

pub use gesture::DRAG_THRESHOLD;
use gesture::Gesture;
use placement::IconMetrics;

/// One icon with its computed (or dragged) position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedIcon {
    pub id: String,
    pub title: String,
    pub pos: Point,
    /// Bounding box size at the current breakpoint.
    pub size: Size,
    /// Launch on double click instead of single click.
    pub double_click: bool,
}

/// Icon layout state for one desktop.
#[derive(Debug)]
pub struct IconField {
    icons: Vec<PlacedIcon>,
    region: Rect,
    gesture: Option<Gesture>,
    /// One-shot: set after a drag so the trailing click report is swallowed.
    suppress_click: Option<String>,
    config: Rc<Config>,
}

impl IconField {
    pub fn new(view_size: Size, config: Rc<Config>) -> Self {
        let mut field = Self {
            icons: Vec::new(),
            region: Rect::default(),
            gesture: None,
            suppress_click: None,
            config,
        };
        field.relayout(view_size);
        field
    }

    /// Recomputes every icon position for a new viewport size.
    ///
    /// Drops all drag overrides and any gesture in progress: the positions
    /// they referred to no longer exist.
    pub fn relayout(&mut self, view_size: Size) {
        let _span = tracy_client::span!("IconField::relayout");

        let config = self.config.clone();
        let breakpoint = Breakpoint::from_width(view_size.w, &config.breakpoints);
        let metrics = IconMetrics::new(&config.desktop, breakpoint);

        self.region = icon_region(view_size, &config);
        self.gesture = None;
        self.suppress_click = None;

        let ids: Vec<&str> = config.icons.iter().map(|icon| icon.id.0.as_str()).collect();
        let sizes: Vec<Size> = config
            .icons
            .iter()
            .map(|icon| metrics.bounding_size(&icon.title))
            .collect();
        let positions = placement::scatter(
            &ids,
            &sizes,
            self.region,
            config.desktop.icon_gap,
            config.desktop.icon_spacing,
        );

        self.icons = config
            .icons
            .iter()
            .zip(positions)
            .zip(sizes)
            .map(|((icon, pos), size)| PlacedIcon {
                id: icon.id.0.clone(),
                title: icon.title.clone(),
                pos,
                size,
                double_click: icon.double_click,
            })
            .collect();
    }

    /// Icons in declaration order.
    pub fn icons(&self) -> &[PlacedIcon] {
        &self.icons
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.icons.iter().find(|icon| icon.id == id).map(|icon| icon.pos)
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    fn idx_of(&self, id: &str) -> Option<usize> {
        self.icons.iter().position(|icon| icon.id == id)
    }
}
