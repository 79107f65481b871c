//! Small helpers shared across the crate.

use bitflags::bitflags;

use crate::geometry::{Point, Rect, Size};

bitflags! {
    /// Window edges participating in a resize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResizeEdge: u32 {
        const TOP = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;

        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        const TOP_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        const BOTTOM_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();

        const LEFT_RIGHT = Self::LEFT.bits() | Self::RIGHT.bits();
        const TOP_BOTTOM = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

/// Clamps `rect` so it lies within `area` where possible.
///
/// When `rect` is larger than `area`, its top-left edges win.
pub fn clamp_preferring_top_left_in_area(area: Rect, rect: &mut Rect) {
    rect.loc.x = f64::min(rect.loc.x, area.loc.x + area.size.w - rect.size.w);
    rect.loc.y = f64::min(rect.loc.y, area.loc.y + area.size.h - rect.size.h);

    rect.loc.x = f64::max(rect.loc.x, area.loc.x);
    rect.loc.y = f64::max(rect.loc.y, area.loc.y);
}

/// Centers a `size` rectangle in `area`, preferring its top-left corner to
/// remain visible if it doesn't fit.
pub fn center_preferring_top_left_in_area(area: Rect, size: Size) -> Point {
    let area_center = area.center();
    let loc = area_center - size.downscale(2.).to_point();

    let mut rect = Rect::new(loc, size);
    clamp_preferring_top_left_in_area(area, &mut rect);
    rect.loc
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn clamp_keeps_fitting_rect() {
        let area = Rect::new(Point::new(0., 32.), Size::new(1280., 768.));
        let mut rect = Rect::new(Point::new(100., 100.), Size::new(400., 300.));
        clamp_preferring_top_left_in_area(area, &mut rect);
        assert_eq!(rect.loc, Point::new(100., 100.));
    }

    #[test]
    fn clamp_pulls_rect_inside() {
        let area = Rect::new(Point::new(0., 32.), Size::new(1280., 768.));
        let mut rect = Rect::new(Point::new(1200., 0.), Size::new(400., 300.));
        clamp_preferring_top_left_in_area(area, &mut rect);
        assert_abs_diff_eq!(rect.loc.x, 880.);
        assert_abs_diff_eq!(rect.loc.y, 32.);
    }

    #[test]
    fn clamp_prefers_top_left_when_oversized() {
        let area = Rect::new(Point::new(0., 0.), Size::new(300., 200.));
        let mut rect = Rect::new(Point::new(50., 50.), Size::new(400., 300.));
        clamp_preferring_top_left_in_area(area, &mut rect);
        assert_eq!(rect.loc, Point::new(0., 0.));
    }

    #[test]
    fn center_in_area() {
        let area = Rect::new(Point::new(0., 32.), Size::new(1280., 768.));
        let loc = center_preferring_top_left_in_area(area, Size::new(400., 300.));
        assert_abs_diff_eq!(loc.x, 440.);
        assert_abs_diff_eq!(loc.y, 266.);
    }
}
