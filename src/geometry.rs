//! Geometry primitives in logical pixel coordinates.

use std::ops::{Add, Sub};

use serde::Serialize;

/// A point in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(self, size: Size) -> Point {
        Point::new(self.x + size.w, self.y + size.h)
    }
}

/// A size in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn downscale(self, factor: f64) -> Self {
        Self::new(self.w / factor, self.h / factor)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.w, self.h)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub loc: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(loc: Point, size: Size) -> Self {
        Self { loc, size }
    }

    pub fn right(&self) -> f64 {
        self.loc.x + self.size.w
    }

    pub fn bottom(&self) -> f64 {
        self.loc.y + self.size.h
    }

    pub fn center(&self) -> Point {
        self.loc + self.size.downscale(2.)
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.loc.x <= other.loc.x
            && self.loc.y <= other.loc.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.loc.x < other.right()
            && other.loc.x < self.right()
            && self.loc.y < other.bottom()
            && other.loc.y < self.bottom()
    }

    /// Shrinks the rectangle by `amount` on every side.
    ///
    /// The size never goes negative.
    pub fn inset(&self, amount: f64) -> Rect {
        Rect::new(
            Point::new(self.loc.x + amount, self.loc.y + amount),
            Size::new(
                f64::max(self.size.w - amount * 2., 0.),
                f64::max(self.size.h - amount * 2., 0.),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn center() {
        let rect = Rect::new(Point::new(10., 20.), Size::new(100., 50.));
        let center = rect.center();
        assert_abs_diff_eq!(center.x, 60.);
        assert_abs_diff_eq!(center.y, 45.);
    }

    #[test]
    fn overlaps_is_exclusive_at_edges() {
        let a = Rect::new(Point::new(0., 0.), Size::new(10., 10.));
        let b = Rect::new(Point::new(10., 0.), Size::new(10., 10.));
        assert!(!a.overlaps(&b));

        let c = Rect::new(Point::new(9., 0.), Size::new(10., 10.));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn inset_clamps_to_zero() {
        let rect = Rect::new(Point::default(), Size::new(10., 10.));
        let inset = rect.inset(20.);
        assert_abs_diff_eq!(inset.size.w, 0.);
        assert_abs_diff_eq!(inset.size.h, 0.);
    }

    #[test]
    fn contains_rect() {
        let outer = Rect::new(Point::new(0., 0.), Size::new(100., 100.));
        let inner = Rect::new(Point::new(10., 10.), Size::new(50., 50.));
        assert!(outer.contains_rect(&inner));
        assert!(!inner.contains_rect(&outer));

        let crossing = Rect::new(Point::new(80., 80.), Size::new(50., 50.));
        assert!(!outer.contains_rect(&crossing));
    }
}
