//! Seeded scatter placement.
//!
//! Positions are a pure function of (icon list, bounding sizes, region,
//! tuning), so every relayout of the same viewport reproduces the same
//! desktop. Randomness comes from a per-(icon, attempt) seeded generator,
//! never from ambient state.

use std::iter::zip;

use tracing::trace;
use vitrine_config::{DesktopPart, LabelWidth};

use crate::geometry::{Point, Rect, Size};
use crate::viewport::Breakpoint;

/// Attempts per icon before the best-effort fallback.
const MAX_ATTEMPTS: u64 = 100;

/// Samples taken by the best-effort fallback.
const FALLBACK_SAMPLES: u64 = 20;

/// Vertical room under the glyph for the label line.
const LABEL_HEIGHT: f64 = 18.;

/// Presentation metrics for sizing icon bounding boxes.
#[derive(Debug, Clone, Copy)]
pub struct IconMetrics<'a> {
    /// Glyph size at the current breakpoint.
    pub glyph_size: f64,
    /// Label width for titles without a measured override.
    pub default_label_width: f64,
    /// Measured label widths by title.
    pub labels: &'a [LabelWidth],
    /// Required clearance between bounding boxes.
    pub gap: f64,
    /// Factor on combined half-extents for the center distance rule.
    pub spacing: f64,
}

impl<'a> IconMetrics<'a> {
    pub fn new(desktop: &'a DesktopPart, breakpoint: Breakpoint) -> Self {
        let glyph_size = match breakpoint {
            Breakpoint::Mobile => desktop.icon_size.mobile,
            Breakpoint::Tablet => desktop.icon_size.tablet,
            Breakpoint::Desktop => desktop.icon_size.desktop,
        };

        Self {
            glyph_size,
            default_label_width: desktop.label_width,
            labels: &desktop.labels,
            gap: desktop.icon_gap,
            spacing: desktop.icon_spacing,
        }
    }

    /// Bounding box of one icon: the glyph plus the label underneath.
    pub fn bounding_size(&self, title: &str) -> Size {
        let label_width = self
            .labels
            .iter()
            .find(|label| label.title == title)
            .map(|label| label.width)
            .unwrap_or(self.default_label_width);

        Size::new(
            f64::max(self.glyph_size, label_width),
            self.glyph_size + LABEL_HEIGHT,
        )
    }
}

/// Computes a position for every icon, in order.
///
/// Never fails: an icon that exhausts its attempt budget takes the sampled
/// position farthest from the crowd, overlap allowed.
pub fn scatter(ids: &[&str], sizes: &[Size], region: Rect, gap: f64, spacing: f64) -> Vec<Point> {
    debug_assert_eq!(ids.len(), sizes.len());

    let mut placed: Vec<(Point, Size)> = Vec::with_capacity(ids.len());
    for (id, &size) in zip(ids, sizes) {
        let pos = place_one(id, size, region, &placed, gap, spacing);
        placed.push((pos, size));
    }

    placed.into_iter().map(|(pos, _)| pos).collect()
}

fn place_one(
    id: &str,
    size: Size,
    region: Rect,
    placed: &[(Point, Size)],
    gap: f64,
    spacing: f64,
) -> Point {
    for attempt in 0..MAX_ATTEMPTS {
        let pos = candidate(id, attempt, size, region);
        if clears(pos, size, placed, gap, spacing) {
            return pos;
        }
    }

    trace!("icon {id}: no clear position within {MAX_ATTEMPTS} attempts, taking best effort");

    let mut best = candidate(id, MAX_ATTEMPTS, size, region);
    let mut best_dist = min_center_distance(best, size, placed);
    for attempt in MAX_ATTEMPTS + 1..MAX_ATTEMPTS + FALLBACK_SAMPLES {
        let pos = candidate(id, attempt, size, region);
        let dist = min_center_distance(pos, size, placed);
        if dist > best_dist {
            best = pos;
            best_dist = dist;
        }
    }
    best
}

/// The seeded candidate position for one (icon, attempt) pair.
///
/// Always within the region; when the region is smaller than the bounding
/// box, the top-left corner wins.
fn candidate(id: &str, attempt: u64, size: Size, region: Rect) -> Point {
    let mut rng = fastrand::Rng::with_seed(seed("icon", id, attempt));

    let free_w = f64::max(region.size.w - size.w, 0.);
    let free_h = f64::max(region.size.h - size.h, 0.);
    Point::new(
        region.loc.x + rng.f64() * free_w,
        region.loc.y + rng.f64() * free_h,
    )
}

/// FNV-1a over a domain tag, an id, and a sequence number.
///
/// The domain tag keeps independently seeded streams (placement attempts,
/// spawn positions) distinct even for the same id and number.
pub(crate) fn seed(domain: &str, id: &str, n: u64) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    let bytes = domain.bytes().chain([b'/']).chain(id.bytes());
    for byte in bytes.chain(n.to_le_bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Whether a candidate clears every placed icon.
fn clears(pos: Point, size: Size, placed: &[(Point, Size)], gap: f64, spacing: f64) -> bool {
    let rect = Rect::new(pos, size);
    let center = rect.center();

    placed.iter().all(|&(other_pos, other_size)| {
        // Axis-aligned overlap test against the other box padded by the gap.
        let padded = Rect::new(
            Point::new(other_pos.x - gap, other_pos.y - gap),
            Size::new(other_size.w + gap * 2., other_size.h + gap * 2.),
        );
        if rect.overlaps(&padded) {
            return false;
        }

        // Center distance rule, scaled by the pair's combined half-extents.
        let other = Rect::new(other_pos, other_size);
        let min_dist = spacing * (half_extent(size) + half_extent(other_size));
        center.distance(other.center()) >= min_dist
    })
}

fn half_extent(size: Size) -> f64 {
    f64::min(size.w, size.h) / 2.
}

fn min_center_distance(pos: Point, size: Size, placed: &[(Point, Size)]) -> f64 {
    let center = Rect::new(pos, size).center();
    placed
        .iter()
        .map(|&(other_pos, other_size)| center.distance(Rect::new(other_pos, other_size).center()))
        .min_by(|a, b| f64::total_cmp(a, b))
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use vitrine_config::Config;

    use super::*;
    use crate::viewport::icon_region;

    fn stock_items(config: &Config, breakpoint: Breakpoint) -> (Vec<&str>, Vec<Size>) {
        let metrics = IconMetrics::new(&config.desktop, breakpoint);
        let ids = config
            .icons
            .iter()
            .map(|icon| icon.id.0.as_str())
            .collect();
        let sizes = config
            .icons
            .iter()
            .map(|icon| metrics.bounding_size(&icon.title))
            .collect();
        (ids, sizes)
    }

    fn assert_pairwise_clear(positions: &[Point], sizes: &[Size]) {
        for i in 0..positions.len() {
            for j in 0..i {
                let a = Rect::new(positions[i], sizes[i]);
                let b = Rect::new(positions[j], sizes[j]);
                assert!(!a.overlaps(&b), "icons {i} and {j} overlap: {a:?} vs {b:?}");
            }
        }
    }

    fn assert_in_bounds(positions: &[Point], sizes: &[Size], region: Rect) {
        let eps = 1e-6;
        for (i, (pos, size)) in zip(positions, sizes).enumerate() {
            assert!(pos.x >= region.loc.x - eps, "icon {i} leaks left");
            assert!(pos.y >= region.loc.y - eps, "icon {i} leaks up");
            assert!(pos.x + size.w <= region.right() + eps, "icon {i} leaks right");
            assert!(pos.y + size.h <= region.bottom() + eps, "icon {i} leaks down");
        }
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let config = Config::default();
        let (ids, sizes) = stock_items(&config, Breakpoint::Desktop);
        let region = icon_region(Size::new(1280., 800.), &config);

        let first = scatter(&ids, &sizes, region, 6., 1.);
        let second = scatter(&ids, &sizes, region, 6., 1.);
        assert_eq!(first, second);
    }

    #[test]
    fn stock_icons_clear_at_desktop_viewport() {
        let config = Config::default();
        let (ids, sizes) = stock_items(&config, Breakpoint::Desktop);
        let region = icon_region(Size::new(1280., 800.), &config);

        let positions = scatter(&ids, &sizes, region, 6., 1.);
        assert_eq!(positions.len(), 13);
        assert_pairwise_clear(&positions, &sizes);
        assert_in_bounds(&positions, &sizes, region);
    }

    #[test]
    fn stock_icons_clear_at_mobile_viewport() {
        let config = Config::default();
        let (ids, sizes) = stock_items(&config, Breakpoint::Mobile);
        let region = icon_region(Size::new(375., 667.), &config);

        let positions = scatter(&ids, &sizes, region, 6., 1.);
        assert_pairwise_clear(&positions, &sizes);
        assert_in_bounds(&positions, &sizes, region);
    }

    #[test]
    fn mobile_boxes_are_smaller_than_desktop() {
        let config = Config::default();
        let mobile = IconMetrics::new(&config.desktop, Breakpoint::Mobile);
        let desktop = IconMetrics::new(&config.desktop, Breakpoint::Desktop);

        let small = mobile.bounding_size("Quiz");
        let large = desktop.bounding_size("Quiz");
        assert!(small.h < large.h);
        assert!(small.w <= large.w);
    }

    #[test]
    fn label_override_widens_the_box() {
        let config = Config::default();
        let metrics = IconMetrics::new(&config.desktop, Breakpoint::Desktop);

        let plain = metrics.bounding_size("Quiz");
        let wide = metrics.bounding_size("Now Playing");
        assert!(wide.w > plain.w);
    }

    #[test]
    fn placement_never_fails_in_a_crowded_region() {
        let region = Rect::new(Point::new(0., 0.), Size::new(150., 150.));
        let ids = ["a", "b", "c", "d", "e"];
        let sizes = vec![Size::new(100., 80.); 5];

        let positions = scatter(&ids, &sizes, region, 6., 1.);
        assert_eq!(positions.len(), 5);
        assert_in_bounds(&positions, &sizes, region);
    }

    #[test]
    fn seeds_vary_by_icon_and_attempt() {
        assert_ne!(seed("icon", "player", 0), seed("icon", "player", 1));
        assert_ne!(seed("icon", "player", 0), seed("icon", "lyrics", 0));
        assert_eq!(seed("icon", "player", 7), seed("icon", "player", 7));
    }

    #[test]
    fn seed_domains_are_distinct_streams() {
        assert_ne!(seed("icon", "player", 3), seed("spawn", "player", 3));
        // The tag and id fold in with a separator, so shifting characters
        // between them can't collide either.
        assert_ne!(seed("icon", "x", 0), seed("ico", "nx", 0));
    }

    #[test]
    fn seeds_use_the_full_sequence_range() {
        let low = seed("spawn", "player", 7);
        let high = seed("spawn", "player", 7 + (1 << 32));
        assert_ne!(low, high);
    }
}
