//! Bounding box and re-anchoring offsets for rotated watermark content.
//!
//! Content is modelled the way text sits on a baseline: the unrotated box
//! spans `[0, w] × [-h, 0]` with its baseline-left corner at the local
//! origin, in a y-down frame. Rotating that box by the negated angle gives
//! the footprint the content has once the renderer rotates it forward
//! (counter-clockwise) in the y-up page frame.
//!
//! ```text
//!        y-up page frame, 90° counter-clockwise
//!
//!        ┌────┐ ← width and height swap
//!        │ T  │
//!        │ X  │
//!        │ E  │
//!        │ T  │
//!        └────● ← local origin stays on the bottom-right corner
//! ```
//!
//! # Example
//!
//! ```
//! use zenwatermark::{Anchor, RotatedExtent};
//!
//! let extent = RotatedExtent::compute(100.0, 50.0, 90, Anchor::default());
//! assert!((extent.width - 50.0).abs() < 1e-9);
//! assert!((extent.height - 100.0).abs() < 1e-9);
//! // Box extends left of the origin; shift right by its width.
//! assert!((extent.x_offset - 50.0).abs() < 1e-9);
//! ```

use num_traits::Float;

use crate::properties::PlacementProperties;

/// Side of the content box that `xPosition` is measured to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    /// Position measured from the page's left edge.
    #[default]
    Left,
    /// Position measured from the page's right edge (`invertX`).
    Right,
}

/// Side of the content box that `yPosition` is measured to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    /// Position measured from the page's bottom edge.
    #[default]
    Bottom,
    /// Position measured from the page's top edge (`invertY`).
    Top,
}

/// Anchor edges used to re-anchor rotated content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub horizontal: HorizontalEdge,
    pub vertical: VerticalEdge,
}

impl Anchor {
    /// Create an anchor from its two edges.
    pub const fn new(horizontal: HorizontalEdge, vertical: VerticalEdge) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Anchor implied by the inversion flags.
    ///
    /// Relative positioning always anchors left/bottom: the flags only take
    /// effect in absolute mode.
    pub fn for_properties(props: &PlacementProperties) -> Self {
        let horizontal = if props.invert_x && !props.relative_coordinates {
            HorizontalEdge::Right
        } else {
            HorizontalEdge::Left
        };
        let vertical = if props.invert_y && !props.relative_coordinates {
            VerticalEdge::Top
        } else {
            VerticalEdge::Bottom
        };
        Self::new(horizontal, vertical)
    }
}

/// Axis-aligned extent of (possibly rotated) content plus the offsets that
/// move the rotation origin so the box lands on its anchor edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RotatedExtent {
    /// Bounding-box width after rotation.
    pub width: f64,
    /// Bounding-box height after rotation.
    pub height: f64,
    /// Horizontal shift from the box anchor to the content origin.
    pub x_offset: f64,
    /// Vertical shift from the box anchor to the content origin.
    pub y_offset: f64,
}

impl RotatedExtent {
    /// Extent of unrotated content: its natural size, no offsets.
    pub const fn unrotated(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }

    /// Compute the rotated extent of `natural_width × natural_height` content
    /// rotated `rotation_degrees` counter-clockwise.
    pub fn compute(
        natural_width: f64,
        natural_height: f64,
        rotation_degrees: i32,
        anchor: Anchor,
    ) -> Self {
        if rotation_degrees == 0 {
            return Self::unrotated(natural_width, natural_height);
        }

        let bounds = Bounds::of(&rotated_corners(
            natural_width,
            natural_height,
            rotation_degrees,
        ));
        let width = bounds.width();
        let height = bounds.height();

        let x_offset = match anchor.horizontal {
            HorizontalEdge::Left => -bounds.min_x,
            HorizontalEdge::Right => bounds.min_x,
        };
        // In the y-down frame the box bottom is `min_y + height`.
        let y_offset = match anchor.vertical {
            VerticalEdge::Bottom => bounds.min_y + height,
            VerticalEdge::Top => -(bounds.min_y + height),
        };

        Self {
            width,
            height,
            x_offset,
            y_offset,
        }
    }
}

/// Corners of the content box after rotating it by `-rotation_degrees`,
/// in the y-down local frame. Order: origin, baseline end, top-left, top-right.
fn rotated_corners(width: f64, height: f64, rotation_degrees: i32) -> [(f64, f64); 4] {
    let theta = Float::to_radians(-(rotation_degrees as f64));
    let (sin, cos) = Float::sin_cos(theta);
    let rotate = |x: f64, y: f64| (x * cos - y * sin, x * sin + y * cos);
    [
        rotate(0.0, 0.0),
        rotate(width, 0.0),
        rotate(0.0, -height),
        rotate(width, -height),
    ]
}

struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn of(points: &[(f64, f64)]) -> Self {
        let mut b = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for &(x, y) in points {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        b
    }

    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    const RIGHT_TOP: Anchor = Anchor::new(HorizontalEdge::Right, VerticalEdge::Top);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn zero_rotation_is_identity() {
        for &(w, h) in &[(1.0, 1.0), (100.0, 50.0), (612.0, 792.0), (0.5, 3000.0)] {
            for anchor in [Anchor::default(), RIGHT_TOP] {
                assert_eq!(
                    RotatedExtent::compute(w, h, 0, anchor),
                    RotatedExtent {
                        width: w,
                        height: h,
                        x_offset: 0.0,
                        y_offset: 0.0
                    }
                );
            }
        }
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let e = RotatedExtent::compute(100.0, 50.0, 90, Anchor::default());
        assert!(approx(e.width, 50.0), "{e:?}");
        assert!(approx(e.height, 100.0), "{e:?}");
        assert!(approx(e.x_offset, 50.0), "{e:?}");
        assert!(approx(e.y_offset, 0.0), "{e:?}");
    }

    #[test]
    fn quarter_turn_clockwise() {
        // -90: content hangs down-right of the origin in the y-up frame.
        let e = RotatedExtent::compute(100.0, 50.0, -90, Anchor::default());
        assert!(approx(e.width, 50.0), "{e:?}");
        assert!(approx(e.height, 100.0), "{e:?}");
        assert!(approx(e.x_offset, 0.0), "{e:?}");
        assert!(approx(e.y_offset, 100.0), "{e:?}");
    }

    #[test]
    fn half_turn_keeps_size() {
        let e = RotatedExtent::compute(100.0, 50.0, 180, Anchor::default());
        assert!(approx(e.width, 100.0), "{e:?}");
        assert!(approx(e.height, 50.0), "{e:?}");
        assert!(approx(e.x_offset, 100.0), "{e:?}");
        assert!(approx(e.y_offset, 50.0), "{e:?}");
    }

    #[test]
    fn forty_five_degrees() {
        let e = RotatedExtent::compute(100.0, 50.0, 45, Anchor::default());
        let half = core::f64::consts::FRAC_1_SQRT_2;
        assert!(approx(e.width, 150.0 * half), "{e:?}");
        assert!(approx(e.height, 150.0 * half), "{e:?}");
        assert!(approx(e.x_offset, 50.0 * half), "{e:?}");
        assert!(approx(e.y_offset, 0.0), "{e:?}");
    }

    #[test]
    fn inverted_anchor_flips_offset_signs() {
        for deg in [-135, -45, 30, 45, 90, 200, 359] {
            let near = RotatedExtent::compute(80.0, 20.0, deg, Anchor::default());
            let far = RotatedExtent::compute(80.0, 20.0, deg, RIGHT_TOP);
            assert!(approx(near.width, far.width));
            assert!(approx(near.height, far.height));
            assert!(approx(near.x_offset, -far.x_offset), "deg {deg}");
            assert!(approx(near.y_offset, -far.y_offset), "deg {deg}");
        }
    }

    #[test]
    fn full_turn_negative_matches_positive() {
        let a = RotatedExtent::compute(120.0, 40.0, -270, Anchor::default());
        let b = RotatedExtent::compute(120.0, 40.0, 90, Anchor::default());
        assert!(approx(a.width, b.width));
        assert!(approx(a.height, b.height));
        assert!(approx(a.x_offset, b.x_offset));
        assert!(approx(a.y_offset, b.y_offset));
    }

    #[test]
    fn extent_never_smaller_than_content_diagonal_projection() {
        for deg in (-359..360).step_by(7) {
            let e = RotatedExtent::compute(100.0, 50.0, deg, Anchor::default());
            assert!(e.width > 0.0 && e.height > 0.0);
            assert!(e.width <= 150.0 + EPS && e.height <= 150.0 + EPS, "deg {deg}: {e:?}");
            assert!(e.width * e.height >= 100.0 * 50.0 - 1e-6, "deg {deg}: {e:?}");
        }
    }

    #[test]
    fn anchor_from_flags() {
        let mut props = PlacementProperties::default();
        assert_eq!(Anchor::for_properties(&props), Anchor::default());

        props.invert_x = true;
        props.invert_y = true;
        assert_eq!(Anchor::for_properties(&props), RIGHT_TOP);

        props.relative_coordinates = true;
        assert_eq!(Anchor::for_properties(&props), Anchor::default());
    }
}
