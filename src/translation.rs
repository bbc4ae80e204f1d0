//! Final translation of watermark content on the page.
//!
//! Combines the page size, the (rotated) content extent and the positioning
//! properties into the point where the renderer places the content origin.
//! Page origin is bottom-left, x right, y up.
//!
//! Three positioning schemes:
//!
//! - **Relative**: positions are fractions of the free space
//!   `page - content`, so `0.0` hugs the left/bottom edge and `1.0` the
//!   right/top edge. Inversion flags have no effect.
//! - **Absolute**: positions are points from the left/bottom edges.
//! - **Absolute, inverted**: positions are points from the right/top edges.
//!
//! Nothing is clamped. Content may land partly or fully off the page.

use crate::extent::RotatedExtent;
use crate::properties::PlacementProperties;

/// Where the content origin goes on the page.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TranslationVector {
    pub x: f64,
    pub y: f64,
}

impl TranslationVector {
    /// Create a translation.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Compute the translation for content of the given `extent` on a
/// `page_width × page_height` page.
///
/// `extent` must have been computed with the anchor
/// [`Anchor::for_properties(props)`](crate::Anchor::for_properties); its
/// offsets carry the sign that matches the edge being measured from.
///
/// ```
/// use zenwatermark::{Anchor, PlacementProperties, RotatedExtent, compute_translation};
///
/// let props = PlacementProperties::default()
///     .with_position(50.0, 0.0)
///     .with_inversion(true, false);
/// let extent = RotatedExtent::compute(100.0, 20.0, props.rotation_degrees(), Anchor::for_properties(&props));
///
/// let t = compute_translation(600.0, 800.0, &extent, &props);
/// assert_eq!(t.x, 450.0);
/// ```
pub fn compute_translation(
    page_width: f64,
    page_height: f64,
    extent: &RotatedExtent,
    props: &PlacementProperties,
) -> TranslationVector {
    let RotatedExtent {
        width,
        height,
        x_offset,
        y_offset,
    } = *extent;

    if props.relative_coordinates {
        return TranslationVector {
            x: (page_width - width) * props.x_position + x_offset,
            y: (page_height - height) * props.y_position + y_offset,
        };
    }

    TranslationVector {
        x: absolute_axis(page_width, width, props.x_position, x_offset, props.invert_x),
        y: absolute_axis(page_height, height, props.y_position, y_offset, props.invert_y),
    }
}

/// One axis of absolute positioning. When inverted, the position counts from
/// the far edge: the box's far side sits `position` points inside it.
fn absolute_axis(page: f64, extent: f64, position: f64, offset: f64, invert: bool) -> f64 {
    if invert {
        page - extent - (position + offset)
    } else {
        position + offset
    }
}
