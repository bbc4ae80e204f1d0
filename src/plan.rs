//! Per-page placement planning for text and image watermarks.
//!
//! Ties the pieces together the way a PDF watermarking pass uses them:
//! measure the content once, then for every page compute the rotated extent
//! and the translation, and hand the renderer a [`Placement`].

use alloc::vec::Vec;

use num_traits::Float;

use crate::color::Rgb;
use crate::extent::{Anchor, RotatedExtent};
use crate::properties::{PlacementProperties, PropertyError};
use crate::translation::{TranslationVector, compute_translation};

/// Name under which renderers register the alpha graphics state.
pub const TRANSPARENT_STATE: &str = "TransparentState";

/// Glyph-width collaborator for text watermarks.
///
/// Returns the advance width of `text` set in `font_family`, in glyph space
/// units (1/1000 em), as PDF font width tables report it.
pub trait TextMetrics {
    fn string_width(&self, font_family: &str, text: &str) -> f64;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &str) -> f64,
{
    fn string_width(&self, font_family: &str, text: &str) -> f64 {
        self(font_family, text)
    }
}

/// The watermark content to place.
#[derive(Copy, Clone)]
pub enum Content<'a> {
    /// A single line of text, measured through `metrics` at the configured
    /// font and size. Its height is the font size.
    Text {
        text: &'a str,
        metrics: &'a dyn TextMetrics,
    },
    /// An image with its natural (decoded) size. The configured scale is
    /// applied before rotation.
    Image { width: f64, height: f64 },
}

impl<'a> Content<'a> {
    /// Text content.
    pub fn text(text: &'a str, metrics: &'a dyn TextMetrics) -> Self {
        Self::Text { text, metrics }
    }

    /// Image content of the given natural size.
    pub fn image(width: f64, height: f64) -> Self {
        Self::Image { width, height }
    }

    /// Unrotated size to draw with, after font sizing or image scaling.
    ///
    /// Validates the properties this content kind depends on.
    pub fn natural_size(&self, props: &PlacementProperties) -> Result<(f64, f64), PropertyError> {
        match *self {
            Self::Text { text, metrics } => {
                props.validate_text()?;
                let units = metrics.string_width(&props.font_family, text);
                Ok((units * props.font_size / 1000.0, props.font_size))
            }
            Self::Image { width, height } => {
                props.validate()?;
                Ok((width * props.scale, height * props.scale))
            }
        }
    }
}

/// Everything a renderer needs to draw one watermark on one page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Where the content origin goes on the page.
    pub translation: TranslationVector,
    /// Bounding-box width after rotation.
    pub width: f64,
    /// Bounding-box height after rotation.
    pub height: f64,
    /// Unrotated width to draw the content with.
    pub natural_width: f64,
    /// Unrotated height to draw the content with.
    pub natural_height: f64,
    /// Counter-clockwise rotation around the content origin.
    pub rotation_radians: f64,
    pub color: Rgb,
    /// Non-stroking alpha for the [`TRANSPARENT_STATE`] graphics state.
    pub alpha: f64,
    pub graphics_state: &'static str,
}

impl Placement {
    /// Rotation and translation as a PDF matrix `[a b c d e f]`, suitable
    /// for `cm` or the text matrix `Tm`.
    pub fn transform(&self) -> [f64; 6] {
        let (sin, cos) = Float::sin_cos(self.rotation_radians);
        [
            cos,
            sin,
            -sin,
            cos,
            self.translation.x,
            self.translation.y,
        ]
    }
}

/// Plan the placement of `content` on one `page_width × page_height` page.
pub fn plan_placement(
    page_width: f64,
    page_height: f64,
    content: &Content<'_>,
    props: &PlacementProperties,
) -> Result<Placement, PropertyError> {
    let natural = content.natural_size(props)?;
    Ok(place(page_width, page_height, natural, props))
}

/// Plan the placement of `content` on every page, given as
/// `(width, height)` pairs. The content is measured once.
pub fn plan_pages<I>(
    pages: I,
    content: &Content<'_>,
    props: &PlacementProperties,
) -> Result<Vec<Placement>, PropertyError>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let natural = content.natural_size(props)?;
    Ok(pages
        .into_iter()
        .map(|(w, h)| place(w, h, natural, props))
        .collect())
}

fn place(
    page_width: f64,
    page_height: f64,
    (natural_width, natural_height): (f64, f64),
    props: &PlacementProperties,
) -> Placement {
    let degrees = props.rotation_degrees();
    let extent = RotatedExtent::compute(
        natural_width,
        natural_height,
        degrees,
        Anchor::for_properties(props),
    );
    let translation = compute_translation(page_width, page_height, &extent, props);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        page_width,
        page_height,
        x = translation.x,
        y = translation.y,
        width = extent.width,
        height = extent.height,
        rotation = degrees,
        "watermark placed"
    );

    Placement {
        translation,
        width: extent.width,
        height: extent.height,
        natural_width,
        natural_height,
        rotation_radians: Float::to_radians(degrees as f64),
        color: props.color,
        alpha: props.alpha,
        graphics_state: TRANSPARENT_STATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyKey;
    use alloc::vec;

    /// Every glyph 500 units wide.
    fn monospace(_font: &str, text: &str) -> f64 {
        text.chars().count() as f64 * 500.0
    }

    #[test]
    fn text_size_from_metrics() {
        let props = PlacementProperties::default().with_font("Courier", 20.0);
        let content = Content::text("ABCD", &monospace);
        // 4 glyphs × 500 units × 20pt / 1000
        assert_eq!(content.natural_size(&props), Ok((40.0, 20.0)));
    }

    #[test]
    fn metrics_receive_font_family() {
        let metrics = |font: &str, _text: &str| if font == "Times-Roman" { 1000.0 } else { 0.0 };
        let props = PlacementProperties::default().with_font("Times-Roman", 10.0);
        let size = Content::text("x", &metrics).natural_size(&props).unwrap();
        assert_eq!(size, (10.0, 10.0));
    }

    #[test]
    fn image_scaled_before_rotation() {
        let props = PlacementProperties::default()
            .with_scale(2.0)
            .with_rotation(90);
        let p = plan_placement(600.0, 800.0, &Content::image(100.0, 50.0), &props).unwrap();
        assert_eq!((p.natural_width, p.natural_height), (200.0, 100.0));
        assert!((p.width - 100.0).abs() < 1e-9);
        assert!((p.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn scale_ignored_for_text() {
        let props = PlacementProperties::default()
            .with_font("Courier", 10.0)
            .with_scale(3.0);
        let size = Content::text("AB", &monospace).natural_size(&props).unwrap();
        assert_eq!(size, (10.0, 10.0));
    }

    #[test]
    fn text_requires_positive_font_size() {
        let props = PlacementProperties::default().with_font("Courier", -1.0);
        let err = plan_placement(600.0, 800.0, &Content::text("A", &monospace), &props).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::OutOfRange {
                key: PropertyKey::FontSize,
                ..
            }
        ));
        // Images don't care about the font.
        assert!(plan_placement(600.0, 800.0, &Content::image(10.0, 10.0), &props).is_ok());
    }

    #[test]
    fn alpha_and_color_pass_through() {
        let props = PlacementProperties::default()
            .with_alpha(1.0)
            .with_color(Rgb::new(1, 2, 3));
        let p = plan_placement(600.0, 800.0, &Content::image(10.0, 10.0), &props).unwrap();
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.color, Rgb::new(1, 2, 3));
        assert_eq!(p.graphics_state, "TransparentState");
    }

    #[test]
    fn every_page_planned_independently() {
        let props = PlacementProperties::default().with_relative_position(0.5, 0.5);
        let pages = vec![(600.0, 800.0), (800.0, 600.0), (100.0, 100.0)];
        let placements = plan_pages(pages, &Content::image(100.0, 50.0), &props).unwrap();
        let xy: Vec<(f64, f64)> = placements
            .iter()
            .map(|p| (p.translation.x, p.translation.y))
            .collect();
        assert_eq!(xy, vec![(250.0, 375.0), (350.0, 275.0), (0.0, 25.0)]);
    }

    #[test]
    fn plan_pages_rejects_before_planning() {
        let props = PlacementProperties::default().with_alpha(-0.1);
        let err = plan_pages([(600.0, 800.0)], &Content::image(1.0, 1.0), &props).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::OutOfRange {
                key: PropertyKey::AlphaColor,
                ..
            }
        ));
    }

    #[test]
    fn transform_matrix() {
        let props = PlacementProperties::default()
            .with_position(10.0, 20.0)
            .with_rotation(90);
        let p = plan_placement(600.0, 800.0, &Content::image(100.0, 50.0), &props).unwrap();
        let [a, b, c, d, e, f] = p.transform();
        assert!(a.abs() < 1e-12 && d.abs() < 1e-12);
        assert!((b - 1.0).abs() < 1e-12);
        assert!((c + 1.0).abs() < 1e-12);
        assert_eq!((e, f), (p.translation.x, p.translation.y));

        let p = plan_placement(600.0, 800.0, &Content::image(100.0, 50.0), &PlacementProperties::default()).unwrap();
        assert_eq!(p.transform(), [1.0, 0.0, -0.0, 1.0, 0.0, 0.0]);
    }
}
