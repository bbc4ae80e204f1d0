//! SVG visualization of watermark placements.
//!
//! Draws each page as a panel with the rotated content outline, its
//! axis-aligned bounding box and the content origin, so positioning modes can
//! be checked by eye.
//!
//! # Example
//!
//! ```
//! use zenwatermark::{Content, PlacementProperties, plan_placement, svg::render_placement_svg};
//!
//! let props = PlacementProperties::default()
//!     .with_relative_position(0.5, 0.5)
//!     .with_rotation(45);
//! let placement = plan_placement(612.0, 792.0, &Content::image(200.0, 80.0), &props).unwrap();
//!
//! let svg = render_placement_svg(612.0, 792.0, &placement);
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use num_traits::Float;

use crate::plan::Placement;

/// Maximum width of a page panel.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum height of a page panel.
const MAX_PANEL_H: f64 = 300.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 40.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;
/// Height of annotation text area below each panel.
const ANNOTATION_H: f64 = 20.0;
/// Radius of the origin marker.
const ORIGIN_R: f64 = 3.0;

/// One page panel.
struct Panel<'a> {
    label: String,
    page_w: f64,
    page_h: f64,
    placement: &'a Placement,
    annotation: String,
}

/// Render one page and its placement as a complete SVG document.
pub fn render_placement_svg(page_width: f64, page_height: f64, placement: &Placement) -> String {
    render_pages_svg(&[(page_width, page_height)], core::slice::from_ref(placement))
}

/// Render a vertical sequence of page panels, one per `(page, placement)` pair.
///
/// Extra entries in the longer slice are ignored.
pub fn render_pages_svg(pages: &[(f64, f64)], placements: &[Placement]) -> String {
    let panels: Vec<Panel<'_>> = pages
        .iter()
        .zip(placements)
        .enumerate()
        .map(|(i, (&(w, h), p))| Panel {
            label: format!("Page {}  {}×{}", i + 1, fmt_num(w), fmt_num(h)),
            page_w: w,
            page_h: h,
            placement: p,
            annotation: format!(
                "origin ({}, {}), box {}×{}, rotate {}°",
                fmt_num(p.translation.x),
                fmt_num(p.translation.y),
                fmt_num(p.width),
                fmt_num(p.height),
                fmt_num(Float::to_degrees(p.rotation_radians)),
            ),
        })
        .collect();
    render_panels(&panels)
}

/// Corners of the drawn content in page coordinates (y up).
fn content_corners(p: &Placement) -> [(f64, f64); 4] {
    let (sin, cos) = Float::sin_cos(p.rotation_radians);
    let (tx, ty) = (p.translation.x, p.translation.y);
    let map = |x: f64, y: f64| (tx + x * cos - y * sin, ty + x * sin + y * cos);
    [
        map(0.0, 0.0),
        map(p.natural_width, 0.0),
        map(p.natural_width, p.natural_height),
        map(0.0, p.natural_height),
    ]
}

/// Scale a page to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(w: f64, h: f64) -> (f64, f64, f64) {
    if w <= 0.0 || h <= 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn render_panels(panels: &[Panel<'_>]) -> String {
    if panels.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let panel_h = LABEL_H + MAX_PANEL_H + ANNOTATION_H;
    let total_h = 2.0 * MARGIN_TOP + panels.len() as f64 * panel_h
        + (panels.len() - 1) as f64 * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(2048 * panels.len());

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .page { fill: #f4f4f4; stroke: #999; stroke-width: 1; }
  .bbox { fill: none; stroke: #d08a2c; stroke-width: 1; stroke-dasharray: 4,2; }
  .content { fill: #6ba3d6; fill-opacity: 0.6; stroke: #2c6faa; stroke-width: 1.5; }
  .origin { fill: #c0392b; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .page { fill: #2d2d2d; stroke: #555; }
    .content { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let center_x = total_w / 2.0;
    let mut y = MARGIN_TOP;

    for panel in panels {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&panel.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (pw, ph, scale) = scale_to_fit(panel.page_w, panel.page_h);
        let left = center_x - pw / 2.0;
        let top = y;
        // Page y-up → SVG y-down within this panel.
        let to_svg = |(x, yy): (f64, f64)| (left + x * scale, top + (panel.page_h - yy) * scale);

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="page"/>"#,
            left, top, pw, ph
        ));
        svg.push('\n');

        let corners = content_corners(panel.placement).map(to_svg);

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(cx, cy) in &corners {
            min_x = min_x.min(cx);
            min_y = min_y.min(cy);
            max_x = max_x.max(cx);
            max_y = max_y.max(cy);
        }
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="bbox"/>"#,
            min_x,
            min_y,
            max_x - min_x,
            max_y - min_y
        ));
        svg.push('\n');

        let points: Vec<String> = corners
            .iter()
            .map(|(cx, cy)| format!("{cx:.1},{cy:.1}"))
            .collect();
        svg.push_str(&format!(
            r#"<polygon points="{}" class="content"/>"#,
            points.join(" ")
        ));
        svg.push('\n');

        let (ox, oy) = corners[0];
        svg.push_str(&format!(
            r#"<circle cx="{ox:.1}" cy="{oy:.1}" r="{ORIGIN_R}" class="origin"/>"#
        ));
        svg.push('\n');

        y += MAX_PANEL_H;
        svg.push_str(&format!(
            r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&panel.annotation)
        ));
        svg.push('\n');
        y += ANNOTATION_H + PANEL_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

/// Format a coordinate without trailing zeros: `250`, `12.5`, `-0.33`.
fn fmt_num(v: f64) -> String {
    let rounded = Float::round(v * 100.0) / 100.0;
    if rounded == Float::trunc(rounded) {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Content, plan_pages, plan_placement};
    use crate::properties::PlacementProperties;

    #[test]
    fn svg_single_page() {
        let props = PlacementProperties::default().with_relative_position(0.5, 0.5);
        let p = plan_placement(600.0, 800.0, &Content::image(100.0, 50.0), &props).unwrap();
        let svg = render_placement_svg(600.0, 800.0, &p);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Page 1  600×800"));
        assert!(svg.contains("origin (250, 375)"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn svg_shows_rotation() {
        let props = PlacementProperties::default().with_rotation(-45);
        let p = plan_placement(600.0, 800.0, &Content::image(100.0, 50.0), &props).unwrap();
        let svg = render_placement_svg(600.0, 800.0, &p);
        assert!(svg.contains("rotate -45°"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("class=\"bbox\""));
    }

    #[test]
    fn svg_one_panel_per_page() {
        let props = PlacementProperties::default();
        let pages = [(600.0, 800.0), (800.0, 600.0), (300.0, 300.0)];
        let placements = plan_pages(pages, &Content::image(10.0, 10.0), &props).unwrap();
        let svg = render_pages_svg(&pages, &placements);
        assert_eq!(svg.matches("class=\"page\"").count(), 3);
        assert!(svg.contains("Page 3  300×300"));
    }

    #[test]
    fn svg_empty_is_valid() {
        let svg = render_pages_svg(&[], &[]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("/>"));
    }

    #[test]
    fn unrotated_bbox_matches_content() {
        let props = PlacementProperties::default().with_position(0.0, 0.0);
        let p = plan_placement(300.0, 300.0, &Content::image(100.0, 50.0), &props).unwrap();
        let svg = render_placement_svg(300.0, 300.0, &p);
        // Scale is 1:1 for a 300×300 page; content sits on the bottom-left.
        assert!(svg.contains(r#"<rect x="50.0" y="302.0" width="100.0" height="50.0" class="bbox"/>"#));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(250.0), "250");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.333), "-0.33");
    }

    #[test]
    fn escapes_xml() {
        assert_eq!(escape_xml("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
