//! Watermark placement geometry for fixed-size pages.
//!
//! Pure geometry with no rendering or PDF parsing. `no_std` compatible;
//! `alloc` is required for property strings.
//!
//! # Modules
//!
//! - [`color`]: hex color parsing (`#RRGGBB`, `0xRRGGBB`, `RRGGBB`)
//! - [`extent`]: bounding box and re-anchoring offsets of rotated content
//! - [`properties`]: watermark properties and string-map ingestion
//! - [`translation`]: absolute/relative/inverted positioning on the page
//! - [`plan`]: per-page placement planning for text and image watermarks
//! - `svg`: placement diagrams for debugging (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zenwatermark::{Content, PlacementProperties, plan_placement};
//!
//! let mut props = PlacementProperties::default();
//! props
//!     .apply_overrides([("relativeCoordinates", "true"), ("xPosition", "0.5"), ("yPosition", "0.5")])
//!     .unwrap();
//!
//! let placement = plan_placement(600.0, 800.0, &Content::image(100.0, 50.0), &props).unwrap();
//! assert_eq!((placement.translation.x, placement.translation.y), (250.0, 375.0));
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod color;
pub mod extent;
pub mod plan;
pub mod properties;
#[cfg(feature = "svg")]
pub mod svg;
pub mod translation;

pub use color::{Rgb, parse_hex_color};
pub use extent::{Anchor, HorizontalEdge, RotatedExtent, VerticalEdge};
pub use plan::{Content, Placement, TRANSPARENT_STATE, TextMetrics, plan_pages, plan_placement};
pub use properties::{PlacementProperties, PropertyError, PropertyKey};
pub use translation::{TranslationVector, compute_translation};
