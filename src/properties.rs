//! Watermark properties and string-map ingestion.
//!
//! Callers hand over a loose `key → value` map (typically straight from an
//! automation request); [`PlacementProperties::apply_overrides`] dispatches
//! each key over the closed [`PropertyKey`] set and stores typed values.
//!
//! # Example
//!
//! ```
//! use zenwatermark::{PlacementProperties, PropertyError, Rgb};
//!
//! let mut props = PlacementProperties::default();
//! props
//!     .apply_overrides([("textRotation", "405"), ("hex255Color", "#ff0000")])
//!     .unwrap();
//! assert_eq!(props.rotation_degrees(), 45);
//! assert_eq!(props.color, Rgb::new(255, 0, 0));
//!
//! let err = props.apply_override("bogus", "1").unwrap_err();
//! assert_eq!(err, PropertyError::UnknownProperty("bogus".into()));
//! ```

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::color::{Rgb, parse_hex_color};

/// Default font for text watermarks.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";
/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 72.0;
/// Default fill opacity.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Configuration error raised while ingesting or validating properties.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// Color string is not six hex digits after an optional `#`/`0x` prefix.
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
    /// Key outside the recognized property set.
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    /// Value for a numeric key does not parse as its declared type.
    #[error("invalid numeric value for {key}: {value:?}")]
    InvalidNumericFormat { key: PropertyKey, value: String },
    /// Value for a boolean key is not a recognized boolean spelling.
    #[error("invalid boolean value for {key}: {value:?}")]
    InvalidBooleanFormat { key: PropertyKey, value: String },
    /// Value parses but lies outside the range the geometry accepts.
    #[error("value out of range for {key}: {value}")]
    OutOfRange { key: PropertyKey, value: f64 },
}

/// Recognized property keys. Names are case-sensitive and have no aliases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    FontFamily,
    FontSize,
    TextRotation,
    Hex255Color,
    AlphaColor,
    XPosition,
    YPosition,
    InvertX,
    InvertY,
    RelativeCoordinates,
    Scale,
}

impl PropertyKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::FontFamily,
        Self::FontSize,
        Self::TextRotation,
        Self::Hex255Color,
        Self::AlphaColor,
        Self::XPosition,
        Self::YPosition,
        Self::InvertX,
        Self::InvertY,
        Self::RelativeCoordinates,
        Self::Scale,
    ];

    /// The wire name used in property maps.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::TextRotation => "textRotation",
            Self::Hex255Color => "hex255Color",
            Self::AlphaColor => "alphaColor",
            Self::XPosition => "xPosition",
            Self::YPosition => "yPosition",
            Self::InvertX => "invertX",
            Self::InvertY => "invertY",
            Self::RelativeCoordinates => "relativeCoordinates",
            Self::Scale => "scale",
        }
    }

    /// Look up a key by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKey {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PropertyError::UnknownProperty(String::from(s)))
    }
}

/// Style and position of one watermark operation.
///
/// Positions are pixels (points) from the anchor edges in absolute mode, or
/// fractions `0.0..=1.0` of the free space (page minus content) when
/// `relative_coordinates` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementProperties {
    /// Standard font name (text watermarks only).
    pub font_family: String,
    /// Font size in points (text watermarks only).
    pub font_size: f64,
    /// Always kept in `-359..=359`; see [`set_rotation`](Self::set_rotation).
    rotation_degrees: i32,
    pub color: Rgb,
    /// Fill opacity, 0 = fully transparent, 1 = opaque.
    pub alpha: f64,
    pub x_position: f64,
    pub y_position: f64,
    /// Measure `x_position` from the right edge (absolute mode only).
    pub invert_x: bool,
    /// Measure `y_position` from the top edge (absolute mode only).
    pub invert_y: bool,
    pub relative_coordinates: bool,
    /// Image scale factor, 1.0 = natural size (image watermarks only).
    pub scale: f64,
}

impl Default for PlacementProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementProperties {
    /// Properties with every default applied.
    pub fn new() -> Self {
        Self {
            font_family: String::from(DEFAULT_FONT_FAMILY),
            font_size: DEFAULT_FONT_SIZE,
            rotation_degrees: 0,
            color: Rgb::black(),
            alpha: DEFAULT_ALPHA,
            x_position: 0.0,
            y_position: 0.0,
            invert_x: false,
            invert_y: false,
            relative_coordinates: false,
            scale: 1.0,
        }
    }

    /// Counter-clockwise rotation in degrees, reduced modulo 360 with the
    /// sign of the input preserved.
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Set the rotation, normalizing immediately: `405 → 45`, `-450 → -90`.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation_degrees = degrees % 360;
    }

    /// Set rotation (builder form).
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.set_rotation(degrees);
        self
    }

    /// Set font family and size (builder form).
    pub fn with_font(mut self, family: &str, size: f64) -> Self {
        self.font_family = String::from(family);
        self.font_size = size;
        self
    }

    /// Set fill color (builder form).
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set opacity (builder form).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set absolute pixel position from the anchor edges (builder form).
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x_position = x;
        self.y_position = y;
        self.relative_coordinates = false;
        self
    }

    /// Set relative position as fractions of the free space (builder form).
    pub fn with_relative_position(mut self, x: f64, y: f64) -> Self {
        self.x_position = x;
        self.y_position = y;
        self.relative_coordinates = true;
        self
    }

    /// Set inversion flags (builder form).
    pub fn with_inversion(mut self, invert_x: bool, invert_y: bool) -> Self {
        self.invert_x = invert_x;
        self.invert_y = invert_y;
        self
    }

    /// Set image scale (builder form).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Apply a single `key = value` override.
    ///
    /// A blank key or blank value is skipped, keeping the current value.
    /// On error the receiver is unchanged.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), PropertyError> {
        if key.trim().is_empty() || value.trim().is_empty() {
            return Ok(());
        }
        let parsed = key.parse::<PropertyKey>();
        let result = parsed.and_then(|k| self.set(k, value));

        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(()) => tracing::trace!(key, value, "watermark property applied"),
                Err(e) => tracing::debug!(key, value, error = %e, "watermark property rejected"),
            }
        }

        result
    }

    /// Apply a batch of overrides atomically.
    ///
    /// Every entry is applied to a copy; the copy replaces `self` only when all
    /// of them succeed. On the first failure the error is returned and `self`
    /// keeps every value it had before the call.
    pub fn apply_overrides<I, K, V>(&mut self, overrides: I) -> Result<(), PropertyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut staged = self.clone();
        for (key, value) in overrides {
            staged.apply_override(key.as_ref(), value.as_ref())?;
        }
        *self = staged;
        Ok(())
    }

    fn set(&mut self, key: PropertyKey, value: &str) -> Result<(), PropertyError> {
        match key {
            PropertyKey::FontFamily => self.font_family = String::from(value.trim()),
            PropertyKey::FontSize => self.font_size = parse_f64(key, value)?,
            PropertyKey::TextRotation => self.set_rotation(parse_i32(key, value)?),
            PropertyKey::Hex255Color => self.color = parse_hex_color(value)?,
            PropertyKey::AlphaColor => self.alpha = parse_f64(key, value)?,
            PropertyKey::XPosition => self.x_position = parse_f64(key, value)?,
            PropertyKey::YPosition => self.y_position = parse_f64(key, value)?,
            PropertyKey::InvertX => self.invert_x = parse_bool(key, value)?,
            PropertyKey::InvertY => self.invert_y = parse_bool(key, value)?,
            PropertyKey::RelativeCoordinates => {
                self.relative_coordinates = parse_bool(key, value)?;
            }
            PropertyKey::Scale => self.scale = parse_f64(key, value)?,
        }
        Ok(())
    }

    /// Check the values shared by text and image watermarks.
    ///
    /// Rejects non-finite numbers, `alpha` outside `0.0..=1.0` and a
    /// non-positive `scale`. Positions are not range-checked: off-page
    /// placement is allowed.
    pub fn validate(&self) -> Result<(), PropertyError> {
        finite(PropertyKey::XPosition, self.x_position)?;
        finite(PropertyKey::YPosition, self.y_position)?;
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(out_of_range(PropertyKey::AlphaColor, self.alpha));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(out_of_range(PropertyKey::Scale, self.scale));
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus the text-only requirements:
    /// a positive, finite font size.
    pub fn validate_text(&self) -> Result<(), PropertyError> {
        self.validate()?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(out_of_range(PropertyKey::FontSize, self.font_size));
        }
        Ok(())
    }
}

fn out_of_range(key: PropertyKey, value: f64) -> PropertyError {
    PropertyError::OutOfRange { key, value }
}

fn finite(key: PropertyKey, value: f64) -> Result<(), PropertyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(key, value))
    }
}

// ---- Value parsers ----

fn parse_f64(key: PropertyKey, s: &str) -> Result<f64, PropertyError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| PropertyError::InvalidNumericFormat {
            key,
            value: String::from(s),
        })
}

fn parse_i32(key: PropertyKey, s: &str) -> Result<i32, PropertyError> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| PropertyError::InvalidNumericFormat {
            key,
            value: String::from(s),
        })
}

fn parse_bool(key: PropertyKey, s: &str) -> Result<bool, PropertyError> {
    let t = s.trim();
    if ["true", "1", "yes", "on"]
        .iter()
        .any(|v| t.eq_ignore_ascii_case(v))
    {
        Ok(true)
    } else if ["false", "0", "no", "off"]
        .iter()
        .any(|v| t.eq_ignore_ascii_case(v))
    {
        Ok(false)
    } else {
        Err(PropertyError::InvalidBooleanFormat {
            key,
            value: String::from(s),
        })
    }
}
