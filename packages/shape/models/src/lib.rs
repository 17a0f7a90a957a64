#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometric shape primitives for stream table reconstruction.
//!
//! These are the already-extracted page shapes that the table core consumes
//! as evidence (explicit ruling strokes and cell shadings) and the shapes it
//! hands back for rendering (finalized border strokes). Coordinates follow
//! page space: `x` grows to the right and `y` grows downwards.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Axis orientation of a line-like shape.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    /// Runs along the x-axis; its position is a y-coordinate.
    Horizontal,
    /// Runs along the y-axis; its position is an x-coordinate.
    Vertical,
}

impl Orientation {
    /// Returns the orientation at a right angle to this one.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Returns both orientations, horizontal first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Horizontal, Self::Vertical]
    }
}

/// Classification of a shape on the page.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeType {
    /// A plain stroke that has not been explained by any table structure.
    #[default]
    Stroke,
    /// A stroke that has been consumed as (or produced for) a table border.
    Border,
}

/// A packed `0xRRGGBB` color value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RgbColor(pub u32);

impl RgbColor {
    /// Pure white, the color of a hidden border.
    pub const WHITE: Self = Self(0x00FF_FFFF);
    /// Pure black.
    pub const BLACK: Self = Self(0);

    /// Builds a color from its three channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

/// A straight line from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Segment {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Position of an axis-aligned segment on the axis it does not run
    /// along: `y0` when horizontal, `x0` when vertical.
    #[must_use]
    pub const fn cross(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.y0,
            Orientation::Vertical => self.x0,
        }
    }

    /// Near and far end of the segment along the axis it runs on, in
    /// ascending order whichever way the segment was drawn.
    #[must_use]
    pub fn along(&self, orientation: Orientation) -> (f64, f64) {
        let (a, b) = match orientation {
            Orientation::Horizontal => (self.x0, self.x1),
            Orientation::Vertical => (self.y0, self.y1),
        };
        (a.min(b), a.max(b))
    }

    /// Orientation implied by the segment's extents. A segment at least as
    /// wide as it is tall counts as horizontal.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if (self.x1 - self.x0).abs() >= (self.y1 - self.y0).abs() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// A ruling line drawn on the page.
///
/// Deserializing derives the orientation from the segment when the input
/// does not state one, and defaults the classification to
/// [`ShapeType::Stroke`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StrokeDef")]
pub struct Stroke {
    /// Centerline of the stroke.
    pub segment: Segment,
    pub orientation: Orientation,
    pub color: RgbColor,
    pub width: f64,
    /// Updated to [`ShapeType::Border`] once a table border consumes it.
    pub shape_type: ShapeType,
}

impl Stroke {
    /// Creates an unclassified stroke, deriving its orientation from
    /// `segment`.
    #[must_use]
    pub fn new(segment: Segment, color: RgbColor, width: f64) -> Self {
        Self {
            orientation: segment.orientation(),
            segment,
            color,
            width,
            shape_type: ShapeType::Stroke,
        }
    }

    /// Creates a zero-width black stroke standing in for an edge of a
    /// shading rectangle.
    #[must_use]
    pub fn synthetic(segment: Segment, orientation: Orientation) -> Self {
        Self {
            segment,
            orientation,
            color: RgbColor::BLACK,
            width: 0.0,
            shape_type: ShapeType::Stroke,
        }
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    #[must_use]
    pub fn is_border(&self) -> bool {
        self.shape_type == ShapeType::Border
    }
}

#[derive(Deserialize)]
struct StrokeDef {
    segment: Segment,
    #[serde(default)]
    orientation: Option<Orientation>,
    #[serde(default)]
    color: RgbColor,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    shape_type: ShapeType,
}

impl From<StrokeDef> for Stroke {
    fn from(def: StrokeDef) -> Self {
        Self {
            orientation: def
                .orientation
                .unwrap_or_else(|| def.segment.orientation()),
            segment: def.segment,
            color: def.color,
            width: def.width,
            shape_type: def.shape_type,
        }
    }
}

/// A shading rectangle behind one or more cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub bbox: BBox,
    #[serde(default)]
    pub color: RgbColor,
}

impl Fill {
    #[must_use]
    pub const fn new(bbox: BBox, color: RgbColor) -> Self {
        Self { bbox, color }
    }

    /// The four edges of the shading as synthetic strokes, horizontal
    /// (top, bottom) first and then vertical (left, right).
    #[must_use]
    pub fn boundary_strokes(&self) -> [Stroke; 4] {
        let BBox { x0, y0, x1, y1 } = self.bbox;
        [
            Stroke::synthetic(Segment::new(x0, y0, x1, y0), Orientation::Horizontal),
            Stroke::synthetic(Segment::new(x0, y1, x1, y1), Orientation::Horizontal),
            Stroke::synthetic(Segment::new(x0, y0, x0, y1), Orientation::Vertical),
            Stroke::synthetic(Segment::new(x1, y0, x1, y1), Orientation::Vertical),
        ]
    }
}
