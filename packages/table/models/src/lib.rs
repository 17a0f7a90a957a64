#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Border value types and stream table schemas.
//!
//! Defines the per-border value types (range, style, identifiers), the
//! finalization settings loaded from TOML, and the JSON schemas used to
//! describe a stream table on input and report its finalized borders on
//! output.

use gridline_shape_models::{Fill, Orientation, RgbColor, Segment, Stroke};
use serde::{Deserialize, Serialize};

/// Bound used for a border range when the seeding collaborator supplies
/// none.
pub const UNBOUNDED: f64 = 9999.0;

/// Default tolerance around a border range, absorbing rendering jitter such
/// as underlines drawn slightly outside the cell.
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Index of a border within the list of its orientation in one
/// `Borders` collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BorderId(pub usize);

impl BorderId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BorderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The allowed coordinate range of a border.
///
/// Callers must supply `low <= high`; this is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderRange {
    pub low: f64,
    pub high: f64,
}

impl BorderRange {
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Provisional position of a border that has not been finalized.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Whether `position` lies in the range widened by `margin` on both
    /// sides.
    #[must_use]
    pub fn contains(&self, position: f64, margin: f64) -> bool {
        (self.low - margin) <= position && position <= (self.high + margin)
    }
}

impl Default for BorderRange {
    fn default() -> Self {
        Self::new(-UNBOUNDED, UNBOUNDED)
    }
}

/// Rendering style of a border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub color: RgbColor,
    pub width: f64,
}

impl BorderStyle {
    /// The invisible style every border starts with.
    pub const HIDDEN: Self = Self {
        color: RgbColor::WHITE,
        width: 0.0,
    };
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// Tunables for border finalization, usually read from a TOML file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeSettings {
    /// Tolerance applied on both sides of every border range.
    pub margin: f64,
    /// Style given to borders that no stroke finalizes.
    pub hidden_style: BorderStyle,
}

impl Default for FinalizeSettings {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            hidden_style: BorderStyle::HIDDEN,
        }
    }
}

/// Seed for one border, as supplied by table discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderSeed {
    /// Allowed range; unbounded when omitted.
    #[serde(default)]
    pub range: BorderRange,
    /// Lower (left/top) and upper (right/bottom) boundary borders, as
    /// indices into the perpendicular list.
    pub boundary: (BorderId, BorderId),
}

/// A stream table description: border seeds plus the evidence observed
/// around the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamTableInput {
    pub horizontal: Vec<BorderSeed>,
    pub vertical: Vec<BorderSeed>,
    pub strokes: Vec<Stroke>,
    pub fills: Vec<Fill>,
}

/// How many borders each finalization pass committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeSummary {
    pub by_stroke: usize,
    pub by_fill: usize,
    pub by_layout: usize,
    /// Borders still at their provisional midpoint.
    pub provisional: usize,
}

impl FinalizeSummary {
    /// Total number of borders committed by any pass.
    #[must_use]
    pub const fn finalized(&self) -> usize {
        self.by_stroke + self.by_fill + self.by_layout
    }
}

/// One border after finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderReport {
    pub orientation: Orientation,
    pub id: BorderId,
    pub value: f64,
    pub finalized: bool,
    pub style: BorderStyle,
    pub centerline: Segment,
}

/// The result of finalizing one stream table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedTable {
    pub borders: Vec<BorderReport>,
    /// Evidence strokes, with consumed ones reclassified as borders.
    pub strokes: Vec<Stroke>,
    pub summary: FinalizeSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_honours_margin() {
        let range = BorderRange::new(100.0, 250.0);
        assert!(range.contains(100.0, 1.0));
        assert!(range.contains(99.0, 1.0));
        assert!(range.contains(251.0, 1.0));
        assert!(!range.contains(98.9, 1.0));
        assert!(!range.contains(251.1, 1.0));
        assert!(!range.contains(99.5, 0.0));
    }

    #[test]
    fn default_range_is_unbounded() {
        let range = BorderRange::default();
        assert!(range.contains(-5000.0, 0.0));
        assert!(range.contains(5000.0, 0.0));
        assert!(range.midpoint().abs() < f64::EPSILON);
    }

    #[test]
    fn settings_default_missing_fields() {
        let settings: FinalizeSettings = serde_json::from_str(r#"{"margin": 2.5}"#).unwrap();
        assert!((settings.margin - 2.5).abs() < f64::EPSILON);
        assert_eq!(settings.hidden_style, BorderStyle::HIDDEN);
    }

    #[test]
    fn seed_without_range_is_unbounded() {
        let seed: BorderSeed = serde_json::from_str(r#"{"boundary": [0, 3]}"#).unwrap();
        assert_eq!(seed.range, BorderRange::default());
        assert_eq!(seed.boundary, (BorderId(0), BorderId(3)));
    }

    #[test]
    fn summary_totals_passes() {
        let summary = FinalizeSummary {
            by_stroke: 2,
            by_fill: 1,
            by_layout: 4,
            provisional: 1,
        };
        assert_eq!(summary.finalized(), 7);
    }
}
