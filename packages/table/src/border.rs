//! A single stream table border.
//!
//! A border is one candidate grid line. Its position on one axis is only
//! known to lie within a range until it is finalized; its extent on the
//! other axis comes from its two boundary borders, which are perpendicular
//! borders owned by the same [`Borders`](crate::Borders) collection and
//! referenced by index.

use gridline_shape_models::Orientation;
use gridline_table_models::{BorderId, BorderRange, BorderStyle};

/// One row or column boundary of a stream table.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    orientation: Orientation,
    range: BorderRange,
    /// Lower (left/top) and upper (right/bottom) boundary borders.
    boundary: (BorderId, BorderId),
    /// `Some` once finalized. Never reset.
    position: Option<f64>,
    style: BorderStyle,
}

impl Border {
    #[must_use]
    pub const fn new(
        orientation: Orientation,
        range: BorderRange,
        boundary: (BorderId, BorderId),
    ) -> Self {
        Self {
            orientation,
            range,
            boundary,
            position: None,
            style: BorderStyle::HIDDEN,
        }
    }

    /// A horizontal border, determining a y-coordinate between its `left`
    /// and `right` vertical borders.
    #[must_use]
    pub const fn horizontal(range: BorderRange, left: BorderId, right: BorderId) -> Self {
        Self::new(Orientation::Horizontal, range, (left, right))
    }

    /// A vertical border, determining an x-coordinate between its `top`
    /// and `bottom` horizontal borders.
    #[must_use]
    pub const fn vertical(range: BorderRange, top: BorderId, bottom: BorderId) -> Self {
        Self::new(Orientation::Vertical, range, (top, bottom))
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn range(&self) -> BorderRange {
        self.range
    }

    #[must_use]
    pub const fn boundary(&self) -> (BorderId, BorderId) {
        self.boundary
    }

    #[must_use]
    pub const fn style(&self) -> BorderStyle {
        self.style
    }

    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.position.is_some()
    }

    /// The finalized coordinate, if any.
    #[must_use]
    pub const fn position(&self) -> Option<f64> {
        self.position
    }

    /// The finalized coordinate, or the midpoint of the range while the
    /// border is still provisional.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.position.unwrap_or_else(|| self.range.midpoint())
    }

    /// Replaces the allowed range.
    pub const fn set_range(&mut self, range: BorderRange) -> &mut Self {
        self.range = range;
        self
    }

    /// Replaces the boundary borders.
    pub const fn set_boundary(&mut self, lower: BorderId, upper: BorderId) -> &mut Self {
        self.boundary = (lower, upper);
        self
    }

    pub(crate) const fn set_style(&mut self, style: BorderStyle) {
        self.style = style;
    }

    /// Whether `position` falls in the valid range, widened by `margin`.
    #[must_use]
    pub fn is_valid(&self, position: f64, margin: f64) -> bool {
        self.range.contains(position, margin)
    }

    /// Commits the border to `position`.
    ///
    /// Does nothing if the border is already finalized or `position` is
    /// not valid. Returns whether this call committed the border.
    pub fn finalize(&mut self, position: f64, margin: f64) -> bool {
        if self.is_finalized() || !self.is_valid(position, margin) {
            return false;
        }
        self.position = Some(position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border() -> Border {
        Border::vertical(BorderRange::new(100.0, 250.0), BorderId(0), BorderId(1))
    }

    #[test]
    fn provisional_value_is_midpoint() {
        let b = border();
        assert!(!b.is_finalized());
        assert!((b.value() - 175.0).abs() < f64::EPSILON);
        assert_eq!(b.style(), BorderStyle::HIDDEN);
    }

    #[test]
    fn finalize_commits_valid_position() {
        let mut b = border();
        assert!(b.finalize(180.0, 1.0));
        assert!(b.is_finalized());
        assert_eq!(b.position(), Some(180.0));
    }

    #[test]
    fn finalize_accepts_position_within_margin() {
        let mut b = border();
        assert!(b.finalize(250.8, 1.0));
        assert_eq!(b.position(), Some(250.8));
    }

    #[test]
    fn finalize_rejects_position_outside_range() {
        let mut b = border();
        assert!(!b.finalize(260.0, 1.0));
        assert!(!b.is_finalized());
        assert!(!b.finalize(98.0, 1.0));
        assert!(!b.is_finalized());
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut b = border();
        assert!(b.finalize(120.0, 1.0));
        for p in [120.0, 130.0, 200.0, 1000.0] {
            assert!(!b.finalize(p, 1.0));
            assert_eq!(b.position(), Some(120.0));
        }
    }

    #[test]
    fn setters_do_not_touch_finalization() {
        let mut b = border();
        b.set_range(BorderRange::new(0.0, 10.0))
            .set_boundary(BorderId(2), BorderId(5));
        assert_eq!(b.boundary(), (BorderId(2), BorderId(5)));
        assert!((b.value() - 5.0).abs() < f64::EPSILON);
        assert!(!b.is_finalized());
    }
}
