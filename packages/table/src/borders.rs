//! The border collection of one stream table and its finalization passes.
//!
//! Borders are finalized in order of evidence strength:
//!
//! 1. explicit ruling strokes
//! 2. edges of explicit cell shadings, treated as zero-width strokes
//! 3. layout alignment (see [`crate::layout`]) for whatever is left
//!
//! A border is finalized at most once, so earlier passes always win.

use gridline_shape_models::{Fill, Orientation, Segment, ShapeType, Stroke};
use gridline_table_models::{
    BorderId, BorderReport, BorderSeed, BorderStyle, FinalizeSettings, FinalizeSummary,
    StreamTableInput,
};

use crate::{Border, BorderError, layout};

/// Owns every border of one stream table.
///
/// Boundary references between borders are [`BorderId`]s into the
/// perpendicular list of this collection.
#[derive(Debug, Clone, Default)]
pub struct Borders {
    horizontal: Vec<Border>,
    vertical: Vec<Border>,
    settings: FinalizeSettings,
}

impl Borders {
    /// Creates an empty collection with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with the given settings.
    #[must_use]
    pub fn with_settings(settings: FinalizeSettings) -> Self {
        Self {
            horizontal: Vec::new(),
            vertical: Vec::new(),
            settings,
        }
    }

    /// Builds the collection described by `input` and checks its boundary
    /// linkage.
    ///
    /// # Errors
    ///
    /// Returns [`BorderError::DanglingBoundary`] if any seed references a
    /// boundary border that does not exist.
    pub fn from_input(
        input: &StreamTableInput,
        settings: FinalizeSettings,
    ) -> Result<Self, BorderError> {
        let mut borders = Self::with_settings(settings);
        let seeds = |orientation: Orientation, seeds: &[BorderSeed]| -> Vec<Border> {
            seeds
                .iter()
                .map(|seed| Border::new(orientation, seed.range, seed.boundary))
                .collect()
        };
        borders.extend(seeds(Orientation::Horizontal, &input.horizontal));
        borders.extend(seeds(Orientation::Vertical, &input.vertical));
        borders.validate()?;
        Ok(borders)
    }

    #[must_use]
    pub const fn settings(&self) -> &FinalizeSettings {
        &self.settings
    }

    /// Adds a border and returns its id within its orientation.
    pub fn add(&mut self, mut border: Border) -> BorderId {
        if !border.is_finalized() {
            border.set_style(self.settings.hidden_style);
        }
        let list = self.list_mut(border.orientation());
        list.push(border);
        BorderId(list.len() - 1)
    }

    pub fn extend(&mut self, borders: impl IntoIterator<Item = Border>) {
        for border in borders {
            self.add(border);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    /// Iterates horizontal borders, then vertical borders.
    pub fn iter(&self) -> impl Iterator<Item = &Border> {
        self.horizontal.iter().chain(&self.vertical)
    }

    #[must_use]
    pub fn horizontal(&self) -> &[Border] {
        &self.horizontal
    }

    #[must_use]
    pub fn vertical(&self) -> &[Border] {
        &self.vertical
    }

    /// Borders of one orientation.
    #[must_use]
    pub fn list(&self, orientation: Orientation) -> &[Border] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    const fn list_mut(&mut self, orientation: Orientation) -> &mut Vec<Border> {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }

    #[must_use]
    pub fn get(&self, orientation: Orientation, id: BorderId) -> Option<&Border> {
        self.list(orientation).get(id.index())
    }

    /// Mutable access for the seeding collaborator, e.g. to adjust ranges
    /// or boundary links before finalizing.
    pub fn get_mut(&mut self, orientation: Orientation, id: BorderId) -> Option<&mut Border> {
        self.list_mut(orientation).get_mut(id.index())
    }

    /// Checks that every boundary reference points at an existing
    /// perpendicular border.
    ///
    /// # Errors
    ///
    /// Returns [`BorderError::DanglingBoundary`] for the first reference
    /// that does not.
    pub fn validate(&self) -> Result<(), BorderError> {
        for &orientation in Orientation::all() {
            let perpendicular = self.list(orientation.perpendicular()).len();
            for (index, border) in self.list(orientation).iter().enumerate() {
                let (lower, upper) = border.boundary();
                for boundary in [lower, upper] {
                    if boundary.index() >= perpendicular {
                        return Err(BorderError::DanglingBoundary {
                            orientation,
                            border: BorderId(index),
                            boundary,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The boundary borders of a border, if both exist.
    fn boundary_of(&self, orientation: Orientation, id: BorderId) -> Option<(&Border, &Border)> {
        let (lower, upper) = self.get(orientation, id)?.boundary();
        let perpendicular = orientation.perpendicular();
        Some((
            self.get(perpendicular, lower)?,
            self.get(perpendicular, upper)?,
        ))
    }

    /// Centerline of a border: its own value on one axis and its boundary
    /// borders' current values on the other.
    #[must_use]
    pub fn centerline(&self, orientation: Orientation, id: BorderId) -> Option<Segment> {
        let value = self.get(orientation, id)?.value();
        let (lower, upper) = self.boundary_of(orientation, id)?;
        Some(match orientation {
            Orientation::Horizontal => Segment::new(lower.value(), value, upper.value(), value),
            Orientation::Vertical => Segment::new(value, lower.value(), value, upper.value()),
        })
    }

    /// A renderable stroke for one border, classified as a table border.
    #[must_use]
    pub fn to_stroke(&self, orientation: Orientation, id: BorderId) -> Option<Stroke> {
        let style = self.get(orientation, id)?.style();
        let segment = self.centerline(orientation, id)?;
        Some(Stroke {
            segment,
            orientation,
            color: style.color,
            width: style.width,
            shape_type: ShapeType::Border,
        })
    }

    /// Renderable strokes for every border, horizontal first.
    #[must_use]
    pub fn to_strokes(&self) -> Vec<Stroke> {
        self.ids()
            .filter_map(|(orientation, id)| self.to_stroke(orientation, id))
            .collect()
    }

    /// Reports for every border, horizontal first.
    #[must_use]
    pub fn reports(&self) -> Vec<BorderReport> {
        self.ids()
            .filter_map(|(orientation, id)| {
                let border = self.get(orientation, id)?;
                Some(BorderReport {
                    orientation,
                    id,
                    value: border.value(),
                    finalized: border.is_finalized(),
                    style: border.style(),
                    centerline: self.centerline(orientation, id)?,
                })
            })
            .collect()
    }

    fn ids(&self) -> impl Iterator<Item = (Orientation, BorderId)> + '_ {
        Orientation::all().iter().flat_map(move |&orientation| {
            (0..self.list(orientation).len()).map(move |i| (orientation, BorderId(i)))
        })
    }

    fn finalized_count(&self) -> usize {
        self.iter().filter(|border| border.is_finalized()).count()
    }

    /// Finalizes a border with an explicit stroke of the same orientation.
    ///
    /// The stroke is rejected when the border is already finalized, when
    /// the stroke's position is not valid for the border, or when the
    /// stroke lies strictly between the ranges of the two boundary borders
    /// (an interior mark rather than a grid line). Otherwise the border
    /// takes the stroke's position and style, each boundary border is
    /// offered the matching stroke end, and the stroke is reclassified as
    /// [`ShapeType::Border`].
    ///
    /// Returns whether the stroke was used.
    pub fn finalize_by_stroke(
        &mut self,
        orientation: Orientation,
        id: BorderId,
        stroke: &mut Stroke,
    ) -> bool {
        let margin = self.settings.margin;
        let position = stroke.segment.cross(orientation);
        let (start, end) = stroke.segment.along(orientation);

        let Some(border) = self.get(orientation, id) else {
            return false;
        };
        if border.is_finalized() || !border.is_valid(position, margin) {
            return false;
        }

        // Compared against the boundary ranges, not their finalized values.
        let Some((lower, upper)) = self.boundary_of(orientation, id) else {
            return false;
        };
        if start > lower.range().high && end < upper.range().low {
            log::trace!(
                "Stroke {start}..{end} at {position} does not span {orientation} border {id}"
            );
            return false;
        }

        let (lower_id, upper_id) = border.boundary();
        if let Some(border) = self.get_mut(orientation, id) {
            border.finalize(position, margin);
            border.set_style(BorderStyle {
                color: stroke.color,
                width: stroke.width,
            });
        }

        let perpendicular = orientation.perpendicular();
        if let Some(lower) = self.get_mut(perpendicular, lower_id) {
            lower.finalize(start, margin);
        }
        if let Some(upper) = self.get_mut(perpendicular, upper_id) {
            upper.finalize(end, margin);
        }

        stroke.shape_type = ShapeType::Border;

        log::debug!(
            "Finalized {orientation} border {id} at {position} by stroke ({} {})",
            stroke.color,
            stroke.width
        );

        true
    }

    /// Offers every stroke to every border of its orientation, horizontal
    /// strokes first. Returns the number of strokes used.
    pub fn finalize_by_strokes(&mut self, strokes: &mut [Stroke]) -> usize {
        let mut used = 0;

        for &orientation in Orientation::all() {
            for stroke in strokes.iter_mut().filter(|s| s.orientation == orientation) {
                let mut consumed = false;
                for index in 0..self.list(orientation).len() {
                    consumed |= self.finalize_by_stroke(orientation, BorderId(index), stroke);
                }
                used += usize::from(consumed);
            }
        }

        used
    }

    /// Finalizes borders from the edges of shading rectangles. Returns the
    /// number of synthetic edge strokes used.
    pub fn finalize_by_fills(&mut self, fills: &[Fill]) -> usize {
        let mut strokes: Vec<Stroke> = fills.iter().flat_map(Fill::boundary_strokes).collect();
        self.finalize_by_strokes(&mut strokes)
    }

    /// Aligns the still-unfinalized borders of one orientation. Returns the
    /// number of borders finalized.
    pub fn finalize_by_layout(&mut self, orientation: Orientation) -> usize {
        let margin = self.settings.margin;
        let pending: Vec<usize> = self
            .list(orientation)
            .iter()
            .enumerate()
            .filter(|(_, border)| !border.is_finalized())
            .map(|(index, _)| index)
            .collect();
        let ranges: Vec<_> = pending
            .iter()
            .map(|&index| self.list(orientation)[index].range())
            .collect();

        let accepted = layout::align(&ranges, margin);

        let list = self.list_mut(orientation);
        let mut finalized = 0;
        for candidate in &accepted {
            let mut crossed = 0;
            for i in candidate.covered() {
                if list[pending[i]].finalize(candidate.position, margin) {
                    crossed += 1;
                }
            }
            log::debug!(
                "Aligned {crossed} {orientation} border(s) at {}",
                candidate.position
            );
            finalized += crossed;
        }

        finalized
    }

    /// Finalizes every border: explicit strokes first, then shading edges,
    /// then layout alignment of the horizontal and vertical borders left
    /// over.
    ///
    /// Used strokes are reclassified as [`ShapeType::Border`]. Borders that
    /// no pass can place keep their provisional midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BorderError::DanglingBoundary`] if the boundary linkage is
    /// broken. No border is touched in that case.
    pub fn finalize(
        &mut self,
        strokes: &mut [Stroke],
        fills: &[Fill],
    ) -> Result<FinalizeSummary, BorderError> {
        self.validate()?;

        let mut summary = FinalizeSummary::default();

        let before = self.finalized_count();
        let used = self.finalize_by_strokes(strokes);
        summary.by_stroke = self.finalized_count() - before;
        log::debug!(
            "{used} of {} stroke(s) finalized {} border(s)",
            strokes.len(),
            summary.by_stroke
        );

        let before = self.finalized_count();
        let used = self.finalize_by_fills(fills);
        summary.by_fill = self.finalized_count() - before;
        log::debug!(
            "{used} shading edge(s) from {} fill(s) finalized {} border(s)",
            fills.len(),
            summary.by_fill
        );

        summary.by_layout = self.finalize_by_layout(Orientation::Horizontal)
            + self.finalize_by_layout(Orientation::Vertical);

        summary.provisional = self.len() - self.finalized_count();
        if summary.provisional > 0 {
            log::warn!(
                "{} of {} border(s) left at their provisional midpoint",
                summary.provisional,
                self.len()
            );
        }

        log::info!(
            "Finalized {} border(s): {} by stroke, {} by fill, {} by layout",
            summary.finalized(),
            summary.by_stroke,
            summary.by_fill,
            summary.by_layout
        );

        Ok(summary)
    }
}
