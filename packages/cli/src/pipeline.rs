//! Stream table finalization pipeline behind the CLI.
//!
//! Reads a JSON [`StreamTableInput`], builds the [`Borders`] collection it
//! describes, finalizes it against the table's strokes and fills, and
//! produces a [`FinalizedTable`] report.

use std::path::Path;

use gridline_table::{BorderError, Borders};
use gridline_table_models::{FinalizeSettings, FinalizedTable, StreamTableInput};

/// Errors surfaced by the CLI pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Border linkage or settings failed.
    #[error(transparent)]
    Border(#[from] BorderError),

    /// The input or output JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads a stream table description from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid table
/// description.
pub fn read_input(path: &Path) -> Result<StreamTableInput, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let input: StreamTableInput = serde_json::from_str(&contents)?;
    log::debug!(
        "Read {} horizontal and {} vertical border(s), {} stroke(s), {} fill(s) from {}",
        input.horizontal.len(),
        input.vertical.len(),
        input.strokes.len(),
        input.fills.len(),
        path.display()
    );
    Ok(input)
}

/// Finalizes the borders of one stream table.
///
/// # Errors
///
/// Returns an error if the border linkage in `input` is broken.
pub fn finalize(
    input: StreamTableInput,
    settings: FinalizeSettings,
) -> Result<FinalizedTable, CliError> {
    let mut borders = Borders::from_input(&input, settings)?;
    let StreamTableInput {
        mut strokes, fills, ..
    } = input;

    let summary = borders.finalize(&mut strokes, &fills)?;

    Ok(FinalizedTable {
        borders: borders.reports(),
        strokes,
        summary,
    })
}

/// Checks the border linkage of one stream table without finalizing it.
///
/// # Errors
///
/// Returns an error if any border references a missing boundary border.
pub fn check(input: &StreamTableInput) -> Result<usize, CliError> {
    let borders = Borders::from_input(input, FinalizeSettings::default())?;
    Ok(borders.len())
}

/// Serializes a report as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(table: &FinalizedTable, pretty: bool) -> Result<String, CliError> {
    Ok(if pretty {
        serde_json::to_string_pretty(table)?
    } else {
        serde_json::to_string(table)?
    })
}

#[cfg(test)]
mod tests {
    use gridline_shape_models::{Orientation, RgbColor, ShapeType};
    use gridline_table_models::BorderId;

    use super::*;

    fn input() -> StreamTableInput {
        serde_json::from_value(serde_json::json!({
            "horizontal": [
                {"range": {"low": 0.0, "high": 10.0}, "boundary": [0, 2]},
                {"range": {"low": 190.0, "high": 200.0}, "boundary": [0, 2]}
            ],
            "vertical": [
                {"range": {"low": 0.0, "high": 10.0}, "boundary": [0, 1]},
                {"range": {"low": 100.0, "high": 250.0}, "boundary": [0, 1]},
                {"range": {"low": 390.0, "high": 400.0}, "boundary": [0, 1]}
            ],
            "strokes": [
                {
                    "segment": {"x0": 180.0, "y0": 5.0, "x1": 180.0, "y1": 195.0},
                    "color": 16711680,
                    "width": 1.5
                },
                {
                    "segment": {"x0": 150.0, "y0": 100.0, "x1": 160.0, "y1": 100.0},
                    "color": 0,
                    "width": 0.5
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn finalize_reports_every_border() {
        let table = finalize(input(), FinalizeSettings::default()).unwrap();

        assert_eq!(table.borders.len(), 5);
        assert!(table.borders.iter().all(|b| b.finalized));
        assert_eq!(table.summary.by_stroke, 3);
        assert_eq!(table.summary.by_layout, 2);
        assert_eq!(table.summary.provisional, 0);

        let middle = table
            .borders
            .iter()
            .find(|b| b.orientation == Orientation::Vertical && b.id == BorderId(1))
            .unwrap();
        assert!((middle.value - 180.0).abs() < f64::EPSILON);
        assert_eq!(middle.style.color, RgbColor::from_rgb(255, 0, 0));
    }

    #[test]
    fn finalize_reclassifies_only_used_strokes() {
        let table = finalize(input(), FinalizeSettings::default()).unwrap();
        assert_eq!(table.strokes[0].shape_type, ShapeType::Border);
        assert_eq!(table.strokes[1].shape_type, ShapeType::Stroke);
    }

    #[test]
    fn check_counts_borders() {
        assert_eq!(check(&input()).unwrap(), 5);
    }

    #[test]
    fn check_rejects_dangling_boundary() {
        let mut broken = input();
        broken.horizontal[1].boundary = (BorderId(0), BorderId(3));
        let err = check(&broken).unwrap_err();
        assert!(matches!(err, CliError::Border(BorderError::DanglingBoundary { .. })));
        assert!(err.to_string().contains("horizontal border #1"));
    }

    #[test]
    fn report_serializes_with_snake_case_tags() {
        let table = finalize(input(), FinalizeSettings::default()).unwrap();
        let json = to_json(&table, false).unwrap();
        assert!(json.contains(r#""orientation":"vertical""#));
        assert!(json.contains(r#""shape_type":"border""#));

        let parsed: FinalizedTable = serde_json::from_str(&to_json(&table, true).unwrap()).unwrap();
        assert_eq!(parsed.summary, table.summary);
    }
}
