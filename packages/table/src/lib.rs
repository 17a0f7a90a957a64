#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Border finalization for stream tables.
//!
//! A stream table has no drawn grid, so table discovery can only say that
//! each row or column boundary lies somewhere within a range. This crate
//! picks one coordinate per boundary: it follows explicit ruling strokes
//! first, then the edges of cell shadings, and finally aligns the remaining
//! boundaries onto as few shared coordinates as possible so the rebuilt
//! grid stays simple.
//!
//! The entry point is [`Borders::finalize`].

pub mod border;
pub mod borders;
pub mod layout;
pub mod settings;

pub use border::Border;
pub use borders::Borders;

use gridline_shape_models::Orientation;
use gridline_table_models::BorderId;

/// Errors raised while building or configuring a border collection.
#[derive(Debug, thiserror::Error)]
pub enum BorderError {
    /// A border references a boundary border that is not in the collection.
    #[error(
        "{orientation} border {border} references missing {} boundary border {boundary}",
        .orientation.perpendicular()
    )]
    DanglingBoundary {
        orientation: Orientation,
        border: BorderId,
        boundary: BorderId,
    },

    /// The settings TOML could not be parsed.
    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
