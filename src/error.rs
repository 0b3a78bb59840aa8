//! Error types for grid access and search control.

use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by the grid model and the search controller.
///
/// Running out of frontier and being cancelled are outcomes of a search,
/// not errors, and are reported through [`crate::SearchResult`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The grid has no start cell or no end cell.
    MissingEndpoints,

    /// A coordinate fell outside the grid.
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid height
        rows: usize,
        /// Grid width
        cols: usize,
    },

    /// A search is already active on this controller.
    AlreadyRunning,

    /// Speed values must be finite and strictly positive.
    InvalidSpeed(f64),

    /// No algorithm is registered under this name.
    UnknownAlgorithm(String),

    /// A textual grid layout could not be parsed.
    InvalidLayout {
        /// One-based line number of the offending row
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A layout file could not be read.
    LayoutFile {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        reason: String,
    },

    /// Generated layouts need at least two rows and two columns.
    GridTooSmall {
        /// Requested height
        rows: usize,
        /// Requested width
        cols: usize,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => write!(f, "start or end cell is not set"),
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({}, {}) is outside the {}x{} grid",
                row, col, rows, cols
            ),
            Self::AlreadyRunning => {
                write!(f, "a search is already running; stop it before starting another")
            }
            Self::InvalidSpeed(speed) => {
                write!(f, "invalid speed {}: must be finite and greater than zero", speed)
            }
            Self::UnknownAlgorithm(name) => write!(
                f,
                "unknown algorithm '{}' (expected one of: {})",
                name,
                crate::algorithms::Algorithm::names().join(", ")
            ),
            Self::InvalidLayout { line, reason } => {
                write!(f, "invalid layout at line {}: {}", line, reason)
            }
            Self::LayoutFile { path, reason } => {
                write!(f, "failed to read layout {}: {}", path.display(), reason)
            }
            Self::GridTooSmall { rows, cols } => {
                write!(f, "a {}x{} grid is too small; need at least 2x2", rows, cols)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
