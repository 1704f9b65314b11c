//! Error types for bubble-chart operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while registering or rendering a chart.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Chart size is not positive and finite.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: f64,
        /// Height value.
        height: f64,
    },

    /// Scale domain or range error (e.g., empty palette).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Malformed visualization metadata.
    #[error("Invalid descriptor '{id}': {reason}")]
    InvalidDescriptor {
        /// Visualization id (may be empty).
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A visualization with this id is already registered.
    #[error("Visualization '{0}' is already registered")]
    DuplicateVisualization(String),

    /// No visualization with this id is registered.
    #[error("Unknown visualization '{0}'")]
    UnknownVisualization(String),

    /// A required axis has no bound column.
    #[error("Required axis '{0}' is not bound to a column")]
    MissingAxis(String),

    /// A bound column's type is not accepted by the axis.
    #[error("Axis '{axis}' does not accept {found} columns")]
    AxisTypeMismatch {
        /// Axis name.
        axis: String,
        /// Type of the bound column.
        found: String,
    },

    /// Chart document could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}
