//! Error types for placement-viz operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in placement-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The placement file does not exist or cannot be opened.
    #[error("cannot open '{}': {source}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A line of the placement file is malformed.
    #[error("{}:{line}: {kind}", path.display())]
    Format {
        /// File the line came from.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        kind: FormatErrorKind,
    },

    /// Output path has an extension no encoder handles.
    #[error("unsupported output format: {0} (expected .png or .svg)")]
    UnsupportedOutput(String),

    /// I/O error (file operations, terminal, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or plot.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., equal min and max).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    Config {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

/// The ways a placement line can fail to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Line did not split into exactly `<id> <x> <y>`.
    #[error("expected 3 fields `<id> <x> <y>`, found {found}")]
    TokenCount {
        /// Number of whitespace-separated tokens found.
        found: usize,
    },
    /// A coordinate token is not a number.
    #[error("could not convert {axis} coordinate to float: '{token}'")]
    InvalidNumber {
        /// Which coordinate (`'x'` or `'y'`).
        axis: char,
        /// The offending token.
        token: String,
    },
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

impl Error {
    /// Whether this error came from malformed input rather than I/O.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
