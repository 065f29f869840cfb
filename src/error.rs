//! Error types for the mask controller.

use std::path::PathBuf;

/// Errors that can occur while driving the fingerprint mask endpoints.
///
/// The public [`MaskController`](crate::MaskController) operations never
/// return these; they are produced by the device file primitives and by the
/// calibration constructors, and are logged at the point they are handled.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// The endpoint could not be opened.
    #[error("Failed to open {path:?}: {source}")]
    Open {
        /// The endpoint path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The endpoint was opened but the value could not be written.
    #[error("Failed to write {path:?}: {source}")]
    Write {
        /// The endpoint path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The endpoint contents did not start with an integer.
    #[error("No integer in {path:?} (contents: {contents:?})")]
    Parse {
        /// The endpoint path.
        path: PathBuf,
        /// The raw contents that failed to parse.
        contents: String,
    },

    /// A scale factor with a zero denominator.
    #[error("Invalid scale factor {numerator}/{denominator}")]
    InvalidScaleFactor {
        /// Scale numerator.
        numerator: i64,
        /// Scale denominator.
        denominator: i64,
    },

    /// A FOD rectangle with no area.
    #[error("Invalid FOD rectangle ({left},{top})-({right},{bottom})")]
    InvalidFodRect {
        /// Left edge.
        left: i32,
        /// Top edge.
        top: i32,
        /// Right edge.
        right: i32,
        /// Bottom edge.
        bottom: i32,
    },
}
