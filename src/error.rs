//! Error types for the mining core

use thiserror::Error;

/// Contract violations raised by the mining core.
///
/// Empty corpora and missing supports are not errors; only thresholds
/// outside `(0, 1]` are rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MiningError {
    /// Minimum support is NaN or outside `(0, 1]`.
    #[error("Minimum support {value} is out of bounds (0, 1]")]
    InvalidSupport {
        /// The rejected threshold
        value: f64,
    },

    /// Minimum confidence is NaN or outside `(0, 1]`.
    #[error("Minimum confidence {value} is out of bounds (0, 1]")]
    InvalidConfidence {
        /// The rejected threshold
        value: f64,
    },
}
