//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, KroneckerError>;

/// Failures raised while configuring or running Kronecker generation.
///
/// Every variant is detected eagerly, at configuration time or at the first
/// offending operation. Nothing here is transient, so nothing is retried.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum KroneckerError {
    /// A configuration value was rejected, e.g. a probability vector that
    /// does not sum to one.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The offending parameter.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// A coordinate fell outside `[1, side]`.
    #[error("coordinate ({row}, {col}) is outside [1, {side}]")]
    OutOfRange {
        /// Row of the rejected coordinate.
        row: u64,
        /// Column of the rejected coordinate.
        col: u64,
        /// Side length the coordinate was checked against.
        side: u64,
    },
    /// Two coordinate sets over different vertex spaces were combined.
    #[error("side mismatch: left={left}, right={right}")]
    SizeMismatch {
        /// Side of the destination set.
        left: u64,
        /// Side of the incoming set.
        right: u64,
    },
    /// Generation was cancelled cooperatively between edges.
    #[error("generation cancelled after {generated} edges")]
    Cancelled {
        /// Edges the observing worker had produced when it stopped.
        generated: usize,
    },
}

impl KroneckerError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
