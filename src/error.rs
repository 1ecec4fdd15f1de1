//! Typed errors raised while running the case.
//!
//! Application-level failures (config, report files) go through `anyhow`;
//! this enum covers what the driver itself can produce.

use thiserror::Error;

/// Errors produced by the case driver and its building blocks.
#[derive(Debug, Error)]
pub enum CaseError {
    /// A position outside `0..len` was read from a fixed sequence.
    #[error("index out of range [{index}] with length {len}")]
    BoundsViolation { index: usize, len: usize },

    /// The configured sequence does not have the fixed length.
    #[error("sequence must hold exactly {expected} values, got {actual}")]
    InvalidSequence { expected: usize, actual: usize },

    /// Writing case output failed.
    #[error("failed to write case output: {0}")]
    Io(#[from] std::io::Error),
}

impl CaseError {
    /// Returns the attempted index and length for a bounds violation.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match self {
            CaseError::BoundsViolation { index, len } => Some((*index, *len)),
            _ => None,
        }
    }
}
