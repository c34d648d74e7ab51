//! Error types for the repitch crate.

use std::fmt;

use crate::{FACTOR_MAX, FACTOR_MIN, HOP_SIZE};

/// Errors that can occur while processing audio blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftError {
    /// Input or output buffer is not exactly one block long.
    BlockSizeMismatch { provided: usize, expected: usize },
    /// Pitch factor is non-finite or drives the synthesis hop outside the
    /// range the accumulation buffer can hold.
    InvalidFactor { factor: f32 },
}

impl fmt::Display for ShiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftError::BlockSizeMismatch { provided, expected } => {
                write!(
                    f,
                    "block size mismatch: {} samples provided, exactly {} required",
                    provided, expected
                )
            }
            ShiftError::InvalidFactor { factor } => {
                write!(
                    f,
                    "invalid pitch factor {}: must be finite and within [{}, {}] \
                     so the synthesis hop fits the window ({}-sample blocks)",
                    factor, FACTOR_MIN, FACTOR_MAX, HOP_SIZE
                )
            }
        }
    }
}

impl std::error::Error for ShiftError {}
