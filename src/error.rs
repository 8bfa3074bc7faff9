// Copyright 2017 Adam Greig
// Licensed under the MIT license, see LICENSE for details.

//! Error types for the LDPC codec core.

use core::fmt;

/// Errors returned by the codec's contract-checking entry points.
///
/// These only ever arise from caller mistakes (undersized buffers, or a
/// graph/working-area mismatched to the code in use) -- never from the data
/// being decoded. Non-convergence of an iterative decoder is not an error;
/// it is reported as a plain `bool` return alongside the iteration count,
/// since the last candidate codeword is still meaningful to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdpcError {
    /// A buffer supplied by the caller was smaller than the code requires.
    BufferTooSmall {
        /// Name of the undersized buffer, for diagnostics.
        what: &'static str,
        /// Minimum required length.
        needed: usize,
        /// Length actually supplied.
        got: usize,
    },
}

impl fmt::Display for LdpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { what, needed, got } => {
                write!(f, "{what} buffer too small: need {needed} bytes, got {got}")
            }
        }
    }
}

// `std::error::Error` is a re-export of `core::error::Error` (stable since
// 1.81), so a single impl here satisfies both; a second `cfg(feature =
// "std")` impl against `std::error::Error` would conflict with this one.
impl core::error::Error for LdpcError {}

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, LdpcError>;

pub(crate) fn require(what: &'static str, got: usize, needed: usize) -> Result<()> {
    if got < needed {
        Err(LdpcError::BufferTooSmall { what, needed, got })
    } else {
        Ok(())
    }
}
