//! Error types for FBP operations.
//!
//! Every fallible operation in the workspace reports an [`FbpError`]. Only
//! [`FbpError::CapacityExhausted`] is expected in normal use: the destination
//! buffer still holds a valid, terminated (but truncated) result when it is
//! returned.

use std::io;
use thiserror::Error;

/// The main error type for FBP operations.
#[derive(Debug, Error)]
pub enum FbpError {
    /// Destination buffer is too small for the complete result.
    ///
    /// The destination holds `written` bytes, the last of which is the
    /// `0x00` terminator (unless `written` is zero).
    #[error("Capacity exhausted: wrote {written} bytes, complete result needs {required}")]
    CapacityExhausted {
        /// Bytes actually written, including the terminator.
        written: usize,
        /// Bytes the untruncated result needs, including the terminator.
        required: usize,
    },

    /// Compressed input is not a well-formed token sequence.
    #[error("Malformed stream at offset {offset}: {reason}")]
    MalformedStream {
        /// Byte offset into the compressed input.
        offset: usize,
        /// Description of the defect.
        reason: &'static str,
    },

    /// Dictionary descriptor boundaries are inconsistent.
    #[error("Invalid dictionary: {reason}")]
    InvalidDictionary {
        /// Description of the inconsistency.
        reason: String,
    },

    /// No dictionary is registered under the requested name.
    #[error("Unknown dictionary: {name}")]
    UnknownDictionary {
        /// The name that was looked up.
        name: String,
    },

    /// I/O error while reading or writing a dictionary file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dictionary file could not be parsed.
    #[cfg(feature = "serde")]
    #[error("Dictionary file error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for FBP operations.
pub type Result<T> = std::result::Result<T, FbpError>;

impl FbpError {
    /// Create a capacity exhausted error.
    pub fn capacity_exhausted(written: usize, required: usize) -> Self {
        Self::CapacityExhausted { written, required }
    }

    /// Create a malformed stream error.
    pub fn malformed(offset: usize, reason: &'static str) -> Self {
        Self::MalformedStream { offset, reason }
    }

    /// Create an invalid dictionary error.
    pub fn invalid_dictionary(reason: impl Into<String>) -> Self {
        Self::InvalidDictionary {
            reason: reason.into(),
        }
    }

    /// Create an unknown dictionary error.
    pub fn unknown_dictionary(name: impl Into<String>) -> Self {
        Self::UnknownDictionary { name: name.into() }
    }

    /// Whether the error only signals truncated output.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::CapacityExhausted { .. })
    }
}
