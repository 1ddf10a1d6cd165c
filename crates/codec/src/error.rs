//! Codec error types

use stratakv_core::{Format, Status};
use thiserror::Error;

/// Result type alias for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Errors raised while encoding, decoding or configuring formats
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value's shape cannot be represented in the format
    #[error("cannot encode value as {format}: {reason}")]
    Unrepresentable {
        /// Format that rejected the value
        format: Format,
        /// What was wrong with the value
        reason: String,
    },

    /// The serializer failed
    #[error("failed to encode value as {format}: {reason}")]
    Encode {
        /// Format being encoded
        format: Format,
        /// Serializer message
        reason: String,
    },

    /// Stored bytes are not valid for their format
    #[error("failed to decode {format} value: {reason}")]
    Decode {
        /// Format being decoded
        format: Format,
        /// Deserializer message
        reason: String,
    },

    /// Stored flag word names no known format
    #[error("unknown format flags 0x{0:02x}")]
    UnknownFlags(u32),

    /// A format policy was configured with no formats
    #[error("format policy must name at least one format")]
    EmptyPolicy,
}

impl CodecError {
    pub(crate) fn unrepresentable(format: Format, reason: impl Into<String>) -> Self {
        CodecError::Unrepresentable {
            format,
            reason: reason.into(),
        }
    }

    /// Whether this error describes a value/format incompatibility
    ///
    /// Everything except a misconfigured policy is a per-value failure.
    pub fn is_value_format(&self) -> bool {
        !matches!(self, CodecError::EmptyPolicy)
    }

    /// Status recorded on the operation result of the affected key
    pub fn status(&self) -> Status {
        if self.is_value_format() {
            Status::ValueFormat
        } else {
            Status::InvalidArgument
        }
    }
}
