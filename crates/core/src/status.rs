//! Per-key status codes
//!
//! A `Status` is the raw outcome of one key's operation. Most statuses come
//! from the store provider; two are produced on the client side before a key
//! is ever dispatched (`ValueFormat` for values the codec rejects, and
//! `InvalidArgument` for option combinations rejected up front).
//!
//! Numeric codes follow the provider's status table so that `rc` values seen
//! in logs line up with provider-side diagnostics. Client-originated codes
//! live above `0xFF`.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a single key operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Operation succeeded
    Success,
    /// Value exceeds the provider's size limit
    ValueTooLarge,
    /// Provider is too busy to serve the request
    Busy,
    /// Provider-internal failure, or an outcome the provider never reported
    Internal,
    /// Provider rejected an argument (e.g. mutually exclusive options)
    InvalidArgument,
    /// Provider is out of memory
    NoMemory,
    /// Unclassified provider error
    Error,
    /// Temporary failure, the same request may succeed later
    TemporaryFailure,
    /// Key already exists, or the supplied CAS did not match
    KeyExists,
    /// Key does not exist
    KeyNotFound,
    /// Network failure between client and provider
    Network,
    /// Store precondition failed without saying which one
    NotStored,
    /// Operation not supported by the provider
    NotSupported,
    /// Provider timeout elapsed before the key completed
    Timeout,
    /// Value could not be encoded or decoded in the requested format
    ValueFormat,
    /// Any other provider code
    ///
    /// Never carries a code another variant names; [`Status::normalize`]
    /// folds such values back onto their variant.
    Other(u16),
}

impl Status {
    /// Numeric status code
    pub fn code(self) -> u16 {
        match self {
            Status::Success => 0x00,
            Status::ValueTooLarge => 0x04,
            Status::Busy => 0x05,
            Status::Internal => 0x06,
            Status::InvalidArgument => 0x07,
            Status::NoMemory => 0x08,
            Status::Error => 0x0A,
            Status::TemporaryFailure => 0x0B,
            Status::KeyExists => 0x0C,
            Status::KeyNotFound => 0x0D,
            Status::Network => 0x10,
            Status::NotStored => 0x12,
            Status::NotSupported => 0x13,
            Status::Timeout => 0x17,
            Status::ValueFormat => 0x101,
            Status::Other(code) => code,
        }
    }

    /// Map a numeric code back to a status
    pub fn from_code(code: u16) -> Status {
        match code {
            0x00 => Status::Success,
            0x04 => Status::ValueTooLarge,
            0x05 => Status::Busy,
            0x06 => Status::Internal,
            0x07 => Status::InvalidArgument,
            0x08 => Status::NoMemory,
            0x0A => Status::Error,
            0x0B => Status::TemporaryFailure,
            0x0C => Status::KeyExists,
            0x0D => Status::KeyNotFound,
            0x10 => Status::Network,
            0x12 => Status::NotStored,
            0x13 => Status::NotSupported,
            0x17 => Status::Timeout,
            0x101 => Status::ValueFormat,
            other => Status::Other(other),
        }
    }

    /// Fold an `Other` that carries a known code back onto its variant
    #[inline]
    pub fn normalize(self) -> Status {
        match self {
            Status::Other(code) => Status::from_code(code),
            status => status,
        }
    }

    /// Check whether this status means the operation succeeded
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    /// Error kind this status escalates to, or `None` on success
    pub fn error_kind(self) -> Option<ErrorKind> {
        match self {
            Status::Success => None,
            Status::KeyNotFound => Some(ErrorKind::NotFound),
            Status::KeyExists => Some(ErrorKind::KeyExists),
            Status::ValueFormat => Some(ErrorKind::ValueFormat),
            Status::InvalidArgument => Some(ErrorKind::Argument),
            Status::Timeout => Some(ErrorKind::Timeout),
            _ => Some(ErrorKind::Generic),
        }
    }

    /// Short human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::ValueTooLarge => "value too large",
            Status::Busy => "provider busy",
            Status::Internal => "internal error",
            Status::InvalidArgument => "invalid argument",
            Status::NoMemory => "out of memory",
            Status::Error => "generic error",
            Status::TemporaryFailure => "temporary failure",
            Status::KeyExists => "key exists (CAS mismatch)",
            Status::KeyNotFound => "no such key",
            Status::Network => "network error",
            Status::NotStored => "not stored",
            Status::NotSupported => "not supported",
            Status::Timeout => "operation timed out",
            Status::ValueFormat => "value format error",
            Status::Other(_) => "unknown status",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}[{}]", self.code(), self.description())
    }
}
