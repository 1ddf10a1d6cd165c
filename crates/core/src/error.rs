//! Structured client errors
//!
//! A failed call surfaces as exactly one [`KvError`]. The error embeds the
//! [`MultiResult`] covering every key the call touched, successes included,
//! so a caller can recover per-key detail (and successful values) from a
//! partially failed batch.
//!
//! ## Kind selection
//!
//! Over the failed results of a call, in order:
//!
//! 1. every failure is "not found" → [`ErrorKind::NotFound`]
//! 2. every failure is "exists" / CAS mismatch → [`ErrorKind::KeyExists`]
//! 3. any failure is a format failure → [`ErrorKind::ValueFormat`]
//! 4. any failure is a rejected argument → [`ErrorKind::Argument`]
//! 5. every failure is a timeout → [`ErrorKind::Timeout`]
//! 6. otherwise → [`ErrorKind::Generic`]

use crate::result::{MultiResult, OperationResult};
use crate::status::Status;
use crate::types::Key;
use std::fmt;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Category of a raised error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Key does not exist
    NotFound,
    /// Key already exists, or the supplied CAS did not match
    KeyExists,
    /// Value cannot be represented in, or decoded from, its format
    ValueFormat,
    /// An argument or option combination was rejected
    Argument,
    /// The provider timed out
    Timeout,
    /// Anything else, including heterogeneous batch failures
    Generic,
}

impl ErrorKind {
    /// Stable name used in rendered errors
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::KeyExists => "KeyExistsError",
            ErrorKind::ValueFormat => "ValueFormatError",
            ErrorKind::Argument => "ArgumentError",
            ErrorKind::Timeout => "TimeoutError",
            ErrorKind::Generic => "KvError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single error raised for a failed call
///
/// - `key` is set for single-key calls and absent for multi-key calls
/// - `rc` is the status of the triggering (first failing) key
/// - `all_results` covers every key of the call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message} <{}RC={rc}, Results={}>", render_key(.key), .all_results.len())]
pub struct KvError {
    kind: ErrorKind,
    message: String,
    key: Option<Key>,
    rc: Status,
    all_results: MultiResult,
}

fn render_key(key: &Option<Key>) -> String {
    match key {
        Some(key) => format!("Key={}, ", key),
        None => String::new(),
    }
}

impl KvError {
    /// Build the error for a single-key call, if its result failed
    ///
    /// The result is embedded in an aggregator of size one, keeping the
    /// failure contract identical to the multi-key path.
    pub fn from_single(result: OperationResult) -> std::result::Result<OperationResult, KvError> {
        if result.success() {
            return Ok(result);
        }
        let key = result.key().clone();
        let message = result.reason().to_string();
        let kind = select_kind(std::iter::once(&result));
        let rc = result.status();
        Err(KvError {
            kind,
            message,
            key: Some(key),
            rc,
            all_results: MultiResult::single(result),
        })
    }

    /// Build the error for a multi-key call, if any of its results failed
    pub fn from_multi(results: MultiResult) -> std::result::Result<MultiResult, KvError> {
        if results.all_ok() {
            return Ok(results);
        }
        let failures: Vec<&OperationResult> = results.failures().collect();
        let first = failures[0];
        let rc = first.status();
        let kind = select_kind(failures.iter().copied());
        let failed = failures.len();
        let message = if failed == 1 {
            format!("operation failed for key {}: {}", first.key(), first.reason())
        } else {
            format!(
                "{} of {} operations failed, first at key {}: {}",
                failed,
                results.len(),
                first.key(),
                first.reason()
            )
        };
        Err(KvError {
            kind,
            message,
            key: None,
            rc,
            all_results: results,
        })
    }

    /// Build an argument error rejecting a whole call before dispatch
    ///
    /// `results` must hold one failed result per key of the call.
    pub fn argument(
        message: impl Into<String>,
        key: Option<Key>,
        results: MultiResult,
    ) -> KvError {
        KvError {
            kind: ErrorKind::Argument,
            message: message.into(),
            key,
            rc: Status::InvalidArgument,
            all_results: results,
        }
    }

    /// Error category
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Triggering key (single-key calls only)
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Status of the triggering key
    pub fn rc(&self) -> Status {
        self.rc
    }

    /// Results for every key of the failed call
    pub fn all_results(&self) -> &MultiResult {
        &self.all_results
    }

    /// Consume the error and take ownership of its results
    pub fn into_results(self) -> MultiResult {
        self.all_results
    }

    /// Check for [`ErrorKind::NotFound`]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Check for [`ErrorKind::KeyExists`]
    pub fn is_key_exists(&self) -> bool {
        self.kind == ErrorKind::KeyExists
    }
}

/// Pick the error kind for a set of failed results
pub fn select_kind<'a>(failures: impl Iterator<Item = &'a OperationResult>) -> ErrorKind {
    let kinds: Vec<ErrorKind> = failures.filter_map(|r| r.status().error_kind()).collect();
    let every = |kind: ErrorKind| !kinds.is_empty() && kinds.iter().all(|k| *k == kind);
    let any = |kind: ErrorKind| kinds.iter().any(|k| *k == kind);

    if every(ErrorKind::NotFound) {
        ErrorKind::NotFound
    } else if every(ErrorKind::KeyExists) {
        ErrorKind::KeyExists
    } else if any(ErrorKind::ValueFormat) {
        ErrorKind::ValueFormat
    } else if any(ErrorKind::Argument) {
        ErrorKind::Argument
    } else if every(ErrorKind::Timeout) {
        ErrorKind::Timeout
    } else {
        ErrorKind::Generic
    }
}
