//! Core types for the StrataKV client
//!
//! This crate defines the data model shared by every layer of the client:
//! - Key, Cas: addressing and optimistic-concurrency tokens
//! - Value: application value model
//! - Format: value format tags and their provider flag words
//! - Status: per-key outcome codes
//! - OperationResult, MultiResult: per-key and per-call outcomes
//! - KvError: the structured error raised for failed calls

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod format;
pub mod result;
pub mod status;
pub mod types;
pub mod value;

pub use error::{select_kind, ErrorKind, KvError, Result};
pub use format::{Format, ParseFormatError, FLAG_BYTES, FLAG_JSON, FLAG_NATIVE, FLAG_UTF8};
pub use result::{MultiResult, OperationResult};
pub use status::Status;
pub use types::{Cas, Key};
pub use value::Value;
