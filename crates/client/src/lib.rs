//! Client core for StrataKV
//!
//! This crate is the caller-facing layer of the key-value client:
//! - Client: single- and multi-key set / add / replace / get / delete
//! - StoreOptions, GetOptions, DeleteOptions: per-call options
//! - ClientConfig: `stratakv.toml` defaults (quiet mode, format policy)
//!
//! Every call returns either results for all of its keys or one
//! [`KvError`] that embeds them. Transport lives behind
//! [`StoreProvider`]; [`MemoryProvider`] is the in-process implementation.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod batch;
pub mod client;
pub mod config;
pub mod options;

pub use client::Client;
pub use config::{ClientConfig, ConfigError, CONFIG_FILE_NAME};
pub use options::{DeleteOptions, GetOptions, StoreOptions};

// Re-export the data model so callers need only this crate
pub use stratakv_codec::{CodecError, FormatPolicy};
pub use stratakv_concurrency::StoreMode;
pub use stratakv_core::{
    Cas, ErrorKind, Format, Key, KvError, MultiResult, OperationResult, Result, Status, Value,
};
pub use stratakv_storage::{
    DeleteOutcome, DeleteRequest, GetOutcome, MemoryProvider, PutOutcome, PutRequest,
    StoreProvider,
};

/// Precondition types for custom [`StoreProvider`] implementations
pub use stratakv_concurrency::{CasGuard, Precondition, PreconditionMode};
