//! Storage boundary for the StrataKV client
//!
//! This crate defines:
//! - StoreProvider: the interface the client core dispatches to
//! - Request / outcome types exchanged across that interface
//! - MemoryProvider: an in-memory provider with CAS, TTL and fault injection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod provider;
pub mod stored_value;

pub use memory::{MemoryProvider, DEFAULT_MAX_VALUE_SIZE};
pub use provider::{
    DeleteOutcome, DeleteRequest, GetOutcome, PutOutcome, PutRequest, StoreProvider,
};
pub use stored_value::StoredValue;
