//! StrataKV - key-value client core
//!
//! StrataKV turns single- and multi-key store operations into per-key
//! results, guards mutations with CAS tokens, and raises one structured
//! error per failed call.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use stratakv::{Client, GetOptions, MemoryProvider, StoreOptions};
//!
//! let client = Client::new(Arc::new(MemoryProvider::new()));
//!
//! // Store a value and keep its CAS
//! let stored = client.set("user:123", "Alice", StoreOptions::new())?;
//!
//! // Only overwrite if nobody else did in between
//! client.set("user:123", "Bob", StoreOptions::new().cas(stored.cas().unwrap()))?;
//!
//! // Read it back
//! let value = client.get("user:123", GetOptions::new())?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Client`], which dispatches encoded
//! requests to a [`StoreProvider`]. Transport, topology and wire protocol
//! live behind that trait; [`MemoryProvider`] is the in-process provider.

// Re-export the public API from stratakv-client
pub use stratakv_client::*;
