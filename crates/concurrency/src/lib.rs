//! Concurrency layer for the StrataKV client
//!
//! Optimistic concurrency control for single-key mutations:
//! - StoreMode: what the caller asked for (set / add / replace)
//! - Precondition: what is sent to the provider
//! - CasGuard: translation and evaluation of preconditions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod guard;

pub use guard::{CasGuard, GuardError, Precondition, PreconditionMode, StoreMode};
