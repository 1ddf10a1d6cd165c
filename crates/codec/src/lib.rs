//! Value codec for the StrataKV client
//!
//! Turns [`Value`](stratakv_core::Value)s into bytes for a declared
//! [`Format`](stratakv_core::Format) and back, and validates that a value is
//! representable before it is dispatched.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod policy;

pub use codec::{decode, decode_flags, encode, validate};
pub use error::{CodecError, CodecResult};
pub use policy::FormatPolicy;
