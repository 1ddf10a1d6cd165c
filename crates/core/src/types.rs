//! Core addressing types
//!
//! This module defines:
//! - Key: Opaque byte-string key, the addressing unit for every operation
//! - Cas: Provider-assigned version stamp used for optimistic concurrency

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque key addressing a single stored value
///
/// Keys are arbitrary byte strings. Text keys are stored as their UTF-8
/// bytes, so `Key::from("a")` and `Key::from(b"a".to_vec())` are the same key.
///
/// Keys order bytewise, which gives batch results a deterministic iteration
/// order independent of the order the provider reported them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(Vec<u8>);

impl Key {
    /// Create a key from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Key(bytes.into())
    }

    /// Raw key bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key as text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Consume the key and return its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the key in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the key is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Key {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.as_bytes().to_vec())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(s.into_bytes())
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(b: Vec<u8>) -> Self {
        Key(b)
    }
}

impl From<&[u8]> for Key {
    fn from(b: &[u8]) -> Self {
        Key(b.to_vec())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

/// CAS (compare-and-swap) token
///
/// An opaque version stamp the provider attaches to every stored value.
/// Successful writes always produce a non-zero token. A token is only
/// meaningful for the key it was issued for; presenting it for another key
/// is not rejected, it simply never matches.
///
/// The value `0` is reserved: a caller passing `Cas(0)` asks for no CAS
/// precondition at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cas(pub u64);

impl Cas {
    /// Raw token value
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check whether this is the reserved "no precondition" token
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Normalize a caller-supplied token: `Some(Cas(0))` becomes `None`
    pub fn normalize(cas: Option<Cas>) -> Option<Cas> {
        cas.filter(|c| !c.is_zero())
    }
}

impl fmt::Display for Cas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<u64> for Cas {
    fn from(v: u64) -> Self {
        Cas(v)
    }
}
