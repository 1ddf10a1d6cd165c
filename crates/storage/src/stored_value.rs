//! Provider-side stored value with expiry
//!
//! TTL is a storage concern: the client only forwards it. The stored value
//! keeps an absolute deadline computed when the write was applied.

use std::time::{Duration, Instant};

use stratakv_core::Cas;

/// A value as held by the in-memory provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    bytes: Vec<u8>,
    flags: u32,
    cas: Cas,
    expires_at: Option<Instant>,
}

impl StoredValue {
    /// Create a stored value written at `now`
    ///
    /// A zero TTL means the value never expires.
    pub fn new(bytes: Vec<u8>, flags: u32, cas: Cas, ttl: Option<Duration>, now: Instant) -> Self {
        StoredValue {
            bytes,
            flags,
            cas,
            expires_at: ttl.filter(|d| !d.is_zero()).map(|d| now + d),
        }
    }

    /// Stored bytes
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Format flag word
    #[inline]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// CAS token
    #[inline]
    pub fn cas(&self) -> Cas {
        self.cas
    }

    /// Expiry deadline, if any
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Check if the value is expired at `now`
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map_or(false, |deadline| now >= deadline)
    }

    /// CAS if the value is still live at `now`
    pub fn live_cas(&self, now: Instant) -> Option<Cas> {
        (!self.is_expired(now)).then_some(self.cas)
    }
}
