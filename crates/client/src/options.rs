//! Per-call options
//!
//! Options are small `Copy` values built with chained setters:
//!
//! ```ignore
//! let opts = StoreOptions::new().format(Format::Utf8).ttl(Duration::from_secs(2));
//! client.set("greeting", "hello", opts)?;
//! ```
//!
//! For multi-key calls the same options apply to every key.

use std::time::Duration;

use stratakv_core::{Cas, Format};

/// Options for `set` / `add` / `replace`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Format override; the client's policy is used when `None`
    pub format: Option<Format>,
    /// CAS precondition; `Cas(0)` is the same as `None`
    pub cas: Option<Cas>,
    /// Expiry forwarded to the provider
    pub ttl: Option<Duration>,
    /// Quiet override; the client default is used when `None`
    pub quiet: Option<bool>,
}

impl StoreOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode with `format` instead of the client's policy
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Require the stored value to carry `cas`
    pub fn cas(mut self, cas: impl Into<Cas>) -> Self {
        self.cas = Some(cas.into());
        self
    }

    /// Expire the value after `ttl`
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Return failed results instead of raising
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }
}

/// Options for `get`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Decode with this format, ignoring the stored flags
    pub format: Option<Format>,
    /// Quiet override; the client default is used when `None`
    pub quiet: Option<bool>,
}

impl GetOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode with `format` regardless of the stored flags
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Return failed results instead of raising
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }
}

/// Options for `delete`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// CAS precondition; `Cas(0)` is the same as `None`
    pub cas: Option<Cas>,
    /// Quiet override; the client default is used when `None`
    pub quiet: Option<bool>,
}

impl DeleteOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Only delete if the stored value carries `cas`
    pub fn cas(mut self, cas: impl Into<Cas>) -> Self {
        self.cas = Some(cas.into());
        self
    }

    /// Return failed results instead of raising
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }
}
