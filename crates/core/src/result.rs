//! Operation results
//!
//! - [`OperationResult`]: the outcome of one key's operation
//! - [`MultiResult`]: the outcomes of every key touched by one call
//!
//! Both are built once, after the provider has reported, and are read-only
//! afterwards. Success is an explicit boolean derived from the status; a
//! result is never "truthy" by virtue of carrying a value.

use crate::format::Format;
use crate::status::Status;
use crate::types::{Cas, Key};
use crate::value::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Index;

/// Outcome of a single key operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    key: Key,
    status: Status,
    cas: Option<Cas>,
    value: Option<Value>,
    format: Option<Format>,
    reason: Option<String>,
}

impl OperationResult {
    /// Create a result for `key` with the given status and nothing else
    ///
    /// The status is normalized, so `Status::Other` never shadows a known code.
    pub fn new(key: Key, status: Status) -> Self {
        OperationResult {
            key,
            status: status.normalize(),
            cas: None,
            value: None,
            format: None,
            reason: None,
        }
    }

    /// Create a failed result carrying a human-readable reason
    pub fn failed(key: Key, status: Status, reason: impl Into<String>) -> Self {
        OperationResult::new(key, status).with_reason(reason)
    }

    /// Attach the CAS reported by the provider
    ///
    /// A zero CAS is dropped: zero never identifies a stored value.
    pub fn with_cas(mut self, cas: Option<Cas>) -> Self {
        self.cas = Cas::normalize(cas);
        self
    }

    /// Attach a decoded value and the format it was decoded from
    pub fn with_value(mut self, value: Value, format: Format) -> Self {
        self.value = Some(value);
        self.format = Some(format);
        self
    }

    /// Attach a human-readable failure reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Key this result belongs to
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether the operation succeeded
    #[inline]
    pub fn success(&self) -> bool {
        self.status.is_success()
    }

    /// Status of the operation
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Numeric status code
    #[inline]
    pub fn rc(&self) -> u16 {
        self.status.code()
    }

    /// CAS of the stored value, when the provider reported one
    pub fn cas(&self) -> Option<Cas> {
        self.cas
    }

    /// Decoded value (reads only)
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Consume the result and return the decoded value
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Format the value was stored with (reads only)
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Failure reason, falling back to the status description
    pub fn reason(&self) -> &str {
        match &self.reason {
            Some(reason) => reason,
            None => self.status.description(),
        }
    }
}

/// Keyed outcomes of one client call
///
/// Holds exactly one [`OperationResult`] per key the call touched. Iteration
/// is in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiResult {
    results: BTreeMap<Key, OperationResult>,
}

impl MultiResult {
    /// Wrap a single result
    pub fn single(result: OperationResult) -> Self {
        std::iter::once(result).collect()
    }

    /// Number of keys covered
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check whether no keys are covered
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Check whether a key is covered
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.results.contains_key(key.as_ref())
    }

    /// Look up the result for a key
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&OperationResult> {
        self.results.get(key.as_ref())
    }

    /// True iff every contained result succeeded
    ///
    /// An empty aggregator is trivially all-ok.
    pub fn all_ok(&self) -> bool {
        self.results.values().all(OperationResult::success)
    }

    /// Iterate over `(key, result)` pairs in key order
    pub fn iter(&self) -> btree_map::Iter<'_, Key, OperationResult> {
        self.results.iter()
    }

    /// Iterate over the covered keys
    pub fn keys(&self) -> btree_map::Keys<'_, Key, OperationResult> {
        self.results.keys()
    }

    /// Iterate over the failed results
    pub fn failures(&self) -> impl Iterator<Item = &OperationResult> {
        self.results.values().filter(|r| !r.success())
    }

    /// Number of failed results
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Remove and return the result for a key
    ///
    /// Consumes the aggregator so that a populated aggregator is never
    /// mutated in place.
    pub fn into_result(mut self, key: impl AsRef<[u8]>) -> Option<OperationResult> {
        self.results.remove(key.as_ref())
    }
}

impl FromIterator<OperationResult> for MultiResult {
    fn from_iter<I: IntoIterator<Item = OperationResult>>(iter: I) -> Self {
        MultiResult {
            results: iter.into_iter().map(|r| (r.key.clone(), r)).collect(),
        }
    }
}

impl IntoIterator for MultiResult {
    type Item = (Key, OperationResult);
    type IntoIter = btree_map::IntoIter<Key, OperationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiResult {
    type Item = (&'a Key, &'a OperationResult);
    type IntoIter = btree_map::Iter<'a, Key, OperationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl Index<&Key> for MultiResult {
    type Output = OperationResult;

    fn index(&self, key: &Key) -> &OperationResult {
        &self.results[key]
    }
}

impl Index<&str> for MultiResult {
    type Output = OperationResult;

    fn index(&self, key: &str) -> &OperationResult {
        &self.results[key.as_bytes()]
    }
}
