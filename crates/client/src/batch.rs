//! Batch result assembly
//!
//! A [`Batch`] holds one slot per requested key. Slots are filled either by
//! client-side rejections (encoding, argument checks) before dispatch or by
//! provider outcomes after it. [`Batch::finish`] joins: every key that never
//! received an outcome is recorded as an internal failure, so the returned
//! aggregator always covers exactly the requested keys.

use std::collections::BTreeMap;

use stratakv_core::{Key, MultiResult, OperationResult, Status};
use tracing::{trace, warn};

/// Reason attached to keys the provider never reported
pub(crate) const UNREPORTED: &str = "provider reported no outcome for key";

/// Per-call result slots
#[derive(Debug)]
pub(crate) struct Batch {
    op: &'static str,
    slots: BTreeMap<Key, Option<OperationResult>>,
}

impl Batch {
    pub(crate) fn new(op: &'static str) -> Self {
        Batch {
            op,
            slots: BTreeMap::new(),
        }
    }

    /// Register a key the call is expected to report
    ///
    /// Returns `false` if the key was already registered.
    pub(crate) fn expect(&mut self, key: Key) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        self.slots.insert(key, None);
        true
    }

    /// Fill a slot with a result produced before dispatch
    pub(crate) fn reject(&mut self, result: OperationResult) {
        trace!(
            op = self.op,
            key = %result.key(),
            status = %result.status(),
            "rejected before dispatch"
        );
        self.slots.insert(result.key().clone(), Some(result));
    }

    /// Fill a slot with a result derived from a provider outcome
    ///
    /// Outcomes for keys that were never requested, or that already have a
    /// result, are dropped.
    pub(crate) fn record(&mut self, result: OperationResult) {
        match self.slots.get_mut(result.key()) {
            Some(slot @ None) => {
                trace!(op = self.op, key = %result.key(), status = %result.status(), "outcome");
                *slot = Some(result);
            }
            Some(Some(_)) => {
                warn!(op = self.op, key = %result.key(), "duplicate outcome from provider ignored");
            }
            None => {
                warn!(op = self.op, key = %result.key(), "outcome for unrequested key ignored");
            }
        }
    }

    /// Operation name used in log events
    pub(crate) fn op(&self) -> &'static str {
        self.op
    }

    /// Number of registered keys
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Join all slots into an aggregator
    pub(crate) fn finish(self) -> MultiResult {
        let op = self.op;
        self.slots
            .into_iter()
            .map(|(key, slot)| match slot {
                Some(result) => result,
                None => {
                    warn!(op, key = %key, "provider reported no outcome");
                    OperationResult::failed(key, Status::Internal, UNREPORTED)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratakv_core::Cas;

    fn ok(key: &str) -> OperationResult {
        OperationResult::new(Key::from(key), Status::Success).with_cas(Some(Cas(3)))
    }

    #[test]
    fn test_expect_rejects_duplicates() {
        let mut batch = Batch::new("get");
        assert!(batch.expect(Key::from("a")));
        assert!(!batch.expect(Key::from("a")));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_unreported_key_becomes_internal() {
        let mut batch = Batch::new("set");
        batch.expect(Key::from("a"));
        batch.expect(Key::from("b"));
        batch.record(ok("a"));

        let multi = batch.finish();
        assert_eq!(multi.len(), 2);
        assert!(multi["a"].success());
        assert_eq!(multi["b"].status(), Status::Internal);
        assert_eq!(multi["b"].reason(), UNREPORTED);
    }

    #[test]
    fn test_unrequested_and_duplicate_outcomes_dropped() {
        let mut batch = Batch::new("set");
        batch.expect(Key::from("a"));
        batch.record(ok("a"));
        batch.record(OperationResult::new(Key::from("a"), Status::KeyExists));
        batch.record(ok("zzz"));

        let multi = batch.finish();
        assert_eq!(multi.len(), 1);
        assert!(multi["a"].success());
    }

    #[test]
    fn test_rejection_fills_slot() {
        let mut batch = Batch::new("set");
        batch.expect(Key::from("a"));
        batch.reject(OperationResult::failed(Key::from("a"), Status::ValueFormat, "bad"));

        let multi = batch.finish();
        assert_eq!(multi["a"].status(), Status::ValueFormat);
        assert_eq!(multi["a"].reason(), "bad");
    }
}
