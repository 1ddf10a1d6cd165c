//! In-memory store provider
//!
//! Reference [`StoreProvider`] used by tests, benchmarks and embedded use.
//!
//! # Design
//!
//! - DashMap: sharded map, a store only locks the target key's shard
//! - Preconditions are evaluated with [`CasGuard`] while the key's entry is
//!   held, so check-and-write is atomic per key
//! - CAS tokens come from one AtomicU64 and are never reused
//! - Expiry is lazy: expired values are treated as absent and removed when
//!   touched, or in bulk by [`MemoryProvider::purge_expired`]
//! - Batches run on the rayon pool when parallel batches are enabled; the
//!   collected vector is the join point
//!
//! # Fault Injection
//!
//! [`MemoryProvider::inject_fault`] makes every operation on a key report a
//! fixed status (e.g. `Timeout`) without touching the stored value.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::trace;

use stratakv_concurrency::CasGuard;
use stratakv_core::{Cas, Key, Status};

use crate::provider::{
    DeleteOutcome, DeleteRequest, GetOutcome, PutOutcome, PutRequest, StoreProvider,
};
use crate::stored_value::StoredValue;

/// Default maximum encoded value size (20 MiB)
pub const DEFAULT_MAX_VALUE_SIZE: usize = 20 * 1024 * 1024;

/// In-memory store provider
#[derive(Debug)]
pub struct MemoryProvider {
    entries: DashMap<Key, StoredValue>,
    next_cas: AtomicU64,
    faults: RwLock<HashMap<Key, Status>>,
    parallel: bool,
    max_value_size: usize,
}

impl MemoryProvider {
    /// Create an empty provider with parallel batches enabled
    pub fn new() -> Self {
        MemoryProvider {
            entries: DashMap::new(),
            next_cas: AtomicU64::new(1),
            faults: RwLock::new(HashMap::new()),
            parallel: true,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
        }
    }

    /// Enable or disable running batches on the rayon pool
    pub fn with_parallel_batches(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the largest encoded value accepted
    pub fn with_max_value_size(mut self, max_value_size: usize) -> Self {
        self.max_value_size = max_value_size;
        self
    }

    /// Make every operation on `key` report `status`
    pub fn inject_fault(&self, key: impl Into<Key>, status: Status) {
        self.faults.write().insert(key.into(), status);
    }

    /// Remove the fault for `key`
    pub fn clear_fault(&self, key: impl AsRef<[u8]>) {
        self.faults.write().remove(key.as_ref());
    }

    /// Remove every injected fault
    pub fn clear_faults(&self) {
        self.faults.write().clear();
    }

    /// Number of stored values, expired ones included until purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current CAS of a live key, bypassing faults
    pub fn current_cas(&self, key: impl AsRef<[u8]>) -> Option<Cas> {
        let now = Instant::now();
        self.entries
            .get(key.as_ref())
            .and_then(|entry| entry.live_cas(now))
    }

    /// Remove every expired value
    ///
    /// Returns the number of values removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, value| !value.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            trace!(removed, "purged expired values");
        }
        removed
    }

    fn fault(&self, key: &Key) -> Option<Status> {
        self.faults.read().get(key).copied()
    }

    fn allocate_cas(&self) -> Cas {
        Cas(self.next_cas.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreProvider for MemoryProvider {
    fn put(&self, request: PutRequest) -> PutOutcome {
        if let Some(status) = self.fault(&request.key) {
            return PutOutcome::failed(request.key, status);
        }
        if request.bytes.len() > self.max_value_size {
            return PutOutcome::failed(request.key, Status::ValueTooLarge);
        }

        let now = Instant::now();
        let PutRequest {
            key,
            bytes,
            flags,
            precondition,
            ttl,
        } = request;

        match self.entries.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get().live_cas(now);
                let status = CasGuard::check_store(&precondition, current);
                if !status.is_success() {
                    if current.is_none() {
                        trace!(key = %key, "dropping expired value");
                        occupied.remove();
                    }
                    return PutOutcome::failed(key, status);
                }
                let cas = self.allocate_cas();
                occupied.insert(StoredValue::new(bytes, flags, cas, ttl, now));
                PutOutcome::stored(key, cas)
            }
            Entry::Vacant(vacant) => {
                let status = CasGuard::check_store(&precondition, None);
                if !status.is_success() {
                    return PutOutcome::failed(key, status);
                }
                let cas = self.allocate_cas();
                vacant.insert(StoredValue::new(bytes, flags, cas, ttl, now));
                PutOutcome::stored(key, cas)
            }
        }
    }

    fn get(&self, key: &Key) -> GetOutcome {
        if let Some(status) = self.fault(key) {
            return GetOutcome::failed(key.clone(), status);
        }

        let now = Instant::now();
        let found = self.entries.get(key).map(|entry| {
            if entry.is_expired(now) {
                None
            } else {
                Some((entry.bytes().to_vec(), entry.flags(), entry.cas()))
            }
        });

        match found {
            Some(Some((bytes, flags, cas))) => GetOutcome::found(key.clone(), bytes, flags, cas),
            Some(None) => {
                trace!(key = %key, "dropping expired value");
                self.entries.remove_if(key, |_, value| value.is_expired(now));
                GetOutcome::failed(key.clone(), Status::KeyNotFound)
            }
            None => GetOutcome::failed(key.clone(), Status::KeyNotFound),
        }
    }

    fn delete(&self, request: DeleteRequest) -> DeleteOutcome {
        let DeleteRequest { key, expected_cas } = request;
        if let Some(status) = self.fault(&key) {
            return DeleteOutcome::failed(key, status);
        }

        let now = Instant::now();
        let status = match self.entries.entry(key.clone()) {
            Entry::Occupied(occupied) => {
                let current = occupied.get().live_cas(now);
                let status = CasGuard::check_delete(expected_cas, current);
                if status.is_success() || current.is_none() {
                    occupied.remove();
                }
                status
            }
            Entry::Vacant(_) => CasGuard::check_delete(expected_cas, None),
        };
        if status.is_success() {
            DeleteOutcome::removed(key, self.allocate_cas())
        } else {
            DeleteOutcome::failed(key, status)
        }
    }

    fn put_batch(&self, requests: Vec<PutRequest>) -> Vec<PutOutcome> {
        if self.parallel {
            requests.into_par_iter().map(|r| self.put(r)).collect()
        } else {
            requests.into_iter().map(|r| self.put(r)).collect()
        }
    }

    fn get_batch(&self, keys: &[Key]) -> Vec<GetOutcome> {
        if self.parallel {
            keys.par_iter().map(|k| self.get(k)).collect()
        } else {
            keys.iter().map(|k| self.get(k)).collect()
        }
    }

    fn delete_batch(&self, requests: Vec<DeleteRequest>) -> Vec<DeleteOutcome> {
        if self.parallel {
            requests.into_par_iter().map(|r| self.delete(r)).collect()
        } else {
            requests.into_iter().map(|r| self.delete(r)).collect()
        }
    }
}
