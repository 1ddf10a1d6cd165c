//! The client core
//!
//! [`Client`] is the single entry point callers use. Every call follows the
//! same path:
//!
//! 1. build per-key requests (CAS precondition, encoding)
//! 2. reject keys that cannot be dispatched, without calling the provider
//! 3. dispatch the rest through the provider's batch entry points
//! 4. join all outcomes into a [`MultiResult`] covering every requested key
//! 5. raise a [`KvError`] unless the call is quiet
//!
//! Single-key calls are one-key batches, so both paths share one failure
//! contract.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use stratakv_codec::{decode, decode_flags, FormatPolicy};
use stratakv_concurrency::{CasGuard, Precondition, StoreMode};
use stratakv_core::{
    Cas, Format, Key, KvError, MultiResult, OperationResult, Result, Status, Value,
};
use stratakv_storage::{
    DeleteOutcome, DeleteRequest, GetOutcome, PutOutcome, PutRequest, StoreProvider,
};
use tracing::{debug, warn};

use crate::batch::{Batch, UNREPORTED};
use crate::config::{ClientConfig, ConfigError};
use crate::options::{DeleteOptions, GetOptions, StoreOptions};

const MULTI_CAS_MESSAGE: &str = "a single CAS cannot be applied to multiple keys";

/// Key-value client over a [`StoreProvider`]
///
/// `Client` is `Send + Sync`; share it behind an `Arc` or clone it (clones
/// share the provider).
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use stratakv::{Client, MemoryProvider, StoreOptions, GetOptions};
///
/// let client = Client::new(Arc::new(MemoryProvider::new()));
/// let stored = client.set("user:1", "alice", StoreOptions::new())?;
///
/// // Compare-and-swap against the CAS we just got back
/// client.set("user:1", "bob", StoreOptions::new().cas(stored.cas().unwrap()))?;
///
/// let read = client.get("user:1", GetOptions::new())?;
/// assert_eq!(read.value().and_then(|v| v.as_str()), Some("bob"));
/// ```
#[derive(Clone)]
pub struct Client {
    provider: Arc<dyn StoreProvider>,
    policy: FormatPolicy,
    quiet: bool,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("policy", &self.policy)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with the default policy (JSON only) that raises on failure
    pub fn new(provider: Arc<dyn StoreProvider>) -> Self {
        Client {
            provider,
            policy: FormatPolicy::default(),
            quiet: false,
        }
    }

    /// Create a client configured from a [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the configured format list is unusable.
    pub fn with_config(
        provider: Arc<dyn StoreProvider>,
        config: &ClientConfig,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Client {
            provider,
            policy: config.format_policy()?,
            quiet: config.quiet,
        })
    }

    /// Replace the format policy
    pub fn with_policy(mut self, policy: FormatPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the default quiet mode
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Underlying provider
    pub fn provider(&self) -> &Arc<dyn StoreProvider> {
        &self.provider
    }

    /// Format policy used when a call names no format
    pub fn policy(&self) -> &FormatPolicy {
        &self.policy
    }

    /// Default quiet mode
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    // =========================================================================
    // Single-key operations
    // =========================================================================

    /// Store a value unconditionally, or against a CAS
    pub fn set(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
        options: StoreOptions,
    ) -> Result<OperationResult> {
        self.store_one(StoreMode::Set, key.into(), value.into(), options)
    }

    /// Store a value only if the key has none
    ///
    /// A CAS in `options` is rejected with an argument failure.
    pub fn add(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
        options: StoreOptions,
    ) -> Result<OperationResult> {
        self.store_one(StoreMode::Add, key.into(), value.into(), options)
    }

    /// Store a value only if the key already has one
    pub fn replace(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
        options: StoreOptions,
    ) -> Result<OperationResult> {
        self.store_one(StoreMode::Replace, key.into(), value.into(), options)
    }

    /// Read a value
    pub fn get(&self, key: impl Into<Key>, options: GetOptions) -> Result<OperationResult> {
        let key = key.into();
        let results = self.read(vec![key.clone()], &options);
        self.finish_single(key, results, options.quiet)
    }

    /// Delete a value, optionally only if it carries a CAS
    pub fn delete(&self, key: impl Into<Key>, options: DeleteOptions) -> Result<OperationResult> {
        let key = key.into();
        let results = self.remove(vec![key.clone()], &options);
        self.finish_single(key, results, options.quiet)
    }

    // =========================================================================
    // Multi-key operations
    // =========================================================================

    /// Store many values unconditionally
    ///
    /// When a key appears more than once, the last value wins.
    pub fn set_multi<K, V>(
        &self,
        items: impl IntoIterator<Item = (K, V)>,
        options: StoreOptions,
    ) -> Result<MultiResult>
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        self.store_many(StoreMode::Set, items, options)
    }

    /// Store many values, each only if its key has none
    pub fn add_multi<K, V>(
        &self,
        items: impl IntoIterator<Item = (K, V)>,
        options: StoreOptions,
    ) -> Result<MultiResult>
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        self.store_many(StoreMode::Add, items, options)
    }

    /// Store many values, each only if its key already has one
    pub fn replace_multi<K, V>(
        &self,
        items: impl IntoIterator<Item = (K, V)>,
        options: StoreOptions,
    ) -> Result<MultiResult>
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        self.store_many(StoreMode::Replace, items, options)
    }

    /// Read many keys
    ///
    /// Repeated keys are read once.
    pub fn get_multi<K: Into<Key>>(
        &self,
        keys: impl IntoIterator<Item = K>,
        options: GetOptions,
    ) -> Result<MultiResult> {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        let results = self.read(keys, &options);
        self.finish_multi(results, options.quiet)
    }

    /// Delete many keys
    ///
    /// A CAS in `options` rejects the whole call with an argument error.
    pub fn delete_multi<K: Into<Key>>(
        &self,
        keys: impl IntoIterator<Item = K>,
        options: DeleteOptions,
    ) -> Result<MultiResult> {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        if Cas::normalize(options.cas).is_some() {
            return Err(reject_multi_cas(keys));
        }
        let results = self.remove(keys, &options);
        self.finish_multi(results, options.quiet)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn store_one(
        &self,
        mode: StoreMode,
        key: Key,
        value: Value,
        options: StoreOptions,
    ) -> Result<OperationResult> {
        let mut entries = BTreeMap::new();
        entries.insert(key.clone(), value);
        let results = self.store(mode, entries, &options);
        self.finish_single(key, results, options.quiet)
    }

    fn store_many<K, V>(
        &self,
        mode: StoreMode,
        items: impl IntoIterator<Item = (K, V)>,
        options: StoreOptions,
    ) -> Result<MultiResult>
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        let entries: BTreeMap<Key, Value> = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if Cas::normalize(options.cas).is_some() {
            return Err(reject_multi_cas(entries.into_keys()));
        }
        let results = self.store(mode, entries, &options);
        self.finish_multi(results, options.quiet)
    }

    fn store(
        &self,
        mode: StoreMode,
        entries: BTreeMap<Key, Value>,
        options: &StoreOptions,
    ) -> MultiResult {
        let mut batch = Batch::new(mode.name());

        let precondition = match CasGuard::for_store(mode, options.cas) {
            Ok(precondition) => precondition,
            Err(e) => {
                for key in entries.into_keys() {
                    batch.expect(key.clone());
                    batch.reject(OperationResult::failed(key, e.status(), e.to_string()));
                }
                return self.complete(batch);
            }
        };

        let mut requests = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            batch.expect(key.clone());
            match self.policy.encode_with(&value, options.format) {
                Ok((bytes, format)) => requests.push(PutRequest {
                    key,
                    bytes,
                    flags: format.flags(),
                    precondition,
                    ttl: options.ttl,
                }),
                Err(e) => batch.reject(OperationResult::failed(key, e.status(), e.to_string())),
            }
        }

        if !requests.is_empty() {
            debug!(op = mode.name(), keys = requests.len(), "dispatching stores");
            for outcome in self.provider.put_batch(requests) {
                batch.record(store_result(&precondition, outcome));
            }
        }
        self.complete(batch)
    }

    fn read(&self, keys: Vec<Key>, options: &GetOptions) -> MultiResult {
        let mut batch = Batch::new("get");
        let keys: Vec<Key> = keys.into_iter().filter(|key| batch.expect(key.clone())).collect();

        if !keys.is_empty() {
            debug!(op = "get", keys = keys.len(), "dispatching reads");
            for outcome in self.provider.get_batch(&keys) {
                batch.record(read_result(outcome, options.format));
            }
        }
        self.complete(batch)
    }

    fn remove(&self, keys: Vec<Key>, options: &DeleteOptions) -> MultiResult {
        let mut batch = Batch::new("delete");
        let expected_cas = Cas::normalize(options.cas);
        let requests: Vec<DeleteRequest> = keys
            .into_iter()
            .filter(|key| batch.expect(key.clone()))
            .map(|key| DeleteRequest { key, expected_cas })
            .collect();

        if !requests.is_empty() {
            debug!(op = "delete", keys = requests.len(), "dispatching deletes");
            for outcome in self.provider.delete_batch(requests) {
                batch.record(delete_result(outcome));
            }
        }
        self.complete(batch)
    }

    fn complete(&self, batch: Batch) -> MultiResult {
        let op = batch.op();
        let results = batch.finish();
        let failed = results.failure_count();
        if failed > 0 {
            warn!(op, keys = results.len(), failed, "call completed with failures");
        } else {
            debug!(op, keys = results.len(), "call completed");
        }
        results
    }

    // =========================================================================
    // Escalation
    // =========================================================================

    fn effective_quiet(&self, quiet: Option<bool>) -> bool {
        quiet.unwrap_or(self.quiet)
    }

    fn finish_single(
        &self,
        key: Key,
        results: MultiResult,
        quiet: Option<bool>,
    ) -> Result<OperationResult> {
        let result = results
            .into_result(&key)
            .unwrap_or_else(|| OperationResult::failed(key, Status::Internal, UNREPORTED));
        if self.effective_quiet(quiet) {
            Ok(result)
        } else {
            KvError::from_single(result)
        }
    }

    fn finish_multi(&self, results: MultiResult, quiet: Option<bool>) -> Result<MultiResult> {
        if self.effective_quiet(quiet) {
            Ok(results)
        } else {
            KvError::from_multi(results)
        }
    }
}

fn reject_multi_cas(keys: impl IntoIterator<Item = Key>) -> KvError {
    let results: MultiResult = keys
        .into_iter()
        .map(|key| OperationResult::failed(key, Status::InvalidArgument, MULTI_CAS_MESSAGE))
        .collect();
    KvError::argument(MULTI_CAS_MESSAGE, None, results)
}

fn store_result(precondition: &Precondition, outcome: PutOutcome) -> OperationResult {
    let PutOutcome { key, status, cas } = outcome;
    let status = CasGuard::interpret(precondition, status);
    let result = OperationResult::new(key, status);
    if status.is_success() {
        result.with_cas(cas)
    } else {
        result
    }
}

fn read_result(outcome: GetOutcome, format: Option<Format>) -> OperationResult {
    let GetOutcome {
        key,
        status,
        bytes,
        flags,
        cas,
    } = outcome;
    if !status.is_success() {
        return OperationResult::new(key, status);
    }

    let bytes = bytes.unwrap_or_default();
    let decoded = match format {
        Some(format) => decode(&bytes, format).map(|value| (value, format)),
        None => decode_flags(&bytes, flags.unwrap_or_else(|| Format::default().flags())),
    };
    match decoded {
        Ok((value, format)) => OperationResult::new(key, status)
            .with_cas(cas)
            .with_value(value, format),
        Err(e) => OperationResult::failed(key, e.status(), e.to_string()).with_cas(cas),
    }
}

fn delete_result(outcome: DeleteOutcome) -> OperationResult {
    let DeleteOutcome { key, status, cas } = outcome;
    let result = OperationResult::new(key, status);
    if status.is_success() {
        result.with_cas(cas)
    } else {
        result
    }
}
