//! Client API Comprehensive Test Suite
//!
//! End-to-end coverage of the public `stratakv` facade against the
//! in-memory provider and a scripted provider.
//!
//! ## Areas Covered
//!
//! - `kv_cas`: CAS, add and replace semantics
//! - `kv_formats`: format selection, fallback and decoding
//! - `kv_batch_ops`: multi-key calls and result aggregation
//! - `kv_errors`: error kinds, rendering and quiet mode
//! - `config`: `stratakv.toml` loading
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test client_api_comprehensive
//! cargo test --test client_api_comprehensive kv_cas::
//! cargo test --test client_api_comprehensive -- --nocapture
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use stratakv::{
    Client, DeleteOutcome, DeleteRequest, GetOutcome, Key, MemoryProvider, PutOutcome, PutRequest,
    Status, StoreProvider, Value,
};

pub mod config;
pub mod kv_batch_ops;
pub mod kv_cas;
pub mod kv_errors;
pub mod kv_formats;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a test-writer subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Create a client over a fresh in-memory provider
pub fn quick_setup() -> (Arc<MemoryProvider>, Client) {
    init_tracing();
    let provider = Arc::new(MemoryProvider::new());
    let client = Client::new(provider.clone());
    (provider, client)
}

/// Helper to create Value::Object from a list of key-value pairs
pub fn obj<I>(pairs: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    Value::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Provider that answers every call with a scripted status
///
/// Records each request it receives so tests can check what was dispatched.
#[derive(Default)]
pub struct ScriptedProvider {
    pub put_status: HashMap<Key, Status>,
    pub puts: Mutex<Vec<PutRequest>>,
}

impl ScriptedProvider {
    pub fn with_put_status(key: &str, status: Status) -> Self {
        let mut provider = ScriptedProvider::default();
        provider.put_status.insert(Key::from(key), status);
        provider
    }

    pub fn dispatched(&self) -> usize {
        self.puts.lock().unwrap().len()
    }
}

impl StoreProvider for ScriptedProvider {
    fn put(&self, request: PutRequest) -> PutOutcome {
        let key = request.key.clone();
        self.puts.lock().unwrap().push(request);
        match self.put_status.get(&key) {
            Some(status) => PutOutcome::failed(key, *status),
            None => PutOutcome::stored(key, stratakv::Cas(99)),
        }
    }

    fn get(&self, key: &Key) -> GetOutcome {
        GetOutcome::failed(key.clone(), Status::KeyNotFound)
    }

    fn delete(&self, request: DeleteRequest) -> DeleteOutcome {
        DeleteOutcome::failed(request.key, Status::KeyNotFound)
    }
}
