//! Store operations provider boundary
//!
//! Everything below this trait (transport, topology, pooling, auth, wire
//! protocol) is outside the client core. A provider receives fully encoded
//! requests with their preconditions attached and answers with one raw
//! outcome per key. Failures are statuses on the outcome, never `Err`:
//! the client turns every outcome into an operation result.
//!
//! Batch entry points may run keys concurrently or one after another. They
//! must return only once every key has completed, and no atomicity across
//! the keys of a batch is implied.

use std::time::Duration;

use stratakv_concurrency::Precondition;
use stratakv_core::{Cas, Key, Status};

/// Encoded store request for one key
#[derive(Debug, Clone, PartialEq)]
pub struct PutRequest {
    /// Target key
    pub key: Key,
    /// Encoded value
    pub bytes: Vec<u8>,
    /// Format flag word stored alongside the value
    pub flags: u32,
    /// Existence / CAS precondition
    pub precondition: Precondition,
    /// Optional expiry; advisory to the provider
    pub ttl: Option<Duration>,
}

/// Raw outcome of a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutcome {
    /// Target key
    pub key: Key,
    /// Provider status
    pub status: Status,
    /// CAS of the newly stored value, on success
    pub cas: Option<Cas>,
}

impl PutOutcome {
    /// Successful store with the CAS the provider assigned
    pub fn stored(key: Key, cas: Cas) -> Self {
        PutOutcome {
            key,
            status: Status::Success,
            cas: Some(cas),
        }
    }

    /// Failed store
    pub fn failed(key: Key, status: Status) -> Self {
        PutOutcome {
            key,
            status,
            cas: None,
        }
    }
}

/// Raw outcome of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOutcome {
    /// Target key
    pub key: Key,
    /// Provider status
    pub status: Status,
    /// Stored bytes, on success
    pub bytes: Option<Vec<u8>>,
    /// Format flag word stored with the value, on success
    pub flags: Option<u32>,
    /// CAS of the stored value, on success
    pub cas: Option<Cas>,
}

impl GetOutcome {
    /// Successful read
    pub fn found(key: Key, bytes: Vec<u8>, flags: u32, cas: Cas) -> Self {
        GetOutcome {
            key,
            status: Status::Success,
            bytes: Some(bytes),
            flags: Some(flags),
            cas: Some(cas),
        }
    }

    /// Failed read
    pub fn failed(key: Key, status: Status) -> Self {
        GetOutcome {
            key,
            status,
            bytes: None,
            flags: None,
            cas: None,
        }
    }
}

/// Delete request for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    /// Target key
    pub key: Key,
    /// CAS the stored value must carry
    pub expected_cas: Option<Cas>,
}

/// Raw outcome of a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Target key
    pub key: Key,
    /// Provider status
    pub status: Status,
    /// Mutation CAS of the removal, on success
    pub cas: Option<Cas>,
}

impl DeleteOutcome {
    /// Successful delete
    pub fn removed(key: Key, cas: Cas) -> Self {
        DeleteOutcome {
            key,
            status: Status::Success,
            cas: Some(cas),
        }
    }

    /// Failed delete
    pub fn failed(key: Key, status: Status) -> Self {
        DeleteOutcome {
            key,
            status,
            cas: None,
        }
    }
}

/// The store operations provider the client core calls into
///
/// Implementations must be `Send + Sync`; a client shares one provider
/// across threads.
pub trait StoreProvider: Send + Sync {
    /// Store one encoded value
    fn put(&self, request: PutRequest) -> PutOutcome;

    /// Read one key
    fn get(&self, key: &Key) -> GetOutcome;

    /// Delete one key
    fn delete(&self, request: DeleteRequest) -> DeleteOutcome;

    /// Store a batch; one outcome per request
    fn put_batch(&self, requests: Vec<PutRequest>) -> Vec<PutOutcome> {
        requests.into_iter().map(|r| self.put(r)).collect()
    }

    /// Read a batch; one outcome per key
    fn get_batch(&self, keys: &[Key]) -> Vec<GetOutcome> {
        keys.iter().map(|k| self.get(k)).collect()
    }

    /// Delete a batch; one outcome per request
    fn delete_batch(&self, requests: Vec<DeleteRequest>) -> Vec<DeleteOutcome> {
        requests.into_iter().map(|r| self.delete(r)).collect()
    }
}

impl<P: StoreProvider + ?Sized> StoreProvider for std::sync::Arc<P> {
    fn put(&self, request: PutRequest) -> PutOutcome {
        (**self).put(request)
    }

    fn get(&self, key: &Key) -> GetOutcome {
        (**self).get(key)
    }

    fn delete(&self, request: DeleteRequest) -> DeleteOutcome {
        (**self).delete(request)
    }

    fn put_batch(&self, requests: Vec<PutRequest>) -> Vec<PutOutcome> {
        (**self).put_batch(requests)
    }

    fn get_batch(&self, keys: &[Key]) -> Vec<GetOutcome> {
        (**self).get_batch(keys)
    }

    fn delete_batch(&self, requests: Vec<DeleteRequest>) -> Vec<DeleteOutcome> {
        (**self).delete_batch(requests)
    }
}
