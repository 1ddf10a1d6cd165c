//! KV CAS Tests
//!
//! - Compare-and-swap on set and replace
//! - Create-only add
//! - Statuses from providers that only report "not stored"
//! - CAS on delete

use super::*;
use stratakv::{Cas, DeleteOptions, ErrorKind, GetOptions, StoreOptions};

#[test]
fn test_cas_changes_on_every_write() {
    let (_, client) = quick_setup();
    let mut seen = Vec::new();
    for i in 0..5i64 {
        let result = client.set("counter", i, StoreOptions::new()).unwrap();
        seen.push(result.cas().unwrap());
    }
    seen.dedup();
    assert_eq!(seen.len(), 5, "each write should produce a fresh CAS");
}

#[test]
fn test_cas_chain() {
    let (_, client) = quick_setup();
    let mut cas = client.set("chain", 0i64, StoreOptions::new()).unwrap().cas().unwrap();
    for i in 1..10i64 {
        let result = client.set("chain", i, StoreOptions::new().cas(cas)).unwrap();
        cas = result.cas().unwrap();
    }
    let read = client.get("chain", GetOptions::new()).unwrap();
    assert_eq!(read.value(), Some(&Value::Int(9)));
    assert_eq!(read.cas(), Some(cas));
}

#[test]
fn test_cas_on_missing_key() {
    let (_, client) = quick_setup();
    let err = client
        .set("ghost", 1i64, StoreOptions::new().cas(Cas(17)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);
}

#[test]
fn test_add_with_cas_never_dispatched() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::default());
    let client = Client::new(provider.clone());
    let err = client
        .add("k", 1i64, StoreOptions::new().cas(Cas(5)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(err.rc(), Status::InvalidArgument);
    assert_eq!(provider.dispatched(), 0);
}

#[test]
fn test_not_stored_interpreted_by_mode() {
    init_tracing();
    let client = Client::new(Arc::new(ScriptedProvider::with_put_status("k", Status::NotStored)));

    let err = client.add("k", 1i64, StoreOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);

    let err = client.replace("k", 1i64, StoreOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = client
        .set("k", 1i64, StoreOptions::new().cas(Cas(3)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);
}

#[test]
fn test_delete_with_cas() {
    let (provider, client) = quick_setup();
    let stored = client.set("doomed", "x", StoreOptions::new()).unwrap();
    let cas = stored.cas().unwrap();

    let err = client
        .delete("doomed", DeleteOptions::new().cas(cas.as_u64() + 1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);
    assert_eq!(provider.current_cas("doomed"), Some(cas));

    assert!(client.delete("doomed", DeleteOptions::new().cas(cas)).unwrap().success());
    assert_eq!(provider.current_cas("doomed"), None);
}

#[test]
fn test_add_after_delete() {
    let (_, client) = quick_setup();
    client.add("cycle", 1i64, StoreOptions::new()).unwrap();
    client.delete("cycle", DeleteOptions::new()).unwrap();
    assert!(client.add("cycle", 2i64, StoreOptions::new()).is_ok());
}

#[test]
fn test_cas_from_another_key_never_matches() {
    let (provider, client) = quick_setup();
    let cas_a = client.set("a", 1i64, StoreOptions::new()).unwrap().cas().unwrap();
    let cas_b = client.set("b", 2i64, StoreOptions::new()).unwrap().cas().unwrap();

    let err = client
        .set("b", 3i64, StoreOptions::new().cas(cas_a))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);
    assert_eq!(provider.current_cas("b"), Some(cas_b));

    let err = client
        .delete("b", DeleteOptions::new().cas(cas_a))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);
    assert_eq!(provider.current_cas("b"), Some(cas_b));

    let read = client.get("b", GetOptions::new()).unwrap();
    assert_eq!(read.value(), Some(&Value::Int(2)));
}
