//! KV Batch Operation Tests
//!
//! - One result per requested key
//! - Mixed outcomes within one call
//! - Empty and duplicate-key batches
//! - Large batches on the parallel provider

use super::*;
use stratakv::{DeleteOptions, ErrorKind, GetOptions, StoreOptions};

#[test]
fn test_batch_covers_every_key() {
    let (_, client) = quick_setup();
    client.set("exists", 1i64, StoreOptions::new()).unwrap();

    let results = client
        .add_multi(
            [("exists", 2i64), ("new1", 3i64), ("new2", 4i64)],
            StoreOptions::new().quiet(true),
        )
        .unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results.failure_count(), 1);
    assert_eq!(results["exists"].status(), Status::KeyExists);
    assert!(results.keys().any(|k| k.as_bytes() == b"new2"));
}

#[test]
fn test_replace_multi_mixed() {
    let (_, client) = quick_setup();
    client.set("r1", 1i64, StoreOptions::new()).unwrap();
    let err = client
        .replace_multi([("r1", 10i64), ("r2", 20i64)], StoreOptions::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.all_results()["r1"].success());
    assert!(err.message().contains("r2"));
}

#[test]
fn test_uniform_failures_keep_kind() {
    let (_, client) = quick_setup();
    client.set("a", 1i64, StoreOptions::new()).unwrap();
    let err = client
        .add_multi([("a", 1i64)], StoreOptions::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyExists);

    let err = client
        .replace_multi([("b", 1i64)], StoreOptions::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_empty_batches() {
    let (_, client) = quick_setup();
    let empty: Vec<(String, Value)> = Vec::new();
    assert!(client.set_multi(empty, StoreOptions::new()).unwrap().is_empty());
    assert!(client.get_multi(Vec::<String>::new(), GetOptions::new()).unwrap().is_empty());
    assert!(client.delete_multi(Vec::<String>::new(), DeleteOptions::new()).unwrap().is_empty());
}

#[test]
fn test_binary_and_unicode_keys() {
    let (_, client) = quick_setup();
    let binary = Key::from(vec![0u8, 159, 146, 150]);
    let unicode = Key::from("ключ:🔑");
    client
        .set_multi([(binary.clone(), 1i64), (unicode.clone(), 2i64)], StoreOptions::new())
        .unwrap();
    let read = client
        .get_multi([binary.clone(), unicode.clone()], GetOptions::new())
        .unwrap();
    assert_eq!(read[&binary].value(), Some(&Value::Int(1)));
    assert_eq!(read[&unicode].value(), Some(&Value::Int(2)));
}

#[test]
fn test_large_parallel_batch() {
    let (provider, client) = quick_setup();
    let items: Vec<(String, Value)> = (0..2_000)
        .map(|i| (format!("bulk:{:05}", i), obj([("i", Value::Int(i))])))
        .collect();
    let results = client.set_multi(items, StoreOptions::new()).unwrap();
    assert_eq!(results.len(), 2_000);
    assert_eq!(provider.len(), 2_000);

    let mut cas: Vec<u64> = results.iter().map(|(_, r)| r.cas().unwrap().as_u64()).collect();
    cas.sort_unstable();
    cas.dedup();
    assert_eq!(cas.len(), 2_000, "every stored value gets its own CAS");

    let deleted = client
        .delete_multi((0..2_000).map(|i| format!("bulk:{:05}", i)), DeleteOptions::new())
        .unwrap();
    assert!(deleted.all_ok());
    assert!(provider.is_empty());
}

#[test]
fn test_value_too_large_is_per_key() {
    init_tracing();
    let provider = Arc::new(MemoryProvider::new().with_max_value_size(16));
    let client = Client::new(provider);
    let err = client
        .set_multi(
            [("small", Value::from("ok")), ("big", Value::from("x".repeat(64)))],
            StoreOptions::new(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.rc(), Status::ValueTooLarge);
    assert!(err.all_results()["small"].success());
}

#[test]
fn test_results_iterate_in_key_order() {
    let (_, client) = quick_setup();
    let results = client
        .set_multi([("c", 3i64), ("a", 1i64), ("b", 2i64)], StoreOptions::new())
        .unwrap();
    let keys: Vec<&[u8]> = results.keys().map(|k| k.as_bytes()).collect();
    assert_eq!(keys, vec![&b"a"[..], &b"b"[..], &b"c"[..]]);
}
