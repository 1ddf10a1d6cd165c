//! KV Format Tests
//!
//! - Values of every shape under each format
//! - Rejection before dispatch
//! - Decoding with and without a format override

use super::*;
use stratakv::{ErrorKind, Format, FormatPolicy, GetOptions, StoreOptions};

fn nested() -> Value {
    obj([
        ("list", Value::Array(vec![Value::Int(1), Value::Float(2.5), Value::Null])),
        ("inner", obj([("flag", Value::Bool(true))])),
        ("text", Value::from("héllo")),
    ])
}

#[test]
fn test_nested_json_round_trip() {
    let (_, client) = quick_setup();
    client.set("doc", nested(), StoreOptions::new()).unwrap();
    let read = client.get("doc", GetOptions::new()).unwrap();
    assert_eq!(read.value(), Some(&nested()));
    assert_eq!(read.format(), Some(Format::Json));
}

#[test]
fn test_native_preserves_bytes() {
    let (_, client) = quick_setup();
    let value = obj([("blob", Value::Bytes(vec![0, 1, 2, 255]))]);
    client
        .set("blob", value.clone(), StoreOptions::new().format(Format::Native))
        .unwrap();
    let read = client.get("blob", GetOptions::new()).unwrap();
    assert_eq!(read.value(), Some(&value));
}

#[test]
fn test_non_finite_float_rejected_by_json() {
    let (provider, client) = quick_setup();
    let err = client
        .set("nan", Value::Float(f64::NAN), StoreOptions::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueFormat);
    assert!(provider.is_empty());
}

#[test]
fn test_non_text_under_utf8_rejected() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::default());
    let client = Client::new(provider.clone());
    for value in [Value::Int(1), Value::Bytes(vec![1]), Value::Null] {
        let err = client
            .set("k", value, StoreOptions::new().format(Format::Utf8))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueFormat);
    }
    assert_eq!(provider.dispatched(), 0);
}

#[test]
fn test_policy_fallback_order() {
    let (_, client) = quick_setup();
    let policy = FormatPolicy::new([Format::Bytes, Format::Utf8, Format::Json]).unwrap();
    let client = client.with_policy(policy);

    client.set("raw", Value::Bytes(b"\x00\x01".to_vec()), StoreOptions::new()).unwrap();
    client.set("text", "words", StoreOptions::new()).unwrap();
    client.set("number", 12i64, StoreOptions::new()).unwrap();

    let formats: Vec<Option<Format>> = ["raw", "text", "number"]
        .iter()
        .map(|k| client.get(*k, GetOptions::new()).unwrap().format())
        .collect();
    assert_eq!(
        formats,
        vec![Some(Format::Bytes), Some(Format::Utf8), Some(Format::Json)]
    );
}

#[test]
fn test_policy_exhausted_reports_value_format() {
    let (_, client) = quick_setup();
    let client = client.with_policy(FormatPolicy::new([Format::Bytes, Format::Utf8]).unwrap());
    let err = client.set("k", 1i64, StoreOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueFormat);
}

#[test]
fn test_explicit_format_bypasses_policy() {
    let (_, client) = quick_setup();
    let client = client.with_policy(FormatPolicy::only(Format::Utf8));
    client
        .set("k", 5i64, StoreOptions::new().format(Format::Native))
        .unwrap();
    let read = client.get("k", GetOptions::new()).unwrap();
    assert_eq!(read.format(), Some(Format::Native));
}

#[test]
fn test_decode_failure_is_value_format() {
    let (_, client) = quick_setup();
    client
        .set("bin", Value::Bytes(vec![0xff, 0xfe]), StoreOptions::new().format(Format::Bytes))
        .unwrap();
    let err = client
        .get("bin", GetOptions::new().format(Format::Utf8))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueFormat);
    assert_eq!(err.rc(), Status::ValueFormat);
}
