//! KV Error Tests
//!
//! - Kind selection across outcomes
//! - Error rendering
//! - Quiet mode on the client and per call

use super::*;
use stratakv::{ClientConfig, DeleteOptions, ErrorKind, GetOptions, StoreOptions};

#[test]
fn test_error_display_single() {
    let (_, client) = quick_setup();
    let err = client.get("nope", GetOptions::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "NotFoundError: no such key <Key=\"nope\", RC=0x0D[no such key], Results=1>"
    );
}

#[test]
fn test_error_display_multi_has_no_key() {
    let (_, client) = quick_setup();
    let err = client.get_multi(["x", "y"], GetOptions::new()).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.starts_with("NotFoundError: 2 of 2 operations failed"));
    assert!(!rendered.contains("Key="));
    assert!(rendered.ends_with("Results=2>"));
}

#[test]
fn test_error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    let (_, client) = quick_setup();
    let err = client.delete("nope", DeleteOptions::new()).unwrap_err();
    takes_error(&err);
}

#[test]
fn test_recover_values_from_error() {
    let (_, client) = quick_setup();
    client.set("have", "value", StoreOptions::new()).unwrap();
    let err = client.get_multi(["have", "missing"], GetOptions::new()).unwrap_err();
    let results = err.into_results();
    let value = results.into_result("have").and_then(|r| r.into_value());
    assert_eq!(value, Some(Value::from("value")));
}

#[test]
fn test_value_format_dominates_mixed_failures() {
    let (_, client) = quick_setup();
    client.set("taken", 1i64, StoreOptions::new()).unwrap();
    let err = client
        .add_multi(
            [("taken", Value::Int(2)), ("bad", Value::Bytes(vec![1]))],
            StoreOptions::new(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueFormat);
}

#[test]
fn test_quiet_client_from_config() {
    init_tracing();
    let config = ClientConfig::from_toml_str("quiet = true\n").unwrap();
    let client = Client::with_config(Arc::new(MemoryProvider::new()), &config).unwrap();
    assert!(client.is_quiet());

    let missing = client.get("nope", GetOptions::new()).unwrap();
    assert!(!missing.success());
    assert_eq!(missing.rc(), 0x0D);

    let err = client
        .get("nope", GetOptions::new().quiet(false))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_quiet_does_not_hide_successes() {
    let (_, client) = quick_setup();
    let result = client
        .set("k", "v", StoreOptions::new().quiet(true))
        .unwrap();
    assert!(result.success());
}
