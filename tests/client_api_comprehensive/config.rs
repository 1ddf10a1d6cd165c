//! Config Tests
//!
//! Loading `stratakv.toml` from disk and building clients from it.

use super::*;
use stratakv::{ClientConfig, ConfigError, Format, GetOptions, StoreOptions, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_client_from_config_file() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "formats = [\"native\"]\n").unwrap();

    let config = ClientConfig::from_file(&path).unwrap();
    let client = Client::with_config(Arc::new(MemoryProvider::new()), &config).unwrap();
    assert_eq!(client.policy().formats(), &[Format::Native]);

    client.set("k", Value::Bytes(vec![7]), StoreOptions::new()).unwrap();
    let read = client.get("k", GetOptions::new()).unwrap();
    assert_eq!(read.value(), Some(&Value::Bytes(vec![7])));
}

#[test]
fn test_default_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ClientConfig::write_default_if_missing(&path).unwrap();
    let config = ClientConfig::from_file(&path).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn test_invalid_config_rejected() {
    let err = ClientConfig::from_toml_str("quiet = \"yes\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let config = ClientConfig {
        quiet: false,
        formats: Vec::new(),
    };
    let err = Client::with_config(Arc::new(MemoryProvider::new()), &config).unwrap_err();
    assert!(matches!(err, ConfigError::Formats(_)));
}
