//! Configuration loading tests

use std::fs;

use linkvault::config::{CodeStrategy, StaticConfig, StorageBackend};
use linkvault::errors::LinkVaultError;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("linkvault.toml");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let config = StaticConfig::load(Some(&path.display().to_string())).unwrap();
    assert_eq!(config.generator.length, 6);
    assert_eq!(config.storage.backend, StorageBackend::Database);
}

#[test]
fn test_load_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[generator]
strategy = "timestamped"
length = 8

[storage]
backend = "memory"
"#,
    );

    let config = StaticConfig::load(Some(&path)).unwrap();
    assert_eq!(config.generator.strategy, CodeStrategy::Timestamped);
    assert_eq!(config.generator.length, 8);
    assert_eq!(config.generator.max_attempts, 10);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_rejects_invalid_generator() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[generator]
alphabet = "aab"
"#,
    );

    assert!(matches!(
        StaticConfig::load(Some(&path)),
        Err(LinkVaultError::Config(_))
    ));
}

#[test]
fn test_load_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[generator\nlength = ");

    assert!(StaticConfig::load(Some(&path)).is_err());
}

#[test]
fn test_saved_sample_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("sample.toml");

    StaticConfig::default().save_to_file(&path).unwrap();

    let config = StaticConfig::load(Some(&path.display().to_string())).unwrap();
    assert_eq!(config.storage.redis_key_prefix, "linkvault:");
    assert_eq!(config.generator.custom_alias_max_length, 20);
}
