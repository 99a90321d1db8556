//! Environment overrides for StaticConfig
//!
//! Kept in its own test binary: it mutates process environment variables,
//! which every `StaticConfig::load` in the same process would observe.

use linkvault::config::{LogFormat, StaticConfig, StorageBackend};
use tempfile::TempDir;

#[test]
fn test_env_overrides_keep_string_values_intact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml").display().to_string();

    // SAFETY: this is the only test in this binary
    unsafe {
        std::env::set_var("LV__GENERATOR__ALPHABET", "0123456789");
        std::env::set_var("LV__GENERATOR__LENGTH", "8");
        std::env::set_var("LV__STORAGE__BACKEND", "memory");
        std::env::set_var("LV__STORAGE__REDIS_KEY_PREFIX", "007");
        std::env::set_var("LV__LOGGING__FORMAT", "json");
    }

    let config = StaticConfig::load(Some(&path)).unwrap();

    assert_eq!(config.generator.alphabet, "0123456789");
    assert_eq!(config.generator.length, 8);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.storage.redis_key_prefix, "007");
    assert_eq!(config.logging.format, LogFormat::Json);
}
