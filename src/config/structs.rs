use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::errors::{LinkVaultError, Result};

/// Default random-mode alphabet: lowercase letters followed by digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Upper bound for any short code, random or custom. Matches the width of
/// the `short_code` column.
pub const MAX_CODE_LENGTH: usize = 64;

/// How random-mode candidates are produced
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CodeStrategy {
    /// `length` symbols drawn uniformly from `alphabet`
    #[default]
    Random,
    /// `<5 lowercase letters>-<unix timestamp>`
    Timestamped,
}

/// Storage backend selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    #[default]
    Database,
    Memory,
    Redis,
}

/// Log line encoding
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Static configuration (TOML + environment)
///
/// - generator: short code generation
/// - storage: backend selection and connection
/// - logging: log output
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// Load from an optional TOML file, then environment overrides.
    ///
    /// Priority: ENV > file > defaults. ENV prefix `LV`, separator `__`,
    /// e.g. `LV__GENERATOR__LENGTH=8`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            // Values stay strings until deserialization so that numeric-looking
            // text (an all-digit alphabet) is not reparsed as a number
            .add_source(Environment::with_prefix("LV").separator("__"))
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()
    }

    /// Defaults rendered as TOML
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Short code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub strategy: CodeStrategy,
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    #[serde(default = "default_code_length")]
    pub length: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_custom_alias_max_length")]
    pub custom_alias_max_length: usize,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(LinkVaultError::config("generator.alphabet must not be empty"));
        }
        if let Some(c) = self.alphabet.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(LinkVaultError::config(format!(
                "generator.alphabet contains '{}'; only ASCII letters and digits are allowed",
                c
            )));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(c) = self.alphabet.chars().find(|c| !seen.insert(*c)) {
            return Err(LinkVaultError::config(format!(
                "generator.alphabet repeats '{}'",
                c
            )));
        }
        if self.length == 0 || self.length > MAX_CODE_LENGTH {
            return Err(LinkVaultError::config(format!(
                "generator.length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, self.length
            )));
        }
        if self.max_attempts == 0 {
            return Err(LinkVaultError::config(
                "generator.max_attempts must be at least 1",
            ));
        }
        if self.custom_alias_max_length == 0 || self.custom_alias_max_length > MAX_CODE_LENGTH {
            return Err(LinkVaultError::config(format!(
                "generator.custom_alias_max_length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, self.custom_alias_max_length
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: CodeStrategy::default(),
            alphabet: default_alphabet(),
            length: default_code_length(),
            max_attempts: default_max_attempts(),
            custom_alias_max_length: default_custom_alias_max_length(),
        }
    }
}

/// Storage backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    #[serde(default = "default_redis_key_prefix")]
    pub redis_key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: default_database_url(),
            pool_size: default_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            redis_url: default_redis_url(),
            redis_key_prefix: default_redis_key_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
            enable_rotation: false,
            max_backups: default_max_backups(),
        }
    }
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

fn default_code_length() -> usize {
    6
}

fn default_max_attempts() -> u32 {
    10
}

fn default_custom_alias_max_length() -> usize {
    20
}

fn default_database_url() -> String {
    "sqlite://linkvault.db".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}

fn default_redis_key_prefix() -> String {
    "linkvault:".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_backups() -> u32 {
    5
}
