use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVaultError {
    InvalidAlias(String),
    AliasTaken(String),
    ExhaustedKeyspace(String),
    StorageUnavailable(String),
    NotFound(String),
    InvalidUrl(String),
    Config(String),
    Serialization(String),
}

impl LinkVaultError {
    /// Stable error code, `E001`..`E008`
    pub fn code(&self) -> &'static str {
        match self {
            LinkVaultError::InvalidAlias(_) => "E001",
            LinkVaultError::AliasTaken(_) => "E002",
            LinkVaultError::ExhaustedKeyspace(_) => "E003",
            LinkVaultError::StorageUnavailable(_) => "E004",
            LinkVaultError::NotFound(_) => "E005",
            LinkVaultError::InvalidUrl(_) => "E006",
            LinkVaultError::Config(_) => "E007",
            LinkVaultError::Serialization(_) => "E008",
        }
    }

    /// Human-readable category
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkVaultError::InvalidAlias(_) => "Invalid Alias",
            LinkVaultError::AliasTaken(_) => "Alias Taken",
            LinkVaultError::ExhaustedKeyspace(_) => "Keyspace Exhausted",
            LinkVaultError::StorageUnavailable(_) => "Storage Unavailable",
            LinkVaultError::NotFound(_) => "Not Found",
            LinkVaultError::InvalidUrl(_) => "Invalid URL",
            LinkVaultError::Config(_) => "Configuration Error",
            LinkVaultError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LinkVaultError::InvalidAlias(msg)
            | LinkVaultError::AliasTaken(msg)
            | LinkVaultError::ExhaustedKeyspace(msg)
            | LinkVaultError::StorageUnavailable(msg)
            | LinkVaultError::NotFound(msg)
            | LinkVaultError::InvalidUrl(msg)
            | LinkVaultError::Config(msg)
            | LinkVaultError::Serialization(msg) => msg,
        }
    }

    /// Whether the caller may reasonably retry the same request later.
    ///
    /// Input errors (`InvalidAlias`, `AliasTaken`, `InvalidUrl`) and
    /// `NotFound` will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LinkVaultError::ExhaustedKeyspace(_) | LinkVaultError::StorageUnavailable(_)
        )
    }

    /// Multi-line coloured form for terminal output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkVaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkVaultError {}

// Constructors
impl LinkVaultError {
    pub fn invalid_alias<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::InvalidAlias(msg.into())
    }

    pub fn alias_taken<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::AliasTaken(msg.into())
    }

    pub fn exhausted_keyspace<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::ExhaustedKeyspace(msg.into())
    }

    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::StorageUnavailable(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::NotFound(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::InvalidUrl(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::Config(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkVaultError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkVaultError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkVaultError::StorageUnavailable(err.to_string())
    }
}

impl From<redis::RedisError> for LinkVaultError {
    fn from(err: redis::RedisError) -> Self {
        LinkVaultError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for LinkVaultError {
    fn from(err: serde_json::Error) -> Self {
        LinkVaultError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LinkVaultError {
    fn from(err: config::ConfigError) -> Self {
        LinkVaultError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkVaultError>;
