use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One short code → long URL mapping. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    /// Opaque reference to an external user; never dereferenced here.
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl UrlRecord {
    pub fn new(
        short_code: impl Into<String>,
        long_url: impl Into<String>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
            created_at: Utc::now(),
            owner_id,
        }
    }
}

/// Outcome of an atomic reserve-if-absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved,
    AlreadyExists,
}
