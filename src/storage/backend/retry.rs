//! Backoff for transient database errors
//!
//! Each error is sorted by what it says about the failed statement: it
//! certainly did not take effect, it may have, or it failed for good.
//! Reads may be replayed in either transient case. Writes are replayed only
//! when the statement certainly did not run, so an INSERT whose
//! acknowledgement was lost is reported instead of being sent twice.

use std::future::Future;
use std::ops::Deref;
use std::time::Duration;

use rand::RngExt;
use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::StorageConfig;

/// MySQL deadlock / lock wait timeout, PostgreSQL serialization failure /
/// deadlock, SQLite BUSY / LOCKED. Each one aborts the statement.
const ABORTED_STATEMENT_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

const ABORTED_STATEMENT_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

/// What a failed call tells us about the statement's effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Rejected before or while running; nothing was written
    NotApplied,
    /// The connection broke mid-flight; the statement may have committed
    Indeterminate,
    Permanent,
}

/// Whether a statement is safe to replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Read,
    Write,
}

impl Statement {
    pub fn may_replay(self, failure: Failure) -> bool {
        match (self, failure) {
            (_, Failure::NotApplied) => true,
            (Statement::Read, Failure::Indeterminate) => true,
            _ => false,
        }
    }
}

pub fn classify(err: &DbErr) -> Failure {
    match err {
        DbErr::ConnectionAcquire(_) => Failure::NotApplied,
        DbErr::Conn(_) => Failure::Indeterminate,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => classify_runtime(runtime_err),
        _ => Failure::Permanent,
    }
}

fn classify_runtime(err: &RuntimeErr) -> Failure {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => match sqlx_err.deref() {
            sea_orm::sqlx::Error::PoolTimedOut => Failure::NotApplied,
            sea_orm::sqlx::Error::Io(_) => Failure::Indeterminate,
            other => {
                if let Some(db_err) = other.as_database_error()
                    && let Some(code) = db_err.code()
                    && ABORTED_STATEMENT_CODES.contains(&code.as_ref())
                {
                    return Failure::NotApplied;
                }
                classify_message(&other.to_string())
            }
        },
        RuntimeErr::Internal(msg) => classify_message(msg),
        #[allow(unreachable_patterns)]
        _ => Failure::Permanent,
    }
}

fn classify_message(msg: &str) -> Failure {
    let msg = msg.to_lowercase();
    if ABORTED_STATEMENT_MESSAGES.iter().any(|m| msg.contains(m)) {
        Failure::NotApplied
    } else {
        Failure::Permanent
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl From<&StorageConfig> for RetryConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

/// Run `operation`, replaying it with exponential backoff (plus up to 25%
/// jitter) while `statement` allows it for the error seen.
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    statement: Statement,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("'{}' succeeded after {} retries", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        let failure = classify(&err);
        if attempt >= config.max_retries || !statement.may_replay(failure) {
            if failure == Failure::Indeterminate && statement == Statement::Write {
                warn!(
                    "'{}' lost its connection; the write may or may not have been applied",
                    operation_name
                );
            }
            return Err(err);
        }

        attempt += 1;
        let delay = backoff_ms(attempt, config);
        warn!(
            "'{}' failed (attempt {}/{}): {}; retrying in {} ms",
            operation_name,
            attempt,
            config.max_retries + 1,
            err,
            delay
        );
        sleep(Duration::from_millis(delay)).await;
    }
}

fn backoff_ms(attempt: u32, config: RetryConfig) -> u64 {
    let doubled = config
        .base_delay_ms
        .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
    let capped = doubled.min(config.max_delay_ms);
    capped.saturating_add(rand::rng().random_range(0..=capped / 4))
}
