//! Storage backend tests
//!
//! SeaOrmStore against temporary SQLite databases, the factory, and
//! RedisStore when a test server is available.

use std::sync::Arc;

use linkvault::config::{GeneratorConfig, StorageBackend, StorageConfig};
use linkvault::errors::LinkVaultError;
use linkvault::services::{ShortenRequest, ShortenService};
use linkvault::storage::backend::{connect_sqlite, run_migrations};
use linkvault::storage::{
    RedisStore, ReserveOutcome, SeaOrmStore, StorageFactory, UniquenessStore, UrlRecord,
};
use tempfile::TempDir;

fn sqlite_config(temp_dir: &TempDir) -> StorageConfig {
    let db_path = temp_dir.path().join("test.db");
    StorageConfig {
        backend: StorageBackend::Database,
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        pool_size: 4,
        ..Default::default()
    }
}

async fn create_temp_store() -> (SeaOrmStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SeaOrmStore::new(&sqlite_config(&temp_dir))
        .await
        .expect("Failed to create store");
    (store, temp_dir)
}

fn record(code: &str, url: &str) -> UrlRecord {
    UrlRecord::new(code, url, None)
}

// =============================================================================
// Reservation
// =============================================================================

#[tokio::test]
async fn test_reserve_and_get() {
    let (store, _dir) = create_temp_store().await;

    let rec = UrlRecord::new("abc123", "https://example.com", Some("owner-1".to_string()));
    assert_eq!(
        store.try_reserve(&rec).await.unwrap(),
        ReserveOutcome::Reserved
    );

    let found = store.get("abc123").await.unwrap().expect("record exists");
    assert_eq!(found.short_code, "abc123");
    assert_eq!(found.long_url, "https://example.com");
    assert_eq!(found.owner_id.as_deref(), Some("owner-1"));
    assert_eq!(found.created_at.timestamp(), rec.created_at.timestamp());
}

#[tokio::test]
async fn test_reserve_conflict_keeps_original() {
    let (store, _dir) = create_temp_store().await;

    store
        .try_reserve(&record("dup", "https://first.example"))
        .await
        .unwrap();
    let outcome = store
        .try_reserve(&record("dup", "https://second.example"))
        .await
        .unwrap();

    assert_eq!(outcome, ReserveOutcome::AlreadyExists);
    let found = store.get("dup").await.unwrap().unwrap();
    assert_eq!(found.long_url, "https://first.example");
}

#[tokio::test]
async fn test_codes_are_case_sensitive() {
    let (store, _dir) = create_temp_store().await;

    store
        .try_reserve(&record("Promo", "https://upper.example"))
        .await
        .unwrap();
    let outcome = store
        .try_reserve(&record("promo", "https://lower.example"))
        .await
        .unwrap();

    assert_eq!(outcome, ReserveOutcome::Reserved);
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let (store, _dir) = create_temp_store().await;
    assert!(store.get("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete() {
    let (store, _dir) = create_temp_store().await;

    store
        .try_reserve(&record("gone", "https://example.com"))
        .await
        .unwrap();
    store.delete("gone").await.unwrap();

    assert!(store.get("gone").await.unwrap().is_none());
    assert!(matches!(
        store.delete("gone").await,
        Err(LinkVaultError::NotFound(_))
    ));

    // Freed codes can be reserved again
    assert_eq!(
        store
            .try_reserve(&record("gone", "https://again.example"))
            .await
            .unwrap(),
        ReserveOutcome::Reserved
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reserve_single_winner() {
    let (store, _dir) = create_temp_store().await;
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .try_reserve(&record("race", &format!("https://{}.example", i)))
                .await
                .unwrap()
        }));
    }

    let mut reserved = 0;
    for handle in handles {
        if handle.await.unwrap() == ReserveOutcome::Reserved {
            reserved += 1;
        }
    }

    assert_eq!(reserved, 1);
}

// =============================================================================
// Schema and lifecycle
// =============================================================================

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let config = sqlite_config(&temp_dir);

    let db = connect_sqlite(&config.database_url, 1).await.unwrap();
    run_migrations(&db).await.unwrap();
    run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = sqlite_config(&temp_dir);

    let store = SeaOrmStore::new(&config).await.unwrap();
    store
        .try_reserve(&record("keep", "https://durable.example"))
        .await
        .unwrap();
    store.shutdown().await.unwrap();

    let reopened = SeaOrmStore::new(&config).await.unwrap();
    let found = reopened.get("keep").await.unwrap().unwrap();
    assert_eq!(found.long_url, "https://durable.example");
    assert_eq!(reopened.backend_name(), "sqlite");
}

#[tokio::test]
async fn test_unknown_database_url_rejected() {
    let config = StorageConfig {
        database_url: "mongodb://localhost/links".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        SeaOrmStore::new(&config).await,
        Err(LinkVaultError::Config(_))
    ));
}

// =============================================================================
// Factory
// =============================================================================

#[tokio::test]
async fn test_factory_memory_backend() {
    let config = StorageConfig {
        backend: StorageBackend::Memory,
        ..Default::default()
    };

    let store = StorageFactory::create(&config).await.unwrap();
    assert_eq!(store.backend_name(), "memory");
}

#[tokio::test]
async fn test_factory_database_backend() {
    let temp_dir = TempDir::new().unwrap();
    let store = StorageFactory::create(&sqlite_config(&temp_dir))
        .await
        .unwrap();

    assert_eq!(store.backend_name(), "sqlite");
    store.shutdown().await.unwrap();
}

// =============================================================================
// Service over SQLite
// =============================================================================

#[tokio::test]
async fn test_service_over_sqlite() {
    let (store, _dir) = create_temp_store().await;
    let service = ShortenService::new(Arc::new(store), &GeneratorConfig::default()).unwrap();

    let generated = service
        .shorten(ShortenRequest::new("https://example.com/long/path"))
        .await
        .unwrap();
    assert_eq!(
        service.resolve(&generated.short_code).await.unwrap(),
        "https://example.com/long/path"
    );

    service
        .shorten(ShortenRequest::new("https://a.example").with_alias("team"))
        .await
        .unwrap();
    let err = service
        .shorten(ShortenRequest::new("https://b.example").with_alias("team"))
        .await
        .unwrap_err();
    assert!(matches!(err, LinkVaultError::AliasTaken(_)));
    assert_eq!(service.resolve("team").await.unwrap(), "https://a.example");
}

// =============================================================================
// Redis (runs only when LINKVAULT_TEST_REDIS_URL is set)
// =============================================================================

/// Store under a fresh key prefix, or `None` when no Redis server is configured
async fn redis_store() -> Option<RedisStore> {
    let Ok(url) = std::env::var("LINKVAULT_TEST_REDIS_URL") else {
        eprintln!("LINKVAULT_TEST_REDIS_URL not set, skipping Redis test");
        return None;
    };

    let config = StorageConfig {
        backend: StorageBackend::Redis,
        redis_url: url,
        redis_key_prefix: format!("linkvault-test:{:016x}:", rand::random::<u64>()),
        ..Default::default()
    };
    Some(RedisStore::new(&config).await.expect("Failed to connect to Redis"))
}

#[tokio::test]
async fn test_redis_conflict_keeps_original() {
    let Some(store) = redis_store().await else {
        return;
    };

    assert_eq!(
        store
            .try_reserve(&record("dup", "https://first.example"))
            .await
            .unwrap(),
        ReserveOutcome::Reserved
    );
    assert_eq!(
        store
            .try_reserve(&record("dup", "https://second.example"))
            .await
            .unwrap(),
        ReserveOutcome::AlreadyExists
    );

    let found = store.get("dup").await.unwrap().unwrap();
    assert_eq!(found.long_url, "https://first.example");

    store.delete("dup").await.unwrap();
    assert!(store.get("dup").await.unwrap().is_none());
}

#[tokio::test]
async fn test_redis_delete_unknown_code() {
    let Some(store) = redis_store().await else {
        return;
    };

    assert!(matches!(
        store.delete("never-reserved").await,
        Err(LinkVaultError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_redis_concurrent_reserve_single_winner() {
    let Some(store) = redis_store().await else {
        return;
    };
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .try_reserve(&record("race", &format!("https://{}.example", i)))
                .await
                .unwrap()
        }));
    }

    let mut reserved = 0;
    for handle in handles {
        if handle.await.unwrap() == ReserveOutcome::Reserved {
            reserved += 1;
        }
    }

    assert_eq!(reserved, 1);
    store.delete("race").await.unwrap();
}
