//! Integration tests against a live `PostgreSQL` instance.
//!
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Connection parameters (see `edura_db::test_utils`):
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` / `TEST_DB_PASSWORD` / `TEST_DB_NAME`
//!   (default: `edura_test`)

#![allow(clippy::unwrap_used)]

use edura_db::test_utils::{TestDatabase, TestDbConfig, TestRedisConfig};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn connects_with_env_config() {
    let result = TestDatabase::with_config(TestDbConfig::default()).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn migrations_create_the_schema() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.migrate().await.expect("Migrations failed");

    // The user table exists and is queryable after migrating.
    let rows = db
        .connection()
        .query_all(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT id FROM \"user\" LIMIT 1".to_string(),
        ))
        .await;
    assert!(rows.is_ok(), "user table missing: {:?}", rows.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn cleanup_truncates_application_tables() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.migrate().await.expect("Migrations failed");

    let result = db.cleanup().await;
    assert!(result.is_ok(), "Cleanup failed: {:?}", result.err());

    let count = db
        .connection()
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*)::BIGINT AS n FROM \"user\"".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(count.try_get::<i64>("", "n").unwrap(), 0);
}

#[test]
fn db_config_reads_env_defaults() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(config.database_url().starts_with("postgres://"));
}

#[test]
fn redis_config_reads_env_defaults() {
    let config = TestRedisConfig::default();
    assert!(config.redis_url().starts_with("redis://"));
}
