//! Integration tests for the infrastructure components
//!
//! These tests need a reachable PostgreSQL instance (see `DATABASE_URL`) and
//! are ignored by default. Run them with `cargo test -- --ignored`.

use common::database::{DatabaseConfig, connect_with_retry, ensure_collection, health_check};
use serde_json::json;
use sqlx::Row;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_collection_bootstrap() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = connect_with_retry(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    // Bootstrapping twice must be harmless
    ensure_collection(&pool, "integration_docs").await?;
    ensure_collection(&pool, "integration_docs").await?;

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO integration_docs (id, doc) VALUES ($1, $2)")
        .bind(id)
        .bind(json!({ "serviceName": "Wash" }))
        .execute(&pool)
        .await?;

    let row = sqlx::query("SELECT doc FROM integration_docs WHERE doc @> $1")
        .bind(json!({ "serviceName": "Wash" }))
        .fetch_one(&pool)
        .await?;
    let doc: serde_json::Value = row.get("doc");
    assert_eq!(doc["serviceName"], "Wash");

    sqlx::query("DROP TABLE integration_docs")
        .execute(&pool)
        .await?;
    pool.close().await;

    Ok(())
}
