//! PostgreSQL-backed document collections
//!
//! Each collection is a table of `(id UUID, doc JSONB, created_at)`. Filters
//! use JSONB containment (`doc @> $1`), which is equality on top-level keys
//! for the scalar values this service filters on.

use async_trait::async_trait;
use common::{
    database::{ensure_collection, health_check},
    error::DatabaseResult,
};
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::collection::{
    DeleteResult, Document, DocumentCollection, Filter, InsertOneResult, UpdateResult,
    merge_fields, strip_id, with_id,
};

/// Collection stored in its own JSONB table
#[derive(Clone)]
pub struct PgCollection {
    pool: PgPool,
    name: String,
}

impl PgCollection {
    /// Open the collection, creating its table on first use
    pub async fn open(pool: PgPool, name: &str) -> DatabaseResult<Self> {
        ensure_collection(&pool, name).await?;

        Ok(Self {
            pool,
            name: name.to_string(),
        })
    }
}

/// Stored documents are always objects; anything else reads as empty
fn into_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

#[async_trait]
impl DocumentCollection for PgCollection {
    async fn find(&self, filter: &Filter) -> DatabaseResult<Vec<Document>> {
        let sql = format!(
            "SELECT id, doc FROM {} WHERE doc @> $1 ORDER BY created_at, id",
            self.name
        );
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(filter.to_json())
            .fetch_all(&self.pool)
            .await?;

        debug!("{}: {} document(s) matched", self.name, rows.len());

        Ok(rows
            .into_iter()
            .map(|(id, doc)| with_id(id, into_document(doc)))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Document>> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", self.name);
        let doc: Option<Value> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc.map(|doc| with_id(id, into_document(doc))))
    }

    async fn insert_one(&self, doc: Document) -> DatabaseResult<InsertOneResult> {
        let id = Uuid::new_v4();
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.name);
        sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(strip_id(doc)))
            .execute(&self.pool)
            .await?;

        Ok(InsertOneResult::new(id))
    }

    async fn update_or_create(&self, id: Uuid, fields: Document) -> DatabaseResult<UpdateResult> {
        let fields = strip_id(fields);
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT doc FROM {} WHERE id = $1 FOR UPDATE", self.name);
        let existing: Option<Value> = sqlx::query_scalar(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let result = match existing {
            Some(doc) => {
                let mut doc = into_document(doc);
                let modified = merge_fields(&mut doc, fields);
                if modified {
                    let update = format!("UPDATE {} SET doc = $2 WHERE id = $1", self.name);
                    sqlx::query(&update)
                        .bind(id)
                        .bind(Value::Object(doc))
                        .execute(&mut *tx)
                        .await?;
                }
                UpdateResult::matched(modified)
            }
            None => {
                // A concurrent upsert of the same id may win the race; merge into it
                let insert = format!(
                    "INSERT INTO {name} (id, doc) VALUES ($1, $2) \
                     ON CONFLICT (id) DO UPDATE SET doc = {name}.doc || EXCLUDED.doc \
                     RETURNING (xmax = 0) AS inserted",
                    name = self.name
                );
                let inserted: bool = sqlx::query_scalar(&insert)
                    .bind(id)
                    .bind(Value::Object(fields))
                    .fetch_one(&mut *tx)
                    .await?;

                if inserted {
                    UpdateResult::upserted(id)
                } else {
                    debug!("{}: lost the insert race for {}, merged", self.name, id);
                    UpdateResult::matched(true)
                }
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn delete_one(&self, id: Uuid) -> DatabaseResult<DeleteResult> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.name);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    async fn ping(&self) -> DatabaseResult<()> {
        health_check(&self.pool).await.map(|_| ())
    }
}
