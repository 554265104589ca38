//! Service listing repository

use std::sync::Arc;

use common::error::DatabaseResult;
use uuid::Uuid;

use super::collection::{DeleteResult, Document, DocumentCollection, InsertOneResult, UpdateResult};
use crate::models::service::ServiceQuery;

/// Service repository for document store operations
#[derive(Clone)]
pub struct ServiceRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl ServiceRepository {
    /// Create a new service repository
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// All listings matching the optional name / provider filters
    pub async fn list(&self, query: &ServiceQuery) -> DatabaseResult<Vec<Document>> {
        self.collection.find(&query.to_filter()).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Document>> {
        self.collection.find_by_id(id).await
    }

    /// Persist the payload verbatim as a new listing
    pub async fn create(&self, payload: Document) -> DatabaseResult<InsertOneResult> {
        self.collection.insert_one(payload).await
    }

    /// Overwrite the fixed listing fields, creating the listing under `id`
    /// when it does not exist.
    pub async fn update_or_create(
        &self,
        id: Uuid,
        fields: Document,
    ) -> DatabaseResult<UpdateResult> {
        self.collection.update_or_create(id, fields).await
    }

    pub async fn delete(&self, id: Uuid) -> DatabaseResult<DeleteResult> {
        self.collection.delete_one(id).await
    }

    /// Round-trip to the store backing this repository
    pub async fn ping(&self) -> DatabaseResult<()> {
        self.collection.ping().await
    }
}
