//! Booking repository

use std::sync::Arc;

use common::error::DatabaseResult;
use serde_json::Value;
use uuid::Uuid;

use super::collection::{Document, DocumentCollection, InsertOneResult, UpdateResult};
use crate::models::booking::{BookingQuery, BookingStatus, STATUS};

/// Booking repository for document store operations
#[derive(Clone)]
pub struct BookingRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl BookingRepository {
    /// Create a new booking repository
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Bookings matching the optional user / provider filters
    pub async fn list_for_user(&self, query: &BookingQuery) -> DatabaseResult<Vec<Document>> {
        self.collection.find(&query.to_filter()).await
    }

    /// Persist an already validated booking
    pub async fn create(&self, booking: Document) -> DatabaseResult<InsertOneResult> {
        self.collection.insert_one(booking).await
    }

    /// Set only the status. Like service updates this upserts: an unknown id
    /// produces a booking holding nothing but the status.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> DatabaseResult<UpdateResult> {
        let mut fields = Document::new();
        fields.insert(STATUS.to_string(), Value::from(status.as_str()));
        self.collection.update_or_create(id, fields).await
    }
}
