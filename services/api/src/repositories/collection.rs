//! Document collection abstraction and the acknowledgments it returns

use async_trait::async_trait;
use common::error::DatabaseResult;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored document: a JSON object, with `_id` set on the way out
pub type Document = Map<String, Value>;

/// Key under which the store-assigned identifier is exposed
pub const ID_FIELD: &str = "_id";

/// Conjunction of top-level equality conditions. An empty filter matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Add the condition only when a value was supplied
    pub fn eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    /// The filter as a JSON object, suitable for JSONB containment
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Result of inserting one document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertOneResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of an update-or-create call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateResult {
    /// An existing document matched; `modified` tells whether any value changed
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_count: 0,
            upserted_id: None,
        }
    }

    /// Nothing matched, so a new document was inserted under `id`
    pub fn upserted(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        }
    }
}

/// Result of deleting by identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// A named set of JSON documents keyed by store-assigned UUIDs
///
/// Each call is a single-document atomic operation; nothing spans documents.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Documents matching `filter`, in insertion order
    async fn find(&self, filter: &Filter) -> DatabaseResult<Vec<Document>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Document>>;

    /// Store `doc` under a fresh identifier. A caller-supplied `_id` is dropped.
    async fn insert_one(&self, doc: Document) -> DatabaseResult<InsertOneResult>;

    /// Set `fields` on the document with `id`, or insert a document made of
    /// exactly `fields` under `id` when none exists.
    async fn update_or_create(&self, id: Uuid, fields: Document) -> DatabaseResult<UpdateResult>;

    async fn delete_one(&self, id: Uuid) -> DatabaseResult<DeleteResult>;

    /// Round-trip to the backend
    async fn ping(&self) -> DatabaseResult<()>;
}

/// Expose the identifier alongside the stored fields
pub fn with_id(id: Uuid, mut doc: Document) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

/// Drop any caller attempt to pick the identifier
pub fn strip_id(mut doc: Document) -> Document {
    doc.remove(ID_FIELD);
    doc
}

/// Overwrite `fields` on `target`; returns whether any value changed
pub fn merge_fields(target: &mut Document, fields: Document) -> bool {
    let mut changed = false;
    for (key, value) in fields {
        if target.get(&key) != Some(&value) {
            target.insert(key, value);
            changed = true;
        }
    }
    changed
}
