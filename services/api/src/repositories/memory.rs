//! In-process document collection
//!
//! Same semantics as the PostgreSQL collection, held in memory. The HTTP
//! tests run the real router on top of it.

use async_trait::async_trait;
use common::error::DatabaseResult;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::collection::{
    DeleteResult, Document, DocumentCollection, Filter, InsertOneResult, UpdateResult,
    merge_fields, strip_id, with_id,
};

#[derive(Default)]
pub struct MemoryCollection {
    docs: RwLock<Vec<(Uuid, Document)>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn find(&self, filter: &Filter) -> DatabaseResult<Vec<Document>> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|(_, doc)| filter.matches(doc))
            .map(|(id, doc)| with_id(*id, doc.clone()))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Document>> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(id, doc)| with_id(*id, doc.clone())))
    }

    async fn insert_one(&self, doc: Document) -> DatabaseResult<InsertOneResult> {
        let id = Uuid::new_v4();
        self.docs.write().await.push((id, strip_id(doc)));
        Ok(InsertOneResult::new(id))
    }

    async fn update_or_create(&self, id: Uuid, fields: Document) -> DatabaseResult<UpdateResult> {
        let fields = strip_id(fields);
        let mut docs = self.docs.write().await;

        match docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, doc)) => Ok(UpdateResult::matched(merge_fields(doc, fields))),
            None => {
                docs.push((id, fields));
                Ok(UpdateResult::upserted(id))
            }
        }
    }

    async fn delete_one(&self, id: Uuid) -> DatabaseResult<DeleteResult> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);
        Ok(DeleteResult::new((before - docs.len()) as u64))
    }

    async fn ping(&self) -> DatabaseResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::ID_FIELD;
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_identifier_and_ignores_callers_id() {
        let collection = MemoryCollection::new();
        let result = collection
            .insert_one(doc(json!({ "_id": "mine", "serviceName": "Wash" })))
            .await
            .unwrap();

        let stored = collection
            .find_by_id(result.inserted_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored[ID_FIELD], result.inserted_id.to_string());
        assert_eq!(stored["serviceName"], "Wash");
    }

    #[tokio::test]
    async fn find_keeps_insertion_order() {
        let collection = MemoryCollection::new();
        for name in ["a", "b", "c"] {
            collection
                .insert_one(doc(json!({ "serviceName": name })))
                .await
                .unwrap();
        }

        let names: Vec<Value> = collection
            .find(&Filter::new())
            .await
            .unwrap()
            .into_iter()
            .map(|d| d["serviceName"].clone())
            .collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[tokio::test]
    async fn update_or_create_inserts_under_requested_id() {
        let collection = MemoryCollection::new();
        let id = Uuid::new_v4();

        let result = collection
            .update_or_create(id, doc(json!({ "status": "confirmed" })))
            .await
            .unwrap();
        assert_eq!(result, UpdateResult::upserted(id));

        let stored = collection.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.len(), 2, "only _id and status: {stored:?}");
        assert_eq!(stored["status"], "confirmed");
    }

    #[tokio::test]
    async fn update_or_create_merges_into_existing() {
        let collection = MemoryCollection::new();
        let id = collection
            .insert_one(doc(json!({ "status": "pending", "userEmail": "u@x.com" })))
            .await
            .unwrap()
            .inserted_id;

        let same = collection
            .update_or_create(id, doc(json!({ "status": "pending" })))
            .await
            .unwrap();
        assert_eq!(same, UpdateResult::matched(false));

        let changed = collection
            .update_or_create(id, doc(json!({ "status": "confirmed" })))
            .await
            .unwrap();
        assert_eq!(changed, UpdateResult::matched(true));
        assert_eq!(collection.len().await, 1);
    }

    #[tokio::test]
    async fn delete_of_missing_document_reports_zero() {
        let collection = MemoryCollection::new();
        let id = collection
            .insert_one(doc(json!({ "serviceName": "Wash" })))
            .await
            .unwrap()
            .inserted_id;

        assert_eq!(
            collection.delete_one(Uuid::new_v4()).await.unwrap(),
            DeleteResult::new(0)
        );
        assert_eq!(
            collection.delete_one(id).await.unwrap(),
            DeleteResult::new(1)
        );
        assert!(collection.is_empty().await);
    }
}
