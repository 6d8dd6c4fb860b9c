//! Generic repository over a typed MongoDB collection.

use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{map_write_error, ApiError};

/// Repository for the documents of one collection.
pub struct Repository<T: Send + Sync> {
    collection: Collection<T>,
    name: &'static str,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(db: &Database, name: &'static str) -> Self {
        Self {
            collection: db.collection(name),
            name,
        }
    }

    pub async fn create_indexes(&self, indexes: Vec<IndexModel>) -> Result<(), ApiError> {
        debug!("Repository[{}]: creating {} indexes", self.name, indexes.len());
        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Insert a document and return its generated id.
    pub async fn insert(&self, document: &T) -> Result<ObjectId, ApiError> {
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(map_write_error)?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Inserted document has no ObjectId"))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, ApiError> {
        debug!("Repository[{}]: finding by ID: {}", self.name, id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find documents with pagination and ordering. A `limit` of 0 returns
    /// every match.
    pub async fn find_many(
        &self,
        filter: Document,
        sort: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<T>, ApiError> {
        debug!("Repository[{}]: finding with filter: {:?}", self.name, filter);
        let cursor = self
            .collection
            .find(filter)
            .sort(sort)
            .skip(skip)
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Documents whose `_id` is one of `ids`.
    pub async fn find_by_ids(&self, ids: Vec<ObjectId>) -> Result<Vec<T>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_many(doc! { "_id": { "$in": ids } }, doc! {}, 0, 0)
            .await
    }

    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    pub async fn exists(&self, filter: Document) -> Result<bool, ApiError> {
        Ok(self.collection.find_one(filter).await?.is_some())
    }

    /// Whether another document already holds `value` in `field`.
    pub async fn is_taken(
        &self,
        field: &str,
        value: impl Into<Bson>,
        exclude: Option<ObjectId>,
    ) -> Result<bool, ApiError> {
        let mut filter = Document::new();
        filter.insert(field, value.into());
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": id });
        }
        self.exists(filter).await
    }

    /// Set the given fields; returns whether a document matched.
    pub async fn update(&self, id: ObjectId, set: Document) -> Result<bool, ApiError> {
        if set.is_empty() {
            return self.exists(doc! { "_id": id }).await;
        }
        debug!("Repository[{}]: updating {}: {:?}", self.name, id, set);
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await
            .map_err(map_write_error)?;
        Ok(result.matched_count > 0)
    }

    /// Delete by id; returns whether a document was removed.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// Next value of a sequential integer field, starting at 1.
    pub async fn next_number(&self, field: &str) -> Result<i64, ApiError> {
        let mut sort = Document::new();
        sort.insert(field, -1);
        let last = self
            .collection
            .clone_with_type::<Document>()
            .find_one(doc! {})
            .sort(sort)
            .await?;
        let current = last
            .and_then(|d| match d.get(field) {
                Some(Bson::Int64(n)) => Some(*n),
                Some(Bson::Int32(n)) => Some(i64::from(*n)),
                _ => None,
            })
            .unwrap_or(0);
        Ok(current + 1)
    }
}
