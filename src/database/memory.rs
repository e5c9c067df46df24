use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError, StoreResult, TimestampStream};
use crate::constants::CREATED_AT_FIELD;

/// Minimal document shape held by [`InMemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredDocument {
    pub fn created_at(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at),
        }
    }

    pub fn without_timestamp(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: None,
        }
    }
}

/// Document store kept entirely in memory.
///
/// Collections keep their insertion order, which stands in for the order the
/// server reports collection names in. `set_unavailable(true)` makes every
/// call fail the way a dropped connection would.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<Vec<(String, Vec<StoredDocument>)>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(
        mut self,
        name: impl Into<String>,
        documents: impl IntoIterator<Item = StoredDocument>,
    ) -> Self {
        self.collections
            .get_mut()
            .push((name.into(), documents.into_iter().collect()));
        self
    }

    /// Append a document, creating the collection if needed
    pub async fn insert(&self, collection: &str, document: StoredDocument) {
        let mut collections = self.collections.write().await;
        match collections.iter_mut().find(|(name, _)| name == collection) {
            Some((_, documents)) => documents.push(document),
            None => collections.push((collection.to_string(), vec![document])),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    async fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .read()
            .await
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, documents)| documents.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.check_available()?;
        Ok(self
            .collections
            .read()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn count_documents(&self, collection: &str) -> StoreResult<u64> {
        self.check_available()?;
        Ok(self.documents(collection).await.len() as u64)
    }

    async fn creation_timestamps<'a>(
        &'a self,
        collection: &'a str,
    ) -> StoreResult<TimestampStream<'a>> {
        self.check_available()?;
        let documents = self.documents(collection).await;

        Ok(stream::iter(documents)
            .map(move |document| {
                document.created_at.ok_or_else(|| StoreError::MissingField {
                    collection: collection.to_string(),
                    document_id: document.id.clone(),
                    field: CREATED_AT_FIELD.to_string(),
                })
            })
            .boxed())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }
}
