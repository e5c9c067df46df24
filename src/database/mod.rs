//! Read-only access to the document database.
//!
//! The dashboard only ever lists collections, counts their documents and
//! reads each document's creation timestamp. `DocumentStore` captures those
//! three reads so the panels can be computed against MongoDB in production
//! and against [`InMemoryStore`] in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use thiserror::Error;

pub mod memory;
pub mod mongo;

pub use memory::{InMemoryStore, StoredDocument};
pub use mongo::{setup_database, MongoStore};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Stream of creation timestamps, one item per document
pub type TimestampStream<'a> = BoxStream<'a, StoreResult<DateTime<Utc>>>;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Document {document_id} in collection '{collection}' has no '{field}' field")]
    MissingField {
        collection: String,
        document_id: String,
        field: String,
    },

    #[error("Field '{field}' of document {document_id} in collection '{collection}' is not a datetime")]
    InvalidField {
        collection: String,
        document_id: String,
        field: String,
    },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Names of every collection in the configured database, in server order
    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;

    /// Number of documents in `collection`, unfiltered
    async fn count_documents(&self, collection: &str) -> StoreResult<u64>;

    /// Creation timestamp of every document in `collection`.
    ///
    /// A document without a usable timestamp yields a `MissingField` or
    /// `InvalidField` error item rather than being skipped.
    async fn creation_timestamps<'a>(&'a self, collection: &'a str)
        -> StoreResult<TimestampStream<'a>>;

    /// Round-trip to the server without touching any collection
    async fn ping(&self) -> StoreResult<()>;
}
