use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::{DocumentStore, StoreError, StoreResult, TimestampStream};
use crate::config::MongoConfig;
use crate::constants::CREATED_AT_FIELD;

const APP_NAME: &str = "activity-dashboard";

/// MongoDB-backed document store
#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }
}

/// Connect to MongoDB and verify the server answers before returning.
pub async fn setup_database(config: &MongoConfig) -> Result<MongoStore> {
    info!("Connecting to MongoDB database '{}'", config.database);

    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));

    if options.tls.is_none() && !config.uri.starts_with("mongodb+srv://") {
        warn!("MongoDB connection does not enable TLS. Consider adding tls=true to the connection string");
    }

    let client = Client::with_options(options)?;
    let store = MongoStore::new(client.database(&config.database));

    let start_time = Instant::now();
    store.ping().await?;
    info!(
        "✅ MongoDB connection established in {:?}",
        start_time.elapsed()
    );

    Ok(store)
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }

    async fn count_documents(&self, collection: &str) -> StoreResult<u64> {
        Ok(self
            .db
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await?)
    }

    async fn creation_timestamps<'a>(
        &'a self,
        collection: &'a str,
    ) -> StoreResult<TimestampStream<'a>> {
        let mut projection = Document::new();
        projection.insert(CREATED_AT_FIELD, 1);

        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .projection(projection)
            .await?;

        Ok(cursor
            .map(move |document| extract_created_at(collection, &document?))
            .boxed())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

fn extract_created_at(collection: &str, document: &Document) -> StoreResult<DateTime<Utc>> {
    let document_id = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => "<no _id>".to_string(),
    };

    let invalid = || StoreError::InvalidField {
        collection: collection.to_string(),
        document_id: document_id.clone(),
        field: CREATED_AT_FIELD.to_string(),
    };

    match document.get(CREATED_AT_FIELD) {
        Some(Bson::DateTime(value)) => {
            DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).ok_or_else(invalid)
        }
        Some(_) => Err(invalid()),
        None => Err(StoreError::MissingField {
            collection: collection.to_string(),
            document_id: document_id.clone(),
            field: CREATED_AT_FIELD.to_string(),
        }),
    }
}
