//! Order and reservation submissions.
//!
//! Both collections share one lifecycle: the caller's fields pass through
//! untouched, prefixed by a generated `id` and `date`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tiffin_core::{Collection, RecordId};

use super::{ServiceError, timestamp};
use crate::store::JsonStore;

/// Keys the server always generates.
const GENERATED_KEYS: [&str; 2] = ["id", "date"];

/// Append-only submissions to the orders or reservations collection.
pub struct SubmissionService<'a> {
    store: &'a JsonStore,
    collection: Collection,
}

impl<'a> SubmissionService<'a> {
    /// Service for the orders collection.
    #[must_use]
    pub const fn orders(store: &'a JsonStore) -> Self {
        Self {
            store,
            collection: Collection::Orders,
        }
    }

    /// Service for the reservations collection.
    #[must_use]
    pub const fn reservations(store: &'a JsonStore) -> Self {
        Self {
            store,
            collection: Collection::Reservations,
        }
    }

    /// Collection this service writes to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// Store a new submission and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the collection cannot be loaded or saved.
    pub async fn submit(&self, fields: Map<String, Value>) -> Result<Value, ServiceError> {
        let id = RecordId::generate();
        let record = build_record(id, timestamp(), fields);

        let record = self
            .store
            .update(self.collection, |records: &mut Vec<Value>| {
                records.push(record.clone());
                Ok::<_, ServiceError>(record)
            })
            .await?;

        tracing::info!(collection = %self.collection, record_id = %id, "Submission stored");
        Ok(record)
    }

    /// Every stored submission, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the collection cannot be loaded.
    pub async fn get_all(&self) -> Result<Vec<Value>, ServiceError> {
        Ok(self.store.load(self.collection).await?)
    }
}

/// `{id, date}` followed by the caller's fields, minus any `id`/`date` they sent.
fn build_record(id: RecordId, date: DateTime<Utc>, fields: Map<String, Value>) -> Value {
    let mut record = Map::with_capacity(fields.len() + GENERATED_KEYS.len());
    record.insert("id".to_owned(), Value::from(id.as_i64()));
    record.insert(
        "date".to_owned(),
        Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    record.extend(
        fields
            .into_iter()
            .filter(|(key, _)| !GENERATED_KEYS.contains(&key.as_str())),
    );
    Value::Object(record)
}
