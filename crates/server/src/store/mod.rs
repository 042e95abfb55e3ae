//! JSON file record store.
//!
//! # Layout
//!
//! Every [`Collection`] lives in one file under the data directory:
//!
//! ```text
//! data/
//! ├── menu.json
//! ├── orders.json
//! ├── reservations.json
//! └── customers.json
//! ```
//!
//! Each file holds a single pretty-printed JSON array. Records keep their
//! insertion order and are never partially updated on disk.
//!
//! # Semantics
//!
//! - A missing file is created holding `[]` on first load.
//! - An empty (or whitespace-only) file loads as an empty collection.
//! - Anything else must parse as a JSON array, otherwise
//!   [`StoreError::Corrupt`] is returned.
//! - Saves write `<file>.tmp` and rename it over the original, so a crash
//!   mid-write leaves the previous document intact.
//!
//! # Concurrency
//!
//! Each collection has its own async mutex. [`JsonStore::update`] holds it
//! across the whole load-mutate-save cycle, so concurrent writers within one
//! process never lose each other's records. Multiple processes sharing a data
//! directory are not coordinated.

mod error;

pub use error::StoreError;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tiffin_core::Collection;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};

/// Name of the scratch file used by [`JsonStore::probe`].
const PROBE_FILE: &str = ".ready-probe";

/// One lock per collection.
#[derive(Debug, Default)]
struct CollectionLocks {
    menu: Mutex<()>,
    orders: Mutex<()>,
    reservations: Mutex<()>,
    customers: Mutex<()>,
}

impl CollectionLocks {
    const fn get(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::Menu => &self.menu,
            Collection::Orders => &self.orders,
            Collection::Reservations => &self.reservations,
            Collection::Customers => &self.customers,
        }
    }
}

/// Whole-document persistence of named collections.
#[derive(Debug)]
pub struct JsonStore {
    root: PathBuf,
    locks: CollectionLocks,
}

impl JsonStore {
    /// Create a store rooted at `root`.
    ///
    /// Nothing is touched on disk until the first load or save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: CollectionLocks::default(),
        }
    }

    /// Data directory holding the collection files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a collection's backing file.
    #[must_use]
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    /// Load every record of a collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the file does not parse as an array of
    /// `T`, or `StoreError::Io` if it cannot be read or lazily created.
    pub async fn load<T>(&self, collection: Collection) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.lock(collection).await;
        self.read(collection).await
    }

    /// Replace a collection's contents with `records`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` or `StoreError::Io` if the write fails.
    /// The previous document is left in place in that case.
    pub async fn save<T>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let _guard = self.lock(collection).await;
        self.write(collection, records).await
    }

    /// Run a load-mutate-save cycle under the collection's lock.
    ///
    /// The collection is written back only if `mutate` returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the closure's error unchanged, or a `StoreError` (converted
    /// into `E`) if loading or saving fails.
    pub async fn update<T, R, E, F>(&self, collection: Collection, mutate: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.lock(collection).await;
        let mut records = self.read(collection).await?;
        let outcome = mutate(&mut records)?;
        self.write(collection, &records).await?;
        Ok(outcome)
    }

    /// Check that the data directory can be created, written and cleaned up.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub async fn probe(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await?;
        let path = self.root.join(PROBE_FILE);
        fs::write(&path, b"ok").await?;
        fs::remove_file(&path).await
    }

    async fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        self.locks.get(collection).lock().await
    }

    async fn read<T>(&self, collection: Collection) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.path(collection);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(%collection, path = %path.display(), "Initializing empty collection");
                self.write::<serde_json::Value>(collection, &[]).await?;
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Io { collection, source }),
        };

        if content.trim().is_empty() {
            tracing::debug!(%collection, "Collection file is empty");
            return Ok(Vec::new());
        }

        let records: Vec<T> = serde_json::from_str(&content)
            .map_err(|source| StoreError::Corrupt { collection, source })?;
        tracing::debug!(%collection, count = records.len(), "Loaded collection");
        Ok(records)
    }

    async fn write<T>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let io_err = |source| StoreError::Io { collection, source };

        let json = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Serialize { collection, source })?;

        fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let path = self.path(collection);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await.map_err(io_err)?;
        fs::rename(&tmp, &path).await.map_err(io_err)?;

        tracing::debug!(%collection, count = records.len(), "Saved collection");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    fn store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_missing_creates_empty_collection() {
        let (_dir, store) = store();
        let path = store.path(Collection::Orders);
        assert!(!path.exists());

        let records: Vec<Value> = store.load(Collection::Orders).await.unwrap();
        assert!(records.is_empty());
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");

        let again: Vec<Value> = store.load(Collection::Orders).await.unwrap();
        assert!(again.is_empty());
    }

    #[tokio::test]
    async fn test_load_empty_file_is_empty_collection() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.path(Collection::Customers), "").unwrap();

        let records: Vec<Value> = store.load(Collection::Customers).await.unwrap();
        assert!(records.is_empty());

        std::fs::write(store.path(Collection::Customers), "  \n").unwrap();
        let records: Vec<Value> = store.load(Collection::Customers).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_fails() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.path(Collection::Menu), "[{\"name\": ").unwrap();

        let err = store.load::<Value>(Collection::Menu).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { collection: Collection::Menu, .. }));
    }

    #[tokio::test]
    async fn test_load_non_array_document_is_corrupt() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.path(Collection::Menu), "{\"name\": \"Dal\"}").unwrap();

        let err = store.load::<Value>(Collection::Menu).await.unwrap_err();
        assert_eq!(err.collection(), Collection::Menu);
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order_and_fields() {
        let (_dir, store) = store();
        let menu = vec![
            json!({"name": "Dal", "price": 120, "tags": ["veg"]}),
            json!({"name": "Biryani", "price": 250.5, "spicy": true}),
        ];
        store.save(Collection::Menu, &menu).await.unwrap();

        let loaded: Vec<Value> = store.load(Collection::Menu).await.unwrap();
        assert_eq!(loaded, menu);
        let keys: Vec<_> = loaded[1].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["name", "price", "spicy"]);
    }

    #[tokio::test]
    async fn test_save_load_reaches_fixed_point() {
        let (_dir, store) = store();
        store
            .save(Collection::Orders, &[json!({"id": 1, "item": "Thali"})])
            .await
            .unwrap();
        let first = std::fs::read_to_string(store.path(Collection::Orders)).unwrap();

        let loaded: Vec<Value> = store.load(Collection::Orders).await.unwrap();
        store.save(Collection::Orders, &loaded).await.unwrap();
        let second = std::fs::read_to_string(store.path(Collection::Orders)).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed_and_leaves_no_temp_file() {
        let (_dir, store) = store();
        store
            .save(Collection::Reservations, &[json!({"guests": 4})])
            .await
            .unwrap();

        let text = std::fs::read_to_string(store.path(Collection::Reservations)).unwrap();
        assert_eq!(text, "[\n  {\n    \"guests\": 4\n  }\n]");
        assert!(!store.root().join("reservations.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_update_failure_leaves_collection_untouched() {
        let (_dir, store) = store();
        store.save(Collection::Menu, &[json!({"name": "Dal"})]).await.unwrap();

        let result: Result<(), StoreError> = store
            .update(Collection::Menu, |records: &mut Vec<Value>| {
                records.clear();
                Err(StoreError::Io {
                    collection: Collection::Menu,
                    source: std::io::Error::other("rejected"),
                })
            })
            .await;
        assert!(result.is_err());

        let loaded: Vec<Value> = store.load(Collection::Menu).await.unwrap();
        assert_eq!(loaded, vec![json!({"name": "Dal"})]);
    }

    #[tokio::test]
    async fn test_concurrent_updates_do_not_lose_records() {
        let (_dir, store) = store();
        let store = Arc::new(store);

        let tasks: Vec<_> = (0..25)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .update(Collection::Orders, |records: &mut Vec<Value>| {
                            records.push(json!({"n": n}));
                            Ok::<_, StoreError>(())
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let loaded: Vec<Value> = store.load(Collection::Orders).await.unwrap();
        assert_eq!(loaded.len(), 25);
    }

    #[tokio::test]
    async fn test_probe_cleans_up() {
        let (_dir, store) = store();
        store.probe().await.unwrap();
        assert!(store.root().exists());
        assert!(!store.root().join(PROBE_FILE).exists());
    }
}
