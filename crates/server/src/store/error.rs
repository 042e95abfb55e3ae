//! Record store error types.

use thiserror::Error;
use tiffin_core::Collection;

/// Errors that can occur while loading or saving a collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming the collection file failed.
    #[error("i/o error on {collection}: {source}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    /// The collection file exists but does not hold a JSON array of records.
    #[error("corrupt storage for {collection}: {source}")]
    Corrupt {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded as JSON.
    #[error("failed to serialize {collection}: {source}")]
    Serialize {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// The collection the failed operation touched.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Io { collection, .. }
            | Self::Corrupt { collection, .. }
            | Self::Serialize { collection, .. } => *collection,
        }
    }
}
