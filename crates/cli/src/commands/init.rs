//! Initialize the data directory.

use std::io::Write;

use serde_json::Value;
use tiffin_core::Collection;
use tiffin_server::store::JsonStore;

use super::CommandError;

/// Load every collection once, creating missing files, and report sizes.
///
/// # Errors
///
/// Returns an error if a collection file is corrupt or cannot be created.
pub async fn run(store: &JsonStore, out: &mut impl Write) -> Result<(), CommandError> {
    for collection in Collection::ALL {
        let records: Vec<Value> = store.load(collection).await?;
        writeln!(
            out,
            "{:<14}{:>6} records  {}",
            collection.name(),
            records.len(),
            store.path(collection).display()
        )?;
    }
    Ok(())
}
