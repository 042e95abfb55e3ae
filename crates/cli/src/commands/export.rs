//! Export a collection as CSV.

use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tiffin_core::Collection;
use tiffin_server::export::{Export, export_collection};
use tiffin_server::store::JsonStore;

use super::CommandError;

/// Export `collection` to `output`, or to `out` when no file is given.
///
/// An empty collection prints the "No ... to export." note to `out` and
/// never creates the output file.
///
/// # Errors
///
/// Returns an error if the collection cannot be loaded or the output written.
pub async fn run(
    store: &JsonStore,
    collection: Collection,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let records: Vec<Value> = store.load(collection).await?;

    match export_collection(collection, &records)? {
        Export::Empty(message) => writeln!(out, "{message}")?,
        Export::Csv(csv) => match output {
            Some(path) => {
                tokio::fs::write(path, format!("{csv}\n")).await?;
                tracing::info!(%collection, rows = records.len(), path = %path.display(), "Exported collection");
            }
            None => writeln!(out, "{csv}")?,
        },
    }
    Ok(())
}
