//! Menu maintenance.

use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tiffin_core::Collection;
use tiffin_server::store::JsonStore;

use super::CommandError;

/// Replace the menu with the JSON array stored in `file`.
///
/// # Errors
///
/// Returns `CommandError::InvalidMenu` if the file is not a JSON array; the
/// stored menu is left as it was.
pub async fn import(store: &JsonStore, file: &Path) -> Result<(), CommandError> {
    let content = tokio::fs::read_to_string(file).await?;
    let menu: Vec<Value> = serde_json::from_str(&content).map_err(CommandError::InvalidMenu)?;

    store.save(Collection::Menu, &menu).await?;
    tracing::info!(items = menu.len(), path = %file.display(), "Menu imported");
    Ok(())
}

/// Print the current menu as pretty JSON.
///
/// # Errors
///
/// Returns `CommandError::Store` if the menu cannot be loaded, or
/// `CommandError::Output` if it cannot be written to `out`.
pub async fn show(store: &JsonStore, out: &mut impl Write) -> Result<(), CommandError> {
    let menu: Vec<Value> = store.load(Collection::Menu).await?;
    serde_json::to_writer_pretty(&mut *out, &menu).map_err(CommandError::Output)?;
    writeln!(out)?;
    Ok(())
}
