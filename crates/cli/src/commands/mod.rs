//! CLI subcommands.

pub mod export;
pub mod init;
pub mod menu;

use thiserror::Error;
use tiffin_server::export::ExportError;
use tiffin_server::store::StoreError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Collection storage failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// CSV formatting failed.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Menu file is not a JSON array.
    #[error("invalid menu file: {0}")]
    InvalidMenu(#[source] serde_json::Error),

    /// Printing JSON output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] serde_json::Error),
}
