//! CSV export of collections.
//!
//! # Column rule
//!
//! Columns are the union of object keys over all records, in first-seen
//! order: the first record's keys as stored, then any key a later record
//! introduces is appended as an extra column. Records missing a column get an
//! empty field.
//!
//! # Encoding
//!
//! - Header names and string values are wrapped in `"`, with inner `"` doubled
//! - Numbers and booleans are written bare
//! - `null` and missing values are empty
//! - Arrays and objects are written as compact JSON, quoted
//! - Rows are separated by `\n`; there is no trailing newline

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tiffin_core::Collection;

/// Errors that can occur while formatting CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There are no records to export.
    #[error("collection is empty")]
    EmptyCollection,

    /// A record could not be converted to JSON.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of exporting a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    /// CSV document.
    Csv(String),
    /// Human-readable note sent instead of CSV when nothing is stored.
    Empty(String),
}

/// Format records as CSV.
///
/// # Errors
///
/// Returns `ExportError::EmptyCollection` for an empty slice; callers are
/// expected to answer with [`empty_message`] instead.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    let columns = discover_columns(&values);

    let mut csv = join_row(columns.iter().map(|column| quote(column)));
    for value in &values {
        csv.push('\n');
        csv.push_str(&join_row(
            columns.iter().map(|column| cell(value.get(column.as_str()))),
        ));
    }
    Ok(csv)
}

/// Export a collection, turning "nothing stored" into its explanatory note.
///
/// # Errors
///
/// Returns `ExportError::Encode` if a record cannot be converted to JSON.
pub fn export_collection<T: Serialize>(
    collection: Collection,
    records: &[T],
) -> Result<Export, ExportError> {
    match to_csv(records) {
        Ok(csv) => Ok(Export::Csv(csv)),
        Err(ExportError::EmptyCollection) => Ok(Export::Empty(empty_message(collection))),
        Err(e) => Err(e),
    }
}

/// Sentence returned when a collection has nothing to export.
#[must_use]
pub fn empty_message(collection: Collection) -> String {
    format!("No {} to export.", collection.name())
}

/// Attachment filename for a collection's CSV.
#[must_use]
pub fn file_name(collection: Collection) -> String {
    format!("{}.csv", collection.name())
}

fn discover_columns(values: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for object in values.iter().filter_map(Value::as_object) {
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => quote(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => quote(&nested.to_string()),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn join_row(fields: impl Iterator<Item = String>) -> String {
    fields.collect::<Vec<_>>().join(",")
}
