//! Text exchange of the whole document: import of pasted JSON, export as a
//! pretty-printed snapshot with a date-stamped download name.

use chrono::NaiveDate;
use serde_json::Value;

use crate::{errors::KasaError, ledger::Document};

use super::Result;

/// Download name prefix, kept from the original tracker.
const EXPORT_FILE_PREFIX: &str = "harcama_gruplari";

/// Parses pasted text as a full document.
///
/// The text must be a JSON object carrying both `groups` and `history` as
/// arrays; remaining keys fall back per field. The returned document replaces
/// the current one wholesale, never merged.
pub fn import_document(raw: &str) -> Result<Document> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| KasaError::InvalidFormat(err.to_string()))?;
    let Some(object) = value.as_object() else {
        return Err(KasaError::InvalidFormat("expected a JSON object".into()));
    };
    for key in ["groups", "history"] {
        if !object.get(key).is_some_and(Value::is_array) {
            return Err(KasaError::MissingFields(key.into()));
        }
    }
    serde_json::from_value(value).map_err(|err| KasaError::InvalidFormat(err.to_string()))
}

/// Pretty-printed full snapshot of the document.
pub fn export_document(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Download file name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}_{}.json", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}
