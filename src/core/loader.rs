//! Collection file loading and saving
//!
//! A collection file is a JSON array of flat objects. Two older shapes are
//! still accepted on load: a single object (one record) and an empty
//! object (no records). Both are normalized to a list by
//! [`normalize_document`]; saving always writes an array.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::core::identity::RecordId;
use crate::core::store::StoreError;

/// Indentation used for every JSON file the toolkit writes
const INDENT: &[u8] = b"    ";

/// Read a collection file, returning an empty list if it does not exist
pub fn read_collection<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "collection file absent, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };
    parse_collection(&content, path)
}

/// Read a collection file that must exist
pub fn read_existing_collection<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    parse_collection(&content, path)
}

/// Parse collection file content
///
/// Any syntax error or record that does not match `R` fails the whole
/// load; nothing is partially parsed.
pub fn parse_collection<R: DeserializeOwned>(content: &str, path: &Path) -> Result<Vec<R>, StoreError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| StoreError::malformed(path, e))?;

    let mut items = normalize_document(document, path)?;
    assign_missing_ids(&mut items, path);
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| StoreError::malformed(path, e)))
        .collect()
}

/// Normalize a parsed document to a list of record objects
pub fn normalize_document(document: Value, path: &Path) -> Result<Vec<Value>, StoreError> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        Value::Object(map) => {
            tracing::warn!(
                path = %path.display(),
                "collection file holds a single object; treating it as one record"
            );
            Ok(vec![Value::Object(map)])
        }
        other => Err(StoreError::Shape {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// Give records with an absent or blank `ID` a fresh one
///
/// The new IDs live only in memory until the collection is next saved.
pub fn assign_missing_ids(items: &mut [Value], path: &Path) {
    let mut taken: HashSet<String> = items
        .iter()
        .filter_map(|item| item.get("ID"))
        .filter_map(id_text)
        .collect();

    for item in items.iter_mut() {
        let Value::Object(map) = item else { continue };
        if map.get("ID").and_then(id_text).is_some() {
            continue;
        }
        let id = loop {
            let candidate = RecordId::generate();
            if taken.insert(candidate.as_str().to_string()) {
                break candidate;
            }
        };
        tracing::warn!(path = %path.display(), id = %id, "record without ID; assigned a new one");
        map.insert("ID".to_string(), Value::String(id.as_str().to_string()));
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Serialize a value as JSON with four-space indentation
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Overwrite a collection file with `records`, creating parent directories
pub fn write_collection<R: Serialize>(path: &Path, records: &[R]) -> Result<(), StoreError> {
    let content = to_json_string(records).map_err(|e| StoreError::malformed(path, e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(path, e))?;
        }
    }

    fs::write(path, content).map_err(|e| StoreError::io(path, e))?;
    tracing::debug!(path = %path.display(), records = records.len(), "collection saved");
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
