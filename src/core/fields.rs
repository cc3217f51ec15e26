//! Field values and field sets passed between forms and the record store
//!
//! Multi-valued fields are shown in tables as one string joined by
//! [`DELIMITER`]. [`flatten`] and [`unflatten`] convert between the two
//! shapes. The conversion is lossy when a value itself contains the
//! delimiter.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Separator used when displaying multi-valued fields as one string
pub const DELIMITER: &str = ", ";

/// Join list values into one display string
pub fn flatten<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Split a display string back into list values
///
/// Blank pieces are dropped and each piece is trimmed, so `""` yields an
/// empty list rather than `[""]`.
pub fn unflatten(display: &str) -> Vec<String> {
    display
        .split(DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Values older files store where the current format expects a string or list
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

/// Deserialize a list field that may have been saved as a joined string
pub fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LegacyValue>::deserialize(deserializer)? {
        Some(LegacyValue::List(items)) => items,
        Some(LegacyValue::Text(s)) => unflatten(&s),
        Some(LegacyValue::Number(n)) => vec![n.to_string()],
        None => Vec::new(),
    })
}

/// Deserialize a scalar field that may have been saved as a number or list
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LegacyValue>::deserialize(deserializer)? {
        Some(LegacyValue::Text(s)) => s,
        Some(LegacyValue::Number(n)) => n.to_string(),
        Some(LegacyValue::List(items)) => flatten(&items),
        None => String::new(),
    })
}

/// Shape of a field in a record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single string value
    Scalar,
    /// Ordered list of strings
    List,
}

/// Static description of one record field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key in the JSON file (e.g. "City")
    pub name: &'static str,
    /// Prompt label for forms
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Values offered by the picker, if the field has a catalog
    pub choices: Option<&'static [&'static str]>,
    /// Value used for new records when none is given
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Scalar,
            required: true,
            choices: None,
            default: None,
        }
    }

    pub const fn list(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::List,
            required: true,
            choices: None,
            default: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// A field value as entered in a form or stored in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The value as a scalar, flattening lists
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::List(_) => flatten(&self.to_list()),
        }
    }

    /// The value as a list, unflattening text
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => unflatten(s),
            FieldValue::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// True when the value counts as "not filled in"
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(String::from).collect())
    }
}

/// A set of named field values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    values: BTreeMap<String, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Insert only when a value is present
    pub fn set_opt(&mut self, name: &str, value: Option<impl Into<FieldValue>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// Scalar value of a field, empty when absent
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(FieldValue::to_text).unwrap_or_default()
    }

    /// List value of a field, empty when absent
    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name).map(FieldValue::to_list).unwrap_or_default()
    }

    /// Overlay `other` onto this set; fields in `other` win
    pub fn merge(&mut self, other: &FieldSet) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }

    /// Names of required fields in `schema` that are absent or blank
    ///
    /// Values are judged in the shape the schema gives them, so a list
    /// field holding only delimiters counts as blank.
    pub fn missing_required(&self, schema: &[FieldSpec]) -> Vec<String> {
        schema
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| match spec.kind {
                FieldKind::List => self.list(spec.name).is_empty(),
                FieldKind::Scalar => self.text(spec.name).is_empty(),
            })
            .map(|spec| spec.name.to_string())
            .collect()
    }

    /// Fill absent or blank fields that have a schema default
    pub fn apply_defaults(&mut self, schema: &[FieldSpec]) {
        for spec in schema {
            if let Some(default) = spec.default {
                if self.get(spec.name).map_or(true, FieldValue::is_blank) {
                    self.set(spec.name, default);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
