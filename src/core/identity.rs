//! Record identity: record kinds and short ULID-derived record IDs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Length of a generated record ID
pub const ID_LEN: usize = 10;

/// The kinds of record collections managed by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Waste inventory entry (city, categories, quantity)
    Waste,
    /// Collection and transportation protocol
    Protocol,
    /// Waste facility registry entry
    Facility,
    /// Category/method taxonomy entry
    Taxonomy,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Waste => "waste",
            RecordKind::Protocol => "protocol",
            RecordKind::Facility => "facility",
            RecordKind::Taxonomy => "taxonomy",
        }
    }

    /// Default file name of the collection, relative to the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            RecordKind::Waste => "waste_data.json",
            RecordKind::Protocol => "c_t_data.json",
            RecordKind::Facility => "facility_data.json",
            RecordKind::Taxonomy => "waste_cat.json",
        }
    }

    /// Human-readable singular name
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Waste => "waste entry",
            RecordKind::Protocol => "protocol",
            RecordKind::Facility => "facility",
            RecordKind::Taxonomy => "taxonomy entry",
        }
    }

    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Waste,
            RecordKind::Protocol,
            RecordKind::Facility,
            RecordKind::Taxonomy,
        ]
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waste" => Ok(RecordKind::Waste),
            "protocol" | "ct" => Ok(RecordKind::Protocol),
            "facility" => Ok(RecordKind::Facility),
            "taxonomy" | "cat" => Ok(RecordKind::Taxonomy),
            _ => Err(IdParseError::InvalidKind(s.to_string())),
        }
    }
}

/// Opaque record identifier, unique within its collection
///
/// New IDs are the last ten characters of a ULID (its random part) in
/// lowercase. IDs loaded from disk are kept verbatim, so legacy numeric
/// IDs like `4821` or hex IDs like `9f86d081` stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh ID
    pub fn generate() -> Self {
        let ulid = Ulid::new().to_string();
        Self(ulid[ulid.len() - ID_LEN..].to_lowercase())
    }

    /// Generate an ID not contained in `taken`
    pub fn generate_unique(taken: &HashSet<&RecordId>) -> Self {
        loop {
            let id = Self::generate();
            if !taken.contains(&id) {
                return id;
            }
        }
    }

    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdParseError::Whitespace(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Older files store IDs as bare numbers
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        };
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing kinds and record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid record kind: '{0}' (valid: waste, protocol, facility, taxonomy)")]
    InvalidKind(String),

    #[error("record ID is empty")]
    Empty,

    #[error("record ID contains whitespace: '{0}'")]
    Whitespace(String),
}
