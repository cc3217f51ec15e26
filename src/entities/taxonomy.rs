//! Category/method taxonomy entry
//!
//! Shares most fields with [`Protocol`](crate::entities::Protocol) but is
//! kept in its own file, uses the singular `Method` key, and carries notes.
//! Older files spell the list keys `Method Categories` and
//! `Transportation Categories`; both load and are saved under the short keys.

use serde::{Deserialize, Serialize};

use crate::core::fields::{deserialize_list, deserialize_text, FieldSet, FieldSpec};
use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;
use crate::entities::catalog::{COLLECTION_METHODS, TRANSPORTATION_MODES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    #[serde(rename = "ID")]
    pub id: RecordId,

    #[serde(rename = "City", default, deserialize_with = "deserialize_text")]
    pub city: String,

    #[serde(rename = "Area", default, deserialize_with = "deserialize_text")]
    pub area: String,

    #[serde(rename = "Frequency", default, deserialize_with = "deserialize_text")]
    pub frequency: String,

    #[serde(
        rename = "Method",
        alias = "Method Categories",
        default,
        deserialize_with = "deserialize_list"
    )]
    pub method: Vec<String>,

    #[serde(
        rename = "Transportation",
        alias = "Transportation Categories",
        default,
        deserialize_with = "deserialize_list"
    )]
    pub transportation: Vec<String>,

    #[serde(rename = "Notes", default, deserialize_with = "deserialize_text")]
    pub notes: String,
}

impl Record for TaxonomyEntry {
    const KIND: RecordKind = RecordKind::Taxonomy;

    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::scalar("City", "City/Town/Barangay"),
        FieldSpec::scalar("Area", "Area"),
        FieldSpec::scalar("Frequency", "Frequency"),
        FieldSpec::list("Method", "Method").with_choices(COLLECTION_METHODS),
        FieldSpec::list("Transportation", "Transportation").with_choices(TRANSPORTATION_MODES),
        FieldSpec::scalar("Notes", "Notes").optional(),
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: &FieldSet) -> Self {
        Self {
            id,
            city: fields.text("City"),
            area: fields.text("Area"),
            frequency: fields.text("Frequency"),
            method: fields.list("Method"),
            transportation: fields.list("Transportation"),
            notes: fields.text("Notes"),
        }
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("City", self.city.as_str())
            .with("Area", self.area.as_str())
            .with("Frequency", self.frequency.as_str())
            .with("Method", self.method.clone())
            .with("Transportation", self.transportation.clone())
            .with("Notes", self.notes.as_str())
    }

    fn title(&self) -> String {
        format!("{} ({})", self.city, self.area)
    }
}
