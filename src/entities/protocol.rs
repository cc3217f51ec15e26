//! Collection and transportation protocol

use serde::{Deserialize, Serialize};

use crate::core::fields::{deserialize_list, deserialize_text, FieldSet, FieldSpec};
use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;
use crate::entities::catalog::{COLLECTION_METHODS, TRANSPORTATION_MODES};

/// How and how often waste is collected and moved in an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(rename = "ID")]
    pub id: RecordId,

    #[serde(rename = "City", default, deserialize_with = "deserialize_text")]
    pub city: String,

    #[serde(rename = "Area", default, deserialize_with = "deserialize_text")]
    pub area: String,

    /// Collection frequency (e.g. "weekly")
    #[serde(rename = "Frequency", default, deserialize_with = "deserialize_text")]
    pub frequency: String,

    #[serde(rename = "Methods", default, deserialize_with = "deserialize_list")]
    pub methods: Vec<String>,

    #[serde(rename = "Transportation", default, deserialize_with = "deserialize_list")]
    pub transportation: Vec<String>,
}

impl Record for Protocol {
    const KIND: RecordKind = RecordKind::Protocol;

    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::scalar("City", "City/Town/Barangay"),
        FieldSpec::scalar("Area", "Area"),
        FieldSpec::scalar("Frequency", "Frequency"),
        FieldSpec::list("Methods", "Methods").with_choices(COLLECTION_METHODS),
        FieldSpec::list("Transportation", "Transportation").with_choices(TRANSPORTATION_MODES),
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
            methods: fields.list("Methods"),
            transportation: fields.list("Transportation"),
        }
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("City", self.city.as_str())
            .with("Area", self.area.as_str())
            .with("Frequency", self.frequency.as_str())
            .with("Methods", self.methods.clone())
            .with("Transportation", self.transportation.clone())
    }

    fn title(&self) -> String {
        format!("{} ({})", self.city, self.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_requires_all_fields() {
        let fields = FieldSet::new()
            .with("City", "Metro")
            .with("Area", "North")
            .with("Frequency", "weekly")
            .with("Methods", vec!["Curbside Pickup"]);
        assert_eq!(fields.missing_required(Protocol::SCHEMA), vec!["Transportation"]);
    }

    #[test]
    fn test_protocol_roundtrips_through_fields() {
        let fields = FieldSet::new()
            .with("City", "Metro")
            .with("Area", "North")
            .with("Frequency", "weekly")
            .with("Methods", "Curbside Pickup, Source Separation")
            .with("Transportation", vec!["Garbage Trucks"]);
        let protocol = Protocol::from_fields(RecordId::generate(), &fields);

        assert_eq!(protocol.methods, vec!["Curbside Pickup", "Source Separation"]);
        assert_eq!(
            Protocol::from_fields(protocol.id.clone(), &protocol.to_fields()),
            protocol
        );
    }
}
