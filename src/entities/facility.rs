//! Waste facility registry entry

use serde::{Deserialize, Serialize};

use crate::core::fields::{deserialize_list, deserialize_text, FieldSet, FieldSpec};
use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;
use crate::entities::catalog::{DEFAULT_FACILITY_TYPE, DISPOSAL_METHODS, FACILITY_TYPES};

/// A landfill, recycling center or other waste facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(rename = "ID")]
    pub id: RecordId,

    #[serde(rename = "FacilityName", default, deserialize_with = "deserialize_text")]
    pub name: String,

    /// Site area in square meters, as entered
    #[serde(rename = "FacilityArea", default, deserialize_with = "deserialize_text")]
    pub area: String,

    #[serde(rename = "OperatingHours", default, deserialize_with = "deserialize_text")]
    pub operating_hours: String,

    #[serde(rename = "Address", default, deserialize_with = "deserialize_text")]
    pub address: String,

    #[serde(rename = "FacilityType", default, deserialize_with = "deserialize_text")]
    pub facility_type: String,

    #[serde(rename = "DisposalMethods", default, deserialize_with = "deserialize_list")]
    pub disposal_methods: Vec<String>,
}

impl Record for Facility {
    const KIND: RecordKind = RecordKind::Facility;

    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::scalar("FacilityName", "Facility Name"),
        FieldSpec::scalar("FacilityArea", "Area (sq m)"),
        FieldSpec::scalar("OperatingHours", "Operating Hours"),
        FieldSpec::scalar("Address", "Address"),
        FieldSpec::scalar("FacilityType", "Facility Type")
            .with_choices(FACILITY_TYPES)
            .with_default(DEFAULT_FACILITY_TYPE),
        FieldSpec::list("DisposalMethods", "Disposal Methods").with_choices(DISPOSAL_METHODS),
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: &FieldSet) -> Self {
        Self {
            id,
            name: fields.text("FacilityName"),
            area: fields.text("FacilityArea"),
            operating_hours: fields.text("OperatingHours"),
            address: fields.text("Address"),
            facility_type: fields.text("FacilityType"),
            disposal_methods: fields.list("DisposalMethods"),
        }
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("FacilityName", self.name.as_str())
            .with("FacilityArea", self.area.as_str())
            .with("OperatingHours", self.operating_hours.as_str())
            .with("Address", self.address.as_str())
            .with("FacilityType", self.facility_type.as_str())
            .with("DisposalMethods", self.disposal_methods.clone())
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_json_keys() {
        let fields = FieldSet::new()
            .with("FacilityName", "North Landfill")
            .with("FacilityArea", "5000")
            .with("OperatingHours", "6am-6pm")
            .with("Address", "1 Dump Rd")
            .with("FacilityType", "Landfills")
            .with("DisposalMethods", vec!["Landfilling", "Composting"]);
        let facility = Facility::from_fields(RecordId::parse("9f86d081").unwrap(), &fields);

        let value = serde_json::to_value(&facility).unwrap();
        assert_eq!(value["FacilityName"], "North Landfill");
        assert_eq!(value["DisposalMethods"][1], "Composting");
        assert_eq!(value["ID"], "9f86d081");
    }

    #[test]
    fn test_facility_type_defaults_to_landfills() {
        let mut fields = FieldSet::new().with("FacilityName", "Transfer Point");
        fields.apply_defaults(Facility::SCHEMA);
        assert_eq!(fields.text("FacilityType"), "Landfills");

        let mut chosen = FieldSet::new().with("FacilityType", "Biogas Plants");
        chosen.apply_defaults(Facility::SCHEMA);
        assert_eq!(chosen.text("FacilityType"), "Biogas Plants");
    }
}
