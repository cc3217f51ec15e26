//! Waste inventory entry

use serde::{Deserialize, Serialize};

use crate::core::fields::{deserialize_list, deserialize_text, FieldSet, FieldSpec};
use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;
use crate::entities::catalog::WASTE_CATEGORIES;

/// Quantity of waste recorded for a city, split by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteEntry {
    #[serde(rename = "ID")]
    pub id: RecordId,

    /// City, town or barangay
    #[serde(rename = "City", default, deserialize_with = "deserialize_text")]
    pub city: String,

    #[serde(rename = "Category", default, deserialize_with = "deserialize_list")]
    pub category: Vec<String>,

    /// Free-form quantity (e.g. "12" or "12 tons")
    #[serde(rename = "Quantity", default, deserialize_with = "deserialize_text")]
    pub quantity: String,

    #[serde(rename = "Notes", default, deserialize_with = "deserialize_text")]
    pub notes: String,
}

impl Record for WasteEntry {
    const KIND: RecordKind = RecordKind::Waste;

    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::scalar("City", "City/Town/Barangay"),
        FieldSpec::list("Category", "Categories").with_choices(WASTE_CATEGORIES),
        FieldSpec::scalar("Quantity", "Quantity"),
        FieldSpec::scalar("Notes", "Notes").optional(),
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: &FieldSet) -> Self {
        Self {
            id,
            city: fields.text("City"),
            category: fields.list("Category"),
            quantity: fields.text("Quantity"),
            notes: fields.text("Notes"),
        }
    }

    fn to_fields(&self) -> FieldSet {
        FieldSet::new()
            .with("City", self.city.as_str())
            .with("Category", self.category.clone())
            .with("Quantity", self.quantity.as_str())
            .with("Notes", self.notes.as_str())
    }

    fn title(&self) -> String {
        self.city.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waste_entry_field_order() {
        let entry = WasteEntry {
            id: RecordId::parse("a1b2c3d4e5").unwrap(),
            city: "Metro".to_string(),
            category: vec!["Recyclables".to_string()],
            quantity: "12".to_string(),
            notes: String::new(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"ID":"a1b2c3d4e5","City":"Metro","Category":["Recyclables"],"Quantity":"12","Notes":""}"#
        );
    }

    #[test]
    fn test_waste_entry_legacy_joined_category() {
        let entry: WasteEntry = serde_json::from_str(
            r#"{"ID": "4821", "City": "Metro", "Category": "Recyclables, Organic Waste", "Quantity": "5"}"#,
        )
        .unwrap();
        assert_eq!(entry.category, vec!["Recyclables", "Organic Waste"]);
        assert!(entry.notes.is_empty());
    }

    #[test]
    fn test_waste_entry_row_flattens_categories() {
        let fields = FieldSet::new()
            .with("City", "Metro")
            .with("Category", vec!["Recyclables", "Organic Waste"])
            .with("Quantity", "12");
        let entry = WasteEntry::from_fields(RecordId::generate(), &fields);
        assert_eq!(
            entry.row(),
            vec!["Metro", "Recyclables, Organic Waste", "12", ""]
        );
    }
}
