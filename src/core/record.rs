//! Record trait - common interface for all record kinds

use serde::{de::DeserializeOwned, Serialize};

use crate::core::fields::{FieldSet, FieldSpec};
use crate::core::identity::{RecordId, RecordKind};

/// Common trait for all record kinds stored in a collection
///
/// Implementors are flat serde structs whose field order matches the
/// JSON file layout, so repeated save/load cycles produce identical bytes.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Which collection this record belongs to
    const KIND: RecordKind;

    /// Fields other than `ID`, in display order
    const SCHEMA: &'static [FieldSpec];

    /// The record's identifier
    fn id(&self) -> &RecordId;

    /// Build a record from form fields
    ///
    /// Fields are assumed to be validated already; absent fields become
    /// empty values.
    fn from_fields(id: RecordId, fields: &FieldSet) -> Self;

    /// The record's fields, keyed by their JSON names
    fn to_fields(&self) -> FieldSet;

    /// Short human label for messages (e.g. the city or facility name)
    fn title(&self) -> String;

    /// Display cells in [`Record::SCHEMA`] order, list fields flattened
    fn row(&self) -> Vec<String> {
        let fields = self.to_fields();
        Self::SCHEMA
            .iter()
            .map(|spec| fields.text(spec.name))
            .collect()
    }
}
