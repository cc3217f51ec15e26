//! Form state for creating and editing records
//!
//! A form moves through `Empty -> Filled -> Empty` when creating, and
//! `Empty -> SelectedForEdit -> Filled -> Empty` when editing a record
//! picked from a table. The form never touches files; [`FormState::submit`]
//! hands the pending fields to a [`RecordStore`].

use std::marker::PhantomData;

use crate::core::fields::FieldSet;
use crate::core::identity::RecordId;
use crate::core::record::Record;
use crate::core::store::{RecordStore, StoreError};

/// Whether submitting creates a new record or updates the selected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Empty,
    SelectedForEdit,
    Filled,
}

#[derive(Debug, Clone)]
pub struct FormState<R: Record> {
    mode: FormMode,
    phase: FormPhase,
    selected_id: Option<RecordId>,
    fields: FieldSet,
    _kind: PhantomData<R>,
}

impl<R: Record> Default for FormState<R> {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Empty,
            selected_id: None,
            fields: FieldSet::new(),
            _kind: PhantomData,
        }
    }
}

impl<R: Record> FormState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a record picked from the table into the form
    pub fn select(&mut self, record: &R) {
        self.mode = FormMode::Edit;
        self.phase = FormPhase::SelectedForEdit;
        self.selected_id = Some(record.id().clone());
        self.fields = record.to_fields();
    }

    /// Enter values, overlaying whatever the form already holds
    pub fn fill(&mut self, fields: &FieldSet) {
        self.fields.merge(fields);
        self.phase = FormPhase::Filled;
    }

    /// Submit the form to `store`
    ///
    /// Creates a record in create mode and updates the selected record in
    /// edit mode. On success the form resets; on error it keeps its values
    /// so they can be corrected.
    pub fn submit(&mut self, store: &mut RecordStore<R>) -> Result<R, StoreError> {
        let record = match (&self.mode, &self.selected_id) {
            (FormMode::Edit, Some(id)) => store.update(id, &self.fields)?,
            _ => store.create(&self.fields)?,
        };
        self.clear();
        Ok(record)
    }

    /// Discard pending values and any selection
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn selected_id(&self) -> Option<&RecordId> {
        self.selected_id.as_ref()
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WasteEntry;
    use tempfile::tempdir;

    fn filled() -> FieldSet {
        FieldSet::new()
            .with("City", "Metro")
            .with("Category", vec!["Recyclables"])
            .with("Quantity", "12")
    }

    #[test]
    fn test_create_cycle() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::<WasteEntry>::open(dir.path().join("w.json")).unwrap();
        let mut form = FormState::<WasteEntry>::new();
        assert_eq!(form.phase(), FormPhase::Empty);

        form.fill(&filled());
        assert_eq!(form.phase(), FormPhase::Filled);
        assert_eq!(form.mode(), FormMode::Create);

        let created = form.submit(&mut store).unwrap();
        assert_eq!(created.city, "Metro");
        assert_eq!(form.phase(), FormPhase::Empty);
        assert!(form.fields().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_edit_cycle_updates_selected_record() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::<WasteEntry>::open(dir.path().join("w.json")).unwrap();
        let created = store.create(&filled()).unwrap();

        let mut form = FormState::<WasteEntry>::new();
        form.select(&created);
        assert_eq!(form.phase(), FormPhase::SelectedForEdit);
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.selected_id(), Some(&created.id));
        assert_eq!(form.fields().text("Category"), "Recyclables");

        form.fill(&FieldSet::new().with("Quantity", "30"));
        let updated = form.submit(&mut store).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.quantity, "30");
        assert_eq!(store.len(), 1);
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.selected_id().is_none());
    }

    #[test]
    fn test_failed_submit_keeps_values() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::<WasteEntry>::open(dir.path().join("w.json")).unwrap();
        let mut form = FormState::<WasteEntry>::new();
        form.fill(&FieldSet::new().with("City", "Metro"));

        let err = form.submit(&mut store).unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(form.phase(), FormPhase::Filled);
        assert_eq!(form.fields().text("City"), "Metro");
        assert!(store.is_empty());
    }
}
