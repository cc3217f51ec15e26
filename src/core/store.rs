//! Record store - CRUD over one JSON-backed collection
//!
//! Every mutation follows the same cycle: change the in-memory list,
//! rewrite the whole file, and roll the in-memory list back if the write
//! fails. The file itself is overwritten in place, so a write that fails
//! half-way can leave it out of step with memory.

use miette::Diagnostic;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::fields::FieldSet;
use crate::core::identity::{RecordId, RecordKind};
use crate::core::loader;
use crate::core::record::Record;

/// Errors raised by record store operations
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("missing required {kind} fields: {}", .missing.join(", "))]
    #[diagnostic(
        code(wrec::store::validation),
        help("fill in every required field and submit again")
    )]
    Validation {
        kind: RecordKind,
        missing: Vec<String>,
    },

    #[error("no {kind} record with ID '{id}'")]
    #[diagnostic(
        code(wrec::store::not_found),
        help("list the collection to see current IDs")
    )]
    NotFound { kind: RecordKind, id: RecordId },

    #[error("cannot access {}: {source}", .path.display())]
    #[diagnostic(code(wrec::store::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    #[diagnostic(
        code(wrec::store::malformed),
        help("the file was left untouched; fix or remove it and retry")
    )]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must hold a JSON array of records, found {found}", .path.display())]
    #[diagnostic(code(wrec::store::shape))]
    Shape { path: PathBuf, found: &'static str },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, source: serde_json::Error) -> Self {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for file access and file format failures
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StoreError::Io { .. } | StoreError::Malformed { .. } | StoreError::Shape { .. }
        )
    }
}

/// A collection of records of one kind, backed by one JSON file
#[derive(Debug)]
pub struct RecordStore<R: Record> {
    path: PathBuf,
    records: Vec<R>,
}

impl<R: Record> RecordStore<R> {
    /// Open the collection at `path`, loading it if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = loader::read_collection(&path)?;
        tracing::debug!(kind = %R::KIND, path = %path.display(), records = records.len(), "collection loaded");
        Ok(Self { path, records })
    }

    /// Wrap already loaded records
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<R>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    /// Re-read the backing file, replacing the in-memory collection
    pub fn load_all(&mut self) -> Result<&[R], StoreError> {
        self.records = loader::read_collection(&self.path)?;
        Ok(&self.records)
    }

    /// Overwrite the backing file with the in-memory collection
    pub fn save_all(&self) -> Result<(), StoreError> {
        loader::write_collection(&self.path, &self.records)
    }

    /// Validate `fields`, assign a fresh ID, append and persist
    pub fn create(&mut self, fields: &FieldSet) -> Result<R, StoreError> {
        self.validate(fields)?;

        let id = {
            let taken: HashSet<&RecordId> = self.records.iter().map(|r| r.id()).collect();
            RecordId::generate_unique(&taken)
        };
        let record = R::from_fields(id, fields);

        self.records.push(record.clone());
        if let Err(e) = self.save_all() {
            self.records.pop();
            return Err(e);
        }

        tracing::info!(kind = %R::KIND, id = %record.id(), "record created");
        Ok(record)
    }

    /// Merge `fields` into the first record with `id` and persist
    pub fn update(&mut self, id: &RecordId, fields: &FieldSet) -> Result<R, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound {
                kind: R::KIND,
                id: id.clone(),
            })?;

        let mut merged = self.records[index].to_fields();
        merged.merge(fields);
        merged.remove("ID");
        self.validate(&merged)?;

        let updated = R::from_fields(id.clone(), &merged);
        let previous = std::mem::replace(&mut self.records[index], updated.clone());
        if let Err(e) = self.save_all() {
            self.records[index] = previous;
            return Err(e);
        }

        tracing::info!(kind = %R::KIND, id = %id, "record updated");
        Ok(updated)
    }

    /// Remove every record with `id` and persist
    ///
    /// Returns the number of records removed. Removing nothing is not an
    /// error and does not touch the file.
    pub fn delete(&mut self, id: &RecordId) -> Result<usize, StoreError> {
        let before = self.records.clone();
        self.records.retain(|r| r.id() != id);
        let removed = before.len() - self.records.len();

        if removed == 0 {
            tracing::debug!(kind = %R::KIND, id = %id, "delete matched no records");
            return Ok(0);
        }

        if let Err(e) = self.save_all() {
            self.records = before;
            return Err(e);
        }

        tracing::info!(kind = %R::KIND, id = %id, removed, "record deleted");
        Ok(removed)
    }

    /// First record with `id`
    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Replace the collection and its backing file
    pub fn rebind(&mut self, path: impl Into<PathBuf>, records: Vec<R>) {
        self.path = path.into();
        self.records = records;
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn validate(&self, fields: &FieldSet) -> Result<(), StoreError> {
        let missing = fields.missing_required(R::SCHEMA);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation {
                kind: R::KIND,
                missing,
            })
        }
    }
}
