//! Import, export and file bindings
//!
//! Each kind reads and writes its default file under the data directory
//! unless a file has been imported for it. Importing binds the kind to the
//! imported path until it is unbound; bindings live in
//! `.wrec/bindings.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::identity::RecordKind;
use crate::core::loader;
use crate::core::project::Project;
use crate::core::record::Record;
use crate::core::store::{RecordStore, StoreError};

/// Backing file overrides per kind
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    paths: BTreeMap<RecordKind, PathBuf>,
}

impl Bindings {
    pub fn path(project: &Project) -> PathBuf {
        project.config_dir().join("bindings.json")
    }

    /// Load bindings for a project; a missing file means no bindings
    pub fn load(project: &Project) -> Result<Self, StoreError> {
        let path = Self::path(project);
        match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StoreError::malformed(&path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    pub fn save(&self, project: &Project) -> Result<(), StoreError> {
        let path = Self::path(project);
        let content = loader::to_json_string(self).map_err(|e| StoreError::malformed(&path, e))?;
        fs::write(&path, content).map_err(|e| StoreError::io(&path, e))
    }

    pub fn get(&self, kind: RecordKind) -> Option<&Path> {
        self.paths.get(&kind).map(PathBuf::as_path)
    }

    pub fn bind(&mut self, kind: RecordKind, path: impl Into<PathBuf>) {
        self.paths.insert(kind, path.into());
    }

    /// Drop the binding for `kind`, returning the path it pointed to
    pub fn unbind(&mut self, kind: RecordKind) -> Option<PathBuf> {
        self.paths.remove(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordKind, &Path)> {
        self.paths.iter().map(|(k, p)| (*k, p.as_path()))
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// The file operations on `kind` currently read and write
pub fn active_path(
    project: &Project,
    config: &Config,
    kind: RecordKind,
) -> Result<PathBuf, StoreError> {
    let bindings = Bindings::load(project)?;
    Ok(match bindings.get(kind) {
        Some(bound) => bound.to_path_buf(),
        None => project.default_collection_path(&config.data_dir(), kind),
    })
}

/// Open the active collection for `R`
pub fn open_active<R: Record>(
    project: &Project,
    config: &Config,
) -> Result<RecordStore<R>, StoreError> {
    let path = active_path(project, config, R::KIND)?;
    RecordStore::open(path)
}

/// Write the in-memory collection to `path`
///
/// The store keeps its own backing file.
pub fn export<R: Record>(store: &RecordStore<R>, path: &Path) -> Result<usize, StoreError> {
    loader::write_collection(path, store.records())?;
    tracing::info!(kind = %R::KIND, path = %path.display(), records = store.len(), "collection exported");
    Ok(store.len())
}

/// Replace the store's collection with the records in `path`
///
/// The file must exist and is read with the same legacy adapter as the
/// default files. On success `path` becomes the store's backing file; on
/// failure the store is left as it was.
pub fn import<R: Record>(store: &mut RecordStore<R>, path: &Path) -> Result<usize, StoreError> {
    let records = loader::read_existing_collection::<R>(path)?;
    let count = records.len();
    store.rebind(path, records);
    tracing::info!(kind = %R::KIND, path = %path.display(), records = count, "collection imported");
    Ok(count)
}

/// Import `path` and bind it as the backing file for `R` in this project
pub fn import_and_bind<R: Record>(
    project: &Project,
    store: &mut RecordStore<R>,
    path: &Path,
) -> Result<usize, StoreError> {
    let path = path.canonicalize().map_err(|e| StoreError::io(path, e))?;
    let count = import(store, &path)?;

    let mut bindings = Bindings::load(project)?;
    bindings.bind(R::KIND, path);
    bindings.save(project)?;
    Ok(count)
}

/// Revert `kind` to its default file, returning the previous binding
pub fn unbind(project: &Project, kind: RecordKind) -> Result<Option<PathBuf>, StoreError> {
    let mut bindings = Bindings::load(project)?;
    let previous = bindings.unbind(kind);
    if previous.is_some() {
        bindings.save(project)?;
    }
    Ok(previous)
}
