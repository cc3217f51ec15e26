//! Core module - record store, identifiers, and project plumbing

pub mod config;
pub mod fields;
pub mod form;
pub mod identity;
pub mod loader;
pub mod logging;
pub mod project;
pub mod record;
pub mod shortid;
pub mod store;
pub mod transfer;

pub use config::Config;
pub use fields::{flatten, unflatten, FieldKind, FieldSet, FieldSpec, FieldValue};
pub use form::{FormMode, FormPhase, FormState};
pub use identity::{IdParseError, RecordId, RecordKind};
pub use project::{Project, ProjectError};
pub use record::Record;
pub use shortid::ShortIdIndex;
pub use store::{RecordStore, StoreError};
pub use transfer::Bindings;
