//! Waste Records: a toolkit for municipal waste data kept in JSON files
//!
//! Four record kinds (waste inventory, collection/transportation
//! protocols, facilities, and taxonomy entries) share one
//! [`core::RecordStore`] that loads a whole collection file, applies a
//! create/update/delete, and rewrites the file.

pub mod cli;
pub mod core;
pub mod entities;
