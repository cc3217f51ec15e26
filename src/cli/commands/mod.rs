//! Command implementations

pub mod catalog;
pub mod completions;
pub mod config;
pub mod facility;
pub mod init;
pub mod protocol;
pub mod records;
pub mod report;
pub mod taxonomy;
pub mod waste;
