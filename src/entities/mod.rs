//! Record kind definitions
//!
//! - [`WasteEntry`] - Waste inventory per city and category
//! - [`Protocol`] - Collection and transportation protocols
//! - [`Facility`] - Waste facility registry
//! - [`TaxonomyEntry`] - Category/method taxonomy entries
//!
//! [`catalog`] holds the values offered by each multi-select picker.

pub mod catalog;
pub mod facility;
pub mod protocol;
pub mod taxonomy;
pub mod waste;

pub use catalog::Catalog;
pub use facility::Facility;
pub use protocol::Protocol;
pub use taxonomy::TaxonomyEntry;
pub use waste::WasteEntry;
