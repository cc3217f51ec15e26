//! Catalogs of selectable values for the multi-select pickers

use std::fmt;

pub const WASTE_CATEGORIES: &[&str] = &[
    "Municipal Solid Waste",
    "Recyclables",
    "Organic Waste",
    "Hazardous Waste",
    "Construction and Demolition Waste",
    "Biomedical Waste",
    "Electronic Waste",
    "Agricultural Waste",
    "Radioactive Waste",
    "Textile Waste",
    "Plastic Waste",
    "Rubber Waste",
    "Glass Waste",
    "Wood Waste",
    "Metal Waste",
    "Paper and Cardboard Waste",
    "Non-Recyclable Plastics",
];

pub const COLLECTION_METHODS: &[&str] = &[
    "Curbside Pickup",
    "Container-based Collection",
    "Drop-off Centers",
    "Roll-off Containers",
    "Compactor Trucks",
    "Manual Sorting Stations",
    "Automated Sorting Systems",
    "Source Separation",
    "Specialized Collection",
    "Mobile Collection Units",
];

pub const TRANSPORTATION_MODES: &[&str] = &[
    "Garbage Trucks",
    "Recycling Trucks",
    "Roll-off Trucks",
    "Front-Loaders",
    "Rear-Loaders",
    "Side-Loaders",
    "Transfer Trucks",
    "Rail Transport",
    "Barge or Ship Transport",
    "Pipeline Transport",
    "Cycling and Pedestrian Transport",
];

pub const FACILITY_TYPES: &[&str] = &[
    "Landfills",
    "Recycling Centers",
    "Waste-To-Energy Plants",
    "Composting Facilities",
    "Transfer Stations",
    "Hazardous Waste Treatment Centers",
    "Material Recovery Facilities",
    "Incineration Plants",
    "Biogas Plants",
    "C&D Waste Recycling Centers",
    "E-Waste Recycling Facilities",
    "Drop-off Centers",
];

/// Facility type preselected in new facility forms
pub const DEFAULT_FACILITY_TYPE: &str = "Landfills";

pub const DISPOSAL_METHODS: &[&str] = &[
    "Landfilling",
    "Recycling",
    "Incineration",
    "Composting",
    "Waste-to-Energy",
    "Anaerobic Digestion",
    "Hazardous Waste Treatment",
    "Pyrolysis",
    "Shredding and Grinding",
    "Land Application",
    "Reuse/Repurposing",
    "Deep Well Injection",
    "Ocean Dumping",
];

/// Named catalogs, for listing from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Catalog {
    Categories,
    Methods,
    Transportation,
    FacilityTypes,
    DisposalMethods,
}

impl Catalog {
    pub fn entries(&self) -> &'static [&'static str] {
        match self {
            Catalog::Categories => WASTE_CATEGORIES,
            Catalog::Methods => COLLECTION_METHODS,
            Catalog::Transportation => TRANSPORTATION_MODES,
            Catalog::FacilityTypes => FACILITY_TYPES,
            Catalog::DisposalMethods => DISPOSAL_METHODS,
        }
    }

    pub fn all() -> &'static [Catalog] {
        &[
            Catalog::Categories,
            Catalog::Methods,
            Catalog::Transportation,
            Catalog::FacilityTypes,
            Catalog::DisposalMethods,
        ]
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Catalog::Categories => "categories",
            Catalog::Methods => "methods",
            Catalog::Transportation => "transportation",
            Catalog::FacilityTypes => "facility-types",
            Catalog::DisposalMethods => "disposal-methods",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::DELIMITER;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(WASTE_CATEGORIES.len(), 17);
        assert_eq!(COLLECTION_METHODS.len(), 10);
        assert_eq!(TRANSPORTATION_MODES.len(), 11);
        assert_eq!(FACILITY_TYPES.len(), 12);
        assert_eq!(DISPOSAL_METHODS.len(), 13);
    }

    #[test]
    fn test_catalog_entries_survive_flattening() {
        for catalog in Catalog::all() {
            for entry in catalog.entries() {
                assert!(!entry.contains(DELIMITER), "{entry} contains the delimiter");
            }
        }
    }

    #[test]
    fn test_default_facility_type_is_listed() {
        assert!(Catalog::FacilityTypes.entries().contains(&DEFAULT_FACILITY_TYPE));
    }
}
