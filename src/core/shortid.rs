//! Short ID system for picking rows from a listed table
//!
//! Provides numeric aliases like `@1`, `@2` that map to record IDs of one
//! collection. They are regenerated each time the collection is listed.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::core::identity::{RecordId, RecordKind};
use crate::core::project::Project;

/// A mapping of short IDs (@N) to record IDs
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    /// Maps short number to record ID string
    entries: HashMap<u32, String>,
    /// Maps record ID to short number (reverse lookup)
    #[serde(skip)]
    reverse: HashMap<String, u32>,
    /// Next available short ID
    next_id: u32,
}

impl ShortIdIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            reverse: HashMap::new(),
            next_id: 1,
        }
    }

    fn index_path(project: &Project, kind: RecordKind) -> PathBuf {
        project
            .config_dir()
            .join("shortids")
            .join(format!("{}.json", kind))
    }

    /// Load the index for a collection, or create empty if not found
    pub fn load(project: &Project, kind: RecordKind) -> Self {
        let path = Self::index_path(project, kind);
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(mut index) = serde_json::from_str::<ShortIdIndex>(&content) {
                index.reverse = index
                    .entries
                    .iter()
                    .map(|(k, v)| (v.clone(), *k))
                    .collect();
                return index;
            }
        }
        Self::new()
    }

    /// Save the index for a collection
    pub fn save(&self, project: &Project, kind: RecordKind) -> std::io::Result<()> {
        let path = Self::index_path(project, kind);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// Clear and rebuild the index with new record IDs
    pub fn rebuild<'a>(&mut self, ids: impl IntoIterator<Item = &'a RecordId>) {
        self.entries.clear();
        self.reverse.clear();
        self.next_id = 1;

        for id in ids {
            self.add(id.as_str().to_string());
        }
    }

    /// Add a record ID and return its short ID
    pub fn add(&mut self, record_id: String) -> u32 {
        if let Some(&short_id) = self.reverse.get(&record_id) {
            return short_id;
        }

        let short_id = self.next_id;
        self.next_id += 1;
        self.entries.insert(short_id, record_id.clone());
        self.reverse.insert(record_id, short_id);
        short_id
    }

    /// Resolve a reference to a record ID
    ///
    /// Accepts `@N` (e.g. `@1`) or a record ID, which is passed through.
    /// Bare numbers are passed through too, since legacy record IDs are
    /// four-digit numbers.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        match reference.strip_prefix('@') {
            Some(num_str) => num_str
                .parse::<u32>()
                .ok()
                .and_then(|n| self.entries.get(&n).cloned()),
            None => Some(reference.to_string()),
        }
    }

    /// Get the `@N` label for a record ID
    pub fn get_short_id(&self, record_id: &str) -> Option<String> {
        self.reverse.get(record_id).map(|n| format!("@{}", n))
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_short_id_add_and_resolve() {
        let mut index = ShortIdIndex::new();

        let short1 = index.add("a1b2c3d4e5".to_string());
        let short2 = index.add("4821".to_string());

        assert_eq!(short1, 1);
        assert_eq!(short2, 2);

        assert_eq!(index.resolve("@1"), Some("a1b2c3d4e5".to_string()));
        assert_eq!(index.resolve("@2"), Some("4821".to_string()));
        assert_eq!(index.resolve("@99"), None);
    }

    #[test]
    fn test_short_id_passthrough() {
        let index = ShortIdIndex::new();

        // Legacy numeric IDs must not be read as short IDs
        assert_eq!(index.resolve("1"), Some("1".to_string()));
        assert_eq!(index.resolve("9f86d081"), Some("9f86d081".to_string()));
    }

    #[test]
    fn test_short_id_rebuild() {
        let mut index = ShortIdIndex::new();
        index.add("old-1".to_string());
        index.add("old-2".to_string());
        assert_eq!(index.len(), 2);

        let ids: Vec<RecordId> = ["n1", "n2", "n3"]
            .iter()
            .map(|s| RecordId::parse(s).unwrap())
            .collect();
        index.rebuild(&ids);

        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("@1"), Some("n1".to_string()));
        assert_eq!(index.resolve("@3"), Some("n3".to_string()));
        assert_eq!(index.get_short_id("n2"), Some("@2".to_string()));
    }

    #[test]
    fn test_short_id_no_duplicates() {
        let mut index = ShortIdIndex::new();

        let short1 = index.add("4821".to_string());
        let short2 = index.add("4821".to_string());

        assert_eq!(short1, short2);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_short_ids_are_per_collection() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let mut index = ShortIdIndex::new();
        index.add("4821".to_string());
        index.save(&project, RecordKind::Waste).unwrap();

        assert_eq!(
            ShortIdIndex::load(&project, RecordKind::Waste).resolve("@1"),
            Some("4821".to_string())
        );
        assert!(ShortIdIndex::load(&project, RecordKind::Facility).is_empty());
    }
}
