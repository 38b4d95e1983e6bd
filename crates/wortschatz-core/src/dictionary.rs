use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collation::Collation;
use crate::entry::Entry;
use crate::index::SortedIndex;

/// Persisted form of an entry; classification is derived again on load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub headword: String,
    pub translation: String,
}

impl From<&Entry> for StoredEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            headword: entry.headword().to_string(),
            translation: entry.translation().to_string(),
        }
    }
}

/// Load and save the entry set
pub trait DictionaryStore {
    /// Read entries, in stored order
    fn load(&self, path: &Path) -> Result<Vec<StoredEntry>, StoreError>;

    /// Write entries, in the given order
    fn save(&self, path: &Path, entries: &[StoredEntry]) -> Result<(), StoreError>;

    /// File extension without the dot
    fn extension(&self) -> &str;
}

/// Turn the sorted entries into a document
pub trait DocumentExporter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn export<C: Collation>(&self, index: &SortedIndex<C>, path: &Path)
    -> Result<(), Self::Error>;
}

/// Save every entry of `index` in sorted order
pub fn save_index<C: Collation>(
    store: &impl DictionaryStore,
    index: &SortedIndex<C>,
    path: &Path,
) -> Result<(), StoreError> {
    let entries: Vec<StoredEntry> = index.iter().map(StoredEntry::from).collect();
    store.save(path, &entries)
}

/// Load into `index` one entry at a time, skipping duplicate keys
///
/// Returns the number of entries inserted.
pub fn load_into<C: Collation>(
    store: &impl DictionaryStore,
    index: &mut SortedIndex<C>,
    path: &Path,
) -> Result<usize, StoreError> {
    let stored = store.load(path)?;
    let mut inserted = 0;

    for record in stored {
        if record.headword.trim().is_empty() {
            tracing::warn!("Skipping entry with empty headword in {}", path.display());
            continue;
        }
        if index.contains(&record.headword) {
            tracing::warn!("Skipping duplicate entry '{}'", record.headword);
            continue;
        }
        let entry = index.entry(record.headword, record.translation);
        index.insert(entry);
        inserted += 1;
    }

    Ok(inserted)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::testing::TestCollation;

    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Vec<StoredEntry>>,
    }

    impl DictionaryStore for MemoryStore {
        fn load(&self, _path: &Path) -> Result<Vec<StoredEntry>, StoreError> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, _path: &Path, entries: &[StoredEntry]) -> Result<(), StoreError> {
            *self.saved.borrow_mut() = entries.to_vec();
            Ok(())
        }

        fn extension(&self) -> &str {
            "mem"
        }
    }

    fn record(headword: &str, translation: &str) -> StoredEntry {
        StoredEntry {
            headword: headword.to_string(),
            translation: translation.to_string(),
        }
    }

    #[test]
    fn test_load_reinserts_and_sorts() {
        let store = MemoryStore::default();
        store
            .save(
                Path::new("x"),
                &[record("Zebra", "zebra"), record("der Hund", "dog"), record("Apfel", "apple")],
            )
            .unwrap();

        let mut index = SortedIndex::new(TestCollation);
        let inserted = load_into(&store, &mut index, Path::new("x")).unwrap();

        assert_eq!(inserted, 3);
        let words: Vec<&str> = index.iter().map(|e| e.headword()).collect();
        assert_eq!(words, ["Apfel", "der Hund", "Zebra"]);
        assert!(index.get("der hund").unwrap().is_classified_noun());
    }

    #[test]
    fn test_load_skips_duplicates_and_blank_words() {
        let store = MemoryStore::default();
        store
            .save(
                Path::new("x"),
                &[record("Apfel", "apple"), record("APFEL", "again"), record("  ", "blank")],
            )
            .unwrap();

        let mut index = SortedIndex::new(TestCollation);
        assert_eq!(load_into(&store, &mut index, Path::new("x")).unwrap(), 1);
        assert_eq!(index[0].translation(), "apple");
    }

    #[test]
    fn test_save_index_keeps_sorted_order() {
        let mut index = SortedIndex::new(TestCollation);
        for word in ["Banane", "die Katze", "Apfel"] {
            let entry = index.entry(word, "");
            index.insert(entry);
        }

        let store = MemoryStore::default();
        save_index(&store, &index, Path::new("x")).unwrap();

        let saved: Vec<String> = store.saved.borrow().iter().map(|r| r.headword.clone()).collect();
        assert_eq!(saved, ["Apfel", "Banane", "die Katze"]);
    }
}
