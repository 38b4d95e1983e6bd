use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wortschatz_core::dictionary::{DictionaryStore, StoreError, StoredEntry};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct DictionaryFile {
    version: u32,
    entries: Vec<StoredEntry>,
}

/// Dictionary files as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }
}

impl DictionaryStore for JsonStore {
    fn load(&self, path: &Path) -> Result<Vec<StoredEntry>, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading dictionary from {}", path.display());
        let json = fs::read_to_string(path)?;
        let file: DictionaryFile =
            serde_json::from_str(&json).map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

        if file.version != FORMAT_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "unsupported version {}",
                file.version
            )));
        }

        tracing::info!("Loaded {} entries", file.entries.len());
        Ok(file.entries)
    }

    fn save(&self, path: &Path, entries: &[StoredEntry]) -> Result<(), StoreError> {
        let file = DictionaryFile {
            version: FORMAT_VERSION,
            entries: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

        // Write next to the target, then swap in
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;

        tracing::info!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    fn extension(&self) -> &str {
        "json"
    }
}
