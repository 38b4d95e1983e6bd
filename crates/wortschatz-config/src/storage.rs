use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_open_automatically() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Where the dictionary was last saved or opened from
    #[serde(default)]
    pub last_save_path: Option<PathBuf>,
    /// Reopen `last_save_path` on start
    #[serde(default = "default_open_automatically")]
    pub open_automatically: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            last_save_path: None,
            open_automatically: default_open_automatically(),
        }
    }
}
