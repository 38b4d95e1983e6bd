use std::env;

use serde::{Deserialize, Serialize};

use self::autosave::AutosaveConfig;
use self::storage::StorageConfig;
use self::ui::{UiConfig, UiLanguage};

pub mod autosave;
pub mod storage;
pub mod ui;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub autosave: AutosaveConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Override fields from `WORTSCHATZ_*` environment variables
    pub fn apply_env(&mut self) {
        if let Some(language) = env::var("WORTSCHATZ_LANGUAGE")
            .ok()
            .and_then(|v| UiLanguage::from_str(&v))
        {
            self.ui.language = language;
        }

        if let Some(secs) = env::var("WORTSCHATZ_AUTOSAVE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.autosave.interval_secs = secs;
        }
    }
}
