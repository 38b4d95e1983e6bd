use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_interval_secs() -> u64 {
    0
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Seconds between automatic saves, 0 disables autosave
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl AutosaveConfig {
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_secs > 0).then(|| Duration::from_secs(self.interval_secs))
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}
