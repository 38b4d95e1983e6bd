use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use wortschatz_config::Config;

use crate::settings;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub settings_path: PathBuf,
}

impl AppState {
    pub fn new(config: Config, settings_path: PathBuf) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            settings_path,
        }
    }

    /// Change the config and write it to the settings file
    pub async fn update_config(&self, update: impl FnOnce(&mut Config)) {
        let mut config = self.config.write().await;
        update(&mut config);

        if let Err(e) = settings::save_settings(&self.settings_path, &config) {
            tracing::error!("Failed to write settings: {:#}", e);
        }
    }
}
