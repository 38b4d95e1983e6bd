use std::fs;
use std::path::Path;

use wortschatz_config::Config;

/// Load settings, falling back to defaults when the file is missing or broken
pub fn load_settings(path: &Path) -> Config {
    let mut config = match read_settings(path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::info!("{} not found, starting with default settings", path.display());
            Config::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable settings {}: {:#}", path.display(), e);
            Config::default()
        }
    };

    config.apply_env();
    config
}

fn read_settings(path: &Path) -> anyhow::Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    let config = serde_json::from_str(&data)?;
    Ok(Some(config))
}

pub fn save_settings(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    tracing::debug!("Settings written to {}", path.display());
    Ok(())
}
