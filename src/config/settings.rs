use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "Sharecloudly";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "sharecloudly", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the application configuration from `path`, or from the platform
/// config file when `path` is `None`.
///
/// A missing file is created with defaults. A file that cannot be parsed is
/// migrated field by field; if that fails too, defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = resolve_path(path)?;

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, Some(&config_path))?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Trying to migrate it.",
                config_path,
                e
            );
            Ok(migrate_legacy_config(&config_content).unwrap_or_else(|e| {
                tracing::warn!("Migration failed: {}. Falling back to default config.", e);
                AppConfig::default()
            }))
        }
    }
}

/// Fills fields that are missing or `null` in an older config with defaults.
fn migrate_legacy_config(config_content: &str) -> Result<AppConfig> {
    let mut value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let defaults = serde_json::to_value(AppConfig::default())?;
    if let Value::Object(default_fields) = defaults {
        for (key, default_val) in default_fields {
            let missing = !obj.contains_key(&key);
            let null_required = obj.get(&key) == Some(&Value::Null) && !is_optional_field(&key);
            if missing || null_required {
                obj.insert(key, default_val);
            }
        }
    }

    let migrated_config: AppConfig = serde_json::from_value(value)?;
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Fields where an explicit `null` is a valid user choice.
fn is_optional_field(key: &str) -> bool {
    key == "download_directory"
}

/// Saves the provided configuration to `path`, or to the platform config file.
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(path)?;

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.sharecloudly.Sharecloudly/
// Linux:   ~/.config/sharecloudly/
// Windows: %APPDATA%/sharecloudly/Sharecloudly/config/
