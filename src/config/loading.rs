//! Configuration loading functionality.
//!
//! Handles locating the configuration file, creating the default file on
//! first run, parsing, validation and defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::validation::validate_config;
use super::{Backend, Config};
use crate::common::constants::*;
use crate::common::utils::private_path;
use crate::i18n::LanguageSetting;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Get the configuration file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        create_default_config(&config_path)
            .context("Failed to create default config during load")?;
        log_block_start!(
            "Created default configuration at {}",
            private_path(&config_path)
        );
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// Unlike `load`, this never creates the file.
pub fn load_from_path(path: &PathBuf) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    validate_config(&config)?;

    apply_defaults(&mut config);

    Ok(config)
}

/// Apply default values to configuration fields.
fn apply_defaults(config: &mut Config) {
    if config.backend.is_none() {
        config.backend = Some(Backend::Auto);
    }
    if config.language.is_none() {
        config.language = Some(LanguageSetting::Auto);
    }
    if config.inhibit_idle.is_none() {
        config.inhibit_idle = Some(DEFAULT_INHIBIT_IDLE);
    }
}

/// Write the commented default configuration file.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = format!(
        "#[Screen brightness]\n\
         backend = \"auto\"        # \"auto\", \"backlight\" or \"none\"\n\
         # device = \"intel_backlight\" # Backlight device under {BACKLIGHT_SYSFS_ROOT}\n\
         \n\
         #[Session]\n\
         language = \"auto\"       # \"auto\", \"en\" or \"zh\"\n\
         inhibit_idle = {DEFAULT_INHIBIT_IDLE}     # Keep the screensaver off while the light is shown\n"
    );

    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))
}
