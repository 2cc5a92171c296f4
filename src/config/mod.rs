//! Configuration system for nightlight.
//!
//! The configuration only describes the *host*: which brightness backend to
//! drive, which language to label the controls in, and whether to keep the
//! screensaver away. Light state itself (on/off, brightness, color, shape,
//! timer) is never configured or persisted; every session starts from the
//! same defaults.
//!
//! ## Configuration Sources
//!
//! 1. `--config DIR` → `DIR/nightlight.toml`
//! 2. `$XDG_CONFIG_HOME/nightlight/nightlight.toml`
//!
//! A commented default file is written when none exists.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Screen brightness]
//! backend = "auto"        # "auto", "backlight" or "none"
//! device = "intel_backlight" # Optional backlight device under /sys/class/backlight
//!
//! #[Session]
//! language = "auto"       # "auto", "en" or "zh"
//! inhibit_idle = true     # Keep the screensaver off while the light is shown
//! ```

pub mod loading;
pub mod validation;


use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::common::constants::DEFAULT_INHIBIT_IDLE;
use crate::i18n::{Language, LanguageSetting};

pub use loading::{
    create_default_config, get_custom_config_dir, load, load_from_path, set_config_dir,
};

/// Backend selection for screen brightness control.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Use a backlight device if one exists, otherwise disable the feature.
    Auto,
    /// Linux sysfs backlight (`/sys/class/backlight`).
    Backlight,
    /// Never touch the display brightness.
    #[serde(rename = "none")]
    Disabled,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Auto => "auto",
            Backend::Backlight => "backlight",
            Backend::Disabled => "none",
        }
    }
}

/// Host settings loaded from `nightlight.toml`.
///
/// Every field is optional; `loading::apply_defaults` fills the gaps after
/// validation, so a loaded config always has them set.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Screen brightness backend.
    pub backend: Option<Backend>,
    /// Backlight device name (a directory under `/sys/class/backlight`).
    pub device: Option<String>,
    /// Label language.
    pub language: Option<LanguageSetting>,
    /// Inhibit the screensaver during the session.
    pub inhibit_idle: Option<bool>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or(LanguageSetting::Auto).resolve()
    }

    pub fn inhibit_idle(&self) -> bool {
        self.inhibit_idle.unwrap_or(DEFAULT_INHIBIT_IDLE)
    }

    /// Print the effective settings as a log block.
    pub fn log_config(&self, bridge_name: &str) {
        log_block_start!("Loaded configuration");
        log_indented!(
            "Backend: {} ({})",
            self.backend.unwrap_or(Backend::Auto).as_str(),
            bridge_name
        );
        if let Some(device) = &self.device {
            log_indented!("Device: {device}");
        }
        log_indented!(
            "Language: {}",
            self.language.unwrap_or(LanguageSetting::Auto).as_str()
        );
        log_indented!("Inhibit idle: {}", self.inhibit_idle());
    }
}
