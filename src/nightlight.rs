//! Application coordinator that manages the complete lifecycle of a session.
//!
//! This module handles resource acquisition and hands off to `Core`:
//! - Configuration loading
//! - Screen brightness bridge creation
//! - Signal handler setup
//! - Terminal setup with RAII guards
//!
//! ```no_run
//! use nightlight::Nightlight;
//! use nightlight::state::TimerRequest;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Plain session
//! Nightlight::new(false).run()?;
//!
//! // Session that switches itself off after an hour
//! Nightlight::new(false)
//!     .with_timer(Some(TimerRequest::parse("1h")?))
//!     .run()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};

use crate::{
    backend::create_bridge,
    common::utils::TerminalGuard,
    config::Config,
    core::{Core, CoreParams, LightController},
    i18n::LanguageSetting,
    io::signals::setup_signal_handler,
    state::TimerRequest,
    time::RealTimeSource,
};

/// Builder for configuring and running a night light session.
pub struct Nightlight {
    debug_enabled: bool,
    language: Option<LanguageSetting>,
    timer: Option<TimerRequest>,
}

impl Nightlight {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            language: None,
            timer: None,
        }
    }

    /// Override the configured label language.
    pub fn with_language(mut self, language: Option<LanguageSetting>) -> Self {
        self.language = language;
        self
    }

    /// Arm an auto-off timer as soon as the session starts.
    pub fn with_timer(mut self, timer: Option<TimerRequest>) -> Self {
        self.timer = timer;
        self
    }

    /// Execute the session with the configured settings.
    pub fn run(self) -> Result<()> {
        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - showing detailed host operations");
        }

        let config = Config::load().context("Configuration failed")?;

        let language = self
            .language
            .map(LanguageSetting::resolve)
            .unwrap_or_else(|| config.language());
        let labels = language.labels();

        let bridge = create_bridge(&config, self.debug_enabled);
        config.log_config(bridge.backend_name());

        let signal_state = setup_signal_handler(self.debug_enabled)?;
        let controller = LightController::new(bridge, self.debug_enabled);

        log_block_start!(
            "Starting night light ({}, screen brightness {})",
            language.as_str(),
            if controller.screen_capable() {
                "available"
            } else {
                "unavailable"
            }
        );

        // Console logging is muted from here until the terminal is restored.
        let terminal = TerminalGuard::new().context("failed to initialize terminal features")?;

        let core = Core::new(CoreParams {
            controller,
            signal_state,
            terminal,
            time_source: Box::new(RealTimeSource),
            labels,
            inhibit_idle: config.inhibit_idle(),
            initial_timer: self.timer,
            debug_enabled: self.debug_enabled,
        });

        core.execute()
    }
}
