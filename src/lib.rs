//! # Nightlight Library
//!
//! Internal library for the nightlight binary application
//!
//! This library exists to enable testing of the session internals and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Entry Point**: `Nightlight` struct provides the session API with resource management
//! - **Core Logic**: `core` module contains the event loop, the ticker and the `LightController`
//! - **State**: `state` module holds the light model (palette, style, brightness, auto-off timer)
//! - **Presentation**: `ui` module for layout, rendering, input mapping and dialogs
//! - **Backends**: `backend` module with the sysfs backlight bridge for screen brightness
//! - **Configuration**: `config` module for TOML-based settings
//! - **Commands**: `commands` module for CLI subcommands (brightness, help)
//! - **Infrastructure**: Signal handling, idle inhibition over D-Bus, terminal input, logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

// Public API modules
pub mod args;
pub mod backend;
pub mod commands;
pub mod config;
pub mod core;
pub mod i18n;
pub mod io;
pub mod state;
pub mod time;
pub mod ui;

// Internal modules
mod nightlight;

// Re-export for binary
pub use nightlight::Nightlight;
