//! Command-line command handlers for nightlight.
//!
//! One-shot CLI commands that run instead of the interactive session. Each
//! command lives in its own submodule.

pub mod brightness;
pub mod help;
