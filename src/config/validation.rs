//! Configuration validation functionality.

use anyhow::Result;

use super::{Backend, Config};

/// Reject settings that cannot describe a real host.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(device) = &config.device {
        if device.trim().is_empty() {
            anyhow::bail!("device must not be empty (remove the line to auto-detect)");
        }
        if device.contains('/') || device == "." || device == ".." {
            anyhow::bail!(
                "device ({device}) must be a device name such as \"intel_backlight\", not a path"
            );
        }
        if config.backend == Some(Backend::Disabled) {
            anyhow::bail!("device ({device}) is set but backend is \"none\"");
        }
    }

    Ok(())
}
