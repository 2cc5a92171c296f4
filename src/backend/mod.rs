//! Screen brightness bridge: best-effort coupling to the host display.
//!
//! The session only ever talks to a `ScreenBrightnessBridge`. Every call is
//! fire-and-forget; implementations log failures instead of returning them,
//! because screen brightness is a cosmetic extra the light must work without.
//!
//! ## Backends
//!
//! - **Backlight**: Linux sysfs (`/sys/class/backlight/<device>`)
//! - **None**: no host control; every call is a no-op
//!
//! Auto-detection priority: configured/first backlight device → none.

use std::path::{Path, PathBuf};

use crate::common::constants::BACKLIGHT_SYSFS_ROOT;
use crate::config::{Backend, Config};

pub mod backlight;

pub use backlight::BacklightBridge;

/// Host display brightness control.
#[cfg_attr(test, mockall::automock)]
pub trait ScreenBrightnessBridge {
    /// Determine whether this host lets us adjust the display.
    ///
    /// Called once at session start; the result gates every later `apply`.
    fn check_capability(&mut self) -> bool;

    /// Forward a desired brightness in `[0, 1]` to the host.
    fn apply(&mut self, value: f32);

    /// Restore the host display to its state before the session, if any.
    fn reset(&mut self);

    /// Human-readable backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Bridge for hosts without adjustable brightness.
#[derive(Debug, Default)]
pub struct NullBridge;

impl ScreenBrightnessBridge for NullBridge {
    fn check_capability(&mut self) -> bool {
        false
    }

    fn apply(&mut self, _value: f32) {}

    fn reset(&mut self) {}

    fn backend_name(&self) -> &'static str {
        "None"
    }
}

/// Build the bridge selected by the configuration.
///
/// Never fails: a missing or unusable backlight degrades to `NullBridge`.
pub fn create_bridge(config: &Config, debug_enabled: bool) -> Box<dyn ScreenBrightnessBridge> {
    create_bridge_in(config, Path::new(BACKLIGHT_SYSFS_ROOT), debug_enabled)
}

/// `create_bridge` with an explicit sysfs root.
pub fn create_bridge_in(
    config: &Config,
    sysfs_root: &Path,
    debug_enabled: bool,
) -> Box<dyn ScreenBrightnessBridge> {
    let backend = config.backend.unwrap_or(Backend::Auto);

    if backend == Backend::Disabled {
        return Box::new(NullBridge);
    }

    match find_backlight_device(sysfs_root, config.device.as_deref()) {
        Some(device) => {
            if debug_enabled {
                log_pipe!();
                log_debug!("Using backlight device {}", device.display());
            }
            Box::new(BacklightBridge::new(device))
        }
        None => {
            if backend == Backend::Backlight {
                log_pipe!();
                log_warning!(
                    "Configuration specifies backend=\"backlight\" but no device was found in {}",
                    sysfs_root.display()
                );
                log_indented!("Screen brightness control will be unavailable");
            } else if debug_enabled {
                log_pipe!();
                log_debug!("No backlight device found, screen brightness disabled");
            }
            Box::new(NullBridge)
        }
    }
}

/// Locate a backlight device directory.
///
/// With a `name`, only that device is accepted. Otherwise the first entry in
/// name order wins, so the choice is stable across runs.
pub fn find_backlight_device(sysfs_root: &Path, name: Option<&str>) -> Option<PathBuf> {
    if let Some(name) = name {
        let path = sysfs_root.join(name);
        return path.join("brightness").exists().then_some(path);
    }

    let mut devices: Vec<PathBuf> = std::fs::read_dir(sysfs_root)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.join("brightness").exists())
        .collect();
    devices.sort();
    devices.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fake_device(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("brightness"), "50\n").unwrap();
        fs::write(dir.join("max_brightness"), "100\n").unwrap();
    }

    #[test]
    fn test_null_bridge_is_incapable() {
        let mut bridge = NullBridge;
        assert!(!bridge.check_capability());
        bridge.apply(0.7);
        bridge.reset();
        assert_eq!(bridge.backend_name(), "None");
    }

    #[test]
    fn test_find_first_device_in_name_order() {
        let root = tempdir().unwrap();
        fake_device(root.path(), "intel_backlight");
        fake_device(root.path(), "acpi_video0");
        fs::create_dir_all(root.path().join("empty")).unwrap();

        let found = find_backlight_device(root.path(), None).unwrap();
        assert_eq!(found, root.path().join("acpi_video0"));
    }

    #[test]
    fn test_find_named_device() {
        let root = tempdir().unwrap();
        fake_device(root.path(), "intel_backlight");

        assert_eq!(
            find_backlight_device(root.path(), Some("intel_backlight")),
            Some(root.path().join("intel_backlight"))
        );
        assert_eq!(find_backlight_device(root.path(), Some("missing")), None);
    }

    #[test]
    fn test_missing_root_finds_nothing() {
        let root = tempdir().unwrap();
        assert_eq!(find_backlight_device(&root.path().join("nope"), None), None);
    }

    #[test]
    fn test_create_bridge_honours_none_backend() {
        let root = tempdir().unwrap();
        fake_device(root.path(), "intel_backlight");
        let config = Config {
            backend: Some(Backend::Disabled),
            ..Config::default()
        };
        let bridge = create_bridge_in(&config, root.path(), false);
        assert_eq!(bridge.backend_name(), "None");
    }

    #[test]
    fn test_create_bridge_auto_picks_backlight() {
        let root = tempdir().unwrap();
        fake_device(root.path(), "intel_backlight");
        let bridge = create_bridge_in(&Config::default(), root.path(), false);
        assert_eq!(bridge.backend_name(), "Backlight");
    }

    #[test]
    fn test_create_bridge_falls_back_without_device() {
        let root = tempdir().unwrap();
        let config = Config {
            backend: Some(Backend::Backlight),
            ..Config::default()
        };
        let bridge = create_bridge_in(&config, root.path(), false);
        assert_eq!(bridge.backend_name(), "None");
    }
}
