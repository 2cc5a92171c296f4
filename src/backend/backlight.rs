//! Linux sysfs backlight bridge.
//!
//! A device directory such as `/sys/class/backlight/intel_backlight` exposes
//! `max_brightness` (read-only) and `brightness` (writable by users granted
//! access through udev rules or the `video` group). Values are raw integers in
//! `0..=max_brightness`.

use anyhow::{Context, Result, bail};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use super::ScreenBrightnessBridge;

pub struct BacklightBridge {
    device: PathBuf,
    max_brightness: u32,
    /// Raw value found at capability check, restored by `reset`.
    original: Option<u32>,
    capable: bool,
    write_failed: bool,
}

impl BacklightBridge {
    pub fn new(device: PathBuf) -> Self {
        Self {
            device,
            max_brightness: 0,
            original: None,
            capable: false,
            write_failed: false,
        }
    }

    /// Map a `[0, 1]` value to a raw level; never below 1 so the panel stays lit.
    pub fn raw_level(value: f32, max_brightness: u32) -> u32 {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let raw = (value * max_brightness as f32).round() as u32;
        raw.clamp(1, max_brightness.max(1))
    }

    fn read_levels(&self) -> Result<(u32, u32)> {
        let max = read_u32(&self.device.join("max_brightness"))?;
        if max == 0 {
            bail!("max_brightness is 0");
        }
        let brightness_path = self.device.join("brightness");
        let current = read_u32(&brightness_path)?;
        OpenOptions::new()
            .write(true)
            .open(&brightness_path)
            .with_context(|| format!("{} is not writable", brightness_path.display()))?;
        Ok((max, current))
    }

    fn write_raw(&mut self, raw: u32) {
        let path = self.device.join("brightness");
        match fs::write(&path, raw.to_string()) {
            Ok(()) => self.write_failed = false,
            Err(e) => {
                // One warning per failure streak.
                if !self.write_failed {
                    log_pipe!();
                    log_warning!("Failed to set backlight brightness: {e}");
                }
                self.write_failed = true;
            }
        }
    }
}

impl ScreenBrightnessBridge for BacklightBridge {
    fn check_capability(&mut self) -> bool {
        match self.read_levels() {
            Ok((max, current)) => {
                self.max_brightness = max;
                self.original = Some(current);
                self.capable = true;
            }
            Err(e) => {
                log_pipe!();
                log_warning!("Screen brightness control unavailable: {e:#}");
                self.capable = false;
            }
        }
        self.capable
    }

    fn apply(&mut self, value: f32) {
        if !self.capable {
            return;
        }
        let raw = Self::raw_level(value, self.max_brightness);
        self.write_raw(raw);
    }

    fn reset(&mut self) {
        if !self.capable {
            return;
        }
        if let Some(original) = self.original {
            self.write_raw(original);
        }
    }

    fn backend_name(&self) -> &'static str {
        "Backlight"
    }
}

fn read_u32(path: &Path) -> Result<u32> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    content
        .trim()
        .parse()
        .with_context(|| format!("Unexpected content in {}", path.display()))
}
