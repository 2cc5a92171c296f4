//! Application-wide constants: value ranges, session defaults and host paths.

use std::time::Duration;

// # Light value ranges

/// Lower bound for the light's brightness; an "on" light never fades to invisible.
pub const MINIMUM_BRIGHTNESS: f32 = 0.1;
pub const MAXIMUM_BRIGHTNESS: f32 = 1.0;

pub const MINIMUM_SCREEN_BRIGHTNESS: f32 = 0.0;
pub const MAXIMUM_SCREEN_BRIGHTNESS: f32 = 1.0;

// # Session defaults (restored on every start)

pub const DEFAULT_IS_ON: bool = true;
pub const DEFAULT_BRIGHTNESS: f32 = 0.5;
pub const DEFAULT_COLOR_INDEX: usize = 0;
pub const DEFAULT_STYLE_INDEX: usize = 0;
pub const DEFAULT_SCREEN_BRIGHTNESS: f32 = 0.5;

/// Seed value of the user-replaceable palette slot.
pub const DEFAULT_CUSTOM_COLOR: &str = "FFD1A4";

// # Derived appearance

pub const HALO_OPACITY_ON: f32 = 0.3;
pub const GLOW_OPACITY_OFF: f32 = 0.3;
pub const HALO_OPACITY_OFF: f32 = 0.1;

/// Ring thickness as a fraction of the outer radius.
pub const RING_THICKNESS: f32 = 0.3;
/// Rounded-square corner radius as a fraction of the half-size.
pub const ROUNDED_CORNER_RATIO: f32 = 1.0 / 6.0;
/// Halo extent relative to the shape.
pub const HALO_SCALE: f32 = 1.2;

// # Timing

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// How often the input thread re-checks its running flag.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Keyboard step for the brightness sliders.
pub const SLIDER_STEP: f32 = 0.05;

// # Configuration defaults

pub const DEFAULT_INHIBIT_IDLE: bool = true;
pub const CONFIG_DIR_NAME: &str = "nightlight";
pub const CONFIG_FILE_NAME: &str = "nightlight.toml";

// # Host paths

pub const BACKLIGHT_SYSFS_ROOT: &str = "/sys/class/backlight";

pub const APP_NAME: &str = "nightlight";
pub const IDLE_INHIBIT_REASON: &str = "Night light is on";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
