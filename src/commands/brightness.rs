//! Implementation of the brightness command.
//!
//! Applies a fixed screen brightness through the configured bridge, waits for
//! Escape or Ctrl+C, then restores what the screen had before. Useful for
//! checking that the backlight backend works without starting a session.

use anyhow::{Context, Result, bail};

use crate::backend::{ScreenBrightnessBridge, create_bridge};
use crate::config::Config;

/// Handle the brightness command: apply, wait, restore.
pub fn handle_brightness_command(value: f32, debug_enabled: bool) -> Result<()> {
    log_version!();

    let config = Config::load()?;
    let mut bridge = create_bridge(&config, debug_enabled);

    if !bridge.check_capability() {
        log_pipe!();
        log_error!(
            "Screen brightness is not adjustable with the {} backend",
            bridge.backend_name()
        );
        log_indented!("Set backend = \"backlight\" and check /sys/class/backlight permissions");
        log_end!();
        bail!("screen brightness control unavailable");
    }

    hold_brightness(bridge.as_mut(), value, wait_for_user_exit)
}

/// Apply `value`, block in `wait`, then reset the bridge whatever `wait` returned.
fn hold_brightness<F>(bridge: &mut dyn ScreenBrightnessBridge, value: f32, wait: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    bridge.apply(value);
    log_block_start!(
        "Screen brightness set to {}% ({} backend)",
        (value * 100.0).round() as i32,
        bridge.backend_name()
    );
    log_indented!("Press Escape or Ctrl+C to restore the previous brightness");

    let waited = wait();

    bridge.reset();
    log_decorated!("Screen brightness restored");
    log_end!();

    waited
}

/// Block until Escape or Ctrl+C is pressed.
fn wait_for_user_exit() -> Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode},
    };

    // Enable raw mode to capture keys
    enable_raw_mode().context("Failed to enable raw terminal mode")?;

    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                if key.code == KeyCode::Esc || crate::ui::input::is_interrupt(&key) {
                    break Ok(());
                }
            }
            Ok(_) => {}
            Err(e) => break Err(e).context("Failed to read terminal input"),
        }
    };

    // Restore normal terminal mode even when reading failed
    let restored = disable_raw_mode().context("Failed to leave raw terminal mode");

    result.and(restored)
}

/// Display detailed help for the brightness command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("brightness - Hold the screen at a fixed brightness");
    log_block_start!("Usage: nightlight brightness <value>");
    log_block_start!("Arguments:");
    log_indented!("<value>  0.0-1.0, or a percentage such as 70%");
    log_block_start!("Description:");
    log_indented!("Applies the brightness through the configured backend and");
    log_indented!("keeps it until Escape or Ctrl+C, then restores the brightness");
    log_indented!("the screen had before the command ran.");
    log_block_start!("Examples:");
    log_indented!("nightlight brightness 0.3");
    log_indented!("nightlight brightness 80%");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockScreenBrightnessBridge;
    use mockall::predicate::eq;

    fn bridge_expecting_hold(value: f32) -> MockScreenBrightnessBridge {
        let mut bridge = MockScreenBrightnessBridge::new();
        bridge.expect_backend_name().return_const("Mock");
        bridge.expect_apply().with(eq(value)).times(1).return_const(());
        bridge.expect_reset().times(1).return_const(());
        bridge
    }

    #[test]
    fn test_hold_resets_after_wait() {
        let mut bridge = bridge_expecting_hold(0.3);
        assert!(hold_brightness(&mut bridge, 0.3, || Ok(())).is_ok());
    }

    #[test]
    fn test_hold_resets_when_terminal_fails() {
        let mut bridge = bridge_expecting_hold(0.8);
        let result = hold_brightness(&mut bridge, 0.8, || bail!("not a terminal"));
        assert_eq!(result.unwrap_err().to_string(), "not a terminal");
    }
}
