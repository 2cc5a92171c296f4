//! Help command implementation for nightlight.
//!
//! This module provides a dispatcher for the help command that shows
//! command-specific help or general help based on the arguments provided.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("brightness") | Some("b") => super::brightness::display_help(),
        Some("help") => display_help_help(),
        Some("keys") => display_keys_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("brightness, b <value>   Hold the screen at a brightness until Escape");
    log_indented!("help [COMMAND]          Show detailed help for a command");
    log_block_start!("Other Topics:");
    log_indented!("keys                    Session key and mouse bindings");
    log_pipe!();
    log_info!("Use 'nightlight help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'nightlight --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: nightlight help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("# Show general help");
    log_indented!("nightlight help");
    log_pipe!();
    log_indented!("# Show help for specific topics");
    log_indented!("nightlight help brightness");
    log_indented!("nightlight help keys");
    log_end!();
}

/// Display the session bindings
fn display_keys_help() {
    log_version!();
    log_block_start!("Session controls");
    log_block_start!("Keyboard:");
    log_indented!("space, enter   Switch the light on or off");
    log_indented!("← →            Light brightness");
    log_indented!("↑ ↓            Screen brightness (when the host allows it)");
    log_indented!("c              Next color");
    log_indented!("1-8            Pick a palette color (8 is the custom slot)");
    log_indented!("p              Edit the custom color");
    log_indented!("s              Next style (circle, rounded square, ring)");
    log_indented!("t              Set a timer, or cancel the running one");
    log_indented!("q, esc, ctrl+c Quit");
    log_block_start!("Mouse:");
    log_indented!("Click or drag the sliders, click swatches, style and timer");
    log_block_start!("Dialogs:");
    log_indented!("tab switches mode or field, arrows adjust, enter confirms, esc cancels");
    log_pipe!();
    log_info!("While the light is off only on/off and quit respond.");
    log_end!();
}
