//! Main application entry point and high-level flow coordination.
//!
//! This module dispatches the parsed command line to the right part of the
//! library:
//!
//! - `args`: Command-line argument parsing and help/version display
//! - `config`: Custom configuration directory selection
//! - `common::logger`: Optional file logging for the lifetime of the process
//! - `Nightlight`: The interactive night light session
//! - `commands`: The `brightness` and `help` subcommands
//!
//! Errors bubble up as `anyhow::Error` and are reported once here with their
//! full context chain before exiting with a failure status.

use anyhow::Result;
use std::process::ExitCode;

use nightlight::{
    Nightlight,
    args::{self, CliAction, ParsedArgs},
    commands, config,
    common::logger::{Log, LoggerGuard},
    log_error_exit,
};

fn main() -> ExitCode {
    match dispatch(ParsedArgs::from_env().action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error_exit!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(action: CliAction) -> Result<()> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(())
        }
        CliAction::HelpCommand { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Run {
            debug_enabled,
            config_dir,
            language,
            log_file,
            timer,
        } => {
            config::set_config_dir(config_dir)?;
            // Keep the guard alive until the session ends so the file gets flushed.
            let _log_guard = start_file_logging(log_file)?;
            Nightlight::new(debug_enabled)
                .with_language(language)
                .with_timer(timer)
                .run()
        }
        CliAction::BrightnessCommand {
            debug_enabled,
            config_dir,
            value,
        } => {
            config::set_config_dir(config_dir)?;
            commands::brightness::handle_brightness_command(value, debug_enabled)
        }
    }
}

fn start_file_logging(log_file: Option<String>) -> Result<Option<LoggerGuard>> {
    log_file.map(Log::start_file_logging).transpose()
}
