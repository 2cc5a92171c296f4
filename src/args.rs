//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags, session options, and the `brightness` and `help`
//! subcommands.

use crate::i18n::LanguageSetting;
use crate::state::TimerRequest;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run a night light session with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        language: Option<LanguageSetting>,
        log_file: Option<String>,
        timer: Option<TimerRequest>,
    },
    /// Hold the screen at a fixed brightness until Escape
    BrightnessCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
        value: f32,
    },
    /// Help for one command, or general help
    HelpCommand { command: Option<String> },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. Flags may appear
    /// before or after the subcommand. `--version` wins over `--help`, which
    /// wins over any parse error.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        if args_vec
            .iter()
            .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
        {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let action = match parse_action(&args_vec) {
            Ok(action) => action,
            Err(message) => {
                log_warning_standalone!("{}", message);
                CliAction::ShowHelpDueToError
            }
        };
        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_action(args: &[String]) -> Result<CliAction, String> {
    let mut debug_enabled = false;
    let mut config_dir: Option<String> = None;
    let mut language: Option<LanguageSetting> = None;
    let mut log_file: Option<String> = None;
    let mut timer: Option<TimerRequest> = None;
    let mut positionals: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {flag}"))
        };

        match arg.as_str() {
            "--debug" | "-d" => debug_enabled = true,
            "--config" | "-c" => config_dir = Some(value_for(arg.as_str())?),
            "--lang" | "-l" => {
                let value = value_for(arg.as_str())?;
                language = Some(value.parse().map_err(|e| format!("{e}"))?);
            }
            "--log" => log_file = Some(value_for(arg.as_str())?),
            "--timer" | "-t" => {
                let value = value_for(arg.as_str())?;
                timer = Some(TimerRequest::parse(&value).map_err(|e| format!("{e}"))?);
            }
            flag if flag.starts_with('-') && flag.parse::<f32>().is_err() => {
                return Err(format!("Unknown option: {flag}"));
            }
            positional => positionals.push(positional),
        }
    }

    let Some((&command, rest)) = positionals.split_first() else {
        return Ok(CliAction::Run {
            debug_enabled,
            config_dir,
            language,
            log_file,
            timer,
        });
    };

    match command {
        "brightness" | "b" => {
            let [value] = rest else {
                return Err("Usage: nightlight brightness <0.0-1.0 | 0-100%>".to_string());
            };
            if timer.is_some() || language.is_some() || log_file.is_some() {
                return Err("The brightness command only accepts --debug and --config".to_string());
            }
            Ok(CliAction::BrightnessCommand {
                debug_enabled,
                config_dir,
                value: parse_brightness(value)?,
            })
        }
        "help" => match rest {
            [] => Ok(CliAction::HelpCommand { command: None }),
            [topic] => Ok(CliAction::HelpCommand {
                command: Some((*topic).to_string()),
            }),
            _ => Err("Usage: nightlight help [COMMAND]".to_string()),
        },
        other => Err(format!("Unknown command: {other}")),
    }
}

/// Accept `0.0`-`1.0` or a percentage such as `70%`.
pub fn parse_brightness(value: &str) -> Result<f32, String> {
    let parsed = match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().map(|p| p / 100.0),
        None => value.trim().parse::<f32>(),
    }
    .map_err(|_| format!("Invalid brightness '{value}'"))?;

    if !(0.0..=1.0).contains(&parsed) {
        return Err(format!("Brightness '{value}' is out of range (0.0-1.0 or 0-100%)"));
    }
    Ok(parsed)
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("nightlight [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-l, --lang <lang>      Label language: auto, en or zh");
    log_indented!("    --log <file>       Also write log output to a file");
    log_indented!("-t, --timer <when>     Switch off after a delay (30m, 1h30m) or at HH:MM");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("brightness, b <value>  Hold the screen at a brightness until Escape");
    log_indented!("help [command]         Show help for a command");
    log_block_start!("Keys:");
    log_indented!("space on/off, ←→ brightness, ↑↓ screen, c or 1-8 color, p custom color");
    log_indented!("s style, t timer, q/Esc quit");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, NaiveTime};

    fn run_defaults() -> CliAction {
        CliAction::Run {
            debug_enabled: false,
            config_dir: None,
            language: None,
            log_file: None,
            timer: None,
        }
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["nightlight"]);
        assert_eq!(parsed.action, run_defaults());
    }

    #[test]
    fn test_parse_debug_flag() {
        let parsed = ParsedArgs::parse(vec!["nightlight", "-d"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: true,
                config_dir: None,
                language: None,
                log_file: None,
                timer: None,
            }
        );
    }

    #[test]
    fn test_parse_session_options() {
        let parsed = ParsedArgs::parse(vec![
            "nightlight",
            "--config",
            "/tmp/nl",
            "--lang",
            "zh",
            "--log",
            "/tmp/nl.log",
            "--timer",
            "1h30m",
        ]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: false,
                config_dir: Some("/tmp/nl".to_string()),
                language: Some(LanguageSetting::Zh),
                log_file: Some("/tmp/nl.log".to_string()),
                timer: Some(TimerRequest::Duration(ChronoDuration::minutes(90))),
            }
        );
    }

    #[test]
    fn test_parse_clock_timer() {
        let parsed = ParsedArgs::parse(vec!["nightlight", "-t", "23:15"]);
        let CliAction::Run { timer, .. } = parsed.action else {
            panic!("expected run action");
        };
        assert_eq!(
            timer,
            Some(TimerRequest::ClockTime(NaiveTime::from_hms_opt(23, 15, 0).unwrap()))
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "--help"]).action,
            CliAction::ShowHelp
        );
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "-V"]).action,
            CliAction::ShowVersion
        );
        // Version takes precedence
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "--help", "-v", "--bogus"]).action,
            CliAction::ShowVersion
        );
    }

    #[test]
    fn test_parse_errors_show_help() {
        for args in [
            vec!["nightlight", "--unknown"],
            vec!["nightlight", "--timer"],
            vec!["nightlight", "--timer", "soon"],
            vec!["nightlight", "--lang", "fr"],
            vec!["nightlight", "dance"],
            vec!["nightlight", "brightness"],
            vec!["nightlight", "brightness", "1.5"],
            vec!["nightlight", "brightness", "0.5", "--timer", "30m"],
        ] {
            assert_eq!(
                ParsedArgs::parse(args.clone()).action,
                CliAction::ShowHelpDueToError,
                "{args:?}"
            );
        }
    }

    #[test]
    fn test_parse_brightness_command() {
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "-d", "brightness", "70%"]).action,
            CliAction::BrightnessCommand {
                debug_enabled: true,
                config_dir: None,
                value: 0.7,
            }
        );
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "b", "0.25", "--config", "/etc/nl"]).action,
            CliAction::BrightnessCommand {
                debug_enabled: false,
                config_dir: Some("/etc/nl".to_string()),
                value: 0.25,
            }
        );
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "help"]).action,
            CliAction::HelpCommand { command: None }
        );
        assert_eq!(
            ParsedArgs::parse(vec!["nightlight", "help", "brightness"]).action,
            CliAction::HelpCommand {
                command: Some("brightness".to_string())
            }
        );
    }

    #[test]
    fn test_parse_brightness_values() {
        assert_eq!(parse_brightness("0"), Ok(0.0));
        assert_eq!(parse_brightness("1"), Ok(1.0));
        assert_eq!(parse_brightness("50%"), Ok(0.5));
        assert!(parse_brightness("-0.1").is_err());
        assert!(parse_brightness("101%").is_err());
        assert!(parse_brightness("bright").is_err());
    }
}
