//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the live watch display with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Render one schedule frame and exit
    Status {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Render one schedule frame as of a frozen instant
    Simulate {
        debug_enabled: bool,
        timestamp: String,
        config_dir: Option<String>,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
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

        let debug_enabled = args_vec.iter().any(|arg| arg == "--debug" || arg == "-d");
        let config_dir = args_vec
            .iter()
            .position(|arg| arg == "--config" || arg == "-c")
            .and_then(|idx| args_vec.get(idx + 1))
            .cloned();

        let mut subcommand: Option<&str> = None;
        let mut subcommand_args: Vec<&str> = Vec::new();
        let mut unknown_arg_found = false;
        let mut display_help = false;
        let mut display_version = false;

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = args_vec[idx].as_str();
            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" => display_version = true,
                "--debug" | "-d" => {}
                "--config" | "-c" => {
                    if args_vec.get(idx + 1).is_none() {
                        unknown_arg_found = true; // flag without its directory
                    }
                    idx += 1; // skip the directory argument
                }
                _ if arg.starts_with('-') => unknown_arg_found = true,
                _ if subcommand.is_none() => subcommand = Some(arg),
                _ => subcommand_args.push(arg),
            }
            idx += 1;
        }

        let action = if display_help {
            CliAction::ShowHelp
        } else if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            match subcommand {
                None => CliAction::Run {
                    debug_enabled,
                    config_dir,
                },
                Some("status") if subcommand_args.is_empty() => CliAction::Status {
                    debug_enabled,
                    config_dir,
                },
                Some("simulate") => match subcommand_args.as_slice() {
                    [timestamp] => CliAction::Simulate {
                        debug_enabled,
                        timestamp: (*timestamp).to_string(),
                        config_dir,
                    },
                    _ => CliAction::ShowHelpDueToError,
                },
                Some(_) => CliAction::ShowHelpDueToError,
            }
        };

        ParsedArgs { action }
    }
}

/// Display help information for the application.
pub fn display_help() {
    log_version!();
    println!("Usage: armswatch [OPTIONS] [COMMAND]");
    println!();
    println!("Commands:");
    println!("  status                         Render today's schedule once and exit");
    println!("  simulate \"YYYY-MM-DD HH:MM:SS\" Render the schedule as of a given instant");
    println!();
    println!("Options:");
    println!("  -c, --config <DIR>  Use configuration from the given directory");
    println!("  -d, --debug         Show configuration details on startup");
    println!("  -h, --help          Print help");
    println!("  -V, --version       Print version");
    println!();
    println!("Without a command, armswatch watches the Arms Race schedule live,");
    println!("refreshing the display every second.");
}

/// Display version information for the application.
pub fn display_version() {
    println!("armswatch {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let full: Vec<String> = std::iter::once("armswatch".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        ParsedArgs::parse(full).action
    }

    #[test]
    fn bare_invocation_runs_the_watch() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None
            }
        );
    }

    #[test]
    fn debug_and_config_flags_apply_to_run() {
        assert_eq!(
            parse(&["-d", "--config", "/tmp/conf"]),
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/conf".to_string())
            }
        );
    }

    #[test]
    fn status_subcommand() {
        assert_eq!(
            parse(&["status"]),
            CliAction::Status {
                debug_enabled: false,
                config_dir: None
            }
        );
    }

    #[test]
    fn simulate_requires_exactly_one_timestamp() {
        assert_eq!(
            parse(&["simulate", "2025-10-30 13:00:00"]),
            CliAction::Simulate {
                debug_enabled: false,
                timestamp: "2025-10-30 13:00:00".to_string(),
                config_dir: None
            }
        );
        assert_eq!(parse(&["simulate"]), CliAction::ShowHelpDueToError);
        assert_eq!(
            parse(&["simulate", "a", "b"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn help_wins_over_other_arguments() {
        assert_eq!(parse(&["status", "--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
    }

    #[test]
    fn unknown_flags_show_help_with_error() {
        assert_eq!(parse(&["--bogus"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["weird"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--config"]), CliAction::ShowHelpDueToError);
    }
}
