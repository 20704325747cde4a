//! Binary entry point: argument parsing and action dispatch.
//!
//! All application logic lives in the library; this file only maps a parsed
//! [`CliAction`] onto the [`Armswatch`] builder, installing a frozen time
//! source first for the `simulate` command.

use std::sync::Arc;

use armswatch::args::{self, CliAction, ParsedArgs};
use armswatch::time_source::{self, FixedTimeSource};
use armswatch::{Armswatch, log_error_exit, log_version};

fn main() -> anyhow::Result<()> {
    let parsed = ParsedArgs::parse(std::env::args());

    match parsed.action {
        CliAction::Run {
            debug_enabled,
            config_dir,
        } => Armswatch::new(debug_enabled)
            .with_config_dir(config_dir)
            .run(),

        CliAction::Status {
            debug_enabled,
            config_dir,
        } => Armswatch::new(debug_enabled)
            .with_config_dir(config_dir)
            .one_shot()
            .run(),

        CliAction::Simulate {
            debug_enabled,
            timestamp,
            config_dir,
        } => match time_source::parse_datetime(&timestamp) {
            Ok(instant) => {
                time_source::init_time_source(Arc::new(FixedTimeSource::new(instant)));
                Armswatch::new(debug_enabled)
                    .with_config_dir(config_dir)
                    .one_shot()
                    .run()
            }
            Err(e) => {
                log_version!();
                log_error_exit!("{}", e);
                std::process::exit(1);
            }
        },

        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            args::display_version();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(1);
        }
    }
}
