//! `config-utils` command-line entry point.

use std::process::ExitCode;

use clap::Parser;

use config_utils::cli::{Cli, Command};
use config_utils::commands::{self, ExitStatus};
use config_utils::logging::{Logger, init_subscriber};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return ExitStatus::Success.into();
    }

    init_subscriber(args.verbose, args.command.name());
    let log = Logger::new(args.command.name());

    let result = match &args.command {
        Command::Copy(opts) => commands::copy::run(&args.global, opts, &log),
        Command::Subtheme(opts) => commands::subtheme::run(&args.global, opts, &log),
        Command::Version => Ok(()),
    };

    match result {
        Ok(()) => ExitStatus::Success.into(),
        Err(err) => {
            let status = commands::exit_status(&err);
            if status == ExitStatus::UserCancelled {
                log.warn(&format!("{err:#}"));
            } else {
                log.error(&format!("{err:#}"));
            }
            status.into()
        }
    }
}
