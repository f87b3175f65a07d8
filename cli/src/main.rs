//! `homesetup` command-line entry point.

use anyhow::Result;
use clap::Parser;

use homesetup_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if args.command == cli::Command::Version {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = logging::Logger::new(args.command.name());

    match args.command {
        cli::Command::Plan => commands::plan::run(&args.global, &log),
        cli::Command::Apply => commands::apply::run(&args.global, &log),
        cli::Command::Snapshot => commands::snapshot::run(&args.global, &log),
        cli::Command::Brew => commands::brew::run(&args.global, &log),
        cli::Command::Version => Ok(()),
    }
}
