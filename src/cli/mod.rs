//! CLI library modules for the entlist binary.
//!
//! This module provides reusable CLI functionality that can be tested
//! independently of the binary.

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

use std::process::ExitCode;

use clap::Parser as _;

use parser::{Cli, Commands};

/// Parse arguments, set up logging and configuration, and run a command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{}", output::format_error("entlist", &msg));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), String> {
    let path = utils::resolve_config_path(cli.config.as_deref());

    match cli.command {
        Some(Commands::Classify(args)) => {
            commands::classify::run(args, &utils::load_config(&path)?)
        }
        Some(Commands::Config(args)) => commands::config::run(args, &path),
        None => {
            let args = commands::ClassifyArgs {
                positional: cli.text,
                ..commands::ClassifyArgs::default()
            };
            commands::classify::run(args, &utils::load_config(&path)?)
        }
    }
}
