// moviedim-cli/src/main.rs
//
// Entry point for the `moviedim` binary: parses arguments, installs the
// logger, builds the core configuration and dispatches to the subcommand.

use std::process::ExitCode;

use clap::Parser;
use moviedim_cli::config::core_config;
use moviedim_cli::{Cli, Commands, logging, run_detect, run_resolve, run_serve};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let result = core_config(&cli.global)
        .map_err(anyhow::Error::from)
        .and_then(|config| match &cli.command {
            Commands::Serve(args) => run_serve(&config, args),
            Commands::Detect(args) => run_detect(&config, args),
            Commands::Resolve(args) => run_resolve(&config, args),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
