//! c CLI Binary
//!
//! Command-line interface for attaching comments to files and directories.

use clap::Parser;
use comments::logging::init_logging;
use comments::tooling::cli::{Cli, CliContext};
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = Cli::parse();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error resolving working directory: {}", e);
            process::exit(1);
        }
    };

    let context = match CliContext::new(working_dir, cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // NO_COLOR and non-terminal stdout both turn color off
    let color = context.config().display.color
        && !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let context = context.with_color(color);

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
