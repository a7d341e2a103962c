//! HexCipher CLI Binary
//!
//! Command-line interface for the hexagram codec.

use clap::Parser;
use hexcipher::cli::{Cli, CliContext};
use hexcipher::logging::init_logging;
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = CliContext::new(config);
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
