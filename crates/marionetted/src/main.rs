//! Daemon entry point.

use std::process::ExitCode;

use clap::Parser;

use marionette_config::Config;

fn main() -> ExitCode {
    let config = Config::parse();
    match marionetted::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("marionetted: {error}");
            ExitCode::FAILURE
        }
    }
}
