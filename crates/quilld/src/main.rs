//! Binary entry point wiring stdio into the serve loop.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use quilld::{Cli, Config, telemetry};

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());
    if let Err(error) = telemetry::initialise(&config) {
        eprintln!("quilld: {error}");
        return ExitCode::FAILURE;
    }

    quilld::run_forever(io::stdin().lock(), io::stdout().lock());
    ExitCode::SUCCESS
}
