//! Fixture runner CLI
//!
//! Runs the bundled conformance suites through the fixture runner and exits
//! non-zero when any case fails.

use clap::Parser;
use commands::Commands;
use fixture_runner::common::logging;
use fixture_runner::{cli, commands};

#[derive(Parser)]
#[command(name = "fixture-runner", about = "Fixture lifecycle runner")]
#[command(version, long_about = None)]
struct Cli {
    /// Log lifecycle transitions
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    match cli::dispatch(cli.command).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
