//! CLI command definitions
//!
//! Defines the clap commands for the fixture runner CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bundled conformance suites
    Run {
        /// Only run cases whose name contains this text
        filter: Option<String>,

        /// Run cases concurrently
        #[arg(long, short)]
        parallel: bool,

        /// Maximum concurrent cases (implies --parallel)
        #[arg(long, short)]
        jobs: Option<usize>,

        /// Per-case deadline in milliseconds (implies --parallel)
        #[arg(long)]
        deadline_ms: Option<u64>,

        /// Print executions as JSON instead of one line per case
        #[arg(long)]
        json: bool,

        /// Configuration file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List bundled case names
    List {
        /// Configuration file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
