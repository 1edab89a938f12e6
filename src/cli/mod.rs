//! CLI command handling
//!
//! Builds the bundled suite, runs it, and prints one line per case.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::Result;
use crate::fixtures;
use crate::testing::{Execution, HostOptions, Suite};

/// Dispatch a CLI command; returns whether every executed case passed
pub async fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::List { config } => {
            let config = load_config(config.as_deref())?;
            let suite = fixtures::builtin(&config.fixtures)?;
            for name in suite.names() {
                println!("{name}");
            }
            Ok(true)
        }

        Commands::Run {
            filter,
            parallel,
            jobs,
            deadline_ms,
            json,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let mut suite = fixtures::builtin(&config.fixtures)?;
            if let Some(filter) = &filter {
                suite = suite.filtered(filter)?;
            }

            let deadline = match deadline_ms {
                Some(0) => None,
                Some(ms) => Some(Duration::from_millis(ms)),
                None => config.runner.deadline(),
            };
            let options = HostOptions {
                jobs: jobs.unwrap_or(config.runner.jobs),
                deadline,
            };
            let parallel = parallel || jobs.is_some() || deadline.is_some();

            let executions = execute_suite(&suite, parallel, options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&executions)?);
            } else {
                print_executions(&executions);
            }

            Ok(executions.iter().all(Execution::passed))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn execute_suite(
    suite: &Suite,
    parallel: bool,
    options: HostOptions,
) -> Result<Vec<Execution>> {
    tracing::debug!(cases = suite.len(), parallel, jobs = options.jobs, "running suite");
    if parallel {
        suite.run_parallel(options).await
    } else {
        Ok(suite.run_sequential())
    }
}

fn print_executions(executions: &[Execution]) {
    for execution in executions {
        let mark = if execution.passed() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {} {}",
            mark,
            execution.name,
            format!("({} ms)", execution.elapsed.as_millis()).dimmed()
        );
        if !execution.passed() {
            println!("      {}", execution.outcome);
        }
        if let Some(error) = &execution.teardown_error {
            println!("      {} {}", "teardown:".yellow(), error);
        }
    }

    let passed = executions.iter().filter(|e| e.passed()).count();
    let summary = format!("{passed}/{} passed", executions.len());
    if passed == executions.len() {
        println!("\n{}", summary.green().bold());
    } else {
        println!("\n{}", summary.red().bold());
    }
}
