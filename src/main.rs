//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Summary output and the exit code
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_audit::initialization::init_logger_with;
use domain_audit::{
    evaluate_exit_code, render_json, render_summary, run_audit, Config, Opt, ReportFormat,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let fail_on = config.fail_on;
    let format = config.format;

    match run_audit(config).await {
        Ok(report) => {
            match format {
                ReportFormat::Text => {
                    println!();
                    println!("{}", render_summary(&report.results));
                }
                ReportFormat::Json => {
                    let json =
                        render_json(&report.results).context("Failed to serialize results")?;
                    println!("{json}");
                }
            }
            process::exit(evaluate_exit_code(fail_on, &report));
        }
        Err(e) => {
            eprintln!("domain_audit error: {:#}", e);
            process::exit(1);
        }
    }
}
