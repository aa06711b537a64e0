//! pdfmerge - Safely combine multiple PDF files into one document.
//!
//! An interactive tool: inputs and the output name are asked for unless they
//! are given on the command line.

mod cli;
mod prompt;

use clap::Parser;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::prompt::{Session, retry_after_failure};
use pdfmerge::error::PdfMergeError;
use pdfmerge::merge::Merger;
use pdfmerge::output::{OutputFormatter, display_outcome};

const BANNER_WIDTH: usize = 60;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Run the application and handle errors
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Send library logs to stderr. `RUST_LOG` wins; otherwise logging is off
/// unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "pdfmerge=debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic.
fn run(cli: Cli) -> Result<(), PdfMergeError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    print_header(&formatter);

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());

    loop {
        let batch = session.collect_inputs(&config, &formatter)?;
        let output = session.choose_output(&config, &formatter)?;

        formatter.blank_line();
        formatter.info(&format!("Merging {} PDF files...", batch.len()));
        formatter.info(&format!("Output: {}", output.display()));
        formatter.detail("Input size", &batch.format_total_size());
        formatter.blank_line();

        let outcome = Merger::new().merge(&batch, &output);
        display_outcome(&formatter, &outcome);

        if outcome.success {
            formatter.detail("Output size", &outcome.format_output_size());
            formatter.detail("Files merged", &outcome.files_merged.to_string());
        } else if retry_after_failure(&config, &outcome) {
            formatter.info("Please try again with different files.");
            formatter.blank_line();
            continue;
        }

        return outcome.into_result().map(|_| ());
    }
}

fn print_header(formatter: &OutputFormatter) {
    let rule = "=".repeat(BANNER_WIDTH);
    formatter.info(&rule);
    formatter.info(&format!("{:^BANNER_WIDTH$}", "PDF MERGER TOOL"));
    formatter.info(&rule);
    formatter.info("Safely combine multiple PDF files into one document");
    formatter.detail("Version", &format!("{} v{}", pdfmerge::NAME, pdfmerge::VERSION));
    formatter.blank_line();
}
