//! CLI argument parsing for pdfmerge.
//!
//! Every argument is optional: whatever is not given on the command line is
//! asked for interactively.

use clap::Parser;

use pdfmerge::config::{Config, OverwriteMode};
use pdfmerge::error::{PdfMergeError, Result};

/// Safely combine multiple PDF files into one document.
///
/// Without arguments pdfmerge prompts for the input files and the output
/// name. Inputs given on the command line are merged in the order provided.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Safely combine multiple PDF files into one document", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Input PDF files or glob patterns to merge (in order)
    ///
    /// Examples:
    ///   pdfmerge a.pdf b.pdf -o merged.pdf
    ///   pdfmerge 'chapter*.pdf' -o book
    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// A missing `.pdf` extension is appended.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Merge without asking "Proceed with these files?"
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// An existing output file is then never overwritten unless --force
    /// is given.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show failure diagnostics and debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the overwrite switches conflict or the
    /// configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let overwrite_mode = OverwriteMode::from_flags(self.force, self.no_clobber)?;

        let config = Config {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            overwrite_mode,
            assume_yes: self.assume_yes,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        config.validate().map_err(|e| {
            PdfMergeError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cli(inputs: Vec<&str>, output: Option<&str>) -> Cli {
        Cli {
            inputs: inputs.into_iter().map(String::from).collect(),
            output: output.map(String::from),
            assume_yes: false,
            force: false,
            no_clobber: false,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_basic_cli_to_config() {
        let cli = create_test_cli(vec!["a.pdf", "b.pdf"], Some("out.pdf"));
        let config = cli.to_config().unwrap();

        assert_eq!(config.inputs, vec!["a.pdf", "b.pdf"]);
        assert_eq!(config.output.as_deref(), Some("out.pdf"));
        assert_eq!(config.overwrite_mode, OverwriteMode::Prompt);
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_no_arguments_means_prompting() {
        let config = create_test_cli(vec![], None).to_config().unwrap();
        assert!(config.needs_input_prompt());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_cli_overwrite_flags() {
        let mut cli = create_test_cli(vec![], None);
        cli.force = true;
        assert_eq!(cli.to_config().unwrap().overwrite_mode, OverwriteMode::Force);

        cli.force = false;
        cli.no_clobber = true;
        assert_eq!(
            cli.to_config().unwrap().overwrite_mode,
            OverwriteMode::NoClobber
        );
    }

    #[test]
    fn test_cli_output_same_as_input() {
        let cli = create_test_cli(vec!["a.pdf", "b.pdf"], Some("a.pdf"));
        assert!(cli.to_config().is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["pdfmerge", "a.pdf", "b.pdf", "-o", "out", "-y", "-f"])
            .unwrap();
        assert_eq!(cli.inputs, vec!["a.pdf", "b.pdf"]);
        assert_eq!(cli.output.as_deref(), Some("out"));
        assert!(cli.assume_yes);
        assert!(cli.force);
    }

    #[test]
    fn test_cli_rejects_conflicting_flags() {
        assert!(Cli::try_parse_from(["pdfmerge", "--force", "--no-clobber"]).is_err());
        assert!(Cli::try_parse_from(["pdfmerge", "-q", "-v"]).is_err());
    }
}
