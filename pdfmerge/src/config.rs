//! Configuration module for pdfmerge.
//!
//! This module holds the validated settings a caller adapter derives from
//! its arguments:
//! - Inputs and output supplied up front (either may be left for prompting)
//! - Overwrite behavior for an existing output file
//! - Confirmation and verbosity switches

use std::path::PathBuf;

use crate::error::{PdfMergeError, Result};

/// Output file overwrite behavior.
///
/// The merge engine always overwrites; this policy is applied by the caller
/// before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without asking.
    Force,
    /// Never overwrite; an existing file is an error.
    NoClobber,
}

impl OverwriteMode {
    /// Resolve from the `--force` / `--no-clobber` switches.
    ///
    /// # Errors
    ///
    /// Returns an error if both switches are set.
    pub fn from_flags(force: bool, no_clobber: bool) -> Result<Self> {
        match (force, no_clobber) {
            (true, true) => Err(PdfMergeError::invalid_config(
                "Cannot use both --force and --no-clobber",
            )),
            (true, false) => Ok(Self::Force),
            (false, true) => Ok(Self::NoClobber),
            (false, false) => Ok(Self::Prompt),
        }
    }
}

/// Settings for an interactive merge session.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input paths or glob patterns given up front, in merge order. Empty
    /// means the inputs are prompted for.
    pub inputs: Vec<String>,

    /// Output path given up front; prompted for when absent.
    pub output: Option<String>,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Skip the "Proceed with these files?" confirmation.
    pub assume_yes: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The output path is blank
    /// - The output path is also one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfMergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(output) = &self.output {
            if output.trim().is_empty() {
                return Err(PdfMergeError::invalid_config("Output path cannot be empty"));
            }

            let output_path = PathBuf::from(output.trim());
            if self
                .inputs
                .iter()
                .any(|input| PathBuf::from(input.trim()) == output_path)
            {
                return Err(PdfMergeError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    output_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Whether inputs still have to be prompted for.
    pub fn needs_input_prompt(&self) -> bool {
        self.inputs.is_empty()
    }
}
