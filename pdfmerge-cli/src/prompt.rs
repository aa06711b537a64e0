//! Interactive prompts for inputs and the output path.
//!
//! A [`Session`] reads answers from any buffered reader and writes the prompt
//! text to any writer, so the whole dialogue can be driven from a test.
//! Status messages go through the [`OutputFormatter`] like everywhere else.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use pdfmerge::config::{Config, OverwriteMode};
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::merge::{MIN_BATCH_SIZE, MergeFailure, MergeOutcome};
use pdfmerge::output::{IssueReport, OutputFormatter, display_batch};
use pdfmerge::utils::{collect_paths_for_patterns, split_path_list};
use pdfmerge::validation::{DocumentBatch, ValidationSummary, Validator, validate_output_path};

/// Question/answer dialogue over a reader and a writer.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session reading answers from `input` and writing prompts to
    /// `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `prompt` and read one trimmed line.
    ///
    /// # Errors
    ///
    /// End of input is reported as [`PdfMergeError::Cancelled`].
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PdfMergeError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question; only `y` and `yes` (any case) count as yes.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(question)?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    /// Obtain the batch to merge.
    ///
    /// Inputs given in `config` are checked once and any problem is an error.
    /// Otherwise the user is asked until at least two valid files are named
    /// and the listing is confirmed.
    pub fn collect_inputs(
        &mut self,
        config: &Config,
        formatter: &OutputFormatter,
    ) -> Result<DocumentBatch> {
        if !config.needs_input_prompt() {
            return self.preset_inputs(config, formatter);
        }

        loop {
            formatter.info("Enter PDF file paths to merge:");
            formatter.info("   (separate multiple files with commas)");
            let line = self.read_line("\n> ")?;

            let entries = split_path_list(&line);
            if entries.is_empty() {
                formatter.error("Please provide at least one PDF file path.");
                formatter.blank_line();
                continue;
            }

            let summary = match check_entries(&entries) {
                Ok(summary) => summary,
                Err(err) => {
                    formatter.error(&err.to_string());
                    continue;
                }
            };

            if !summary.all_valid() {
                formatter.blank_line();
                formatter.block(&IssueReport::from_validation(&summary).to_string());
                formatter.blank_line();
                continue;
            }

            if summary.accepted.len() < MIN_BATCH_SIZE {
                formatter.error("Please provide at least 2 PDF files to merge.");
                formatter.blank_line();
                continue;
            }

            formatter.blank_line();
            display_batch(formatter, &summary.accepted);

            if config.assume_yes || self.confirm("\nProceed with these files? (y/n): ")? {
                return Ok(summary.accepted);
            }
            formatter.blank_line();
        }
    }

    fn preset_inputs(
        &mut self,
        config: &Config,
        formatter: &OutputFormatter,
    ) -> Result<DocumentBatch> {
        let summary = check_entries(&config.inputs)?;

        if let Some(first) = summary.rejected.first() {
            formatter.block(&IssueReport::from_validation(&summary).to_string());
            return Err(MergeFailure::InvalidInput {
                name: file_label(first.path()),
            }
            .into());
        }

        if summary.accepted.len() < MIN_BATCH_SIZE {
            return Err(MergeFailure::InsufficientInputs {
                provided: summary.accepted.len(),
            }
            .into());
        }

        display_batch(formatter, &summary.accepted);

        if config.assume_yes || self.confirm("\nProceed with these files? (y/n): ")? {
            Ok(summary.accepted)
        } else {
            Err(PdfMergeError::Cancelled)
        }
    }

    /// Obtain a normalized, writable output path.
    ///
    /// An output given in `config` is used as is; a rejected path or a
    /// declined overwrite is then an error. Interactively both re-prompt.
    pub fn choose_output(
        &mut self,
        config: &Config,
        formatter: &OutputFormatter,
    ) -> Result<PathBuf> {
        if let Some(raw) = &config.output {
            let target = validate_output_path(raw)
                .map_err(|rejection| PdfMergeError::invalid_config(rejection.to_string()))?;
            let path = target.into_path_buf();
            return if self.may_write(&path, config.overwrite_mode, formatter)? {
                Ok(path)
            } else {
                Err(PdfMergeError::Cancelled)
            };
        }

        loop {
            formatter.info("\nEnter output file name:");
            let raw = self.read_line("> ")?;

            let path = match validate_output_path(&raw) {
                Ok(target) => target.into_path_buf(),
                Err(rejection) => {
                    formatter.error(&rejection.to_string());
                    continue;
                }
            };

            match self.may_write(&path, config.overwrite_mode, formatter) {
                Ok(true) => return Ok(path),
                Ok(false) => continue,
                Err(err @ PdfMergeError::OutputExists { .. }) => {
                    formatter.error(&err.to_string());
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Apply the overwrite policy to `path`.
    fn may_write(
        &mut self,
        path: &Path,
        mode: OverwriteMode,
        formatter: &OutputFormatter,
    ) -> Result<bool> {
        if !path.exists() {
            return Ok(true);
        }

        match mode {
            OverwriteMode::Force => Ok(true),
            OverwriteMode::NoClobber => Err(PdfMergeError::output_exists(path.to_path_buf())),
            // Nobody is there to answer in quiet mode
            OverwriteMode::Prompt if formatter.is_quiet() => {
                Err(PdfMergeError::output_exists(path.to_path_buf()))
            }
            OverwriteMode::Prompt => {
                formatter.warning(&format!("File '{}' already exists.", path.display()));
                self.confirm("Overwrite? (y/n): ")
            }
        }
    }
}

/// Whether a failed merge sends the user back to the input prompt.
///
/// Only interactively collected batches are retried. Preset inputs end the
/// run with the failure's exit code.
pub fn retry_after_failure(config: &Config, outcome: &MergeOutcome) -> bool {
    !outcome.success && config.needs_input_prompt()
}

/// Expand glob patterns and validate the resulting paths in order.
fn check_entries(entries: &[String]) -> Result<ValidationSummary> {
    let paths = collect_paths_for_patterns(entries)?;
    Ok(Validator::new().validate_files(paths))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
