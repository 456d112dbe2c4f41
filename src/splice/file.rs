use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::lines::splice_lines;
use super::range::{Bounds, LineRange};
use crate::diff::unified_diff;
use crate::error::{SpliceError, SpliceResult};
use crate::utils::fs::{read_text, sha256_hex, write_atomic, write_in_place};

/// Options controlling how a splice is checked and written
#[derive(Debug, Clone)]
pub struct SpliceOptions {
    pub bounds: Bounds,
    pub atomic: bool,
    pub dry_run: bool,
    /// Number of context lines for the diff; `None` skips rendering it
    pub diff_context: Option<usize>,
    /// Refuse to touch the target unless its SHA-256 matches
    pub expect_sha256: Option<String>,
}

impl Default for SpliceOptions {
    fn default() -> Self {
        Self {
            bounds: Bounds::Strict,
            atomic: true,
            dry_run: false,
            diff_context: None,
            expect_sha256: None,
        }
    }
}

/// What a splice did (or would do, on a dry run)
#[derive(Debug, Clone, Serialize)]
pub struct SpliceReport {
    pub target: PathBuf,
    pub replacement: PathBuf,
    pub range: LineRange,
    pub lines_before: usize,
    pub lines_removed: usize,
    pub lines_inserted: usize,
    pub lines_after: usize,
    pub sha256_before: String,
    pub sha256_after: String,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl SpliceReport {
    pub fn changed(&self) -> bool {
        self.sha256_before != self.sha256_after
    }
}

/// Splices the contents of one file into a line range of another
#[derive(Debug, Clone)]
pub struct Splicer {
    target: PathBuf,
    replacement: PathBuf,
    range: LineRange,
    options: SpliceOptions,
}

impl Splicer {
    pub fn new(
        target: impl Into<PathBuf>,
        replacement: impl Into<PathBuf>,
        range: LineRange,
    ) -> Self {
        Self {
            target: target.into(),
            replacement: replacement.into(),
            range,
            options: SpliceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SpliceOptions) -> Self {
        self.options = options;
        self
    }

    /// Read both files, splice, and overwrite the target.
    ///
    /// Both reads and all checks complete before the target is written.
    pub fn run(&self) -> SpliceResult<SpliceReport> {
        let source = read_text(&self.target)?;
        let replacement = read_text(&self.replacement)?;

        let sha256_before = sha256_hex(&source);
        if let Some(expected) = &self.options.expect_sha256 {
            if !expected.eq_ignore_ascii_case(&sha256_before) {
                return Err(SpliceError::checksum_mismatch(
                    &self.target,
                    expected.clone(),
                    sha256_before,
                ));
            }
            debug!("Checksum of {} verified", self.target.display());
        }

        let outcome = splice_lines(&source, &replacement, self.range, self.options.bounds)?;
        let sha256_after = sha256_hex(&outcome.content);

        let diff = self.options.diff_context.map(|context| {
            unified_diff(
                &source,
                &outcome.content,
                &self.target.to_string_lossy(),
                context,
            )
        });

        let written = if self.options.dry_run {
            info!("Dry run, leaving {} untouched", self.target.display());
            false
        } else {
            if self.options.atomic {
                write_atomic(&self.target, &outcome.content)?;
            } else {
                write_in_place(&self.target, &outcome.content)?;
            }
            info!(
                "Replaced lines {} of {} with {} ({} -> {} lines)",
                self.range,
                self.target.display(),
                self.replacement.display(),
                outcome.lines_before,
                outcome.lines_after
            );
            true
        };

        Ok(SpliceReport {
            target: self.target.clone(),
            replacement: self.replacement.clone(),
            range: self.range,
            lines_before: outcome.lines_before,
            lines_removed: outcome.lines_removed,
            lines_inserted: outcome.lines_inserted,
            lines_after: outcome.lines_after,
            sha256_before,
            sha256_after,
            written,
            diff,
        })
    }
}
