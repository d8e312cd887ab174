//! Outcome of a render batch, independent of how it gets printed.

use crate::error::NetfigError;
use std::path::PathBuf;

/// A record that produced no output file.
#[derive(Debug)]
pub struct RecordFailure {
    pub row: usize,
    pub key: String,
    pub error: NetfigError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Directory holding the outputs once published.
    pub out_dir: PathBuf,
    /// Per-record file names, in input order. A repeated key appears twice.
    pub written: Vec<String>,
    /// Records whose template render failed.
    pub failed: Vec<RecordFailure>,
    /// Records whose key could not name a file.
    pub skipped: Vec<RecordFailure>,
    /// Combined file name, when one was written.
    pub combined: Option<String>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len() + self.skipped.len()
    }

    /// No record failed or was skipped.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    pub fn combined_path(&self) -> Option<PathBuf> {
        self.combined.as_ref().map(|c| self.out_dir.join(c))
    }
}
