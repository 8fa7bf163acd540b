//! Load report types.

use crate::types::Violation;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Why a line (or the whole source) could not be loaded.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LoadIssue {
    #[error("Bad columns at line {line} (expected {expected})")]
    BadColumns { line: usize, expected: usize },

    #[error("Bad numeric values at line {line}")]
    BadNumbers { line: usize },

    #[error("Validation failed at line {line}: {}", join_violations(.reasons))]
    Validation { line: usize, reasons: Vec<Violation> },

    #[error("Add failed at line {line} (duplicate ID or invalid data).")]
    AddFailed { line: usize },

    #[error("File not found: {path}")]
    SourceNotFound { path: String },

    #[error("Unexpected: cannot read {path}: {message}")]
    SourceUnreadable { path: String, message: String },

    #[error("Unexpected: {message}")]
    Read { line: usize, message: String },
}

impl LoadIssue {
    /// 1-based line the issue refers to, if it is about a single line.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadIssue::BadColumns { line, .. }
            | LoadIssue::BadNumbers { line }
            | LoadIssue::Validation { line, .. }
            | LoadIssue::AddFailed { line }
            | LoadIssue::Read { line, .. } => Some(*line),
            LoadIssue::SourceNotFound { .. } | LoadIssue::SourceUnreadable { .. } => None,
        }
    }
}

fn join_violations(reasons: &[Violation]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a bulk load: how many rows made it in, and what went wrong
/// with the rest, in source order.
///
/// The shape is the same whether the source was unreadable or individual
/// rows were bad, so callers always look at the same two fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Rows added to the store.
    pub loaded: usize,

    /// Problems encountered, in the order they were found.
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<LoadIssue>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary, e.g. `Loaded=3, Errors=1`.
    pub fn summary(&self) -> String {
        format!("Loaded={}, Errors={}", self.loaded, self.errors.len())
    }

    /// Error messages in order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// True when nothing went wrong.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())?;
        if !self.errors.is_empty() {
            write!(f, " {}", self.messages().join(" | "))?;
        }
        Ok(())
    }
}

fn serialize_messages<S: Serializer>(
    errors: &[LoadIssue],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}
