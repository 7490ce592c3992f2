//! Error conditions the pipeline surfaces to its caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GradebookError {
    /// The tabular source does not exist; nothing can be processed.
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// No rows, or every student was skipped for lack of scores.
    #[error("no students to report")]
    EmptyRoster,

    /// A score list entry that is not a number.
    #[error("invalid score: {0:?}")]
    InvalidScore(String),
}
