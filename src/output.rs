//! Output formatting and persistence for student summaries.
//!
//! Supports pretty-printing, JSON serialization, and the CSV summary sheet.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::StudentSummary;

/// Delimiter between scores in the `scores` column.
pub const SCORE_SEPARATOR: &str = ", ";

/// One line of the summary sheet. Field order is the column order.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    average: String,
    grade: &'a str,
    scores: String,
}

impl<'a> From<&'a StudentSummary> for SummaryRow<'a> {
    fn from(summary: &'a StudentSummary) -> Self {
        Self {
            name: &summary.name,
            average: format!("{:.2}", summary.average),
            grade: summary.grade.as_str(),
            scores: summary
                .scores
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(SCORE_SEPARATOR),
        }
    }
}

/// Result of writing the summary sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { rows: usize },
    /// Nothing to write; no file was created.
    Skipped,
}

/// Logs summaries using Rust's debug pretty-print format.
pub fn print_pretty(summaries: &[StudentSummary]) {
    debug!("{:#?}", summaries);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `value` as pretty JSON to `path`, replacing any existing file.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

/// Writes the summary sheet with columns `name,average,grade,scores`.
///
/// An empty slice is a no-op and reports [`WriteOutcome::Skipped`].
pub fn write_summaries(path: &Path, summaries: &[StudentSummary]) -> Result<WriteOutcome> {
    if summaries.is_empty() {
        info!(path = %path.display(), "No summaries to write");
        return Ok(WriteOutcome::Skipped);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for summary in summaries {
        writer.serialize(SummaryRow::from(summary))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = summaries.len(), "Summary sheet written");
    Ok(WriteOutcome::Written {
        rows: summaries.len(),
    })
}
