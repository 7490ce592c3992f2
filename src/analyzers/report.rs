//! Assembly of the per-student [`ReportRecord`].

use crate::analyzers::summary::summarize;
use crate::analyzers::types::{ClassStatistics, NormalizedRow, ReportRecord};

const MISSING_CLASS: &str = "N/A";

/// Merges a normalized row with roster context into an export-ready record.
///
/// `class` is the statistics already computed for the whole roster; this
/// function never re-scans the roster. Pass `None` for a standalone report
/// without a class average.
pub fn assemble_report(
    row: &NormalizedRow,
    class: Option<&ClassStatistics>,
    comment: Option<String>,
) -> ReportRecord {
    let summary = summarize(&row.identity.name, row.scores());
    let total_score = summary.scores.iter().sum();

    ReportRecord {
        name: summary.name,
        student_class: row
            .identity
            .student_class
            .clone()
            .unwrap_or_else(|| MISSING_CLASS.to_string()),
        days_present: row.identity.days_present,
        days_absent: row.identity.days_absent,
        subjects: row.subjects.clone(),
        total_score,
        average: summary.average,
        class_average: class.map(|c| c.class_average),
        grade: summary.grade,
        comment,
    }
}
