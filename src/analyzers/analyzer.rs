use crate::analyzers::aggregate::{aggregate_class, aggregate_subjects};
use crate::analyzers::normalize::normalize_row;
use crate::analyzers::report::assemble_report;
use crate::analyzers::summary::summarize;
use crate::analyzers::types::{
    ClassStatistics, NormalizedRow, RawRow, RejectedCell, ReportRecord, StudentSummary,
    SubjectStatistics,
};
use crate::config::CommentBook;
use crate::error::GradebookError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// A student left out of aggregation because no subject score was usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedStudent {
    pub name: String,
    pub rejected: Vec<RejectedCell>,
}

/// Everything derived from one roster.
///
/// `students` and `summaries` are parallel and in input order.
#[derive(Debug, Clone)]
pub struct RosterAnalysis {
    pub students: Vec<NormalizedRow>,
    pub summaries: Vec<StudentSummary>,
    pub skipped: Vec<SkippedStudent>,
    pub subjects: SubjectStatistics,
    pub class: ClassStatistics,
}

/// Roster-level export: class and subject statistics plus the skip list.
#[derive(Debug, Serialize)]
pub struct ClassReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub class: &'a ClassStatistics,
    pub subjects: &'a SubjectStatistics,
    pub skipped: &'a [SkippedStudent],
}

/// Runs the full pipeline over a roster.
///
/// Every row is normalized and summarized first; students without any
/// valid score are set aside. Subject and class statistics are then
/// computed once over the remaining students.
///
/// # Errors
///
/// Returns [`GradebookError::EmptyRoster`] when there are no rows or every
/// student was skipped.
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub fn analyze_roster(rows: &[RawRow]) -> Result<RosterAnalysis, GradebookError> {
    let mut students = Vec::new();
    let mut summaries = Vec::new();
    let mut skipped = Vec::new();

    for row in rows {
        let normalized = normalize_row(row);

        if !normalized.is_gradable() {
            warn!(
                student = %normalized.identity.name,
                rejected = normalized.rejected.len(),
                "No valid scores found, skipping student"
            );
            skipped.push(SkippedStudent {
                name: normalized.identity.name,
                rejected: normalized.rejected,
            });
            continue;
        }

        summaries.push(summarize(&normalized.identity.name, normalized.scores()));
        students.push(normalized);
    }

    let class = aggregate_class(&summaries)?;
    let subjects = aggregate_subjects(&students);

    info!(
        students = class.student_count,
        skipped = skipped.len(),
        subjects = subjects.len(),
        class_average = class.class_average,
        "Roster analyzed"
    );

    Ok(RosterAnalysis {
        students,
        summaries,
        skipped,
        subjects,
        class,
    })
}

impl RosterAnalysis {
    /// Builds one report per graded student, reusing the roster's class statistics.
    pub fn reports(&self, comments: &CommentBook, with_class_context: bool) -> Vec<ReportRecord> {
        let class = with_class_context.then_some(&self.class);

        self.students
            .iter()
            .map(|student| {
                let comment = comments.comment_for(&student.identity.name).map(str::to_string);
                assemble_report(student, class, comment)
            })
            .collect()
    }

    pub fn class_report(&self) -> ClassReport<'_> {
        ClassReport {
            generated_at: Utc::now(),
            class: &self.class,
            subjects: &self.subjects,
            skipped: &self.skipped,
        }
    }
}
