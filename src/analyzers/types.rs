//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::fmt;

/// A single record as read from the tabular source.
///
/// Field order is preserved; a `None` value means the cell was absent
/// (e.g. a short CSV row).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: Vec<(String, Option<String>)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.fields.push((name.into(), value));
    }

    /// Builder-style variant of [`RawRow::push`] for present values.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.push(name, Some(value.to_string()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Letter grade assigned from an average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and attendance metadata pulled out of a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub name: String,
    pub student_class: Option<String>,
    pub days_present: Option<u32>,
    pub days_absent: Option<u32>,
}

/// One validated subject score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectScore {
    pub name: String,
    pub score: f64,
}

/// A subject cell that was present but could not be parsed as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedCell {
    pub field: String,
    pub value: String,
}

/// A row after the normalizer has resolved its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub identity: Identity,
    pub subjects: Vec<SubjectScore>,
    pub rejected: Vec<RejectedCell>,
}

impl NormalizedRow {
    /// Scores in column order.
    pub fn scores(&self) -> Vec<f64> {
        self.subjects.iter().map(|s| s.score).collect()
    }

    /// `false` when the student has no valid subject scores at all.
    pub fn is_gradable(&self) -> bool {
        !self.subjects.is_empty()
    }
}

/// A student's average and grade over their valid scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub name: String,
    pub scores: Vec<f64>,
    pub average: f64,
    pub grade: Grade,
}

/// Per-subject totals across the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAggregate {
    pub subject: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

/// Subject averages in first-seen column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubjectStatistics {
    pub(crate) subjects: Vec<SubjectAggregate>,
}

impl SubjectStatistics {
    pub fn get(&self, subject: &str) -> Option<&SubjectAggregate> {
        self.subjects.iter().find(|s| s.subject == subject)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectAggregate> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// Roster-wide statistics over every graded student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStatistics {
    pub student_count: usize,
    pub class_average: f64,
    pub top: StudentSummary,
    pub bottom: StudentSummary,
}

/// Export-ready view of one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    pub name: String,
    pub student_class: String,
    pub days_present: Option<u32>,
    pub days_absent: Option<u32>,
    pub subjects: Vec<SubjectScore>,
    pub total_score: f64,
    pub average: f64,
    pub class_average: Option<f64>,
    pub grade: Grade,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_preserves_order() {
        let row = RawRow::new().with("name", "Ada").with("math", "90");
        let names: Vec<_> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["name", "math"]);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(Grade::A.to_string(), "A");
        assert_eq!(Grade::F.as_str(), "F");
    }

    #[test]
    fn test_subject_statistics_lookup() {
        let stats = SubjectStatistics {
            subjects: vec![SubjectAggregate {
                subject: "math".to_string(),
                total: 120.0,
                count: 2,
                average: 60.0,
            }],
        };
        assert_eq!(stats.get("math").map(|s| s.count), Some(2));
        assert!(stats.get("art").is_none());
    }
}
