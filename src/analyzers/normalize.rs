//! Resolves a schema-less [`RawRow`] into identity metadata and subject scores.

use crate::analyzers::types::{Identity, NormalizedRow, RawRow, RejectedCell, SubjectScore};
use tracing::{debug, warn};

const UNKNOWN_NAME: &str = "Unknown";

/// The recognized identity columns. Everything else is a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentityField {
    Name,
    Class,
    DaysPresent,
    DaysAbsent,
}

impl IdentityField {
    fn classify(field: &str) -> Option<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "class" => Some(Self::Class),
            "days_present" => Some(Self::DaysPresent),
            "days_absent" => Some(Self::DaysAbsent),
            _ => None,
        }
    }
}

/// Returns `Some(trimmed)` for a present, non-blank cell.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_score(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_attendance(student: &str, field: &str, value: Option<&str>) -> Option<u32> {
    let value = value?;
    let parsed = value.parse::<u32>().ok();
    if parsed.is_none() {
        warn!(student, field, value, "Ignoring unparsable attendance count");
    }
    parsed
}

/// Splits a row into identity fields and validated subject scores.
///
/// Blank subject cells are skipped silently. Cells that do not parse as a
/// finite number are skipped with a warning and recorded in
/// [`NormalizedRow::rejected`].
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    let mut name = None;
    let mut student_class = None;
    let mut days_present = None;
    let mut days_absent = None;
    let mut cells = Vec::new();

    for (field, value) in row.iter() {
        match IdentityField::classify(field) {
            Some(IdentityField::Name) => name = non_blank(value).map(str::to_string),
            Some(IdentityField::Class) => student_class = non_blank(value).map(str::to_string),
            Some(IdentityField::DaysPresent) => days_present = non_blank(value),
            Some(IdentityField::DaysAbsent) => days_absent = non_blank(value),
            None => cells.push((field.trim(), value)),
        }
    }

    let name = name.unwrap_or_else(|| UNKNOWN_NAME.to_string());

    let days_present = parse_attendance(&name, "days_present", days_present);
    let days_absent = parse_attendance(&name, "days_absent", days_absent);

    let mut subjects = Vec::new();
    let mut rejected = Vec::new();

    for (field, value) in cells {
        let Some(value) = non_blank(value) else {
            debug!(student = %name, field, "Skipping blank subject cell");
            continue;
        };

        match parse_score(value) {
            Some(score) => subjects.push(SubjectScore {
                name: field.to_string(),
                score,
            }),
            None => {
                warn!(student = %name, field, value, "Skipping non-numeric subject score");
                rejected.push(RejectedCell {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    NormalizedRow {
        identity: Identity {
            name,
            student_class,
            days_present,
            days_absent,
        },
        subjects,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_fields_are_case_insensitive() {
        let row = RawRow::new()
            .with("Name", " Ada ")
            .with("CLASS", "JSS2")
            .with("Days_Present", "58")
            .with("days_absent", "2")
            .with("Math", "88");

        let normalized = normalize_row(&row);
        assert_eq!(normalized.identity.name, "Ada");
        assert_eq!(normalized.identity.student_class.as_deref(), Some("JSS2"));
        assert_eq!(normalized.identity.days_present, Some(58));
        assert_eq!(normalized.identity.days_absent, Some(2));
        assert_eq!(normalized.subjects.len(), 1);
        assert_eq!(normalized.subjects[0].name, "Math");
    }

    #[test]
    fn test_subjects_keep_column_order() {
        let row = RawRow::new()
            .with("eng", "80")
            .with("name", "A")
            .with("math", "70.5");

        let normalized = normalize_row(&row);
        let names: Vec<_> = normalized.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["eng", "math"]);
        assert_eq!(normalized.scores(), vec![80.0, 70.5]);
    }

    #[test]
    fn test_blank_and_absent_cells_are_skipped_quietly() {
        let mut row = RawRow::new().with("name", "B").with("math", "  ");
        row.push("eng", None);
        row.push("art", Some("61".to_string()));

        let normalized = normalize_row(&row);
        assert_eq!(normalized.scores(), vec![61.0]);
        assert!(normalized.rejected.is_empty());
    }

    #[test]
    fn test_non_numeric_cells_are_rejected() {
        let row = RawRow::new()
            .with("name", "C")
            .with("math", "x")
            .with("eng", "inf");

        let normalized = normalize_row(&row);
        assert!(!normalized.is_gradable());
        assert_eq!(normalized.rejected.len(), 2);
        assert_eq!(normalized.rejected[0].field, "math");
        assert_eq!(normalized.rejected[0].value, "x");
    }

    #[test]
    fn test_missing_identity_defaults() {
        let row = RawRow::new()
            .with("name", "")
            .with("days_present", "many")
            .with("math", "50");

        let normalized = normalize_row(&row);
        assert_eq!(normalized.identity.name, "Unknown");
        assert_eq!(normalized.identity.student_class, None);
        assert_eq!(normalized.identity.days_present, None);
        assert_eq!(normalized.identity.days_absent, None);
        assert!(normalized.is_gradable());
    }
}
