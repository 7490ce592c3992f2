use crate::analyzers::types::{
    ClassStatistics, NormalizedRow, StudentSummary, SubjectAggregate, SubjectStatistics,
};
use crate::analyzers::utility::mean;
use crate::error::GradebookError;
use std::collections::HashMap;

/// Accumulates per-subject totals over every normalized row in one pass.
///
/// Rows need not share a subject set; a subject only counts the rows it
/// appears in. Output keeps the order in which subjects were first seen.
pub fn aggregate_subjects<'a, I>(rows: I) -> SubjectStatistics
where
    I: IntoIterator<Item = &'a NormalizedRow>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64, usize)> = Vec::new();

    for row in rows {
        for subject in &row.subjects {
            let slot = *index.entry(subject.name.as_str()).or_insert_with(|| {
                totals.push((subject.name.as_str(), 0.0, 0));
                totals.len() - 1
            });
            let entry = &mut totals[slot];
            entry.1 += subject.score;
            entry.2 += 1;
        }
    }

    let subjects = totals
        .into_iter()
        .filter(|(_, _, count)| *count > 0)
        .map(|(name, total, count)| SubjectAggregate {
            subject: name.to_string(),
            total,
            count,
            average: total / count as f64,
        })
        .collect();

    SubjectStatistics { subjects }
}

/// Reduces a roster's summaries to class-wide statistics.
///
/// Ties for top or bottom go to the student listed first.
///
/// # Errors
///
/// Returns [`GradebookError::EmptyRoster`] when `summaries` is empty.
pub fn aggregate_class(summaries: &[StudentSummary]) -> Result<ClassStatistics, GradebookError> {
    let first = summaries.first().ok_or(GradebookError::EmptyRoster)?;

    let mut top = first;
    let mut bottom = first;
    for summary in &summaries[1..] {
        if summary.average > top.average {
            top = summary;
        }
        if summary.average < bottom.average {
            bottom = summary;
        }
    }

    let averages: Vec<f64> = summaries.iter().map(|s| s.average).collect();

    Ok(ClassStatistics {
        student_count: summaries.len(),
        class_average: mean(&averages),
        top: top.clone(),
        bottom: bottom.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::normalize::normalize_row;
    use crate::analyzers::summary::summarize;
    use crate::analyzers::types::RawRow;

    fn rows(raw: Vec<RawRow>) -> Vec<NormalizedRow> {
        raw.iter().map(normalize_row).collect()
    }

    #[test]
    fn test_subject_average_only_counts_present_rows() {
        let rows = rows(vec![
            RawRow::new().with("name", "A").with("math", "70").with("art", "90"),
            RawRow::new().with("name", "B").with("math", "50"),
            RawRow::new().with("name", "C").with("math", "60").with("art", ""),
        ]);

        let stats = aggregate_subjects(&rows);
        let math = stats.get("math").unwrap();
        assert_eq!(math.count, 3);
        assert!((math.average - 60.0).abs() < 1e-9);

        let art = stats.get("art").unwrap();
        assert_eq!(art.count, 1);
        assert!((art.total - 90.0).abs() < 1e-9);
        assert!((art.average - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_subject_never_present_is_omitted() {
        let rows = rows(vec![
            RawRow::new().with("name", "A").with("math", "70").with("music", ""),
            RawRow::new().with("name", "B").with("music", "n/a"),
        ]);

        let stats = aggregate_subjects(&rows);
        assert_eq!(stats.len(), 1);
        assert!(stats.get("music").is_none());
    }

    #[test]
    fn test_subjects_in_first_seen_order() {
        let rows = rows(vec![
            RawRow::new().with("name", "A").with("eng", "70"),
            RawRow::new().with("name", "B").with("math", "50").with("eng", "60"),
            RawRow::new().with("name", "C").with("bio", "55"),
        ]);

        let order: Vec<_> = aggregate_subjects(&rows)
            .iter()
            .map(|s| s.subject.clone())
            .collect();
        assert_eq!(order, vec!["eng", "math", "bio"]);
    }

    #[test]
    fn test_empty_roster_is_an_error() {
        assert_eq!(aggregate_class(&[]), Err(GradebookError::EmptyRoster));
    }

    #[test]
    fn test_class_statistics() {
        let summaries = vec![
            summarize("A", vec![70.0, 80.0]),
            summarize("B", vec![50.0, 40.0]),
            summarize("C", vec![60.0]),
        ];

        let stats = aggregate_class(&summaries).unwrap();
        assert_eq!(stats.student_count, 3);
        assert!((stats.class_average - 60.0).abs() < 1e-9);
        assert_eq!(stats.top.name, "A");
        assert_eq!(stats.bottom.name, "B");
    }

    #[test]
    fn test_ties_resolve_to_first_student() {
        let summaries = vec![
            summarize("First", vec![80.0]),
            summarize("Low", vec![30.0]),
            summarize("Second", vec![80.0]),
            summarize("AlsoLow", vec![30.0]),
        ];

        let stats = aggregate_class(&summaries).unwrap();
        assert_eq!(stats.top.name, "First");
        assert_eq!(stats.bottom.name, "Low");
    }

    #[test]
    fn test_single_student_is_top_and_bottom() {
        let summaries = vec![summarize("Solo", vec![42.0])];
        let stats = aggregate_class(&summaries).unwrap();
        assert_eq!(stats.top, stats.bottom);
        assert_eq!(stats.class_average, 42.0);
    }
}
