//! Per-student average and grade.

use crate::analyzers::grade::grade;
use crate::analyzers::types::StudentSummary;
use crate::analyzers::utility::mean;
use crate::error::GradebookError;

/// Average of a student's scores; `0.0` when there are none.
pub fn average(scores: &[f64]) -> f64 {
    mean(scores)
}

/// Builds a [`StudentSummary`] from a name and its validated scores.
pub fn summarize(name: &str, scores: Vec<f64>) -> StudentSummary {
    let average = average(&scores);
    StudentSummary {
        name: name.to_string(),
        scores,
        average,
        grade: grade(average),
    }
}

/// Parses a comma-separated list such as `"70, 65.5, 80"`.
///
/// Blank entries are ignored. Any other entry that is not a finite number
/// fails the whole list.
pub fn parse_scores(input: &str) -> Result<Vec<f64>, GradebookError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GradebookError::InvalidScore(part.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Grade;

    #[test]
    fn test_average_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_average_values() {
        assert!((average(&[70.0, 65.5, 80.0]) - 71.8333).abs() < 1e-3);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize("John Doe", vec![75.0, 68.0, 80.0, 72.0]);
        assert_eq!(summary.name, "John Doe");
        assert_eq!(summary.scores.len(), 4);
        assert!((summary.average - 73.75).abs() < 1e-9);
        assert_eq!(summary.grade, Grade::A);
    }

    #[test]
    fn test_summarize_huge_scores() {
        let summary = summarize("Big", vec![1e308, 1e308]);
        assert_eq!(summary.average, 1e308);
        assert!(summary.average.is_finite());
    }

    #[test]
    fn test_summarize_no_scores() {
        let summary = summarize("Nobody", vec![]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.grade, Grade::F);
    }

    #[test]
    fn test_parse_scores_skips_blanks() {
        assert_eq!(parse_scores("70, 65.5,, 80 ").unwrap(), vec![70.0, 65.5, 80.0]);
        assert!(parse_scores("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_scores_rejects_text() {
        assert_eq!(
            parse_scores("70, abc"),
            Err(GradebookError::InvalidScore("abc".to_string()))
        );
        assert!(parse_scores("NaN").is_err());
    }
}
