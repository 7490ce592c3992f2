/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
///
/// Uses a running mean so large finite inputs do not overflow to infinity.
pub fn mean(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, v)| acc + (v - acc) / (i + 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert!((mean(&[70.0, 65.5, 80.0]) - 71.833_333).abs() < 1e-5);
        assert_eq!(mean(&[70.0, 80.0]), 75.0);
    }

    #[test]
    fn test_mean_of_huge_values_stays_finite() {
        assert_eq!(mean(&[1e308, 1e308]), 1e308);
        assert!(mean(&[f64::MAX, f64::MAX, f64::MAX]).is_finite());
    }
}
