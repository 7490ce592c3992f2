use crate::analyzers::types::Grade;

/// Converts an average score (0–100) into a letter grade.
///
/// | Range   | Grade |
/// |---------|-------|
/// | >= 70   | A     |
/// | >= 60   | B     |
/// | >= 50   | C     |
/// | >= 45   | D     |
/// | >= 40   | E     |
/// | < 40    | F     |
pub fn grade(average: f64) -> Grade {
    match average {
        a if a >= 70.0 => Grade::A,
        a if a >= 60.0 => Grade::B,
        a if a >= 50.0 => Grade::C,
        a if a >= 45.0 => Grade::D,
        a if a >= 40.0 => Grade::E,
        _ => Grade::F,
    }
}
