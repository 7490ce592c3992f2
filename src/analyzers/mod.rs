//! Score normalization, grading and roster aggregation.
//!
//! This module turns raw CSV rows into validated per-student scores,
//! computes averages and letter grades, aggregates subject and class
//! statistics, and assembles the per-student report records.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod normalize;
pub mod report;
pub mod summary;
pub mod types;
pub mod utility;
