//! Per-student report documents.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::ReportRecord;
use crate::output::write_json;

const TITLE: &str = "Student Performance Report";
const SUBJECT_COLUMN_WIDTH: usize = 24;

/// Anything that can turn a [`ReportRecord`] into a file.
pub trait DocumentRenderer {
    /// File extension used for documents produced by this renderer.
    fn extension(&self) -> &'static str;

    fn render(&self, record: &ReportRecord, path: &Path) -> Result<()>;
}

/// Output format selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn renderer(self) -> Box<dyn DocumentRenderer> {
        match self {
            ReportFormat::Text => Box::new(TextRenderer),
            ReportFormat::Json => Box::new(JsonRenderer),
        }
    }
}

/// Fixed-layout plain-text report card.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_to_string(&self, record: &ReportRecord) -> String {
        let mut out = String::new();
        let rule = "-".repeat(SUBJECT_COLUMN_WIDTH + 12);

        let _ = writeln!(out, "{TITLE}");
        let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
        let _ = writeln!(out);
        let _ = writeln!(out, "Student Name : {}", record.name);
        let _ = writeln!(out, "Class        : {}", record.student_class);

        if let (Some(present), Some(absent)) = (record.days_present, record.days_absent) {
            let _ = writeln!(out, "Days Present : {present}");
            let _ = writeln!(out, "Days Absent  : {absent}");
        }

        let _ = writeln!(out, "Grade        : {}", record.grade);
        let _ = writeln!(out);

        let _ = writeln!(out, "{:<width$} | Score", "Subject", width = SUBJECT_COLUMN_WIDTH);
        let _ = writeln!(out, "{rule}");
        for subject in &record.subjects {
            let _ = writeln!(
                out,
                "{:<width$} | {}",
                subject.name,
                subject.score,
                width = SUBJECT_COLUMN_WIDTH
            );
        }
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);

        let _ = writeln!(out, "Total Score        : {:.2}", record.total_score);
        let _ = writeln!(out, "Student Average    : {:.2}", record.average);
        if let Some(class_average) = record.class_average {
            let _ = writeln!(out, "Class Average      : {class_average:.2}");
        }

        if let Some(comment) = record.comment.as_deref().filter(|c| !c.is_empty()) {
            let _ = writeln!(out);
            let _ = writeln!(out, "Teacher's Comment:");
            let _ = writeln!(out, "{comment}");
        }

        out
    }
}

impl DocumentRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, record: &ReportRecord, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_to_string(record))
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), student = %record.name, "Text report written");
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    report: &'a ReportRecord,
}

/// The record as pretty JSON with a generation timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, record: &ReportRecord, path: &Path) -> Result<()> {
        let document = ReportDocument {
            generated_at: Utc::now(),
            report: record,
        };
        write_json(path, &document)
    }
}

/// Turns a student name into a safe file stem.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();

    if stem.is_empty() {
        "student".to_string()
    } else {
        stem
    }
}

/// Hands out report file names that are unique within one run.
///
/// Repeated stems get `_2`, `_3`… and the suffix keeps growing until the
/// full file name has not been issued before.
#[derive(Debug, Default)]
pub struct ReportFileNamer {
    issued: HashSet<String>,
}

impl ReportFileNamer {
    pub fn next_name(&mut self, student: &str, extension: &str) -> String {
        let stem = file_stem(student);
        let mut candidate = format!("{stem}.{extension}");
        let mut suffix = 1;

        while self.issued.contains(&candidate) {
            suffix += 1;
            candidate = format!("{stem}_{suffix}.{extension}");
        }

        self.issued.insert(candidate.clone());
        candidate
    }
}
