//! CLI entry point for the gradebook reporter.
//!
//! Provides subcommands for summarizing a single student's scores, processing
//! a class roster CSV into a summary sheet, and rendering per-student reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gradebook_reporter::GradebookError;
use gradebook_reporter::analyzers::analyzer::{RosterAnalysis, analyze_roster};
use gradebook_reporter::analyzers::summary::{parse_scores, summarize};
use gradebook_reporter::config::CommentBook;
use gradebook_reporter::output::{
    WriteOutcome, print_json, print_pretty, write_json, write_summaries,
};
use gradebook_reporter::parser::read_roster;
use gradebook_reporter::render::{ReportFileNamer, ReportFormat};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook_reporter")]
#[command(about = "Summarize class score sheets and produce student reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one student from a comma-separated score list
    Summarize {
        /// Student name
        #[arg(short, long)]
        name: String,

        /// Scores separated by commas, e.g. "70, 65, 80"
        #[arg(short, long)]
        scores: String,
    },
    /// Process a roster CSV into per-student summaries and class statistics
    Process {
        /// Roster CSV with a header row
        #[arg(value_name = "CSV", default_value = "students_scores.csv")]
        input: PathBuf,

        /// CSV file to write the summary sheet to
        #[arg(short, long, default_value = "summaries.csv")]
        output: PathBuf,

        /// Optional: write class and subject statistics as JSON
        #[arg(long)]
        stats_json: Option<PathBuf>,

        /// Also log class and subject statistics as pretty JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render one report document per student
    Reports {
        /// Roster CSV with a header row
        #[arg(value_name = "CSV", default_value = "students_scores.csv")]
        input: PathBuf,

        /// Directory to write reports into
        #[arg(short = 'd', long, default_value = "reports")]
        out_dir: PathBuf,

        /// Document format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Optional: JSON file mapping student names to teacher comments
        #[arg(short, long)]
        comments: Option<PathBuf>,

        /// Leave the class average out of each report
        #[arg(long, default_value_t = false)]
        no_class_context: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/gradebook_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize { name, scores } => summarize_one(&name, &scores)?,
        Commands::Process {
            input,
            output,
            stats_json,
            json,
        } => {
            if let Some(analysis) = load_and_analyze(&input)? {
                process_roster(&analysis, &output, stats_json.as_deref(), json)?;
            }
        }
        Commands::Reports {
            input,
            out_dir,
            format,
            comments,
            no_class_context,
        } => {
            if let Some(analysis) = load_and_analyze(&input)? {
                let comments = match comments {
                    Some(path) => CommentBook::load(&path)?,
                    None => CommentBook::default(),
                };
                render_reports(&analysis, &out_dir, format, &comments, !no_class_context)?;
            }
        }
    }

    Ok(())
}

/// Parses a score list and logs the resulting summary.
#[tracing::instrument(skip(scores))]
fn summarize_one(name: &str, scores: &str) -> Result<()> {
    let scores = parse_scores(scores)?;
    if scores.is_empty() {
        warn!("No valid scores entered");
        return Ok(());
    }

    let summary = summarize(name, scores);
    info!(
        name = %summary.name,
        scores = ?summary.scores,
        average = %format!("{:.2}", summary.average),
        grade = %summary.grade,
        "Student summary"
    );
    Ok(())
}

/// Reads and analyzes a roster. `Ok(None)` means there was nothing to report.
#[tracing::instrument(fields(input = %input.display()))]
fn load_and_analyze(input: &Path) -> Result<Option<RosterAnalysis>> {
    let rows = read_roster(input)?;

    match analyze_roster(&rows) {
        Ok(analysis) => Ok(Some(analysis)),
        Err(GradebookError::EmptyRoster) => {
            warn!(rows = rows.len(), "No students to report");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(analysis), fields(output = %output.display()))]
fn process_roster(
    analysis: &RosterAnalysis,
    output: &Path,
    stats_json: Option<&Path>,
    json: bool,
) -> Result<()> {
    print_pretty(&analysis.summaries);

    for summary in &analysis.summaries {
        info!(
            name = %summary.name,
            scores = ?summary.scores,
            average = %format!("{:.2}", summary.average),
            grade = %summary.grade,
            "Student summary"
        );
    }

    for subject in analysis.subjects.iter() {
        info!(
            subject = %subject.subject,
            students = subject.count,
            average = %format!("{:.2}", subject.average),
            "Subject average"
        );
    }

    let class = &analysis.class;
    info!(
        students = class.student_count,
        skipped = analysis.skipped.len(),
        class_average = %format!("{:.2}", class.class_average),
        top = %class.top.name,
        top_average = %format!("{:.2}", class.top.average),
        bottom = %class.bottom.name,
        bottom_average = %format!("{:.2}", class.bottom.average),
        "Class statistics"
    );

    if let WriteOutcome::Written { rows } = write_summaries(output, &analysis.summaries)? {
        info!(rows, "Report written to {}", output.display());
    }

    if json {
        print_json(&analysis.class_report())?;
    }

    if let Some(path) = stats_json {
        write_json(path, &analysis.class_report())?;
        info!(path = %path.display(), "Class statistics written");
    }

    Ok(())
}

#[tracing::instrument(skip(analysis, comments), fields(out_dir = %out_dir.display()))]
fn render_reports(
    analysis: &RosterAnalysis,
    out_dir: &Path,
    format: ReportFormat,
    comments: &CommentBook,
    with_class_context: bool,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let renderer = format.renderer();

    let mut namer = ReportFileNamer::default();

    let reports = analysis.reports(comments, with_class_context);
    for report in &reports {
        let path = out_dir.join(namer.next_name(&report.name, renderer.extension()));
        renderer.render(report, &path)?;
        info!(student = %report.name, path = %path.display(), "Report saved");
    }

    info!(reports = reports.len(), "Finished rendering reports");
    Ok(())
}
