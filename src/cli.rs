use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::aggregate::{means_by, RecordFilter};
use crate::catalog::Catalog;
use crate::import;
use crate::models::{
    AggregateRow, Grade, GroupField, Subject, BY_GRADE_SUBJECT_UNIT, BY_SUBJECT, BY_SUBJECT_UNIT,
};
use crate::recommend::{recommend, related_review};
use crate::report;
use crate::store::RecordStore;
use crate::weak::{weak_units, DEFAULT_WEAK_THRESHOLD};

#[derive(Parser)]
#[command(name = "study-tracker")]
#[command(about = "Per-subject test score tracker with review suggestions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// CSV with columns date,grade,subject,unit,score
    #[arg(long, env = "STUDY_TRACKER_CSV")]
    csv: Option<PathBuf>,
    /// Load the built-in sample term
    #[arg(long)]
    sample: bool,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long = "grade")]
    grades: Vec<Grade>,
    #[arg(long = "subject")]
    subjects: Vec<Subject>,
}

impl FilterArgs {
    fn to_filter(&self) -> RecordFilter {
        RecordFilter::new(self.grades.clone(), self.subjects.clone())
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Grouping {
    Subject,
    SubjectUnit,
    GradeSubjectUnit,
}

impl Grouping {
    fn fields(self) -> &'static [GroupField] {
        match self {
            Grouping::Subject => BY_SUBJECT,
            Grouping::SubjectUnit => BY_SUBJECT_UNIT,
            Grouping::GradeSubjectUnit => BY_GRADE_SUBJECT_UNIT,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog units for a grade and subject
    Units {
        #[arg(long)]
        grade: Grade,
        #[arg(long)]
        subject: Subject,
    },
    /// Show units related to a unit
    Related {
        #[arg(long)]
        unit: String,
    },
    /// Show the latest result and what to do next
    Latest {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Average scores grouped by subject, unit or grade
    Averages {
        #[command(flatten)]
        session: SessionArgs,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum, default_value = "subject-unit")]
        by: Grouping,
        #[arg(long)]
        json: bool,
    },
    /// List groups whose average falls below a threshold
    Weak {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long, value_enum, default_value = "subject-unit")]
        by: Grouping,
        #[arg(long, env = "STUDY_TRACKER_THRESHOLD", default_value_t = i64::from(DEFAULT_WEAK_THRESHOLD))]
        threshold: i64,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        session: SessionArgs,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, env = "STUDY_TRACKER_THRESHOLD", default_value_t = i64::from(DEFAULT_WEAK_THRESHOLD))]
        threshold: i64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_session(args: &SessionArgs) -> anyhow::Result<RecordStore> {
    let mut store = RecordStore::new();
    if args.sample {
        import::load_sample(&mut store).context("failed to load sample records")?;
    }
    if let Some(path) = &args.csv {
        import::import_csv(&mut store, path)
            .with_context(|| format!("failed to import {}", path.display()))?;
    }
    info!(session = %store.session_id(), records = store.len(), "session ready");
    Ok(store)
}

fn print_rows(rows: &[AggregateRow], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }
    for row in rows {
        println!("- {}: {:.1} across {} tests", row.label(), row.avg_score, row.count);
    }
    Ok(())
}

const EMPTY_SESSION: &str =
    "No study records yet. Pass --csv <file> or --sample to load test results.";

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Units { grade, subject } => {
            let units = Catalog::global().units_for_or_empty(grade, subject);
            if units.is_empty() {
                println!("No units registered for {grade} {subject}.");
            }
            for (index, unit) in units.iter().enumerate() {
                println!("{}. {}", index + 1, unit);
            }
        }
        Commands::Related { unit } => {
            let related = Catalog::global().related_to(&unit);
            if related.is_empty() {
                println!("No related units registered for {unit}.");
            } else {
                println!("Review before {unit}:");
                for name in related {
                    println!("- {name}");
                }
            }
        }
        Commands::Latest { session } => {
            let store = load_session(&session)?;
            if store.is_empty() {
                println!("{EMPTY_SESSION}");
                return Ok(());
            }
            let (latest, suggestion) = recommend(&store)?;
            println!(
                "Latest test: {} {} {} \"{}\" scored {}",
                latest.date, latest.grade, latest.subject, latest.unit, latest.score
            );
            println!("{}", suggestion.message);
            println!("Recommended action: {}", suggestion.action);

            let related = related_review(latest);
            if !related.is_empty() {
                println!("Related units: {}", related.join(", "));
            }
        }
        Commands::Averages {
            session,
            filter,
            by,
            json,
        } => {
            let store = load_session(&session)?;
            if store.is_empty() {
                println!("{EMPTY_SESSION}");
                return Ok(());
            }
            let records = filter.to_filter().apply(store.all());
            if records.is_empty() {
                println!("No records match the selected grades and subjects.");
                return Ok(());
            }
            print_rows(&means_by(&records, by.fields()), json)?;
        }
        Commands::Weak {
            session,
            by,
            threshold,
            json,
        } => {
            let store = load_session(&session)?;
            let rows = weak_units(store.all(), by.fields(), threshold);
            if rows.is_empty() && !json {
                println!("No groups average below {}.", threshold.clamp(0, 100));
                return Ok(());
            }
            print_rows(&rows, json)?;
        }
        Commands::Report {
            session,
            filter,
            threshold,
            out,
        } => {
            let store = load_session(&session)?;
            let report = report::build_report(store.all(), &filter.to_filter(), threshold);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
