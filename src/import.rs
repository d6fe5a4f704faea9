use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, TrackerError};
use crate::models::{Grade, StudyRecord, Subject};
use crate::store::RecordStore;

const SAMPLE_CSV: &str = "\
date,grade,subject,unit,score
2026-04-08,Grade3,Math,Multiplication,88
2026-04-10,Grade3,Japanese,Kanji Grade 3,74
2026-04-15,Grade3,Science,Insects,92
2026-04-17,Grade3,Math,Division,55
2026-04-22,Grade3,English,Alphabet,96
2026-04-24,Grade3,Social Studies,Maps and Symbols,63
2026-05-01,Grade3,Math,Division,62
2026-05-08,Grade3,Science,Magnets,58
2026-05-13,Grade3,Japanese,Dictionary Skills,81
2026-05-20,Grade3,Math,Fractions,47
2026-05-22,Grade3,Social Studies,Local Shops,70
2026-05-29,Grade3,Math,Fractions,59
";

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    grade: String,
    subject: String,
    #[serde(default)]
    unit: Option<String>,
    score: i64,
}

impl CsvRow {
    fn into_record(self) -> std::result::Result<StudyRecord, TrackerError> {
        let grade: Grade = self.grade.parse()?;
        let subject: Subject = self.subject.parse()?;
        Ok(StudyRecord::new(
            self.date,
            grade,
            subject,
            self.unit.as_deref().unwrap_or_default(),
            self.score,
        ))
    }
}

/// Parses `date,grade,subject,unit,score` rows. Row numbers in errors count
/// data rows from 1.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<StudyRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let parsed = result.map_err(|err| TrackerError::Csv {
            row,
            source: Box::new(err),
        })?;
        let record = parsed.into_record().map_err(|err| TrackerError::Csv {
            row,
            source: Box::new(err),
        })?;
        records.push(record);
    }

    Ok(records)
}

pub fn import_csv(store: &mut RecordStore, csv_path: &Path) -> Result<usize> {
    let file = File::open(csv_path).map_err(|source| TrackerError::Io {
        path: csv_path.display().to_string(),
        source,
    })?;
    let records = read_records(file)?;
    let inserted = records.len();
    store.extend(records);

    info!(
        session = %store.session_id(),
        inserted,
        path = %csv_path.display(),
        "imported study records"
    );
    Ok(inserted)
}

/// A term of Grade 3 results, used for demos.
pub fn sample_records() -> Result<Vec<StudyRecord>> {
    read_records(SAMPLE_CSV.as_bytes())
}

pub fn load_sample(store: &mut RecordStore) -> Result<usize> {
    let records = sample_records()?;
    let inserted = records.len();
    store.extend(records);
    info!(session = %store.session_id(), inserted, "loaded sample records");
    Ok(inserted)
}
