use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, TrackerError};
use crate::models::{Grade, StudyRecord, Subject, MAX_SCORE};

/// Append-only record list for one session. Nothing here survives the process.
#[derive(Debug, Clone)]
pub struct RecordStore {
    session_id: Uuid,
    records: Vec<StudyRecord>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            records: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn append(&mut self, record: StudyRecord) {
        debug!(
            session = %self.session_id,
            date = %record.date,
            subject = %record.subject,
            unit = %record.unit,
            score = record.score,
            "appending study record"
        );
        self.records.push(record);
    }

    /// Form-style entry point: out-of-range scores are clamped, a blank unit
    /// becomes the "unspecified" sentinel.
    pub fn submit_record(
        &mut self,
        grade: Grade,
        subject: Subject,
        unit: &str,
        score: i64,
        date: NaiveDate,
    ) -> &StudyRecord {
        if !(0..=i64::from(MAX_SCORE)).contains(&score) {
            warn!(score, "score outside 0..=100, clamping");
        }
        self.append(StudyRecord::new(date, grade, subject, unit, score));
        &self.records[self.records.len() - 1]
    }

    pub fn all(&self) -> &[StudyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest date wins; on equal dates the record appended last wins.
    pub fn most_recent(&self) -> Result<&StudyRecord> {
        most_recent(&self.records).ok_or(TrackerError::EmptyStore)
    }
}

pub fn most_recent(records: &[StudyRecord]) -> Option<&StudyRecord> {
    // max_by_key returns the last of equal maxima
    records.iter().max_by_key(|record| record.date)
}

impl Extend<StudyRecord> for RecordStore {
    fn extend<I: IntoIterator<Item = StudyRecord>>(&mut self, iter: I) {
        for record in iter {
            self.append(record);
        }
    }
}
