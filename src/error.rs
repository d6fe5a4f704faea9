use thiserror::Error;

use crate::models::{Grade, Subject};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("no study records yet; add a record before asking for a recommendation")]
    EmptyStore,

    #[error("no units registered for {grade} {subject}")]
    NotFound { grade: Grade, subject: Subject },

    #[error("unknown grade: {0:?} (expected Grade1..Grade6)")]
    InvalidGrade(String),

    #[error("unknown subject: {0:?}")]
    InvalidSubject(String),

    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
