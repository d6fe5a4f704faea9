//! Session-scoped study tracking: record test scores per subject and unit,
//! then ask for averages, weak units and a next-step suggestion.

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod import;
pub mod models;
pub mod recommend;
pub mod report;
pub mod store;
pub mod weak;

pub use aggregate::{means_by, RecordFilter};
pub use catalog::Catalog;
pub use error::TrackerError;
pub use models::{
    AggregateRow, Grade, GroupField, Recommendation, StudyRecord, Subject, Tier,
    BY_GRADE_SUBJECT_UNIT, BY_SUBJECT, BY_SUBJECT_UNIT,
};
pub use recommend::{next_action, recommend, related_review};
pub use store::RecordStore;
pub use weak::{weak_units, DEFAULT_WEAK_THRESHOLD};
