use crate::aggregate::means_by;
use crate::models::{clamp_score, AggregateRow, GroupField, StudyRecord};

pub const DEFAULT_WEAK_THRESHOLD: u8 = 60;

/// Groups whose mean falls below `threshold`, worst first. The threshold is
/// clamped to 0..=100.
pub fn weak_units(
    records: &[StudyRecord],
    fields: &[GroupField],
    threshold: i64,
) -> Vec<AggregateRow> {
    let threshold = f64::from(clamp_score(threshold));
    let mut rows: Vec<AggregateRow> = means_by(records, fields)
        .into_iter()
        .filter(|row| row.avg_score < threshold)
        .collect();

    rows.sort_by(|a, b| a.avg_score.total_cmp(&b.avg_score));
    rows
}
