use std::collections::{BTreeMap, BTreeSet};

use crate::models::{AggregateRow, Grade, GroupField, StudyRecord, Subject};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    grade: Option<Grade>,
    subject: Option<Subject>,
    unit: Option<String>,
}

impl GroupKey {
    fn of(record: &StudyRecord, fields: &[GroupField]) -> Self {
        let mut key = GroupKey {
            grade: None,
            subject: None,
            unit: None,
        };
        for field in fields {
            match field {
                GroupField::Grade => key.grade = Some(record.grade),
                GroupField::Subject => key.subject = Some(record.subject),
                GroupField::Unit => key.unit = Some(record.unit.clone()),
            }
        }
        key
    }
}

/// Mean score per distinct combination of `fields`, ordered by key.
pub fn means_by(records: &[StudyRecord], fields: &[GroupField]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<GroupKey, (u64, usize)> = BTreeMap::new();

    for record in records {
        let entry = groups.entry(GroupKey::of(record, fields)).or_insert((0, 0));
        entry.0 += u64::from(record.score);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(key, (total, count))| AggregateRow {
            grade: key.grade,
            subject: key.subject,
            unit: key.unit,
            avg_score: total as f64 / count as f64,
            count,
        })
        .collect()
}

/// Grade/subject selection. An empty list leaves that field unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub grades: Vec<Grade>,
    pub subjects: Vec<Subject>,
}

impl RecordFilter {
    pub fn new(grades: Vec<Grade>, subjects: Vec<Subject>) -> Self {
        Self { grades, subjects }
    }

    pub fn matches(&self, record: &StudyRecord) -> bool {
        (self.grades.is_empty() || self.grades.contains(&record.grade))
            && (self.subjects.is_empty() || self.subjects.contains(&record.subject))
    }

    pub fn apply(&self, records: &[StudyRecord]) -> Vec<StudyRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Oldest first; equal dates keep insertion order.
pub fn timeline(records: &[StudyRecord]) -> Vec<&StudyRecord> {
    let mut ordered: Vec<&StudyRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.date);
    ordered
}

/// Newest first; among equal dates the latest insert comes first.
pub fn history(records: &[StudyRecord]) -> Vec<&StudyRecord> {
    let mut ordered = timeline(records);
    ordered.reverse();
    ordered
}

pub fn distinct_grades(records: &[StudyRecord]) -> Vec<Grade> {
    let grades: BTreeSet<Grade> = records.iter().map(|record| record.grade).collect();
    grades.into_iter().collect()
}

pub fn distinct_subjects(records: &[StudyRecord]) -> Vec<Subject> {
    let subjects: BTreeSet<Subject> = records.iter().map(|record| record.subject).collect();
    subjects.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BY_GRADE_SUBJECT_UNIT, BY_SUBJECT, BY_SUBJECT_UNIT};
    use chrono::NaiveDate;

    fn record(day: u32, grade: Grade, subject: Subject, unit: &str, score: i64) -> StudyRecord {
        let date = NaiveDate::from_ymd_opt(2026, 6, day).unwrap();
        StudyRecord::new(date, grade, subject, unit, score)
    }

    fn mixed_records() -> Vec<StudyRecord> {
        vec![
            record(1, Grade::Grade3, Subject::Math, "Division", 80),
            record(2, Grade::Grade4, Subject::Math, "Division", 40),
            record(3, Grade::Grade3, Subject::Math, "Fractions", 70),
            record(4, Grade::Grade3, Subject::English, "Alphabet", 95),
            record(5, Grade::Grade3, Subject::Math, "Division", 66),
        ]
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(means_by(&[], BY_SUBJECT).is_empty());
        assert!(means_by(&[], BY_GRADE_SUBJECT_UNIT).is_empty());
    }

    #[test]
    fn fractions_average_is_sixty() {
        let records = vec![
            record(1, Grade::Grade4, Subject::Math, "Fractions", 50),
            record(2, Grade::Grade4, Subject::Math, "Fractions", 60),
            record(3, Grade::Grade4, Subject::Math, "Fractions", 70),
        ];
        let rows = means_by(&records, BY_SUBJECT_UNIT);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, Some(Subject::Math));
        assert_eq!(rows[0].unit.as_deref(), Some("Fractions"));
        assert_eq!(rows[0].grade, None);
        assert!((rows[0].avg_score - 60.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].count, 3);
    }

    #[test]
    fn groups_match_distinct_key_combinations() {
        let records = mixed_records();

        let by_subject = means_by(&records, BY_SUBJECT);
        assert_eq!(by_subject.len(), 2);

        let by_unit = means_by(&records, BY_SUBJECT_UNIT);
        let labels: Vec<String> = by_unit.iter().map(AggregateRow::label).collect();
        assert_eq!(labels, vec!["Math / Division", "Math / Fractions", "English / Alphabet"]);

        let by_grade = means_by(&records, BY_GRADE_SUBJECT_UNIT);
        assert_eq!(by_grade.len(), 4);
        assert_eq!(by_grade.iter().map(|row| row.count).sum::<usize>(), records.len());
    }

    #[test]
    fn averages_equal_member_means() {
        let records = mixed_records();
        for row in means_by(&records, BY_GRADE_SUBJECT_UNIT) {
            let members: Vec<&StudyRecord> = records
                .iter()
                .filter(|r| {
                    Some(r.grade) == row.grade
                        && Some(r.subject) == row.subject
                        && row.unit.as_deref() == Some(r.unit.as_str())
                })
                .collect();
            let mean =
                members.iter().map(|r| f64::from(r.score)).sum::<f64>() / members.len() as f64;
            assert_eq!(members.len(), row.count);
            assert!((row.avg_score - mean).abs() < 1e-9);
        }
    }

    #[test]
    fn subject_mean_spans_grades_and_units() {
        let rows = means_by(&mixed_records(), BY_SUBJECT);
        let math = rows.iter().find(|row| row.subject == Some(Subject::Math)).unwrap();
        assert!((math.avg_score - 64.0).abs() < 1e-9);
    }

    #[test]
    fn filter_restricts_by_grade_and_subject() {
        let records = mixed_records();

        assert_eq!(RecordFilter::default().apply(&records).len(), records.len());

        let grade3_math = RecordFilter::new(vec![Grade::Grade3], vec![Subject::Math]);
        assert_eq!(grade3_math.apply(&records).len(), 3);

        let science = RecordFilter::new(vec![], vec![Subject::Science]);
        assert!(science.apply(&records).is_empty());
    }

    #[test]
    fn timeline_and_history_are_mirror_images() {
        let mut records = mixed_records();
        records.push(record(1, Grade::Grade3, Subject::Science, "Magnets", 50));

        let oldest = timeline(&records);
        let ascending: Vec<&str> = oldest.iter().map(|r| r.unit.as_str()).collect();
        assert_eq!(
            ascending,
            vec!["Division", "Magnets", "Division", "Fractions", "Alphabet", "Division"]
        );

        let newest = history(&records);
        assert_eq!(newest[0].date.format("%d").to_string(), "05");
        assert_eq!(newest.last().unwrap().unit, "Division");
    }

    #[test]
    fn distinct_values_are_sorted() {
        let records = mixed_records();
        assert_eq!(distinct_grades(&records), vec![Grade::Grade3, Grade::Grade4]);
        assert_eq!(distinct_subjects(&records), vec![Subject::Math, Subject::English]);
    }
}
