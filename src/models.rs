use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TrackerError;

pub const UNSPECIFIED_UNIT: &str = "unspecified";
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
}

impl Grade {
    pub const ALL: [Grade; 6] = [
        Grade::Grade1,
        Grade::Grade2,
        Grade::Grade3,
        Grade::Grade4,
        Grade::Grade5,
        Grade::Grade6,
    ];

    pub fn level(self) -> u8 {
        match self {
            Grade::Grade1 => 1,
            Grade::Grade2 => 2,
            Grade::Grade3 => 3,
            Grade::Grade4 => 4,
            Grade::Grade5 => 5,
            Grade::Grade6 => 6,
        }
    }

    pub fn from_level(level: u8) -> Option<Grade> {
        Grade::ALL.get(usize::from(level).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade{}", self.level())
    }
}

impl FromStr for Grade {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let digits = lowered.strip_prefix("grade").unwrap_or(&lowered).trim();

        digits
            .parse::<u8>()
            .ok()
            .and_then(Grade::from_level)
            .ok_or_else(|| TrackerError::InvalidGrade(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Subject {
    Japanese,
    Math,
    Science,
    #[serde(rename = "Social Studies")]
    SocialStudies,
    English,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Japanese,
        Subject::Math,
        Subject::Science,
        Subject::SocialStudies,
        Subject::English,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subject::Japanese => "Japanese",
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::SocialStudies => "Social Studies",
            Subject::English => "English",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "japanese" => Ok(Subject::Japanese),
            "math" | "maths" => Ok(Subject::Math),
            "science" => Ok(Subject::Science),
            "socialstudies" => Ok(Subject::SocialStudies),
            "english" => Ok(Subject::English),
            _ => Err(TrackerError::InvalidSubject(value.trim().to_string())),
        }
    }
}

/// One test result. Built through [`StudyRecord::new`], which clamps the
/// score and fills in a blank unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyRecord {
    pub date: NaiveDate,
    pub grade: Grade,
    pub subject: Subject,
    pub unit: String,
    pub score: u8,
}

impl StudyRecord {
    pub fn new(date: NaiveDate, grade: Grade, subject: Subject, unit: &str, score: i64) -> Self {
        let unit = unit.trim();
        Self {
            date,
            grade,
            subject,
            unit: if unit.is_empty() {
                UNSPECIFIED_UNIT.to_string()
            } else {
                unit.to_string()
            },
            score: clamp_score(score),
        }
    }
}

pub fn clamp_score(score: i64) -> u8 {
    // 0..=100 always fits in a u8
    score.clamp(0, i64::from(MAX_SCORE)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Grade,
    Subject,
    Unit,
}

pub const BY_SUBJECT: &[GroupField] = &[GroupField::Subject];
pub const BY_SUBJECT_UNIT: &[GroupField] = &[GroupField::Subject, GroupField::Unit];
pub const BY_GRADE_SUBJECT_UNIT: &[GroupField] =
    &[GroupField::Grade, GroupField::Subject, GroupField::Unit];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub avg_score: f64,
    pub count: usize,
}

impl AggregateRow {
    /// Human-readable key, e.g. `Grade3 / Math / Division`.
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(grade) = self.grade {
            parts.push(grade.to_string());
        }
        if let Some(subject) = self.subject {
            parts.push(subject.to_string());
        }
        if let Some(unit) = &self.unit {
            parts.push(unit.clone());
        }
        parts.join(" / ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Advance,
    LightReview,
    PriorityReview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub action: &'static str,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn grade_parses_common_spellings() {
        assert_eq!("Grade3".parse::<Grade>().unwrap(), Grade::Grade3);
        assert_eq!("grade 5".parse::<Grade>().unwrap(), Grade::Grade5);
        assert_eq!("1".parse::<Grade>().unwrap(), Grade::Grade1);
        assert!("Grade7".parse::<Grade>().is_err());
        assert!("0".parse::<Grade>().is_err());
        assert!("senior".parse::<Grade>().is_err());
    }

    #[test]
    fn subject_parses_social_studies_variants() {
        for raw in ["Social Studies", "social-studies", "social_studies", "SOCIALSTUDIES"] {
            assert_eq!(raw.parse::<Subject>().unwrap(), Subject::SocialStudies);
        }
        assert_eq!("math".parse::<Subject>().unwrap(), Subject::Math);
        assert!("Art".parse::<Subject>().is_err());
    }

    #[test]
    fn record_clamps_score_and_fills_blank_unit() {
        let high = StudyRecord::new(day(1), Grade::Grade2, Subject::Math, "  ", 140);
        assert_eq!(high.score, 100);
        assert_eq!(high.unit, UNSPECIFIED_UNIT);

        let low = StudyRecord::new(day(1), Grade::Grade2, Subject::Math, " Clocks ", -5);
        assert_eq!(low.score, 0);
        assert_eq!(low.unit, "Clocks");
    }

    #[test]
    fn row_label_only_includes_grouped_fields() {
        let row = AggregateRow {
            grade: None,
            subject: Some(Subject::SocialStudies),
            unit: Some("Maps".to_string()),
            avg_score: 70.0,
            count: 2,
        };
        assert_eq!(row.label(), "Social Studies / Maps");
    }
}
