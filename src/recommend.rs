use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Recommendation, StudyRecord, Tier};
use crate::store::RecordStore;

pub const ADVANCE_AT: u8 = 80;
pub const LIGHT_REVIEW_AT: u8 = 60;

impl Tier {
    pub fn from_score(score: u8) -> Tier {
        match score {
            s if s >= ADVANCE_AT => Tier::Advance,
            s if s >= LIGHT_REVIEW_AT => Tier::LightReview,
            _ => Tier::PriorityReview,
        }
    }

    /// Same bins as [`Tier::from_score`], applied to an average.
    pub fn from_mean(avg_score: f64) -> Tier {
        if avg_score >= f64::from(ADVANCE_AT) {
            Tier::Advance
        } else if avg_score >= f64::from(LIGHT_REVIEW_AT) {
            Tier::LightReview
        } else {
            Tier::PriorityReview
        }
    }

    /// Bar colour used for unit averages.
    pub fn band_colour(self) -> &'static str {
        match self {
            Tier::Advance => "seagreen",
            Tier::LightReview => "gold",
            Tier::PriorityReview => "crimson",
        }
    }
}

pub fn next_action(record: &StudyRecord) -> Recommendation {
    match Tier::from_score(record.score) {
        Tier::Advance => Recommendation {
            tier: Tier::Advance,
            action: "Move on to the next unit",
            message: "Great work! This unit is at a passing level. You are ready for the next one.",
        },
        Tier::LightReview => Recommendation {
            tier: Tier::LightReview,
            action: "Do a light review, then move on",
            message: "Mostly understood, with a few shaky spots. A quick review before moving on will help.",
        },
        Tier::PriorityReview => Recommendation {
            tier: Tier::PriorityReview,
            action: "Prioritize review",
            message: "This unit may not have stuck yet. Focus on review worksheets before going further.",
        },
    }
}

pub fn related_review(record: &StudyRecord) -> &'static [String] {
    Catalog::global().related_to(&record.unit)
}

/// Suggestion for the store's most recent record.
pub fn recommend(store: &RecordStore) -> Result<(&StudyRecord, Recommendation)> {
    let latest = store.most_recent()?;
    Ok((latest, next_action(latest)))
}
