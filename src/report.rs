use std::fmt::Write;

use crate::aggregate::{history, means_by, timeline, RecordFilter};
use crate::models::{clamp_score, StudyRecord, Tier, BY_SUBJECT_UNIT};
use crate::recommend::{next_action, related_review};
use crate::store::most_recent;
use crate::weak::weak_units;

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Advance => "advance",
        Tier::LightReview => "light review",
        Tier::PriorityReview => "priority review",
    }
}

/// Markdown dashboard. Averages and the timeline honour `filter`; the latest
/// result, weak units and history always cover every record.
pub fn build_report(records: &[StudyRecord], filter: &RecordFilter, threshold: i64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Study Tracker Report");

    let Some(latest) = most_recent(records) else {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "No study records yet. Add a test result to see suggestions and charts."
        );
        return output;
    };

    let _ = writeln!(output, "Based on {} recorded tests", records.len());
    let _ = writeln!(output);
    let _ = writeln!(output, "## Latest Result");
    let _ = writeln!(output, "- Date: {}", latest.date);
    let _ = writeln!(output, "- Grade: {}", latest.grade);
    let _ = writeln!(output, "- Subject: {}", latest.subject);
    let _ = writeln!(output, "- Unit: {}", latest.unit);
    let _ = writeln!(output, "- Score: {}", latest.score);

    let suggestion = next_action(latest);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Suggested Next Step");
    let _ = writeln!(output, "{}", suggestion.message);
    let _ = writeln!(output);
    let _ = writeln!(output, "**Recommended action: {}**", suggestion.action);

    let related = related_review(latest);
    if !related.is_empty() && suggestion.tier != Tier::Advance {
        let _ = writeln!(output);
        let _ = writeln!(output, "Units to revisit alongside {}:", latest.unit);
        for unit in related {
            let _ = writeln!(output, "- {}", unit);
        }
    }

    let filtered = filter.apply(records);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Unit Averages");

    if filtered.is_empty() {
        let _ = writeln!(output, "No records match the selected grades and subjects.");
    } else {
        for row in means_by(&filtered, BY_SUBJECT_UNIT) {
            let tier = Tier::from_mean(row.avg_score);
            let _ = writeln!(
                output,
                "- {}: {:.1} across {} tests ({}, {})",
                row.label(),
                row.avg_score,
                row.count,
                tier_label(tier),
                tier.band_colour()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Score Timeline");

    if filtered.is_empty() {
        let _ = writeln!(output, "No records match the selected grades and subjects.");
    } else {
        for record in timeline(&filtered) {
            let _ = writeln!(
                output,
                "- {} {} ({}): {}",
                record.date, record.subject, record.unit, record.score
            );
        }
    }

    let threshold = clamp_score(threshold);
    let weak = weak_units(records, BY_SUBJECT_UNIT, i64::from(threshold));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Weak Units (average below {})", threshold);

    if weak.is_empty() {
        let _ = writeln!(output, "No units below the threshold. Keep it up!");
    } else {
        let _ = writeln!(output, "These units are good review candidates:");
        for row in &weak {
            let _ = writeln!(output, "- {}: {:.1}", row.label(), row.avg_score);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## History");
    let _ = writeln!(output, "| Date | Grade | Subject | Unit | Score |");
    let _ = writeln!(output, "|---|---|---|---|---|");
    for record in history(records) {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            record.date, record.grade, record.subject, record.unit, record.score
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::sample_records;
    use crate::models::{Grade, Subject};

    #[test]
    fn empty_records_get_a_notice() {
        let report = build_report(&[], &RecordFilter::default(), 60);
        assert!(report.contains("No study records yet"));
        assert!(!report.contains("## Latest Result"));
    }

    #[test]
    fn report_covers_every_section() {
        let records = sample_records().unwrap();
        let report = build_report(&records, &RecordFilter::default(), 60);

        for heading in [
            "## Latest Result",
            "## Suggested Next Step",
            "## Unit Averages",
            "## Score Timeline",
            "## Weak Units (average below 60)",
            "## History",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
        assert!(report.contains("- Unit: Fractions"));
        assert!(report.contains("**Recommended action: Prioritize review**"));
        assert!(report.contains("- Math / Fractions: 53.0"));
        assert!(report.contains("- Science / Magnets: 58.0"));
    }

    #[test]
    fn related_units_listed_for_review() {
        let records = sample_records().unwrap();
        let report = build_report(&records, &RecordFilter::default(), 60);
        assert!(report.contains("Units to revisit alongside Fractions:"));
        assert!(report.contains("- Division\n"));
    }

    #[test]
    fn filter_without_matches_is_reported() {
        let records = sample_records().unwrap();
        let filter = RecordFilter::new(vec![Grade::Grade6], vec![Subject::Math]);
        let report = build_report(&records, &filter, 60);
        assert!(report.contains("No records match the selected grades and subjects."));
        assert!(report.contains("## Latest Result"));
    }
}
