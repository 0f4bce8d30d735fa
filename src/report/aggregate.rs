use crate::model::{ContributionRecord, ContributionReport, Week};
use chrono::Weekday;

/// The most recent `size` records, or all of them when there are fewer.
pub fn window(records: &[ContributionRecord], size: usize) -> &[ContributionRecord] {
    let start = records.len().saturating_sub(size);
    &records[start..]
}

/// Split chronological records into weeks, closing a week after each `week_end` day.
/// A trailing partial week is kept.
pub fn group_weeks(records: &[ContributionRecord], week_end: Weekday) -> Vec<Week> {
    let mut weeks = Vec::new();
    let mut current = Week::new();

    for record in records {
        current.push(record.clone());
        if record.weekday() == week_end {
            weeks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        weeks.push(current);
    }
    weeks
}

pub fn total(records: &[ContributionRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.count)).sum()
}

/// Window, group and total the records into a report.
pub fn build_report(
    username: &str,
    records: &[ContributionRecord],
    window_size: usize,
    week_end: Weekday,
) -> ContributionReport {
    let recent = window(records, window_size);
    ContributionReport {
        username: username.to_string(),
        total: total(recent),
        weeks: group_weeks(recent, week_end),
    }
}
