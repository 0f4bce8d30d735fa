use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of trailing records kept for a report (22 full weeks).
pub const WINDOW_DAYS: usize = 154;

pub const MAX_LEVEL: u8 = 4;

/// Calendar palette, indexed by level.
const LEVEL_COLORS: [&str; 5] = ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
    /// Set when `count` was estimated from `level` rather than read from the source.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub approximate: bool,
}

impl ContributionRecord {
    /// A record whose count and level both come straight from the source.
    pub fn exact(date: NaiveDate, count: u32, level: u8) -> Self {
        Self {
            date,
            count,
            level,
            approximate: false,
        }
    }

    /// Builds a record from a level alone; the count is the `level * 3` estimate.
    pub fn from_level(date: NaiveDate, level: u8) -> Self {
        let level = level.min(MAX_LEVEL);
        Self {
            date,
            count: count_from_level(level),
            level,
            approximate: true,
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

pub fn level_from_count(count: u32) -> u8 {
    // min() first so the narrowing cast can't truncate
    (count / 3).min(u32::from(MAX_LEVEL)) as u8
}

pub fn count_from_level(level: u8) -> u32 {
    u32::from(level) * 3
}

pub fn level_color(level: u8) -> &'static str {
    LEVEL_COLORS
        .get(usize::from(level))
        .copied()
        .unwrap_or(LEVEL_COLORS[0])
}

/// Maps the GraphQL `contributionLevel` names onto the 0-4 scale.
pub fn level_from_quartile(name: &str) -> u8 {
    match name {
        "FIRST_QUARTILE" => 1,
        "SECOND_QUARTILE" => 2,
        "THIRD_QUARTILE" => 3,
        "FOURTH_QUARTILE" => 4,
        _ => 0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week {
    pub days: Vec<ContributionRecord>,
}

impl Week {
    pub fn new() -> Self {
        Self { days: Vec::new() }
    }

    pub fn push(&mut self, record: ContributionRecord) {
        self.days.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| u64::from(d.count)).sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionReport {
    pub username: String,
    pub total: u64,
    pub weeks: Vec<Week>,
}

impl ContributionReport {
    pub fn days(&self) -> impl Iterator<Item = &ContributionRecord> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn is_approximate(&self) -> bool {
        self.days().any(|d| d.approximate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn count_from_level_is_three_per_step() {
        for level in 0..=MAX_LEVEL {
            assert_eq!(count_from_level(level), u32::from(level) * 3);
        }
    }

    #[test]
    fn level_from_count_clamps_to_four() {
        assert_eq!(level_from_count(0), 0);
        assert_eq!(level_from_count(2), 0);
        assert_eq!(level_from_count(3), 1);
        assert_eq!(level_from_count(11), 3);
        assert_eq!(level_from_count(12), 4);
        assert_eq!(level_from_count(5000), 4);
    }

    #[test]
    fn from_level_marks_record_approximate() {
        let r = ContributionRecord::from_level(day("2025-01-01"), 2);
        assert_eq!(r.count, 6);
        assert!(r.approximate);

        let clamped = ContributionRecord::from_level(day("2025-01-01"), 9);
        assert_eq!(clamped.level, 4);
        assert_eq!(clamped.count, 12);
    }

    #[test]
    fn palette_falls_back_to_empty_color() {
        assert_eq!(level_color(0), "#161b22");
        assert_eq!(level_color(4), "#39d353");
        assert_eq!(level_color(7), "#161b22");
    }

    #[test]
    fn quartile_names() {
        assert_eq!(level_from_quartile("NONE"), 0);
        assert_eq!(level_from_quartile("THIRD_QUARTILE"), 3);
        assert_eq!(level_from_quartile("bogus"), 0);
    }

    #[test]
    fn week_serializes_as_plain_array() {
        let mut week = Week::new();
        week.push(ContributionRecord::exact(day("2025-11-13"), 32, 4));
        let v = serde_json::to_value(&week).unwrap();
        assert_eq!(
            v,
            serde_json::json!([{ "date": "2025-11-13", "count": 32, "level": 4 }])
        );
    }

    #[test]
    fn approximate_flag_is_serialized_when_set() {
        let r = ContributionRecord::from_level(day("2025-11-13"), 1);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["approximate"], serde_json::Value::Bool(true));
    }
}
