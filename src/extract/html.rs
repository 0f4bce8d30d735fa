use crate::error::{ContribError, Result};
use crate::model::{level_from_count, ContributionRecord, MAX_LEVEL};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use super::{parse_date, LOG_TARGET};

// Calendar cells carry both attributes on the same tag; `[^>]` keeps a match inside it.
static DATE_THEN_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-date="([^"]+)"[^>]*?data-level="([^"]+)""#).expect("valid regex")
});

static LEVEL_THEN_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-level="([^"]+)"[^>]*?data-date="([^"]+)""#).expect("valid regex")
});

static DATE_THEN_TOOLTIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)data-date="([^"]+)".*?(\d+)\s+contribution"#).expect("valid regex")
});

static DATE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-date="([^"]+)""#).expect("valid regex"));

/// Which pattern produced the calendar cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DateThenLevel,
    LevelThenDate,
    Tooltip,
}

/// Pull `(date, level)` pairs out of a profile page, trying each pattern in turn.
///
/// Fails with [`ContribError::ExtractionMiss`] when nothing matches; the error
/// carries the number of bare `data-date` attributes seen for diagnostics.
pub fn extract_levels(html: &str) -> Result<(Strategy, Vec<(NaiveDate, u8)>)> {
    let raw: Vec<(&str, &str)> = DATE_THEN_LEVEL
        .captures_iter(html)
        .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
        .collect();
    if !raw.is_empty() {
        return Ok((Strategy::DateThenLevel, parse_pairs(&raw)?));
    }

    let raw: Vec<(&str, &str)> = LEVEL_THEN_DATE
        .captures_iter(html)
        .filter_map(|c| Some((c.get(2)?.as_str(), c.get(1)?.as_str())))
        .collect();
    if !raw.is_empty() {
        return Ok((Strategy::LevelThenDate, parse_pairs(&raw)?));
    }

    let mut pairs = Vec::new();
    for caps in DATE_THEN_TOOLTIP.captures_iter(html) {
        let (Some(date), Some(count)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        // all digits, so only overflow can fail
        let count = count.as_str().parse::<u32>().unwrap_or(u32::MAX);
        pairs.push((parse_date(date.as_str())?, level_from_count(count)));
    }
    if !pairs.is_empty() {
        return Ok((Strategy::Tooltip, pairs));
    }

    let date_attributes = DATE_ATTR.find_iter(html).count();
    log::warn!(target: LOG_TARGET, "No calendar pattern matched ({date_attributes} data-date attributes)");
    Err(ContribError::ExtractionMiss { date_attributes })
}

/// Records from a profile page. Counts are the `level * 3` estimate.
pub fn extract(html: &str) -> Result<Vec<ContributionRecord>> {
    let (strategy, pairs) = extract_levels(html)?;
    log::debug!(target: LOG_TARGET, "Matched {} calendar cells via {strategy:?}", pairs.len());
    Ok(pairs
        .into_iter()
        .map(|(date, level)| ContributionRecord::from_level(date, level))
        .collect())
}

fn parse_pairs(raw: &[(&str, &str)]) -> Result<Vec<(NaiveDate, u8)>> {
    raw.iter()
        .map(|&(date, level)| Ok((parse_date(date)?, parse_level(level)?)))
        .collect()
}

fn parse_level(raw: &str) -> Result<u8> {
    match raw.trim().parse::<u8>() {
        Ok(level) if level <= MAX_LEVEL => Ok(level),
        _ => Err(ContribError::InvalidLevel(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn date_before_level_in_one_cell() {
        let html = r#"
            <td tabindex="0" data-ix="0" data-date="2025-08-17" id="contribution-day-component-0-0" data-level="0" class="ContributionCalendar-day"></td>
            <td tabindex="0" data-ix="0" data-date="2025-08-18" id="contribution-day-component-1-0" data-level="3" class="ContributionCalendar-day"></td>
        "#;
        let (strategy, pairs) = extract_levels(html).unwrap();
        assert_eq!(strategy, Strategy::DateThenLevel);
        assert_eq!(pairs, vec![(day("2025-08-17"), 0), (day("2025-08-18"), 3)]);
    }

    #[test]
    fn level_before_date_when_attributes_are_swapped() {
        let html = r#"<rect data-level="2" width="10" data-date="2025-01-05"></rect>
                      <rect data-level="4" data-date="2025-01-06"></rect>"#;
        let (strategy, pairs) = extract_levels(html).unwrap();
        assert_eq!(strategy, Strategy::LevelThenDate);
        assert_eq!(pairs, vec![(day("2025-01-05"), 2), (day("2025-01-06"), 4)]);
    }

    #[test]
    fn attributes_in_different_tags_do_not_pair() {
        let html = r#"<td data-date="2025-01-05"></td><span data-level="2"></span>"#;
        let err = extract_levels(html).unwrap_err();
        assert!(matches!(err, ContribError::ExtractionMiss { date_attributes: 1 }));
    }

    #[test]
    fn tooltip_counts_derive_levels() {
        let html = r#"
            <td data-date="2025-03-01" id="a"></td>
            <tool-tip for="a">7 contributions on March 1st.</tool-tip>
            <td data-date="2025-03-02" id="b"></td>
            <tool-tip for="b">40 contributions on March 2nd.</tool-tip>
        "#;
        let (strategy, pairs) = extract_levels(html).unwrap();
        assert_eq!(strategy, Strategy::Tooltip);
        assert_eq!(pairs, vec![(day("2025-03-01"), 2), (day("2025-03-02"), 4)]);
    }

    #[test]
    fn records_use_estimated_counts() {
        let html = r#"<td data-date="2025-08-18" data-level="3"></td>"#;
        let records = extract(html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, 9);
        assert!(records[0].approximate);
    }

    #[test]
    fn no_calendar_reports_zero_date_attributes() {
        let err = extract("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, ContribError::ExtractionMiss { date_attributes: 0 }));
        assert!(err.is_soft());
        assert!(err.to_string().contains("0 data-date attributes found"));
    }

    #[test]
    fn malformed_date_is_hard_error() {
        let html = r#"<td data-date="2025-13-40" data-level="1"></td>"#;
        let err = extract(html).unwrap_err();
        assert!(matches!(err, ContribError::InvalidDate(_)));
        assert!(!err.is_soft());
    }

    #[test]
    fn non_numeric_level_is_a_soft_failure() {
        let html = r#"<td data-date="2025-01-01" data-level="high"></td>"#;
        let err = extract(html).unwrap_err();
        assert!(matches!(err, ContribError::InvalidLevel(_)));
        assert!(err.is_soft());

        let html = r#"<td data-date="2025-01-01" data-level="9"></td>"#;
        assert!(extract(html).unwrap_err().is_soft());
    }
}
