use crate::error::Result;
use crate::model::{level_from_quartile, ContributionRecord, MAX_LEVEL};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_date, LOG_TARGET};

#[derive(Debug, Deserialize)]
struct ApiContribution {
    date: String,
    count: u32,
    level: ApiLevel,
}

/// The contributions API reports numeric levels; the GraphQL calendar uses quartile names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiLevel {
    Number(u64),
    Quartile(String),
}

impl ApiLevel {
    fn to_level(&self, date: &str) -> u8 {
        match self {
            ApiLevel::Number(n) if *n <= u64::from(MAX_LEVEL) => *n as u8,
            ApiLevel::Number(n) => {
                log::debug!(target: LOG_TARGET, "Clamping level {n} on {date} to {MAX_LEVEL}");
                MAX_LEVEL
            }
            ApiLevel::Quartile(name) => level_from_quartile(name),
        }
    }
}

/// Records from a contributions API response, passed through unchanged apart
/// from levels above 4, which are clamped.
///
/// A body without a `contributions` array yields no records rather than an error.
/// A body that isn't JSON, or entries missing fields, fail with
/// [`crate::error::ContribError::Serde`].
pub fn extract(body: &str) -> Result<Vec<ContributionRecord>> {
    let payload: Value = serde_json::from_str(body)?;

    let entries = match payload.get("contributions") {
        Some(Value::Null) | None => {
            log::warn!(target: LOG_TARGET, "Response has no contributions field");
            return Ok(Vec::new());
        }
        Some(value) => Vec::<ApiContribution>::deserialize(value)?,
    };

    entries
        .into_iter()
        .map(|c| {
            Ok(ContributionRecord::exact(
                parse_date(&c.date)?,
                c.count,
                c.level.to_level(&c.date),
            ))
        })
        .collect()
}
