pub mod api;
pub mod html;

use crate::error::{ContribError, Result};
use crate::fetch::Source;
use crate::model::ContributionRecord;
use chrono::NaiveDate;

const LOG_TARGET: &str = "extract";

pub use html::Strategy;

/// Turn a raw response body into chronological records for the given source.
pub fn extract(source: Source, body: &str) -> Result<Vec<ContributionRecord>> {
    match source {
        Source::Html => html::extract(body),
        Source::Api => api::extract(body),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ContribError::InvalidDate(format!("{raw}: {e}")))
}
