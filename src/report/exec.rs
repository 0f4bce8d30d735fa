use crate::error::{ContribError, Result};
use crate::extract;
use crate::fetch::{self, FetchOptions, Fetcher, Source};
use crate::model::ContributionReport;
use anyhow::Context;
use chrono::Weekday;
use console::style;
use std::path::PathBuf;

use super::{build_report, render, OutputFormat};

const LOG_TARGET: &str = "report";

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub username: String,
    pub source: Source,
    pub week_end: Weekday,
    pub window: usize,
    pub format: OutputFormat,
    pub base_url: String,
    pub input: Option<PathBuf>,
    pub save_raw: Option<PathBuf>,
    pub fetch: FetchOptions,
    pub quiet: bool,
}

/// Fetch (or read), extract and group one profile's calendar.
///
/// Transport failures and extraction misses come back as their own
/// [`crate::error::ContribError`] variants so the caller can tell them apart.
pub fn fetch_report(opts: &RunOptions) -> Result<ContributionReport> {
    let body = match &opts.input {
        Some(path) => fetch::read_raw(path)?,
        None => {
            let fetcher = Fetcher::new(&opts.fetch)?;
            fetcher.get_text(&opts.source.url(&opts.base_url, &opts.username))?
        }
    };

    if let Some(path) = &opts.save_raw {
        fetch::save_raw(path, &body)?;
    }

    let records = extract::extract(opts.source, &body)?;
    log::info!(
        target: LOG_TARGET,
        "Extracted {} records, keeping the last {}, weeks end on {}",
        records.len(),
        opts.window,
        opts.week_end
    );

    Ok(build_report(&opts.username, &records, opts.window, opts.week_end))
}

pub fn exec(opts: RunOptions) -> anyhow::Result<()> {
    let chatty = !opts.quiet && opts.format != OutputFormat::Json;

    if chatty {
        println!("Fetching contribution data for {}...", opts.username);
    }

    let report = match fetch_report(&opts) {
        Ok(report) => report,
        Err(e @ ContribError::ExtractionMiss { .. }) => {
            println!("{}", style(e).yellow());
            return Ok(());
        }
        Err(e) if e.is_soft() => {
            log::error!(target: LOG_TARGET, "{e}");
            println!("{}", style(format!("Error fetching data: {e}")).yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to build contribution report"),
    };

    if chatty {
        println!("\nFound {} weeks of data", report.weeks.len());
        if report.is_approximate() {
            println!("Total contributions (approx): {}", report.total);
        } else {
            println!("Total contributions: {}", report.total);
        }
    }

    render(opts.format, &report)
}
