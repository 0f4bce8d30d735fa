use crate::model::{level_color, ContributionReport, Week, MAX_LEVEL};
use anyhow::Result;
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{username, total, weeks}` as pretty JSON
    Json,
    /// Paste header, the JSON document and a Swift `activityDays` literal
    Swift,
    /// Terminal heat map
    Summary,
}

pub const PASTE_HEADER: &str = "// Paste this into GitHubService.swift generateMockData()";

pub fn output_json(report: &ContributionReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn output_swift(report: &ContributionReport) -> Result<()> {
    println!("\nSwift code to hardcode:\n");
    println!("{PASTE_HEADER}");
    println!("{}", serde_json::to_string_pretty(report)?);
    println!();
    print!("{}", render_activity_days(report));
    Ok(())
}

/// A Swift dictionary literal of the days with any activity.
pub fn render_activity_days(report: &ContributionReport) -> String {
    let mut out = format!(
        "// Last {} days ({} weeks), {} contributions{}\n",
        report.days().count(),
        report.weeks.len(),
        report.total,
        if report.is_approximate() { " (approx)" } else { "" }
    );

    let active: Vec<_> = report.days().filter(|d| d.count > 0).collect();
    if active.is_empty() {
        out.push_str("let activityDays: [String: (count: Int, level: Int)] = [:]\n");
        return out;
    }

    out.push_str("let activityDays: [String: (count: Int, level: Int)] = [\n");
    for day in active {
        out.push_str(&format!(
            "    \"{}\": ({}, {}),\n",
            day.date.format("%Y-%m-%d"),
            day.count,
            day.level
        ));
    }
    out.push_str("]\n");
    out
}

fn level_glyph(level: u8) -> &'static str {
    match level {
        0 => "·",
        1 => "░",
        2 => "▒",
        3 => "▓",
        _ => "█",
    }
}

fn week_row(week: &Week) -> String {
    let mut row: String = week
        .days
        .iter()
        .map(|d| match d.level {
            0 => style(level_glyph(0)).dim().to_string(),
            level => style(level_glyph(level)).green().to_string(),
        })
        .collect();
    // pad partial weeks so the totals line up
    row.push_str(&" ".repeat(7usize.saturating_sub(week.len())));
    row
}

pub fn output_summary(report: &ContributionReport) -> Result<()> {
    if report.weeks.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{} {}",
        style("Contribution Activity").bold(),
        style(&report.username).cyan()
    );
    println!("{}", "─".repeat(50));

    for week in &report.weeks {
        let start = week
            .first_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("{} {} {:>5}", start, week_row(week), week.total());
    }

    let label = if report.is_approximate() {
        "Total contributions (approx)"
    } else {
        "Total contributions"
    };
    println!("\n{}: {}", label, style(report.total).cyan());

    println!("\n{}", style("Legend").bold());
    for level in 0..=MAX_LEVEL {
        println!(
            "  {} level {} {}",
            level_glyph(level),
            level,
            style(level_color(level)).dim()
        );
    }

    Ok(())
}

pub fn render(format: OutputFormat, report: &ContributionReport) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report),
        OutputFormat::Swift => output_swift(report),
        OutputFormat::Summary => output_summary(report),
    }
}
