use crate::fetch::{FetchOptions, Source, DEFAULT_USERNAME};
use crate::model::WINDOW_DAYS;
use crate::report::{OutputFormat, RunOptions};
use anyhow::Result;
use chrono::Weekday;
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "contribgraph")]
#[command(about = "Fetch a profile's contribution calendar and group it into weeks")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Profile to fetch", default_value = DEFAULT_USERNAME)]
    pub username: String,

    #[arg(long, value_enum, default_value_t = Source::Html, help = "Where to read the calendar from")]
    pub source: Source,

    #[arg(long, value_parser = parse_weekday, help = "Day that closes a week (default: sun for html, sat for api)")]
    pub week_end: Option<Weekday>,

    #[arg(long, default_value_t = WINDOW_DAYS, help = "Number of trailing days to keep")]
    pub window: usize,

    #[arg(long, value_enum, help = "Output format (default: swift for html, json for api)")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Override the source's base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Read the raw page or JSON from a file instead of the network")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Write the fetched raw page or JSON to a file")]
    pub save_raw: Option<PathBuf>,

    #[arg(long, help = "Request timeout in seconds (default: none)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Verify TLS certificates", default_value_t = false)]
    pub verify_tls: bool,

    #[arg(short, long, help = "Only print the report")]
    pub quiet: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v, -vv)")]
    pub verbose: u8,
}

fn parse_weekday(s: &str) -> std::result::Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("invalid weekday '{s}' (expected e.g. sat, sunday)"))
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }

    pub fn run_options(self) -> RunOptions {
        let source = self.source;
        RunOptions {
            week_end: self.week_end.unwrap_or_else(|| source.default_week_end()),
            format: self.format.unwrap_or(match source {
                Source::Html => OutputFormat::Swift,
                Source::Api => OutputFormat::Json,
            }),
            base_url: self
                .base_url
                .unwrap_or_else(|| source.default_base_url().to_string()),
            fetch: FetchOptions {
                timeout: self.timeout.map(Duration::from_secs),
                verify_tls: self.verify_tls,
                show_progress: !self.quiet && std::io::stderr().is_terminal(),
            },
            username: self.username,
            source,
            window: self.window,
            input: self.input,
            save_raw: self.save_raw,
            quiet: self.quiet,
        }
    }

    pub fn execute(self) -> Result<()> {
        crate::report::exec(self.run_options())
    }
}
