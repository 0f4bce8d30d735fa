use crate::error::Result;
use chrono::Weekday;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;

const LOG_TARGET: &str = "fetch";

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

pub const DEFAULT_USERNAME: &str = "srbsingh3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Source {
    /// Scrape the public profile page
    Html,
    /// Query the third-party contributions JSON API
    Api,
}

impl Source {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Source::Html => "https://github.com",
            Source::Api => "https://github-contributions-api.jogruber.de",
        }
    }

    /// The profile page calendar runs Monday..Sunday, the API one Sunday..Saturday.
    pub fn default_week_end(self) -> Weekday {
        match self {
            Source::Html => Weekday::Sun,
            Source::Api => Weekday::Sat,
        }
    }

    pub fn url(self, base: &str, username: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            Source::Html => format!("{base}/{username}"),
            Source::Api => format!("{base}/v4/{username}?y=last"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub timeout: Option<Duration>,
    pub verify_tls: bool,
    pub show_progress: bool,
}

pub struct Fetcher {
    client: reqwest::blocking::Client,
    show_progress: bool,
}

impl Fetcher {
    pub fn new(options: &FetchOptions) -> Result<Self> {
        // reqwest's blocking client defaults to 30s; an unset timeout means none at all
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!options.verify_tls)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            client,
            show_progress: options.show_progress,
        })
    }

    /// Issue a single GET and return the body. Non-2xx responses are transport errors.
    pub fn get_text(&self, url: &str) -> Result<String> {
        log::info!(target: LOG_TARGET, "GET {url}");
        let start_time = std::time::Instant::now();

        let pb = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Requesting {url}..."));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        let result = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text());
        pb.finish_and_clear();

        let body = result?;
        log::debug!(
            target: LOG_TARGET,
            "Received {} bytes from '{url}' in {:.3}s",
            body.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

pub fn read_raw(path: &Path) -> Result<String> {
    log::info!(target: LOG_TARGET, "Reading raw source from '{}'", path.display());
    Ok(fs::read_to_string(path)?)
}

pub fn save_raw(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, body)?;
    log::debug!(target: LOG_TARGET, "Saved raw source to '{}'", path.display());
    Ok(())
}
