use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContribError>;

#[derive(Error, Debug)]
pub enum ContribError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not find contribution data in HTML: {date_attributes} data-date attributes found")]
    ExtractionMiss { date_attributes: usize },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid level: {0}")]
    InvalidLevel(String),
    #[error("Malformed response: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContribError {
    /// Transport failures, extraction misses and unreadable response bodies end
    /// the run without a report but are not treated as crashes. Malformed
    /// calendar dates and local IO errors are.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            ContribError::Transport(_)
                | ContribError::ExtractionMiss { .. }
                | ContribError::Serde(_)
                | ContribError::InvalidLevel(_)
        )
    }
}

