// src/pipeline/fetch.rs

//! Fetch-and-load cycle: scrape a keyword, read the rows, replace the result set.

use std::fmt;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::services::ScrapeBackend;
use crate::session::Session;

/// Scrape `keyword` and load the produced rows into `session`.
///
/// The session is cleared before any request, so a failure leaves an empty
/// table rather than the previous results. Returns the number of rows loaded.
pub async fn run_fetch(
    session: &mut Session,
    backend: &dyn ScrapeBackend,
    keyword: &str,
    settle_delay: Duration,
) -> Result<usize> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        log::warn!("Refusing to scrape an empty keyword");
        return Err(AppError::EmptyKeyword);
    }

    session.clear();

    backend.scrape(keyword).await?;

    if !settle_delay.is_zero() {
        log::debug!("Waiting {:?} for the backend to settle", settle_delay);
        tokio::time::sleep(settle_delay).await;
    }

    let records = backend.fetch_data().await?;
    session.load(records);

    log::info!(
        "Loaded {} records for '{}' ({} pages)",
        session.total_count(),
        keyword,
        session.total_pages()
    );
    Ok(session.total_count())
}

/// Severity of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
}

/// The single user-visible message summarizing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Success,
            text: text.into(),
        }
    }

    /// Collapse any error into a banner; validation problems are warnings.
    pub fn from_error(err: &AppError) -> Self {
        match err {
            AppError::EmptyKeyword | AppError::EmptyExport | AppError::NotReady => Self {
                level: BannerLevel::Warning,
                text: err.to_string(),
            },
            other => Self {
                level: BannerLevel::Error,
                text: format!("Error: {}", other),
            },
        }
    }

    /// Banner for the outcome of `run_fetch`.
    pub fn from_fetch(result: &Result<usize>) -> Self {
        match result {
            Ok(_) => Self::success("Scraping and results loaded successfully!"),
            Err(e) => Self::from_error(e),
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            BannerLevel::Success => "OK",
            BannerLevel::Warning => "WARN",
            BannerLevel::Error => "ERROR",
        };
        write!(f, "[{}] {}", tag, self.text)
    }
}
