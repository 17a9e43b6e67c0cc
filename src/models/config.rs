// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Table and pagination settings
    #[serde(default)]
    pub view: ViewConfig,

    /// Processing status polling
    #[serde(default)]
    pub status: StatusConfig,

    /// Export and download locations
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(AppError::validation("server.base_url is empty"));
        }
        url::Url::parse(&self.server.base_url)?;
        if self.server.user_agent.trim().is_empty() {
            return Err(AppError::validation("server.user_agent is empty"));
        }
        if self.server.timeout_secs == 0 {
            return Err(AppError::validation("server.timeout_secs must be > 0"));
        }
        if self.view.window_size == 0 {
            return Err(AppError::validation("view.window_size must be > 0"));
        }
        if self.view.rows_per_page_options.is_empty() {
            return Err(AppError::validation("view.rows_per_page_options is empty"));
        }
        if self.view.rows_per_page_options.contains(&0) {
            return Err(AppError::validation(
                "view.rows_per_page_options must not contain 0",
            ));
        }
        if !self
            .view
            .rows_per_page_options
            .contains(&self.view.rows_per_page)
        {
            return Err(AppError::validation(format!(
                "view.rows_per_page {} is not one of {:?}",
                self.view.rows_per_page, self.view.rows_per_page_options
            )));
        }
        if self.status.poll_interval_secs == 0 {
            return Err(AppError::validation("status.poll_interval_secs must be > 0"));
        }
        Ok(())
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the scraping backend
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause between a finished scrape and reading `/data`
    #[serde(default)]
    pub settle_delay_ms: u64,

    /// Path of the plain-text processing status resource
    #[serde(default = "defaults::status_path")]
    pub status_path: String,
}

impl ServerConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            settle_delay_ms: 0,
            status_path: defaults::status_path(),
        }
    }
}

/// Table and pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Rows per page after a fresh fetch
    #[serde(default = "defaults::rows_per_page")]
    pub rows_per_page: usize,

    /// Selectable page sizes
    #[serde(default = "defaults::rows_per_page_options")]
    pub rows_per_page_options: Vec<usize>,

    /// Number of page links shown at once
    #[serde(default = "defaults::window_size")]
    pub window_size: usize,

    /// Prev/Next appear only above this many pages
    #[serde(default = "defaults::nav_threshold")]
    pub nav_threshold: usize,

    /// Maximum rendered width of a table cell
    #[serde(default = "defaults::cell_width")]
    pub cell_width: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rows_per_page: defaults::rows_per_page(),
            rows_per_page_options: defaults::rows_per_page_options(),
            window_size: defaults::window_size(),
            nav_threshold: defaults::nav_threshold(),
            cell_width: defaults::cell_width(),
        }
    }
}

/// Processing status polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,
}

impl StatusConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: defaults::poll_interval(),
        }
    }
}

/// Export and download locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default CSV export file
    #[serde(default = "defaults::export_path")]
    pub path: PathBuf,

    /// Directory for downloaded bid documents
    #[serde(default = "defaults::download_dir")]
    pub download_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: defaults::export_path(),
            download_dir: defaults::download_dir(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Server defaults
    pub fn base_url() -> String {
        "http://127.0.0.1:8080".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; bidview/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn status_path() -> String {
        "/status.txt".into()
    }

    // View defaults
    pub fn rows_per_page() -> usize {
        10
    }
    pub fn rows_per_page_options() -> Vec<usize> {
        vec![10, 25, 50, 100]
    }
    pub fn window_size() -> usize {
        10
    }
    pub fn nav_threshold() -> usize {
        20
    }
    pub fn cell_width() -> usize {
        32
    }

    // Status defaults
    pub fn poll_interval() -> u64 {
        2
    }

    // Export defaults
    pub fn export_path() -> PathBuf {
        PathBuf::from("bid_results.csv")
    }
    pub fn download_dir() -> PathBuf {
        PathBuf::from("downloads")
    }
}
