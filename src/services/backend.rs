// src/services/backend.rs

//! Scraping backend client.
//!
//! The viewer talks to four endpoints: `POST /scrape`, `GET /data`,
//! `POST /ask_question` and the plain-text status resource. Document
//! downloads go to whatever URL the record carries.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    AskRequest, AskResponse, DataResponse, ProcessingStatus, Record, ServerConfig,
};
use crate::utils::http::{base_url, create_client, endpoint};

/// Operations the viewer needs from the scraping backend.
#[async_trait]
pub trait ScrapeBackend: Send + Sync {
    /// Run the scraper for `keyword`. A non-success status carries the body as the error.
    async fn scrape(&self, keyword: &str) -> Result<()>;

    /// Read the rows produced by the last scrape.
    async fn fetch_data(&self) -> Result<Vec<Record>>;

    /// Ask a question about the processed document.
    async fn ask_question(&self, question: &str) -> Result<String>;

    /// Read the document processing status.
    async fn processing_status(&self) -> Result<ProcessingStatus>;

    /// Download a record's document.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// `ScrapeBackend` over HTTP.
pub struct HttpBackend {
    client: Client,
    base: Url,
    status_path: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            base: base_url(&config.base_url)?,
            status_path: config.status_path.clone(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a document link; relative links are served by the backend.
    pub fn document_url(&self, url: &str) -> Result<Url> {
        endpoint(&self.base, url)
    }
}

#[async_trait]
impl ScrapeBackend for HttpBackend {
    async fn scrape(&self, keyword: &str) -> Result<()> {
        let url = endpoint(&self.base, "/scrape")?;
        log::info!("Scraping keyword '{}' via {}", keyword, url);

        let response = self
            .client
            .post(url)
            .form(&[("keyword", keyword)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::warn!("Scrape failed with {}: {}", status, body);
            return Err(AppError::server(body));
        }
        log::debug!("Scrape finished: {}", body.trim());
        Ok(())
    }

    async fn fetch_data(&self) -> Result<Vec<Record>> {
        let url = endpoint(&self.base, "/data")?;
        let text = self.client.get(url).send().await?.text().await?;
        // The error payload comes with a 500 status, so the body is parsed regardless.
        let response: DataResponse = serde_json::from_str(&text)?;
        let records = response.into_records()?;
        log::info!("Fetched {} records", records.len());
        Ok(records)
    }

    async fn ask_question(&self, question: &str) -> Result<String> {
        let url = endpoint(&self.base, "/ask_question")?;
        let body = serde_json::to_vec(&AskRequest {
            question: question.to_string(),
        })?;

        let text = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .text()
            .await?;
        let response: AskResponse = serde_json::from_str(&text)?;
        response.into_answer()
    }

    async fn processing_status(&self) -> Result<ProcessingStatus> {
        let url = endpoint(&self.base, &self.status_path)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::server(format!(
                "Status resource unavailable ({})",
                response.status()
            )));
        }
        Ok(ProcessingStatus::from_body(&response.text().await?))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.document_url(url)?;
        log::info!("Downloading {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
