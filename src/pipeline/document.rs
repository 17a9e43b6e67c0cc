// src/pipeline/document.rs

//! Document hand-off: download a record's file, then ask questions about it.
//!
//! Opening a document enables the question prompt right away; whether a
//! question can actually be sent depends on the backend processing status.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::services::{ScrapeBackend, StatusGate};
use crate::utils::http::file_name_from_url;

/// State of the question prompt attached to the last opened document.
#[derive(Debug, Clone, Default)]
pub struct QuestionPrompt {
    document: Option<String>,
}

impl QuestionPrompt {
    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Bid number of the document the prompt is about.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn open(&mut self, bid_number: &str) {
        self.document = Some(bid_number.to_string());
    }

    pub fn close(&mut self) {
        self.document = None;
    }
}

/// Local file name for a record's document.
pub fn document_file_name(record: &Record) -> String {
    Url::parse(&record.file_url)
        .ok()
        .and_then(|u| file_name_from_url(&u))
        .unwrap_or_else(|| {
            record
                .id
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
                .collect()
        })
}

/// Download `record`'s document into `dir` and open the question prompt.
pub async fn open_document(
    backend: &dyn ScrapeBackend,
    record: &Record,
    dir: &Path,
    prompt: &mut QuestionPrompt,
) -> Result<PathBuf> {
    if record.file_url.trim().is_empty() {
        return Err(AppError::validation(format!(
            "bid {} has no downloadable file",
            record.id
        )));
    }

    let bytes = backend.download(&record.file_url).await?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(document_file_name(record));
    let mut file = tokio::fs::File::create(&path).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;

    log::info!(
        "Saved document for {} to {} ({} bytes)",
        record.id,
        path.display(),
        bytes.len()
    );
    prompt.open(&record.id);
    Ok(path)
}

/// Ask a question once the backend reports the document as processed.
pub async fn run_ask(
    backend: &dyn ScrapeBackend,
    gate: &mut StatusGate,
    question: &str,
) -> Result<String> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::validation("No question provided."));
    }

    gate.poll(backend).await;
    if !gate.is_ready() {
        return Err(AppError::NotReady);
    }

    let answer = backend.ask_question(question).await?;
    log::debug!("Answer received ({} chars)", answer.len());
    Ok(answer)
}
