// src/models/wire.rs

//! Request and response bodies exchanged with the scraping backend.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Record;

/// Body of `GET /data`: either `data` or `error` is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataResponse {
    /// Resolve into records, surfacing the backend's error message.
    pub fn into_records(self) -> Result<Vec<Record>> {
        if let Some(error) = self.error {
            return Err(AppError::DataFetch(error));
        }
        Ok(self.data.unwrap_or_default())
    }
}

/// Body of `POST /ask_question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Response of `POST /ask_question`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub answer: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl AskResponse {
    /// Resolve into the answer text.
    pub fn into_answer(self) -> Result<String> {
        if self.success {
            Ok(self.answer.unwrap_or_default())
        } else {
            Err(AppError::Question(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

/// Document processing state published by the backend as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStatus {
    Done,
    Processing(String),
}

impl ProcessingStatus {
    /// Parse the status resource body; only `done` means ready.
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed == "done" {
            ProcessingStatus::Done
        } else {
            ProcessingStatus::Processing(trimmed.to_string())
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ProcessingStatus::Done)
    }
}
