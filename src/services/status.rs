// src/services/status.rs

//! Processing status polling.
//!
//! Asking questions is gated on the backend reporting `done`. The query
//! engine never looks at this signal.

use std::time::Duration;

use crate::error::Result;
use crate::models::ProcessingStatus;
use crate::services::ScrapeBackend;

/// Latest known processing status; a failed poll keeps the previous value.
#[derive(Debug, Clone, Default)]
pub struct StatusGate {
    last: Option<ProcessingStatus>,
}

impl StatusGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll once and record the outcome.
    pub async fn poll(&mut self, backend: &dyn ScrapeBackend) -> Option<&ProcessingStatus> {
        match backend.processing_status().await {
            Ok(status) => {
                if self.last.as_ref() != Some(&status) {
                    log::debug!("Processing status changed: {:?}", status);
                }
                self.last = Some(status);
            }
            Err(e) => log::warn!("Status poll failed: {}", e),
        }
        self.last.as_ref()
    }

    /// Whether asking is enabled.
    pub fn is_ready(&self) -> bool {
        self.last.as_ref().is_some_and(ProcessingStatus::is_done)
    }

    /// Text shown next to the ask control.
    pub fn notice(&self) -> &'static str {
        if self.is_ready() {
            ""
        } else {
            "File is still processing.."
        }
    }
}

/// Poll every `interval` until the backend reports `done` or `max_polls` is reached.
///
/// Returns whether the document became ready.
pub async fn wait_until_done(
    backend: &dyn ScrapeBackend,
    interval: Duration,
    max_polls: Option<usize>,
) -> Result<bool> {
    let mut gate = StatusGate::new();
    let mut ticker = tokio::time::interval(interval);
    let mut polls = 0usize;

    loop {
        ticker.tick().await;
        gate.poll(backend).await;
        polls += 1;

        if gate.is_ready() {
            return Ok(true);
        }
        if max_polls.is_some_and(|max| polls >= max) {
            return Ok(false);
        }
        log::info!("{}", gate.notice());
    }
}
