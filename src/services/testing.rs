// src/services/testing.rs

//! In-memory `ScrapeBackend` for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ProcessingStatus, Record};
use crate::services::ScrapeBackend;

/// Scripted backend: each call pops the next queued response.
#[derive(Default)]
pub struct MockBackend {
    scrape_results: Mutex<VecDeque<Result<()>>>,
    data_results: Mutex<VecDeque<Result<Vec<Record>>>>,
    answers: Mutex<VecDeque<Result<String>>>,
    statuses: Mutex<VecDeque<Result<ProcessingStatus>>>,
    pub scraped: Mutex<Vec<String>>,
    pub questions: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<String>>,
    pub data_calls: Mutex<usize>,
}

impl MockBackend {
    pub fn push_scrape(&self, result: Result<()>) {
        self.scrape_results.lock().unwrap().push_back(result);
    }

    pub fn push_data(&self, result: Result<Vec<Record>>) {
        self.data_results.lock().unwrap().push_back(result);
    }

    pub fn push_answer(&self, result: Result<String>) {
        self.answers.lock().unwrap().push_back(result);
    }

    pub fn push_status(&self, result: Result<ProcessingStatus>) {
        self.statuses.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl ScrapeBackend for MockBackend {
    async fn scrape(&self, keyword: &str) -> Result<()> {
        self.scraped.lock().unwrap().push(keyword.to_string());
        self.scrape_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn fetch_data(&self) -> Result<Vec<Record>> {
        *self.data_calls.lock().unwrap() += 1;
        self.data_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn ask_question(&self, question: &str) -> Result<String> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    async fn processing_status(&self) -> Result<ProcessingStatus> {
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProcessingStatus::Processing(String::new())))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(url.to_string());
        Ok(format!("document at {}", url).into_bytes())
    }
}
