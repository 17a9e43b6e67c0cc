//! Pipeline entry points for viewer operations.
//!
//! - `run_fetch`: Scrape a keyword and load the rows into the session
//! - `export_session`: Write the filtered rows as CSV
//! - `open_document` / `run_ask`: Document download and question answering

pub mod document;
pub mod export;
pub mod fetch;

pub use document::{QuestionPrompt, open_document, run_ask};
pub use export::{export_session, to_csv_string, write_csv};
pub use fetch::{Banner, BannerLevel, run_fetch};
