// src/lib.rs

//! bidview: searchable, filterable, paginated viewer for scraped bid listings.
//!
//! The [`session::Session`] owns the loaded rows and the filter/page state;
//! [`pipeline`] drives the backend round-trips (fetch, export, documents).

pub mod console;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod services;
pub mod session;
pub mod utils;
