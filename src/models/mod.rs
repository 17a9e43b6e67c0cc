// src/models/mod.rs

//! Domain models for the viewer.
//!
//! This module contains the data structures shared by the query engine,
//! the backend client and the CLI.

mod config;
mod record;
mod wire;

// Re-export all public types
pub use config::{Config, ExportConfig, ServerConfig, StatusConfig, ViewConfig};
pub use record::{FIELD_NAMES, Quantity, Record};
pub use wire::{AskRequest, AskResponse, DataResponse, ProcessingStatus};
