//! Services for talking to the scraping backend.

pub mod backend;
pub mod status;
#[cfg(test)]
pub(crate) mod testing;

pub use backend::{HttpBackend, ScrapeBackend};
pub use status::{StatusGate, wait_until_done};
