//! Conversion client for the remote "generate prompt" service.
//!
//! Notes:
//! - One request per `submit`; no retry, no queueing.
//! - The returned JSON is stored as pretty-printed text, not a parsed value,
//!   because callers only display and copy it.

mod client;
mod error;
mod manager;
mod response;
mod types;

pub use client::ConversionService;
pub use error::ConversionError;
pub use types::{ConversionStatus, HealthStatus, GENERATE_PROMPT_PATH, HEALTH_PATH};
