//! Session-scoped conversion history.
//!
//! Nothing here does I/O; the session in `crate::services::session` owns the store.

mod preview;
mod store;
mod types;

pub use store::{HistoryStore, DEFAULT_HISTORY_CAPACITY};
pub use types::{ConversionResult, HistoryEntryPreview, HistorySnapshot};
