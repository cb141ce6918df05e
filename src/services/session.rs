//! Top-level application session.
//!
//! Owns the conversion client, the history store and the clipboard, and wires
//! "submit, then record on success". View layers hold a `Session` and call
//! these methods; nothing else mutates history.

use crate::plugins::history::{ConversionResult, HistoryEntryPreview, HistorySnapshot, HistoryStore};
use crate::services::clipboard::{ClipboardError, ClipboardPort, SystemClipboard};
use crate::services::config::AppConfig;
use crate::services::conversion::{ConversionError, ConversionService, ConversionStatus, HealthStatus};

pub struct Session<C: ClipboardPort = SystemClipboard> {
    config: AppConfig,
    service: ConversionService,
    history: HistoryStore,
    clipboard: C,
    /// Result currently shown as "the output"; cleared by `clear_current`.
    current: Option<ConversionResult>,
}

impl Session<SystemClipboard> {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clipboard(config, SystemClipboard::new())
    }
}

impl<C: ClipboardPort> Session<C> {
    pub fn with_clipboard(config: AppConfig, clipboard: C) -> Self {
        let service = ConversionService::new(&config);
        Self::from_parts(config, service, clipboard)
    }

    pub fn from_parts(config: AppConfig, service: ConversionService, clipboard: C) -> Self {
        let history = HistoryStore::new(config.history_capacity);
        log::info!(
            "Session: base_url={} history_capacity={}",
            service.base_url(),
            history.capacity()
        );
        Self {
            config,
            service,
            history,
            clipboard,
            current: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn status(&self) -> ConversionStatus {
        self.service.status()
    }

    /// Convert `text`; on success the result becomes the current output and the
    /// newest history entry. A failure leaves history untouched.
    pub async fn convert(&mut self, text: &str) -> Result<ConversionResult, ConversionError> {
        match self.service.submit(text).await {
            Ok(result) => {
                let stored = self.history.insert(result);
                self.current = Some(stored.clone());
                Ok(stored)
            }
            Err(err) => {
                log::warn!("Session: conversion not recorded: {}", err);
                Err(err)
            }
        }
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ConversionError> {
        self.service.health_check().await
    }

    pub fn current(&self) -> Option<&ConversionResult> {
        self.current.as_ref()
    }

    /// Drop the current output. History is kept.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn history(&self) -> HistorySnapshot {
        self.history.list()
    }

    /// Effective capacity of the store, after coercion.
    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn history_previews(&self) -> Vec<HistoryEntryPreview> {
        self.history.previews()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        log::info!("Session: history cleared");
    }

    pub fn copy_current(&mut self) -> Result<(), ClipboardError> {
        let Some(current) = self.current.as_ref() else {
            return Err(ClipboardError::nothing_to_copy("No output to copy yet"));
        };
        self.clipboard.copy_text(&current.output_json)
    }

    pub fn copy_entry(&mut self, id: &str) -> Result<(), ClipboardError> {
        let Some(entry) = self.history.get(id) else {
            return Err(ClipboardError::nothing_to_copy(format!(
                "No history entry with id {}",
                id
            )));
        };
        self.clipboard.copy_text(&entry.output_json)
    }

    /// Copy the entry at `index` (0 = newest).
    pub fn copy_nth(&mut self, index: usize) -> Result<(), ClipboardError> {
        let snapshot = self.history.list();
        let Some(entry) = snapshot.get(index) else {
            return Err(ClipboardError::nothing_to_copy(format!(
                "History has {} entries, no entry at index {}",
                snapshot.len(),
                index
            )));
        };
        self.clipboard.copy_text(&entry.output_json)
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clipboard::MemoryClipboard;

    fn offline_session(capacity: usize) -> Session<MemoryClipboard> {
        let config = AppConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            history_capacity: capacity,
            ..AppConfig::default()
        };
        Session::with_clipboard(config, MemoryClipboard::new())
    }

    #[test]
    fn test_copy_without_output() {
        let mut session = offline_session(5);
        assert!(matches!(
            session.copy_current(),
            Err(ClipboardError::NothingToCopy { .. })
        ));
        assert!(matches!(
            session.copy_nth(0),
            Err(ClipboardError::NothingToCopy { .. })
        ));
        assert!(session.clipboard().contents().is_none());
    }

    #[tokio::test]
    async fn test_failed_convert_leaves_history_alone() {
        let mut session = offline_session(5);
        let err = session.convert("plan a trip").await.unwrap_err();
        assert!(matches!(err, ConversionError::Network { .. }));
        assert!(session.history().is_empty());
        assert!(session.current().is_none());
        assert_eq!(session.status(), ConversionStatus::Failed);
    }

    #[tokio::test]
    async fn test_blank_convert_is_invalid() {
        let mut session = offline_session(5);
        let err = session.convert("   ").await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));
        assert_eq!(session.status(), ConversionStatus::Idle);
    }

    #[test]
    fn test_history_uses_configured_capacity() {
        let session = offline_session(10);
        assert_eq!(session.history_capacity(), 10);
    }

    #[test]
    fn test_zero_capacity_reports_coerced_value() {
        let session = offline_session(0);
        assert_eq!(session.config().history_capacity, 0);
        assert_eq!(session.history_capacity(), 1);
    }

    #[test]
    fn test_copy_nth_max_index_is_an_error() {
        let mut session = offline_session(5);
        session.history.record("a", "{}");
        let err = session.copy_nth(usize::MAX).unwrap_err();
        assert!(matches!(err, ClipboardError::NothingToCopy { .. }));
        assert!(err.to_string().contains(&usize::MAX.to_string()));
        assert!(session.clipboard().contents().is_none());
    }
}
