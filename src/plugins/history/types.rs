use std::ops::Deref;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}

/// One completed text-in / JSON-out conversion.
///
/// Immutable once created; the store only ever prepends or drops whole entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub id: String,
    pub created_at_ms: u64,
    pub input_text: String,
    /// Pretty-printed JSON text, kept verbatim for display and copy.
    pub output_json: String,
}

impl ConversionResult {
    pub fn new(input_text: impl Into<String>, output_json: impl Into<String>) -> Self {
        Self {
            id: new_id("conv"),
            created_at_ms: now_ms(),
            input_text: input_text.into(),
            output_json: output_json.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryPreview {
    pub id: String,
    pub created_at_ms: u64,
    pub preview: String,
}

/// Point-in-time view of the history, newest first.
///
/// Shares the underlying buffer with the store until the store is mutated
/// again, at which point the store copies; a snapshot never changes.
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    items: Arc<Vec<ConversionResult>>,
}

impl HistorySnapshot {
    pub(super) fn new(items: Arc<Vec<ConversionResult>>) -> Self {
        Self { items }
    }

    pub fn newest(&self) -> Option<&ConversionResult> {
        self.items.first()
    }
}

impl Deref for HistorySnapshot {
    type Target = [ConversionResult];

    fn deref(&self) -> &Self::Target {
        self.items.as_slice()
    }
}

impl<'a> IntoIterator for &'a HistorySnapshot {
    type Item = &'a ConversionResult;
    type IntoIter = std::slice::Iter<'a, ConversionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_has_prefixed_unique_id() {
        let a = ConversionResult::new("a", "{}");
        let b = ConversionResult::new("a", "{}");
        assert!(a.id.starts_with("conv_"));
        assert_ne!(a.id, b.id);
        assert!(a.created_at_ms > 0);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ConversionResult::new("hello", "{\n  \"a\": 1\n}");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["inputText"], "hello");
        assert_eq!(value["outputJson"], "{\n  \"a\": 1\n}");
        assert!(value.get("createdAtMs").is_some());
    }
}
