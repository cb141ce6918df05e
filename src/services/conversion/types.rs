use serde::{Deserialize, Serialize};

/// Path of the text-to-JSON endpoint, relative to the configured base URL.
pub const GENERATE_PROMPT_PATH: &str = "/generate-prompt";
/// Health check path on the remote service.
pub const HEALTH_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl ConversionStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, ConversionStatus::Pending)
    }
}

/// Request body sent to the remote service.
#[derive(Debug, Clone, Serialize)]
pub(super) struct GenerateRequest<'a> {
    pub(super) text: &'a str,
}

/// Error body shapes the remote service may send with a non-success status.
///
/// `error` is the documented field; `detail` is what the service's web
/// framework emits for validation and HTTP exceptions.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RemoteErrorBody {
    pub(super) error: Option<serde_json::Value>,
    pub(super) detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: u16,
    pub message: String,
}
