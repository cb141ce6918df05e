use crate::plugins::history::ConversionResult;
use crate::services::config::{normalize_base_url, AppConfig};

use super::error::ConversionError;
use super::manager::ConversionGate;
use super::response::{health_message, pretty_json, remote_error_message};
use super::types::{
    ConversionStatus, GenerateRequest, HealthStatus, GENERATE_PROMPT_PATH, HEALTH_PATH,
};

/// Client for the remote text-to-JSON service.
///
/// At most one `submit` is in flight at a time; an overlapping call is
/// rejected with [`ConversionError::Busy`] instead of queued.
pub struct ConversionService {
    http_client: reqwest::Client,
    base_url: String,
    gate: ConversionGate,
}

fn build_http_client(config: &AppConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder().pool_max_idle_per_host(8);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|err| {
        log::warn!("Conversion: falling back to default HTTP client: {}", err);
        reqwest::Client::new()
    })
}

/// The server answered, so an unreadable body still yields `Remote` with the
/// status-code message.
async fn remote_failure(status: reqwest::StatusCode, response: reqwest::Response) -> ConversionError {
    let body = response.text().await.unwrap_or_else(|err| {
        log::debug!("Conversion: could not read error body: {}", err);
        String::new()
    });
    ConversionError::remote(status.as_u16(), remote_error_message(status.as_u16(), &body))
}

impl ConversionService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(&config.base_url, build_http_client(config))
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: normalize_base_url(base_url),
            gate: ConversionGate::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status(&self) -> ConversionStatus {
        self.gate.status()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `text` (trimmed) to the remote service and return its JSON,
    /// re-serialized with 2-space indentation.
    pub async fn submit(&self, text: &str) -> Result<ConversionResult, ConversionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConversionError::invalid_input("Text cannot be empty"));
        }

        let in_flight = self.gate.begin()?;
        log::info!("Conversion: submitting {} chars", text.chars().count());
        let result = self.generate(text).await;
        match &result {
            Ok(output) => log::info!("Conversion: succeeded ({})", output.id),
            Err(err) => log::warn!("Conversion: failed: {}", err),
        }
        in_flight.settle(result)
    }

    async fn generate(&self, text: &str) -> Result<ConversionResult, ConversionError> {
        let response = self
            .http_client
            .post(self.url(GENERATE_PROMPT_PATH))
            .json(&GenerateRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote_failure(status, response).await);
        }

        let body = response.text().await?;
        let output_json = pretty_json(&body)?;
        Ok(ConversionResult::new(text, output_json))
    }

    /// Probe the service root. Does not touch the conversion status.
    pub async fn health_check(&self) -> Result<HealthStatus, ConversionError> {
        let response = self.http_client.get(self.url(HEALTH_PATH)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(remote_failure(status, response).await);
        }

        let body = response.text().await?;
        Ok(HealthStatus {
            status: status.as_u16(),
            message: health_message(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_normalized_base() {
        let service = ConversionService::with_client("http://localhost:8001/", reqwest::Client::new());
        assert_eq!(service.base_url(), "http://localhost:8001");
        assert_eq!(
            service.url(GENERATE_PROMPT_PATH),
            "http://localhost:8001/generate-prompt"
        );
        assert_eq!(service.url(HEALTH_PATH), "http://localhost:8001/");
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_gate() {
        // Unroutable base: reaching the network would fail with Network, not InvalidInput.
        let service = ConversionService::with_client("http://127.0.0.1:1", reqwest::Client::new());
        let err = service.submit(" \n\t ").await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));
        assert_eq!(service.status(), ConversionStatus::Idle);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let service = ConversionService::with_client("http://127.0.0.1:1", reqwest::Client::new());
        let err = service.submit("hello").await.unwrap_err();
        assert!(matches!(err, ConversionError::Network { .. }), "{err:?}");
        assert_eq!(service.status(), ConversionStatus::Failed);
    }
}
