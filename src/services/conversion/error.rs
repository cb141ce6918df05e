use serde::Serialize;

/// Terminal outcome of a failed conversion call. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConversionError {
    #[error("InvalidInput: {message}")]
    InvalidInput { message: String },
    /// Another conversion is still pending.
    #[error("Busy: {message}")]
    Busy { message: String },
    #[error("Network: {message}")]
    Network { message: String },
    #[error("Remote ({status}): {message}")]
    Remote { status: u16, message: String },
    #[error("MalformedResponse: {message}")]
    MalformedResponse { message: String },
}

impl ConversionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn busy(message: impl Into<String>) -> Self {
        Self::Busy {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message }
            | Self::Busy { message }
            | Self::Network { message }
            | Self::Remote { message, .. }
            | Self::MalformedResponse { message } => message,
        }
    }

    /// Text suitable for showing to the person who submitted the request.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { .. } => "Please enter some text to convert.".to_string(),
            Self::Busy { .. } => {
                "A conversion is already in progress. Wait for it to finish.".to_string()
            }
            Self::Network { message } => {
                format!("Could not reach the conversion service: {}", message)
            }
            Self::Remote { message, .. } => format!("Conversion failed: {}", message),
            Self::MalformedResponse { .. } => {
                "The conversion service returned a response that is not valid JSON.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ConversionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::network(format!("request timed out: {}", err));
        }
        Self::network(err.to_string())
    }
}
