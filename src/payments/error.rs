use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid gateway URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid gateway response: {message}")]
    Decode { message: String },

    /// The gateway answered but refused the operation. The message is the
    /// gateway's own (often Japanese) text and is the only detail available.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("No unused order id found after {attempts} attempts")]
    TooManyAttempts { attempts: u32 },
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// URL, network and decoding failures, i.e. anything that went wrong
    /// before a gateway status could be inspected.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidUrl { .. }
                | GatewayError::Network { .. }
                | GatewayError::Decode { .. }
        )
    }

    /// Informational only. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Configuration { .. } => false,
            GatewayError::InvalidUrl { .. } => false,
            GatewayError::Network { .. } => true,
            GatewayError::Decode { .. } => false,
            GatewayError::Rejected { .. } => false,
            GatewayError::Validation { .. } => false,
            GatewayError::Serialization { .. } => false,
            GatewayError::TooManyAttempts { .. } => true,
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            GatewayError::Configuration { .. } => 500,
            GatewayError::InvalidUrl { .. } => 500,
            GatewayError::Network { .. } => 503,
            GatewayError::Decode { .. } => 502,
            GatewayError::Rejected { .. } => 422,
            GatewayError::Validation { .. } => 400,
            GatewayError::Serialization { .. } => 500,
            GatewayError::TooManyAttempts { .. } => 503,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Serialization {
            message: err.to_string(),
        }
    }
}
