use thiserror::Error;

/// Errors raised while talking to the change-monitor backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },
}

impl ClientError {
    pub fn rejected(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether a later attempt could succeed without user intervention
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "config",
            Self::Transport { .. } => "network",
            Self::Status { .. } => "server",
            Self::Decode { .. } => "response",
            Self::Rejected { .. } => "rejected",
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
