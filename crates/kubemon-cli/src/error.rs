use kubemon_client::ClientError;
use thiserror::Error;

/// Main error type for the kubemon CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Backend errors
    #[error("Failed to reach the change monitor at {url}")]
    BackendUnreachable {
        url: String,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Backend(#[from] ClientError),

    #[error("Change '{id}' not found")]
    ChangeNotFound { id: String },

    /// Validation errors
    #[error("Invalid input: {field} = '{value}'. {suggestion}")]
    InvalidInput {
        field: String,
        value: String,
        suggestion: String,
    },

    /// Terminal errors
    #[error("Terminal error during {operation}: {source}")]
    Terminal {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,

    /// Generic wrapper for other errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Wrap a client error, promoting connection failures so the user gets
    /// a hint about the backend address
    pub fn from_client(url: impl Into<String>, source: ClientError) -> Self {
        match source {
            ClientError::Transport { .. } => Self::BackendUnreachable {
                url: url.into(),
                source,
            },
            other => Self::Backend(other),
        }
    }

    pub fn change_not_found(id: impl Into<String>) -> Self {
        Self::ChangeNotFound { id: id.into() }
    }

    /// Create an invalid input error with helpful suggestions
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn terminal(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Terminal {
            operation: operation.into(),
            source,
        }
    }

    /// Get a user-friendly error message with potential solutions
    pub fn user_message(&self) -> String {
        match self {
            Self::BackendUnreachable { url, .. } => {
                format!(
                    "Could not reach the change monitor at {}.\n\n\
                    Possible solutions:\n\
                    • Check that the monitor backend is running\n\
                    • Pass the right address with: kubemon --server <url>\n\
                    • Set server.url in your kubemon config.toml",
                    url
                )
            }
            Self::ChangeNotFound { id } => {
                format!(
                    "Change '{}' was not found.\n\n\
                    Possible solutions:\n\
                    • Check the change ID is correct\n\
                    • List recent changes with: kubemon changes",
                    id
                )
            }
            Self::InvalidInput {
                field,
                value,
                suggestion,
            } => {
                format!("Invalid {}: '{}'\n\n{}", field, value, suggestion)
            }
            _ => self.to_string(),
        }
    }

    /// Check if this error suggests the user should retry
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::BackendUnreachable { .. } => true,
            Self::Backend(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::BackendUnreachable { .. } => "connection",
            Self::Backend(e) => e.category(),
            Self::ChangeNotFound { .. } => "changes",
            Self::InvalidInput { .. } => "validation",
            Self::Terminal { .. } => "terminal",
            Self::Cancelled => "cancelled",
            Self::Internal(_) | Self::Serialization(_) | Self::Io(_) => "internal",
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
