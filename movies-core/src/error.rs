//! Error types for configuration, the key-value store and request handling

use crate::movie_id::MovieId;
use crate::response::ApiResponse;
use serde_json::json;
use thiserror::Error;

/// Start-up configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

/// Errors from key-value store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the request. `message` is what the
    /// backend reported and is what callers get to see.
    #[error("{message}")]
    Backend {
        operation: &'static str,
        table: String,
        message: String,
    },

    /// A stored item could not be converted into the expected shape. The
    /// table and decoder detail stay in the logs.
    #[error("stored item has an unexpected shape")]
    Malformed {
        table: String,
        #[source]
        source: serde_dynamo::Error,
    },
}

impl StoreError {
    pub fn backend(
        operation: &'static str,
        table: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Backend {
            operation,
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn malformed(table: impl Into<String>, source: serde_dynamo::Error) -> Self {
        Self::Malformed {
            table: table.into(),
            source,
        }
    }
}

/// Request outcomes that replace the success body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid movie ID")]
    InvalidMovieId,

    #[error("Movie with ID {0} not found.")]
    NotFound(MovieId),

    /// `message` is the fixed external message for the failed action
    #[error("{message}")]
    Backend {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn fetch_failed(source: StoreError) -> Self {
        Self::Backend {
            message: "Failed to fetch movie",
            source,
        }
    }

    pub fn delete_failed(source: StoreError) -> Self {
        Self::Backend {
            message: "Failed to delete movie",
            source,
        }
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidMovieId => 400,
            Self::NotFound(_) => 404,
            Self::Backend { .. } => 500,
        }
    }

    pub fn to_response(&self) -> ApiResponse {
        let body = match self {
            Self::Backend { message, source } => json!({
                "message": message,
                "error": source.to_string(),
            }),
            other => json!({ "message": other.to_string() }),
        };
        ApiResponse::new(self.status(), body)
    }
}

impl From<ApiError> for ApiResponse {
    fn from(error: ApiError) -> Self {
        error.to_response()
    }
}
