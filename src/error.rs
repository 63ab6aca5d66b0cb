// src/error.rs
//! Application error types.
//!
//! Every variant here aborts the run that raised it. Recoverable problems
//! (an unsupported block, a missing title) never become errors; they degrade
//! in place and are reported through the log.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn from_http_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            502..=504 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError | Self::Conflict
        )
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfiguration { path: PathBuf, reason: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unexpected entry in cache directory: {path}")]
    UnexpectedCacheEntry { path: PathBuf },

    #[error("Page {page_id} is a child of database {database_id}, but that database is not loaded")]
    MissingDatabase {
        page_id: String,
        database_id: String,
    },

    #[error("Root page {0} is not in the cache")]
    MissingRootPage(String),

    #[error("Node {id} is neither a loaded page nor a loaded database")]
    DanglingReference { id: String },

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Feed generation failed for {path}: {reason}")]
    FeedGenerationFailed { path: String, reason: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_codes_map_to_vocabulary() {
        assert_eq!(
            NotionErrorCode::from_api_response("rate_limited"),
            NotionErrorCode::RateLimited
        );
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
    }

    #[test]
    fn only_transient_codes_retry() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(NotionErrorCode::from_http_status(503).is_retryable());
        assert!(!NotionErrorCode::ObjectNotFound.is_retryable());
        assert!(!NotionErrorCode::from_http_status(404).is_retryable());
    }

    #[test]
    fn fatal_errors_name_the_offending_ids() {
        let err = AppError::MissingDatabase {
            page_id: "p".into(),
            database_id: "d".into(),
        };
        assert_eq!(
            err.to_string(),
            "Page p is a child of database d, but that database is not loaded"
        );
    }
}
