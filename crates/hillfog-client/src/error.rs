//! Error types for the client layer

use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a facade call can surface
///
/// Exactly one variant is produced per failed call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Backend answered with `success: false`
    #[error("{message}")]
    Validation {
        message: String,
        /// The raw failure envelope
        envelope: Value,
    },

    /// Session missing or expired (HTTP 401)
    #[error("Session expired. Please login again.")]
    Unauthorized,

    /// HTTP 403
    #[error("Forbidden. You do not have permission.")]
    Forbidden,

    /// HTTP 404
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// HTTP 5xx
    #[error("Server error (HTTP {status}). Please try again later.")]
    ServerError { status: u16 },

    /// No reply from the backend (timeout, refused connection, DNS failure)
    #[error("No response from server: {0}")]
    NetworkUnreachable(String),

    /// Anything else, including undecodable payloads
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// Fieldless discriminant of [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    NetworkUnreachable,
    Unknown,
}

impl ApiErrorKind {
    /// Legacy error code string
    pub fn code(self) -> &'static str {
        match self {
            ApiErrorKind::Validation => "API_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::ServerError => "SERVER_ERROR",
            ApiErrorKind::NetworkUnreachable => "NETWORK_ERROR",
            ApiErrorKind::Unknown => "UNKNOWN_ERROR",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Validation { .. } => ApiErrorKind::Validation,
            ApiError::Unauthorized => ApiErrorKind::Unauthorized,
            ApiError::Forbidden => ApiErrorKind::Forbidden,
            ApiError::NotFound { .. } => ApiErrorKind::NotFound,
            ApiError::ServerError { .. } => ApiErrorKind::ServerError,
            ApiError::NetworkUnreachable(_) => ApiErrorKind::NetworkUnreachable,
            ApiError::Unknown(_) => ApiErrorKind::Unknown,
        }
    }

    /// Whether the caller has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub(crate) fn validation(message: Option<&str>, envelope: Value) -> Self {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("API request failed");
        ApiError::Validation {
            message: message.to_string(),
            envelope,
        }
    }

    pub(crate) fn decode(what: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Unknown(format!("Failed to decode {}: {}", what, err))
    }
}

impl From<hillfog_core::CoreError> for ApiError {
    fn from(err: hillfog_core::CoreError) -> Self {
        ApiError::Unknown(err.to_string())
    }
}

/// Session persistence failures
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize session: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Unknown(format!("Session store error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_message_fallback() {
        let err = ApiError::validation(None, json!({"success": false}));
        assert_eq!(err.to_string(), "API request failed");

        let err = ApiError::validation(Some("  "), json!({}));
        assert_eq!(err.to_string(), "API request failed");

        let err = ApiError::validation(Some("Name is required"), json!({}));
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_kind_and_code() {
        assert_eq!(ApiError::Unauthorized.kind(), ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::ServerError { status: 502 }.kind().code(), "SERVER_ERROR");
        assert_eq!(ApiError::NetworkUnreachable("refused".into()).kind().to_string(), "NETWORK_ERROR");
    }

    #[test]
    fn test_requires_login() {
        assert!(ApiError::Unauthorized.requires_login());
        assert!(!ApiError::Forbidden.requires_login());
    }

    #[test]
    fn test_session_error_becomes_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ApiError = SessionError::from(io).into();
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
    }
}
