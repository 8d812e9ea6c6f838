//! Shared error types: transport-level `ApiError` and the workflow taxonomy.

use serde::Deserialize;

/// Error body shapes the backend is known to produce.
///
/// Express handlers answer with `{"message": ...}`; some middleware emits
/// `{"error": ...}` and RFC7807 problem documents carry `detail`/`title`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
    title: Option<String>,
}

/// Attempt to pull a user-facing message out of an error response body.
/// Prefers `message`, then `error`, then `detail`, then `title`.
pub fn try_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    [parsed.message, parsed.error, parsed.detail, parsed.title]
        .into_iter()
        .flatten()
        .find(|msg| !msg.trim().is_empty())
}

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    Http { status: u16, body: String },
    Deserialize(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            ApiError::Deserialize(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Failure of a single workflow action, already classified for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Local precondition failed; no request was made.
    #[error("{0}")]
    Validation(String),
    /// The backend answered with an error status.
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Backend { status: u16, message: Option<String> },
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

impl WorkflowError {
    pub fn not_logged_in() -> Self {
        WorkflowError::Validation("You must log in first".to_string())
    }

    /// HTTP status reported by the backend, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            WorkflowError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The most specific message available; `fallback` covers failures that
    /// carry nothing meant for the operator.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            WorkflowError::Validation(msg) => msg.clone(),
            WorkflowError::Backend {
                message: Some(msg), ..
            } => msg.clone(),
            WorkflowError::Backend { message: None, .. } | WorkflowError::Transport(_) => {
                fallback.to_string()
            }
        }
    }
}

impl From<ApiError> for WorkflowError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, body } => WorkflowError::Backend {
                status,
                message: try_error_message(&body),
            },
            other => WorkflowError::Transport(other.to_string()),
        }
    }
}
