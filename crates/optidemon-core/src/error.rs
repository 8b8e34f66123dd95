//! Application error types with rich context

use thiserror::Error;

use crate::pipeline::Stage;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────
    /// Input rejected locally before any stage was dispatched.
    #[error("{message}")]
    Validation { message: String },

    /// The remote stage answered with a non-2xx status or an `error` field.
    /// `message` is the service-provided text, if it sent any.
    #[error("{stage} failed: {}", message.as_deref().unwrap_or("no message"))]
    Service {
        stage: Stage,
        message: Option<String>,
    },

    /// The request itself failed (connectivity, malformed response body).
    #[error("{stage} transport error: {message}")]
    Transport { stage: Stage, message: String },

    #[error("{stage} timed out after {secs}s")]
    Timeout { stage: Stage, secs: u64 },

    /// An expected display slot was missing.
    #[error("Render error: {message}")]
    Render { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Service failure carrying the text the backend sent (if any).
    pub fn service(stage: Stage, message: Option<String>) -> Self {
        Self::Service { stage, message }
    }

    pub fn transport(stage: Stage, message: impl Into<String>) -> Self {
        Self::Transport {
            stage,
            message: message.into(),
        }
    }

    pub fn timeout(stage: Stage, secs: u64) -> Self {
        Self::Timeout { stage, secs }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    /// The stage this error belongs to, if it came from a remote call.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Service { stage, .. }
            | Error::Transport { stage, .. }
            | Error::Timeout { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Text shown to the user when a run ends in the Error state.
    ///
    /// Service errors surface the backend's own message verbatim; everything
    /// else collapses to a generic per-stage message.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } => message.clone(),
            Error::Service { stage, message } => match message.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => stage.default_error().to_string(),
            },
            Error::Transport { stage, .. } => stage.default_error().to_string(),
            Error::Timeout { stage, secs } => {
                format!("{} (timed out after {}s)", stage.default_error(), secs)
            }
            Error::Render { .. } => "Failed to display results".to_string(),
            other => other.to_string(),
        }
    }
}
