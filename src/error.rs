//! Session error types

use std::time::Duration;
use thiserror::Error;

/// Errors from collaborator calls (agent, extraction, executor)
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollaboratorError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            CollaboratorError::Backend(_) => true,
            CollaboratorError::Timeout(_) => true,
            CollaboratorError::InvalidResponse(_) => false,
            CollaboratorError::Json(_) => false,
        }
    }
}

/// Errors surfaced by the session controller
///
/// None of these are fatal: the controller converts every failure into a
/// displayed error at the turn boundary and the session stays live.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed confirmation or selection token. Pending state and mode
    /// are left untouched so the user can retry.
    #[error("Invalid input: {0}")]
    UserInput(String),

    /// A collaborator call failed. Pending state and mode are reset to
    /// normal since the data backing the workflow may now be stale.
    #[error("{context}: {source}")]
    Collaborator {
        context: &'static str,
        #[source]
        source: CollaboratorError,
    },

    /// A pending workflow is already active and a new one was requested.
    #[error("A pending {0} is already awaiting a response")]
    Busy(&'static str),
}

impl SessionError {
    /// Wrap a collaborator failure with a short context label
    pub fn collaborator(context: &'static str, source: CollaboratorError) -> Self {
        SessionError::Collaborator { context, source }
    }

    /// Whether resolving this error should reset the session to normal mode
    pub fn resets_session(&self) -> bool {
        matches!(self, SessionError::Collaborator { .. })
    }
}
