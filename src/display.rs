//! Typed display events emitted by the session controller
//!
//! Rendering is the front-end's job; the controller only says what kind
//! of line it is.

use serde::{Deserialize, Serialize};

/// One line of session output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DisplayEvent {
    /// Echo of user input
    User(String),
    /// Status or prompt text from the controller itself
    System(String),
    /// Agent-authored text
    Assistant(String),
    /// A failure, recoverable at the turn boundary
    Error(String),
    /// A completed action
    Success(String),
}

impl DisplayEvent {
    pub fn system(text: impl Into<String>) -> Self {
        Self::System(text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    /// The event's text, whatever its kind
    pub fn text(&self) -> &str {
        match self {
            Self::User(t) | Self::System(t) | Self::Assistant(t) | Self::Error(t) | Self::Success(t) => t,
        }
    }
}
