//! Agent gateway contract
//!
//! The language-model agent lives behind [`AgentGateway`]. A turn takes
//! the conversation history and returns a typed [`AgentTurn`]: the final
//! outcome plus every tool the agent invoked along the way. Gateway
//! implementations lift raw agent text into [`TurnOutcome`] with
//! [`markers::lift_outcome`], so the controller never scans text itself.

pub mod classify;
pub mod markers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::history::Message;

/// A tool the agent invoked during a turn, with its structured result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub args: serde_json::Value,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, args: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            args,
            result,
        }
    }
}

/// Which interactive selection workflow the agent is requesting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// Ids are note ids; todos are extracted from them for selection
    TodoExtraction,
    /// Ids are todo ids suggested for the focus list
    FocusSuggestions,
}

/// Typed outcome of an agent turn
///
/// Replaces runtime scanning for string-embedded markers: either a plain
/// answer, or a request to enter a selection workflow with the ids it
/// applies to. `text` is the displayable remainder with the marker
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Answer(String),
    RequestsSelection {
        kind: SelectionKind,
        ids: Vec<u64>,
        text: String,
    },
}

/// Result of one full agent turn
#[derive(Debug, Clone)]
pub struct AgentTurn {
    pub outcome: TurnOutcome,
    pub tool_invocations: Vec<ToolInvocation>,
}

impl AgentTurn {
    /// A plain answer with no tool activity
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            outcome: TurnOutcome::Answer(text.into()),
            tool_invocations: Vec::new(),
        }
    }
}

/// The tool-augmented agent, invoked once per conversational turn
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Run one agent turn over the given message history
    async fn run(&self, history: &[Message]) -> Result<AgentTurn, CollaboratorError>;
}
