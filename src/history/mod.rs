//! Conversation history and the policies that prune it
//!
//! The agent replays the whole history on every turn, so anything left in
//! it can be re-executed. The policy functions here keep the history both
//! context-aware and safe: `window` bounds its size, `redact` strips tool
//! artifacts that would let the agent re-issue a past tool call,
//! `purge_last_turns` erases a confirmation exchange, and `reset` clears
//! everything.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    ToolResult,
}

/// A tool call attached to an assistant message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub args: serde_json::Value,
}

/// A message in the conversation
///
/// An assistant message may carry both text and a tool call (intermediate
/// step) or either alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            tool_call: None,
        }
    }

    /// Create an assistant message with text content
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            tool_call: None,
        }
    }

    /// Create an assistant message carrying a tool call
    pub fn assistant_tool_call(text: impl Into<String>, name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            tool_call: Some(ToolCall {
                name: name.into(),
                args,
            }),
        }
    }

    /// Create a tool result message
    pub fn tool_result(text: impl Into<String>) -> Self {
        Self {
            role: Role::ToolResult,
            text: text.into(),
            tool_call: None,
        }
    }
}

/// Drop the oldest messages beyond `window`, preserving order
pub fn window(messages: &mut Vec<Message>, window: usize) {
    if messages.len() > window {
        let removed = messages.len() - window;
        messages.drain(..removed);
        debug!(removed, "Truncated conversation history");
    }
}

/// Remove tool execution artifacts from the history
///
/// Tool result messages are dropped entirely. Assistant messages carrying
/// both text and a tool call keep only the text; assistant messages that
/// are tool-call-only are dropped.
pub fn redact(messages: &mut Vec<Message>) {
    let before = messages.len();
    messages.retain_mut(|msg| match msg.role {
        Role::ToolResult => false,
        Role::Assistant if msg.tool_call.is_some() => {
            if msg.text.trim().is_empty() {
                false
            } else {
                msg.tool_call = None;
                true
            }
        }
        _ => true,
    });
    let removed = before - messages.len();
    if removed > 0 {
        debug!(removed, "Redacted tool execution messages from history");
    }
}

/// Remove the last `n` logical turns from the history
///
/// Walking backward from the end, a turn boundary is crossed each time a
/// user message is encountered; everything from the end through the n-th
/// boundary (inclusive) is removed.
pub fn purge_last_turns(messages: &mut Vec<Message>, n: usize) {
    if messages.is_empty() || n == 0 {
        return;
    }

    let mut turns_removed = 0;
    let mut cut = messages.len();
    while cut > 0 && turns_removed < n {
        cut -= 1;
        if messages[cut].role == Role::User {
            turns_removed += 1;
        }
    }

    let removed = messages.len() - cut;
    messages.truncate(cut);
    debug!(turns_removed, removed, "Purged recent conversation turns");
}

/// Bounded conversation history for one session
#[derive(Debug, Clone, Default)]
pub struct History {
    messages: Vec<Message>,
    window: usize,
}

impl History {
    /// Create an empty history bounded to `window` messages
    pub fn new(window: usize) -> Self {
        Self {
            messages: Vec::new(),
            window,
        }
    }

    /// Append a message, trimming the oldest beyond the window
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        window(&mut self.messages, self.window);
        debug!(len = self.messages.len(), "Conversation history updated");
    }

    /// Strip tool-call artifacts (see [`redact`])
    pub fn redact(&mut self) {
        redact(&mut self.messages);
    }

    /// Remove the last `n` logical turns (see [`purge_last_turns`])
    pub fn purge_last_turns(&mut self, n: usize) {
        purge_last_turns(&mut self.messages, n);
    }

    /// Clear all messages
    pub fn reset(&mut self) {
        let previous = self.messages.len();
        self.messages.clear();
        debug!(previous, "Cleared conversation history");
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Short summary of the current state, e.g. for a `/history` command
    pub fn summary(&self) -> String {
        let users = self.messages.iter().filter(|m| m.role == Role::User).count();
        let assistants = self.messages.iter().filter(|m| m.role == Role::Assistant).count();
        format!(
            "{} total messages ({} user, {} assistant)",
            self.messages.len(),
            users,
            assistants
        )
    }
}
