//! Classification of agent tool invocations
//!
//! The controller inspects which tools fired during a turn to decide the
//! post-turn history policy (note-oriented tools keep context alive,
//! todo-oriented tools signal a topic shift) and to pick up pending
//! deletions produced by destructive-preview tools.

use tracing::debug;

use super::ToolInvocation;
use crate::domain::TodoId;

/// Tools that indicate the user is discussing notes
const NOTE_TOOLS: &[&str] = &[
    "search_notes",
    "get_note",
    "get_notes_for_analysis",
    "list_notes",
    "list_notes_by_date",
    "list_imported_notes",
    "search_notes_by_category",
    "search_notes_by_tags",
];

/// Tools that indicate the user has shifted to todo work
const TODO_TOOLS: &[&str] = &[
    "create_todo",
    "update_todo",
    "complete_todo",
    "uncomplete_todo",
    "delete_todo",
    "list_todos",
    "list_todos_by_date",
    "search_todos",
    "find_todos_to_complete",
    "find_todos_to_update",
    "add_to_focus",
    "remove_from_focus",
    "list_focused_todos",
    "suggest_focus_todos",
];

/// Tools that preview a destructive batch and require user confirmation
const DESTRUCTIVE_PREVIEW_TOOLS: &[&str] = &["delete_todos_bulk"];

pub fn is_note_tool(name: &str) -> bool {
    NOTE_TOOLS.contains(&name)
}

pub fn is_todo_tool(name: &str) -> bool {
    TODO_TOOLS.contains(&name)
}

/// Extract the previewed deletion snapshot from a destructive-preview
/// invocation, if this is one
///
/// The preview result carries the matched ids as `todo_ids`; that list is
/// the snapshot the eventual confirmation deletes, regardless of what the
/// originating filter would match later.
pub fn preview_delete_ids(invocation: &ToolInvocation) -> Option<Vec<TodoId>> {
    if !DESTRUCTIVE_PREVIEW_TOOLS.contains(&invocation.name.as_str()) {
        return None;
    }
    // A preview ran with confirm=false; confirm=true means the tool
    // already deleted and there is nothing pending.
    if invocation.args.get("confirm").and_then(|v| v.as_bool()) == Some(true) {
        return None;
    }

    let ids: Vec<TodoId> = invocation
        .result
        .get("todo_ids")?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_u64())
        .collect();

    if ids.is_empty() {
        return None;
    }
    debug!(count = ids.len(), "Destructive preview produced a pending deletion");
    Some(ids)
}
