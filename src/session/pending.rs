//! Session mode and pending workflow payloads
//!
//! The mode is a single tagged enum with the active pending payload
//! carried inside the variant, so "mode says normal but a confirmation is
//! outstanding" is unrepresentable.

use serde::{Deserialize, Serialize};

use crate::domain::{ExtractedNote, NoteId, TodoCandidate, TodoId};

/// Who initiated a pending operation
///
/// Controls the post-resolution history policy: manual operations wipe
/// the history, agent-initiated ones only redact tool calls so the open
/// conversation is not lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Manual,
    AgentInitiated,
}

/// The action a pending operation will execute on confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete one todo by id
    SingleDelete { id: TodoId },
    /// Delete an explicit list of todos
    MultiDelete { ids: Vec<TodoId> },
    /// Delete the snapshot of ids matched at preview time; never
    /// re-evaluates the originating filter
    BulkDelete { ids: Vec<TodoId> },
    /// Create extracted notes in bulk with the collected tags
    ImportNotes {
        extracted: Vec<ExtractedNote>,
        tags: Vec<String>,
    },
}

/// A destructive or batch action awaiting yes/no confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    pub action: PendingAction,
    pub origin: Origin,
}

impl PendingOperation {
    pub fn new(action: PendingAction, origin: Origin) -> Self {
        Self { action, origin }
    }

    /// Short label for prompts and errors
    pub fn describe(&self) -> &'static str {
        match self.action {
            PendingAction::SingleDelete { .. } => "deletion",
            PendingAction::MultiDelete { .. } => "deletion",
            PendingAction::BulkDelete { .. } => "bulk deletion",
            PendingAction::ImportNotes { .. } => "import",
        }
    }
}

/// Candidate items awaiting a numeric / `all` / `none` choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSelection {
    /// Extracted todos, optionally linked back to their source note
    TodoExtraction {
        candidates: Vec<TodoCandidate>,
        linked_note: Option<NoteId>,
    },
    /// Todo ids the agent suggested for the focus list
    FocusSuggestion { candidate_ids: Vec<TodoId> },
}

impl PendingSelection {
    /// Number of selectable candidates
    pub fn len(&self) -> usize {
        match self {
            Self::TodoExtraction { candidates, .. } => candidates.len(),
            Self::FocusSuggestion { candidate_ids } => candidate_ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level session state, determining how the next input is interpreted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Single or multi-id deletion awaiting yes/no
    AwaitingDeleteConfirm(PendingOperation),
    /// Snapshot bulk deletion awaiting yes/no
    AwaitingBulkConfirm(PendingOperation),
    /// Import extracted; waiting for the tag line before confirmation
    AwaitingImportTags { extracted: Vec<ExtractedNote> },
    /// Import tagged; awaiting yes/no
    AwaitingImportConfirm(PendingOperation),
    /// Extracted todos awaiting a selection
    AwaitingTodoSelection(PendingSelection),
    /// Focus suggestions awaiting a selection
    AwaitingFocusSelection(PendingSelection),
    /// Collecting multi-line capture text
    CaptureInput { buffer: Vec<String> },
    /// Collecting multi-line import text
    ImportInput { buffer: Vec<String> },
}

impl Mode {
    /// Whether a selection workflow is outstanding
    pub fn selection_active(&self) -> bool {
        matches!(self, Mode::AwaitingTodoSelection(_) | Mode::AwaitingFocusSelection(_))
    }

    /// Whether any pending workflow (confirmation, tags, or selection) is
    /// outstanding
    pub fn pending_active(&self) -> bool {
        !matches!(self, Mode::Normal | Mode::CaptureInput { .. } | Mode::ImportInput { .. })
    }

    /// Short state name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::AwaitingDeleteConfirm(_) => "awaiting_delete_confirm",
            Mode::AwaitingBulkConfirm(_) => "awaiting_bulk_confirm",
            Mode::AwaitingImportTags { .. } => "awaiting_import_tags",
            Mode::AwaitingImportConfirm(_) => "awaiting_import_confirm",
            Mode::AwaitingTodoSelection(_) => "awaiting_todo_selection",
            Mode::AwaitingFocusSelection(_) => "awaiting_focus_selection",
            Mode::CaptureInput { .. } => "capture_input",
            Mode::ImportInput { .. } => "import_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_len() {
        let sel = PendingSelection::FocusSuggestion {
            candidate_ids: vec![1, 2, 3],
        };
        assert_eq!(sel.len(), 3);
        assert!(!sel.is_empty());
    }

    #[test]
    fn test_mode_predicates() {
        assert!(!Mode::Normal.pending_active());
        assert!(!Mode::CaptureInput { buffer: vec![] }.pending_active());

        let confirm = Mode::AwaitingDeleteConfirm(PendingOperation::new(
            PendingAction::SingleDelete { id: 5 },
            Origin::Manual,
        ));
        assert!(confirm.pending_active());
        assert!(!confirm.selection_active());

        let selection = Mode::AwaitingFocusSelection(PendingSelection::FocusSuggestion {
            candidate_ids: vec![1],
        });
        assert!(selection.selection_active());
        assert!(selection.pending_active());
    }
}
