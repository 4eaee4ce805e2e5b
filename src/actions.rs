//! Collaborator contracts for data mutation and AI extraction
//!
//! The session core never touches storage or models directly; both are
//! constructor-injected behind these traits so a session can be tested
//! against in-memory fakes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ExtractedNote, Note, NoteId, Priority, Todo, TodoCandidate, TodoId};
use crate::error::CollaboratorError;

/// Executes confirmed mutations against the data layer
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Delete one todo; `Ok(false)` means it did not exist
    async fn delete_todo(&self, id: TodoId) -> Result<bool, CollaboratorError>;

    /// Create a todo, optionally linked to the note it came from
    async fn create_todo(
        &self,
        content: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        linked_note: Option<NoteId>,
    ) -> Result<Todo, CollaboratorError>;

    /// Add a todo to the focus list; `Ok(None)` means it was not found
    async fn add_to_focus(&self, id: TodoId) -> Result<Option<Todo>, CollaboratorError>;

    /// Number of todos currently on the focus list
    async fn focus_count(&self) -> Result<usize, CollaboratorError>;

    /// Create notes in bulk, applying the same tags to each
    async fn bulk_create_notes(
        &self,
        notes: &[ExtractedNote],
        tags: &[String],
    ) -> Result<Vec<Note>, CollaboratorError>;

    /// Fetch a note by id
    async fn get_note(&self, id: NoteId) -> Result<Option<Note>, CollaboratorError>;
}

/// Turns buffered free text into candidate todos or notes
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Extract actionable todo candidates from free text
    async fn extract_todo_candidates(&self, text: &str) -> Result<Vec<TodoCandidate>, CollaboratorError>;

    /// Split bulk text into note candidates with metadata
    async fn extract_note_candidates(&self, text: &str) -> Result<Vec<ExtractedNote>, CollaboratorError>;
}
