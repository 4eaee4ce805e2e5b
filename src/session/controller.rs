//! Session controller - the conversational orchestrator
//!
//! Owns the current [`Mode`], the conversation [`History`], and the
//! note-discussion retention hint, and mediates every line of user input
//! between the pending workflows and the agent. The controller is
//! single-flight by construction: `handle_input` takes `&mut self`, so a
//! session's state is never mutated concurrently even though collaborator
//! calls may suspend.
//!
//! Dispatch precedence (first match wins): outstanding confirmation,
//! outstanding selection, command prefix, capture/import payload, agent.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::actions::{ActionExecutor, ExtractionService};
use crate::agent::{classify, AgentGateway, SelectionKind, TurnOutcome};
use crate::config::SessionConfig;
use crate::display::DisplayEvent;
use crate::domain::{ExtractedNote, NoteId, TodoId};
use crate::error::{CollaboratorError, SessionError};
use crate::history::{History, Message};

use super::commands::{self, Command};
use super::pending::{Mode, Origin, PendingAction, PendingOperation, PendingSelection};
use super::selection::{self, SelectionChoice};

/// A command the controller does not own, deferred to the front-end's
/// command table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredCommand {
    pub name: String,
    pub args: String,
}

/// Everything one call to `handle_input` produced
#[derive(Debug, Default)]
pub struct TurnOutput {
    pub events: Vec<DisplayEvent>,
    pub deferred: Option<DeferredCommand>,
}

/// Conversational session controller
pub struct SessionController {
    gateway: Arc<dyn AgentGateway>,
    executor: Arc<dyn ActionExecutor>,
    extraction: Arc<dyn ExtractionService>,
    config: SessionConfig,
    history: History,
    mode: Mode,
    note_discussion: bool,
}

impl SessionController {
    /// Create a session with explicit collaborators
    pub fn new(
        gateway: Arc<dyn AgentGateway>,
        executor: Arc<dyn ActionExecutor>,
        extraction: Arc<dyn ExtractionService>,
        config: SessionConfig,
    ) -> Self {
        let history = History::new(config.history_window);
        Self {
            gateway,
            executor,
            extraction,
            config,
            history,
            mode: Mode::Normal,
            note_discussion: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn note_discussion(&self) -> bool {
        self.note_discussion
    }

    /// Clear conversation history and reset the retention hint
    pub fn clear_history(&mut self) {
        self.history.reset();
        self.note_discussion = false;
    }

    /// Install a pending operation awaiting yes/no confirmation
    ///
    /// Used by the front-end's command table for manual flows (e.g.
    /// `/delete 5`). Rejected if any pending workflow is already
    /// outstanding; pending workflows are strictly mutually exclusive.
    pub fn begin_confirmation(&mut self, operation: PendingOperation) -> Result<(), SessionError> {
        if self.mode.pending_active() {
            return Err(SessionError::Busy(self.mode.name()));
        }
        info!(kind = operation.describe(), origin = ?operation.origin, "Pending operation installed");
        self.mode = match operation.action {
            PendingAction::SingleDelete { .. } | PendingAction::MultiDelete { .. } => {
                Mode::AwaitingDeleteConfirm(operation)
            }
            PendingAction::BulkDelete { .. } => Mode::AwaitingBulkConfirm(operation),
            PendingAction::ImportNotes { .. } => Mode::AwaitingImportConfirm(operation),
        };
        Ok(())
    }

    /// Install a pending selection awaiting a numeric / all / none reply
    pub fn begin_selection(&mut self, selection: PendingSelection) -> Result<(), SessionError> {
        if self.mode.pending_active() {
            return Err(SessionError::Busy(self.mode.name()));
        }
        info!(candidates = selection.len(), "Pending selection installed");
        self.mode = match selection {
            PendingSelection::TodoExtraction { .. } => Mode::AwaitingTodoSelection(selection),
            PendingSelection::FocusSuggestion { .. } => Mode::AwaitingFocusSelection(selection),
        };
        Ok(())
    }

    /// Handle one line of user input
    ///
    /// Never fails: every error is converted into a displayed event at
    /// this boundary and the session stays live.
    pub async fn handle_input(&mut self, input: &str) -> TurnOutput {
        let text = input.trim();
        let mut events = Vec::new();
        let mut deferred = None;

        if text.is_empty() && matches!(self.mode, Mode::Normal) {
            return TurnOutput::default();
        }

        debug!(mode = self.mode.name(), "Handling input");

        match &self.mode {
            Mode::AwaitingDeleteConfirm(_) | Mode::AwaitingBulkConfirm(_) | Mode::AwaitingImportConfirm(_) => {
                self.resolve_confirmation(text, &mut events).await;
            }
            Mode::AwaitingImportTags { .. } => {
                self.resolve_import_tags(text, &mut events);
            }
            Mode::AwaitingTodoSelection(_) | Mode::AwaitingFocusSelection(_) => {
                self.resolve_selection(text, &mut events).await;
            }
            _ if commands::is_command(text) => {
                deferred = self.handle_command(text, &mut events);
            }
            Mode::CaptureInput { .. } | Mode::ImportInput { .. } => {
                self.handle_payload_line(text, &mut events).await;
            }
            Mode::Normal => {
                self.agent_turn(text, &mut events).await;
            }
        }

        TurnOutput { events, deferred }
    }

    // ------------------------------------------------------------------
    // Confirmation workflows
    // ------------------------------------------------------------------

    async fn resolve_confirmation(&mut self, token: &str, out: &mut Vec<DisplayEvent>) {
        let confirmed = match token.trim().to_lowercase().as_str() {
            "yes" | "y" => true,
            "no" | "n" => false,
            _ => {
                // Invalid token: pending state and mode stay untouched
                out.push(DisplayEvent::error("Invalid response. Type 'yes' or 'no'."));
                return;
            }
        };

        let operation = match std::mem::take(&mut self.mode) {
            Mode::AwaitingDeleteConfirm(op) | Mode::AwaitingBulkConfirm(op) | Mode::AwaitingImportConfirm(op) => op,
            other => {
                self.mode = other;
                return;
            }
        };

        info!(kind = operation.describe(), confirmed, "Resolving pending operation");

        if confirmed {
            match &operation.action {
                PendingAction::SingleDelete { id } => self.delete_batch(&[*id], out).await,
                PendingAction::MultiDelete { ids } | PendingAction::BulkDelete { ids } => {
                    // Deletes exactly the snapshot from preview time, even
                    // if the originating filter would now match more
                    self.delete_batch(ids, out).await;
                }
                PendingAction::ImportNotes { extracted, tags } => {
                    self.import_notes(extracted, tags, out).await;
                }
            }
        } else {
            out.push(DisplayEvent::system(format!("{} cancelled.", capitalize(operation.describe()))));
        }

        // Erase the request + confirmation exchange, then apply the
        // origin policy: manual operations start the conversation fresh,
        // agent-initiated ones keep the textual turns alive
        self.history.purge_last_turns(2);
        match operation.origin {
            Origin::Manual => self.history.reset(),
            Origin::AgentInitiated => self.history.redact(),
        }
    }

    /// Delete a batch of ids, one call per id
    ///
    /// Not transactional: each failure is reported individually and the
    /// rest of the batch still runs.
    async fn delete_batch(&self, ids: &[TodoId], out: &mut Vec<DisplayEvent>) {
        let mut deleted = 0usize;
        for &id in ids {
            match self.executor.delete_todo(id).await {
                Ok(true) => {
                    deleted += 1;
                    out.push(DisplayEvent::success(format!("Deleted todo #{id}")));
                }
                Ok(false) => {
                    out.push(DisplayEvent::error(format!("Failed to delete todo #{id}: not found")));
                }
                Err(e) => {
                    out.push(DisplayEvent::error(format!("Failed to delete todo #{id}: {e}")));
                }
            }
        }
        if ids.len() > 1 {
            out.push(DisplayEvent::success(format!(
                "Deleted {deleted} of {} todo(s)",
                ids.len()
            )));
        }
    }

    async fn import_notes(&mut self, extracted: &[ExtractedNote], tags: &[String], out: &mut Vec<DisplayEvent>) {
        let result = self.executor.bulk_create_notes(extracted, tags).await;
        match result {
            Ok(notes) => {
                for note in &notes {
                    let tags_display = if note.tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", note.tags.join(", "))
                    };
                    out.push(DisplayEvent::success(format!(
                        "Imported #{}: {}{}",
                        note.id,
                        note.display_title(),
                        tags_display
                    )));
                }
                out.push(DisplayEvent::success(format!(
                    "Successfully imported {} note(s)",
                    notes.len()
                )));
            }
            Err(e) => self.report_collaborator_failure("Import failed", e, out),
        }
    }

    /// Tag step of the import chain: collect tags, then ask for the final
    /// confirmation
    fn resolve_import_tags(&mut self, text: &str, out: &mut Vec<DisplayEvent>) {
        let extracted = match std::mem::take(&mut self.mode) {
            Mode::AwaitingImportTags { extracted } => extracted,
            other => {
                self.mode = other;
                return;
            }
        };

        let tags: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        if tags.is_empty() {
            out.push(DisplayEvent::system("No tags added (skipped)"));
        } else {
            out.push(DisplayEvent::system(format!("Tags set: {}", tags.join(", "))));
        }

        out.push(DisplayEvent::system(format!(
            "{} note(s) ready to import. Type 'yes' to import or 'no' to cancel.",
            extracted.len()
        )));

        self.mode = Mode::AwaitingImportConfirm(PendingOperation::new(
            PendingAction::ImportNotes { extracted, tags },
            Origin::Manual,
        ));
    }

    // ------------------------------------------------------------------
    // Selection workflows
    // ------------------------------------------------------------------

    async fn resolve_selection(&mut self, text: &str, out: &mut Vec<DisplayEvent>) {
        let count = match &self.mode {
            Mode::AwaitingTodoSelection(sel) | Mode::AwaitingFocusSelection(sel) => sel.len(),
            _ => return,
        };

        let choice = match selection::parse(text, count) {
            Ok(choice) => choice,
            Err(e) => {
                // Whole parse failed: keep the pending state, allow retry
                out.push(DisplayEvent::error(e.to_string()));
                return;
            }
        };

        let selected = match choice {
            SelectionChoice::Cancel => {
                self.cancel_selection(out);
                return;
            }
            SelectionChoice::Indices { selected, out_of_range } => {
                for num in out_of_range {
                    out.push(DisplayEvent::error(format!(
                        "Invalid number: {num}. Must be between 1 and {count}"
                    )));
                }
                if selected.is_empty() {
                    // Nothing usable: report and keep the pending state
                    out.push(DisplayEvent::system("No valid items selected."));
                    return;
                }
                selected
            }
        };

        let pending = match std::mem::take(&mut self.mode) {
            Mode::AwaitingTodoSelection(sel) | Mode::AwaitingFocusSelection(sel) => sel,
            other => {
                self.mode = other;
                return;
            }
        };

        match pending {
            PendingSelection::TodoExtraction { candidates, linked_note } => {
                self.create_selected_todos(&candidates, linked_note, &selected, out).await;
            }
            PendingSelection::FocusSuggestion { candidate_ids } => {
                self.add_selected_focus(text, &candidate_ids, &selected, out).await;
            }
        }
    }

    fn cancel_selection(&mut self, out: &mut Vec<DisplayEvent>) {
        let note = match std::mem::take(&mut self.mode) {
            Mode::AwaitingTodoSelection(_) => {
                out.push(DisplayEvent::system("Cancelled. No todos were created."));
                "Todo extraction cancelled by user."
            }
            Mode::AwaitingFocusSelection(_) => {
                out.push(DisplayEvent::system("Cancelled. No todos were added to focus."));
                "Focus suggestion cancelled by user."
            }
            other => {
                self.mode = other;
                return;
            }
        };
        // Recorded so the agent knows the interaction completed
        self.history.push(Message::assistant(note));
    }

    async fn create_selected_todos(
        &mut self,
        candidates: &[crate::domain::TodoCandidate],
        linked_note: Option<NoteId>,
        selected: &[usize],
        out: &mut Vec<DisplayEvent>,
    ) {
        let mut created = 0usize;
        for &idx in selected {
            let candidate = &candidates[idx];
            match self
                .executor
                .create_todo(&candidate.content, candidate.priority, None, linked_note)
                .await
            {
                Ok(todo) => {
                    created += 1;
                    out.push(DisplayEvent::success(format!(
                        "Created todo #{}: {}{}",
                        todo.id,
                        todo.content,
                        todo.priority.label()
                    )));
                }
                Err(e) => {
                    out.push(DisplayEvent::error(format!(
                        "Failed to create todo '{}': {e}",
                        candidate.content
                    )));
                }
            }
        }

        out.push(DisplayEvent::success(format!("Successfully created {created} todo(s)")));
        // Retained in history so follow-up questions can reference it
        self.history
            .push(Message::assistant(format!("Created {created} todo(s) from the extracted candidates.")));
    }

    async fn add_selected_focus(
        &mut self,
        raw_input: &str,
        candidate_ids: &[TodoId],
        selected: &[usize],
        out: &mut Vec<DisplayEvent>,
    ) {
        // Keep the user's raw choice in context for follow-ups
        self.history
            .push(Message::user(format!("Selected focus suggestions: {raw_input}")));

        let mut added = 0usize;
        for &idx in selected {
            let id = candidate_ids[idx];
            match self.executor.add_to_focus(id).await {
                Ok(Some(todo)) => {
                    added += 1;
                    out.push(DisplayEvent::success(format!("Added to focus: {}", todo.summary())));
                }
                Ok(None) => {
                    out.push(DisplayEvent::error(format!("Failed to add todo #{id} to focus: not found")));
                }
                Err(e) => {
                    out.push(DisplayEvent::error(format!("Failed to add todo #{id} to focus: {e}")));
                }
            }
        }

        out.push(DisplayEvent::success(format!(
            "Successfully added {added} todo(s) to focus"
        )));

        match self.executor.focus_count().await {
            Ok(count) if count > self.config.focus_soft_limit => {
                out.push(DisplayEvent::system(format!(
                    "You now have {count} focused todos. Consider keeping it to 5-10 for best focus."
                )));
            }
            Ok(_) => {}
            Err(e) => debug!(%e, "Could not read focus count"),
        }

        self.history.push(Message::assistant(format!(
            "Successfully added {added} todo(s) to the focus list based on user's selection."
        )));
    }

    // ------------------------------------------------------------------
    // Commands and multi-line payloads
    // ------------------------------------------------------------------

    fn handle_command(&mut self, text: &str, out: &mut Vec<DisplayEvent>) -> Option<DeferredCommand> {
        match commands::parse(text) {
            Command::Capture => {
                // Entering capture clears any stale buffer
                self.mode = Mode::CaptureInput { buffer: Vec::new() };
                out.push(DisplayEvent::system(
                    "Capture mode: paste your notes, then finish with an empty line or 'END'.",
                ));
                None
            }
            Command::Import => {
                self.mode = Mode::ImportInput { buffer: Vec::new() };
                out.push(DisplayEvent::system(
                    "Import mode: paste your notes, then finish with an empty line or 'END'.",
                ));
                None
            }
            Command::Other { name, args } => {
                debug!(%name, "Deferring command to the front-end table");
                Some(DeferredCommand { name, args })
            }
        }
    }

    async fn handle_payload_line(&mut self, text: &str, out: &mut Vec<DisplayEvent>) {
        let finalize = text.is_empty() || text.eq_ignore_ascii_case("end");

        if !finalize {
            match &mut self.mode {
                Mode::CaptureInput { buffer } | Mode::ImportInput { buffer } => {
                    buffer.push(text.to_string());
                }
                _ => {}
            }
            return;
        }

        let (payload, importing) = match std::mem::take(&mut self.mode) {
            Mode::CaptureInput { buffer } => (buffer.join("\n"), false),
            Mode::ImportInput { buffer } => (buffer.join("\n"), true),
            other => {
                self.mode = other;
                return;
            }
        };

        let payload = payload.trim().to_string();
        if payload.len() < self.config.min_payload_len {
            let what = if importing { "Import" } else { "Capture" };
            out.push(DisplayEvent::system(format!(
                "{what} cancelled: content too short ({} characters, minimum {}).",
                payload.len(),
                self.config.min_payload_len
            )));
            return;
        }

        if importing {
            self.finalize_import(&payload, out).await;
        } else {
            self.finalize_capture(&payload, out).await;
        }
    }

    async fn finalize_capture(&mut self, payload: &str, out: &mut Vec<DisplayEvent>) {
        let extracted = self.extraction.extract_todo_candidates(payload).await;
        let candidates = match extracted {
            Ok(candidates) => candidates,
            Err(e) => {
                self.report_collaborator_failure("Todo extraction failed", e, out);
                return;
            }
        };

        // Persist the raw capture so extracted todos can link back to it
        let linked_note = match self
            .executor
            .bulk_create_notes(&[ExtractedNote::from_raw(payload)], &[])
            .await
        {
            Ok(notes) => notes.first().map(|note| {
                out.push(DisplayEvent::success(format!("Saved note #{}", note.id)));
                note.id
            }),
            Err(e) => {
                out.push(DisplayEvent::error(format!("Failed to save note: {e}")));
                None
            }
        };

        if candidates.is_empty() {
            out.push(DisplayEvent::system("No action items found in the notes"));
            return;
        }

        out.push(DisplayEvent::system(format!(
            "Found {} actionable todo(s):",
            candidates.len()
        )));
        for (i, candidate) in candidates.iter().enumerate() {
            out.push(DisplayEvent::system(format!(
                "  {}. {}{}",
                i + 1,
                candidate.content,
                candidate.priority.label()
            )));
        }
        out.push(DisplayEvent::system(
            "Which todos would you like to add? Type 'all', '1,2,3', or 'none'.",
        ));

        self.mode = Mode::AwaitingTodoSelection(PendingSelection::TodoExtraction { candidates, linked_note });
    }

    async fn finalize_import(&mut self, payload: &str, out: &mut Vec<DisplayEvent>) {
        let result = self.extraction.extract_note_candidates(payload).await;
        let extracted = match result {
            Ok(extracted) => extracted,
            Err(e) => {
                self.report_collaborator_failure("Note extraction failed", e, out);
                return;
            }
        };

        if extracted.is_empty() {
            out.push(DisplayEvent::system("No notes could be extracted from the content."));
            return;
        }

        out.push(DisplayEvent::system(format!(
            "Review extracted notes ({} found):",
            extracted.len()
        )));
        for (i, note) in extracted.iter().enumerate() {
            let category = if note.category.is_empty() {
                String::new()
            } else {
                format!("[{}] ", note.category.to_uppercase())
            };
            out.push(DisplayEvent::system(format!("  {}. {}{}", i + 1, category, note.title)));
            if !note.summary.is_empty() {
                out.push(DisplayEvent::system(format!("     {}", note.summary)));
            }
        }
        out.push(DisplayEvent::system(
            "What accounts, clients, or projects are these notes for? \
             Enter tags separated by commas, or an empty line to skip.",
        ));

        self.mode = Mode::AwaitingImportTags { extracted };
    }

    // ------------------------------------------------------------------
    // Agent turns
    // ------------------------------------------------------------------

    async fn agent_turn(&mut self, text: &str, out: &mut Vec<DisplayEvent>) {
        self.history.push(Message::user(text));
        info!(history_len = self.history.len(), "Running agent turn");

        let result = self.gateway.run(self.history.messages()).await;
        let turn = match result {
            Ok(turn) => turn,
            Err(e) => {
                self.report_collaborator_failure("Agent turn failed", e, out);
                self.end_of_turn_history();
                return;
            }
        };

        // Replay the tool activity into history; the end-of-turn redact
        // strips it again so the agent can never re-execute it
        for invocation in &turn.tool_invocations {
            self.history
                .push(Message::assistant_tool_call("", &invocation.name, invocation.args.clone()));
            self.history.push(Message::tool_result(invocation.result.to_string()));
        }

        let used_note_tools = turn.tool_invocations.iter().any(|i| classify::is_note_tool(&i.name));
        let used_todo_tools = turn.tool_invocations.iter().any(|i| classify::is_todo_tool(&i.name));
        if used_note_tools {
            self.note_discussion = true;
            debug!("Entering note discussion - history will be preserved");
        } else if used_todo_tools && self.note_discussion {
            self.note_discussion = false;
            debug!("Topic shifted to todos - leaving note discussion");
        }

        let pending_preview = turn.tool_invocations.iter().find_map(classify::preview_delete_ids);

        match turn.outcome {
            TurnOutcome::Answer(answer) => {
                if !answer.is_empty() {
                    self.history.push(Message::assistant(&answer));
                    out.push(DisplayEvent::assistant(answer));
                }
            }
            TurnOutcome::RequestsSelection { kind, ids, text: shown } => {
                if !shown.is_empty() {
                    self.history.push(Message::assistant(&shown));
                    out.push(DisplayEvent::assistant(shown));
                }
                if pending_preview.is_some() {
                    // Pending workflows are mutually exclusive; the
                    // confirmation wins and the selection request is dropped
                    warn!(?kind, "Selection request ignored: a deletion is awaiting confirmation");
                    out.push(DisplayEvent::system(
                        "Selection skipped: a deletion is awaiting your confirmation.",
                    ));
                } else {
                    match kind {
                        SelectionKind::TodoExtraction => {
                            self.launch_interactive_extraction(&ids, out).await;
                        }
                        SelectionKind::FocusSuggestions => {
                            if ids.is_empty() {
                                out.push(DisplayEvent::system("No focus suggestions were provided."));
                            } else {
                                out.push(DisplayEvent::system(
                                    "Which todos should go on the focus list? Type 'all', '1,2,3', or 'none'.",
                                ));
                                self.mode = Mode::AwaitingFocusSelection(PendingSelection::FocusSuggestion {
                                    candidate_ids: ids,
                                });
                            }
                        }
                    }
                }
            }
        }

        if let Some(ids) = pending_preview {
            out.push(DisplayEvent::system(format!(
                "Type 'yes' to delete all {} todo(s), or 'no' to cancel.",
                ids.len()
            )));
            self.mode = Mode::AwaitingBulkConfirm(PendingOperation::new(
                PendingAction::BulkDelete { ids },
                Origin::AgentInitiated,
            ));
        }

        self.end_of_turn_history();
    }

    /// Fetch the requested notes, extract todo candidates from their
    /// combined content, and enter the selection workflow
    async fn launch_interactive_extraction(&mut self, note_ids: &[NoteId], out: &mut Vec<DisplayEvent>) {
        let mut sections = Vec::new();
        for &id in note_ids {
            match self.executor.get_note(id).await {
                Ok(Some(note)) => {
                    sections.push(format!("Note: {}\n{}", note.display_title(), note.content));
                }
                Ok(None) => out.push(DisplayEvent::error(format!("Note #{id} not found"))),
                Err(e) => out.push(DisplayEvent::error(format!("Failed to fetch note #{id}: {e}"))),
            }
        }

        if sections.is_empty() {
            out.push(DisplayEvent::error("No valid notes found to extract from."));
            return;
        }

        let combined = sections.join("\n\n---\n\n");
        let extracted = self.extraction.extract_todo_candidates(&combined).await;
        let candidates = match extracted {
            Ok(candidates) => candidates,
            Err(e) => {
                self.report_collaborator_failure("Todo extraction failed", e, out);
                return;
            }
        };

        if candidates.is_empty() {
            out.push(DisplayEvent::system("No actionable todos found in the notes."));
            return;
        }

        out.push(DisplayEvent::system(format!(
            "Found {} actionable todo(s):",
            candidates.len()
        )));
        for (i, candidate) in candidates.iter().enumerate() {
            out.push(DisplayEvent::system(format!(
                "  {}. {}{}",
                i + 1,
                candidate.content,
                candidate.priority.label()
            )));
        }
        out.push(DisplayEvent::system(
            "Which todos would you like to add? Type 'all', '1,2,3', or 'none'.",
        ));

        self.mode = Mode::AwaitingTodoSelection(PendingSelection::TodoExtraction {
            candidates,
            linked_note: None,
        });
    }

    /// Report a failed collaborator call and apply its session policy
    ///
    /// Collaborator failures drop back to normal mode rather than leaving
    /// a workflow pending against data that may now be stale.
    fn report_collaborator_failure(
        &mut self,
        context: &'static str,
        source: CollaboratorError,
        out: &mut Vec<DisplayEvent>,
    ) {
        let err = SessionError::collaborator(context, source);
        warn!(%err, "Collaborator call failed");
        out.push(DisplayEvent::error(err.to_string()));
        if err.resets_session() {
            self.mode = Mode::Normal;
        }
    }

    /// Post-turn history policy: redact always; reset unless a selection
    /// is outstanding or the user is mid-conversation about notes
    fn end_of_turn_history(&mut self) {
        self.history.redact();
        if !self.mode.selection_active() && !self.note_discussion {
            self.history.reset();
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
