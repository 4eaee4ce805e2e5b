//! End-to-end session flows against in-memory collaborators
//!
//! These exercise whole conversations through the public API: agent turns
//! that open pending workflows, the user's confirmation or selection
//! replies, and the history policy along the way.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use tasknotes::agent::markers;
use tasknotes::{
    ActionExecutor, AgentGateway, AgentTurn, CollaboratorError, DisplayEvent, ExtractedNote, ExtractionService,
    Message, Mode, Note, NoteId, Priority, Role, SessionConfig, SessionController, Todo, TodoCandidate, TodoId,
    ToolInvocation,
};

/// In-memory store acting as the executor
#[derive(Default)]
struct MemoryStore {
    todos: Mutex<HashMap<TodoId, Todo>>,
    notes: Mutex<HashMap<NoteId, Note>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    fn seed_todos(&self, contents: &[&str]) -> Vec<TodoId> {
        let mut todos = self.todos.lock().unwrap();
        contents
            .iter()
            .map(|content| {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                todos.insert(
                    id,
                    Todo {
                        id,
                        content: content.to_string(),
                        priority: Priority::Normal,
                        due_date: None,
                        completed: false,
                        focused: false,
                    },
                );
                id
            })
            .collect()
    }

    fn seed_note(&self, title: &str, content: &str) -> NoteId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.notes.lock().unwrap().insert(
            id,
            Note {
                id,
                title: Some(title.to_string()),
                content: content.to_string(),
                category: None,
                tags: vec![],
            },
        );
        id
    }

    fn todo_ids(&self) -> Vec<TodoId> {
        let mut ids: Vec<TodoId> = self.todos.lock().unwrap().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl ActionExecutor for MemoryStore {
    async fn delete_todo(&self, id: TodoId) -> Result<bool, CollaboratorError> {
        Ok(self.todos.lock().unwrap().remove(&id).is_some())
    }

    async fn create_todo(
        &self,
        content: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        _linked_note: Option<NoteId>,
    ) -> Result<Todo, CollaboratorError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let todo = Todo {
            id,
            content: content.to_string(),
            priority,
            due_date,
            completed: false,
            focused: false,
        };
        self.todos.lock().unwrap().insert(id, todo.clone());
        Ok(todo)
    }

    async fn add_to_focus(&self, id: TodoId) -> Result<Option<Todo>, CollaboratorError> {
        let mut todos = self.todos.lock().unwrap();
        Ok(todos.get_mut(&id).map(|todo| {
            todo.focused = true;
            todo.clone()
        }))
    }

    async fn focus_count(&self) -> Result<usize, CollaboratorError> {
        Ok(self.todos.lock().unwrap().values().filter(|t| t.focused).count())
    }

    async fn bulk_create_notes(&self, notes: &[ExtractedNote], tags: &[String]) -> Result<Vec<Note>, CollaboratorError> {
        let mut stored = self.notes.lock().unwrap();
        Ok(notes
            .iter()
            .map(|extracted| {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let note = Note {
                    id,
                    title: (!extracted.title.is_empty()).then(|| extracted.title.clone()),
                    content: extracted.content.clone(),
                    category: (!extracted.category.is_empty()).then(|| extracted.category.clone()),
                    tags: tags.to_vec(),
                };
                stored.insert(id, note.clone());
                note
            })
            .collect())
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>, CollaboratorError> {
        Ok(self.notes.lock().unwrap().get(&id).cloned())
    }
}

/// Gateway that replays scripted raw agent text, lifting markers the way
/// a production gateway would
struct ScriptedGateway {
    turns: Mutex<Vec<(String, Vec<ToolInvocation>)>>,
}

impl ScriptedGateway {
    fn new(turns: Vec<(&str, Vec<ToolInvocation>)>) -> Self {
        Self {
            turns: Mutex::new(
                turns
                    .into_iter()
                    .rev()
                    .map(|(text, invocations)| (text.to_string(), invocations))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl AgentGateway for ScriptedGateway {
    async fn run(&self, _history: &[Message]) -> Result<AgentTurn, CollaboratorError> {
        let (text, tool_invocations) = self
            .turns
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| CollaboratorError::InvalidResponse("script exhausted".to_string()))?;
        Ok(AgentTurn {
            outcome: markers::lift_outcome(&text),
            tool_invocations,
        })
    }
}

struct KeywordExtraction;

#[async_trait]
impl ExtractionService for KeywordExtraction {
    /// Every line starting with "todo:" becomes a candidate
    async fn extract_todo_candidates(&self, text: &str) -> Result<Vec<TodoCandidate>, CollaboratorError> {
        Ok(text
            .lines()
            .filter_map(|line| line.strip_prefix("todo:"))
            .map(|rest| TodoCandidate {
                content: rest.trim().to_string(),
                priority: Priority::Normal,
            })
            .collect())
    }

    /// Every paragraph becomes a note
    async fn extract_note_candidates(&self, text: &str) -> Result<Vec<ExtractedNote>, CollaboratorError> {
        Ok(text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .enumerate()
            .map(|(i, paragraph)| ExtractedNote {
                title: format!("Note {}", i + 1),
                summary: String::new(),
                category: "general".to_string(),
                keywords: vec![],
                topics: vec![],
                content: paragraph.trim().to_string(),
            })
            .collect())
    }
}

/// Install a test subscriber once so RUST_LOG surfaces controller traces
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn session(store: Arc<MemoryStore>, gateway: ScriptedGateway) -> SessionController {
    init_tracing();
    SessionController::new(
        Arc::new(gateway),
        store,
        Arc::new(KeywordExtraction),
        SessionConfig::default(),
    )
}

#[tokio::test]
async fn bulk_delete_flow_from_agent_preview_to_confirmation() {
    let store = Arc::new(MemoryStore::default());
    let ids = store.seed_todos(&["old report", "old cleanup", "keep me"]);

    let preview = ToolInvocation::new(
        "delete_todos_bulk",
        json!({"filter": "completed", "confirm": false}),
        json!({"todo_ids": [ids[0], ids[1]]}),
    );
    let gateway = ScriptedGateway::new(vec![("I found 2 completed todos that would be deleted.", vec![preview])]);
    let mut session = session(store.clone(), gateway);

    session.handle_input("clean up my completed todos").await;
    assert!(matches!(session.mode(), Mode::AwaitingBulkConfirm(_)));
    // Nothing deleted before confirmation
    assert_eq!(store.todo_ids().len(), 3);

    let output = session.handle_input("yes").await;
    assert_eq!(store.todo_ids(), vec![ids[2]]);
    assert!(output
        .events
        .iter()
        .any(|e| matches!(e, DisplayEvent::Success(t) if t.contains("2 of 2"))));
    assert!(matches!(session.mode(), Mode::Normal));
}

#[tokio::test]
async fn bulk_delete_rejected_leaves_store_untouched() {
    let store = Arc::new(MemoryStore::default());
    let ids = store.seed_todos(&["a", "b"]);

    let preview = ToolInvocation::new(
        "delete_todos_bulk",
        json!({"confirm": false}),
        json!({"todo_ids": ids}),
    );
    let gateway = ScriptedGateway::new(vec![("These would be deleted.", vec![preview])]);
    let mut session = session(store.clone(), gateway);

    session.handle_input("delete everything").await;
    session.handle_input("no").await;

    assert_eq!(store.todo_ids().len(), 2);
    assert!(matches!(session.mode(), Mode::Normal));
}

#[tokio::test]
async fn capture_extract_select_creates_linked_todos() {
    let store = Arc::new(MemoryStore::default());
    let gateway = ScriptedGateway::new(vec![]);
    let mut session = session(store.clone(), gateway);

    session.handle_input("/capture").await;
    session.handle_input("Meeting with the platform team").await;
    session.handle_input("todo: send out the summary").await;
    session.handle_input("todo: book the follow-up").await;
    let output = session.handle_input("END").await;

    assert!(matches!(session.mode(), Mode::AwaitingTodoSelection(_)));
    // The raw capture was persisted as a note before selection
    assert_eq!(store.notes.lock().unwrap().len(), 1);
    assert!(output
        .events
        .iter()
        .any(|e| matches!(e, DisplayEvent::System(t) if t.contains("2 actionable"))));

    session.handle_input("all").await;
    let todos = store.todos.lock().unwrap();
    let contents: Vec<&str> = {
        let mut v: Vec<&str> = todos.values().map(|t| t.content.as_str()).collect();
        v.sort_unstable();
        v
    };
    assert_eq!(contents, vec!["book the follow-up", "send out the summary"]);
}

#[tokio::test]
async fn focus_marker_flow_adds_selected_todos() {
    let store = Arc::new(MemoryStore::default());
    let ids = store.seed_todos(&["urgent fix", "write docs", "refactor"]);

    let marker_text = format!(
        "These deserve focus today. __FOCUS_SUGGESTIONS__|{},{}__",
        ids[0], ids[2]
    );
    let gateway = ScriptedGateway::new(vec![(
        marker_text.as_str(),
        vec![ToolInvocation::new("suggest_focus_todos", json!({}), json!({}))],
    )]);
    let mut session = session(store.clone(), gateway);

    let output = session.handle_input("what should I focus on?").await;
    // The marker never reaches the user
    assert!(output.events.iter().all(|e| !e.text().contains("__FOCUS_SUGGESTIONS__")));
    assert!(matches!(session.mode(), Mode::AwaitingFocusSelection(_)));

    session.handle_input("1").await;
    let todos = store.todos.lock().unwrap();
    assert!(todos[&ids[0]].focused);
    assert!(!todos[&ids[2]].focused);
}

#[tokio::test]
async fn extraction_marker_flow_reads_notes_and_creates_todos() {
    let store = Arc::new(MemoryStore::default());
    let note_id = store.seed_note("Standup", "todo: fix the flaky integration test");

    let marker_text = format!("__EXTRACT_TODOS_INTERACTIVE__|{}__", note_id);
    let gateway = ScriptedGateway::new(vec![(marker_text.as_str(), vec![])]);
    let mut session = session(store.clone(), gateway);

    session.handle_input("pull todos out of my standup note").await;
    assert!(matches!(session.mode(), Mode::AwaitingTodoSelection(_)));

    session.handle_input("all").await;
    let todos = store.todos.lock().unwrap();
    assert_eq!(todos.len(), 1);
    assert!(todos.values().any(|t| t.content == "fix the flaky integration test"));
}

#[tokio::test]
async fn import_flow_applies_tags_to_every_note() {
    let store = Arc::new(MemoryStore::default());
    let gateway = ScriptedGateway::new(vec![]);
    let mut session = session(store.clone(), gateway);

    session.handle_input("/import").await;
    session.handle_input("Sprint planning went long, roadmap slipped a week.").await;
    session.handle_input("").await; // blank line finalizes the buffer
    session.handle_input("Client-A, Q3").await;
    assert!(matches!(session.mode(), Mode::AwaitingImportConfirm(_)));

    session.handle_input("yes").await;
    let notes = store.notes.lock().unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes.values().all(|n| n.tags == vec!["Client-A", "Q3"]));
}

#[tokio::test]
async fn note_discussion_keeps_context_across_turns() {
    let store = Arc::new(MemoryStore::default());
    let note_turns = vec![
        (
            "You have one note about the launch.",
            vec![ToolInvocation::new("search_notes", json!({"query": "launch"}), json!({"count": 1}))],
        ),
        (
            "It was written last Tuesday.",
            vec![ToolInvocation::new("get_note", json!({"id": 1}), json!({"title": "Launch"}))],
        ),
    ];
    let gateway = ScriptedGateway::new(note_turns);
    let mut session = session(store, gateway);

    session.handle_input("do I have notes about the launch?").await;
    assert!(session.note_discussion());
    let first_len = session.history().len();
    assert!(first_len > 0);

    session.handle_input("when was it written?").await;
    // Second turn builds on the retained first turn
    assert!(session.history().len() > first_len);
    // Tool artifacts never survive a turn
    for msg in session.history().messages() {
        assert_ne!(msg.role, Role::ToolResult);
        assert!(msg.tool_call.is_none());
    }
}

#[tokio::test]
async fn plain_todo_chat_leaves_no_history_behind() {
    let store = Arc::new(MemoryStore::default());
    let gateway = ScriptedGateway::new(vec![(
        "Created it.",
        vec![ToolInvocation::new("create_todo", json!({"content": "x"}), json!({"id": 1}))],
    )]);
    let mut session = session(store, gateway);

    session.handle_input("make a todo").await;
    assert!(session.history().is_empty());
    assert!(!session.note_discussion());
}
