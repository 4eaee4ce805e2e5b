//! tasknotes - conversational session core for a task and notes assistant
//!
//! The session controller mediates between a user typing free text and a
//! tool-augmented agent that can read and mutate todos and notes. Its job
//! is conversational safety: destructive actions always pass through an
//! explicit confirmation, extracted candidates always pass through an
//! explicit selection, and the replayed conversation history never
//! retains tool artifacts the agent could re-execute.
//!
//! # Core Concepts
//!
//! - **Single mode**: a session is always in exactly one [`session::Mode`];
//!   the pending payload lives inside the mode variant
//! - **Typed outcomes**: the agent gateway returns a typed
//!   [`agent::TurnOutcome`], never text the controller has to scan
//! - **History policies**: pruning is a small set of pure functions in
//!   [`history`], applied at well-defined points in the turn lifecycle
//! - **Injected collaborators**: agent, executor, and extraction sit
//!   behind async traits so the core tests against in-memory fakes
//!
//! # Modules
//!
//! - [`session`] - mode state machine, pending workflows, controller
//! - [`history`] - conversation history and pruning policies
//! - [`agent`] - agent gateway contract and wire-marker lifting
//! - [`actions`] - data mutation and extraction contracts
//! - [`repl`] - interactive terminal front-end
//! - [`config`] - configuration types and loading

pub mod actions;
pub mod agent;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod history;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use actions::{ActionExecutor, ExtractionService};
pub use agent::{AgentGateway, AgentTurn, SelectionKind, ToolInvocation, TurnOutcome};
pub use config::SessionConfig;
pub use display::DisplayEvent;
pub use domain::{ExtractedNote, Note, NoteId, Priority, Todo, TodoCandidate, TodoId};
pub use error::{CollaboratorError, SessionError};
pub use history::{History, Message, Role};
pub use repl::ReplSession;
pub use session::{
    DeferredCommand, Mode, Origin, PendingAction, PendingOperation, PendingSelection, SessionController, TurnOutput,
};
