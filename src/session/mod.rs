//! Conversational session: mode state machine, pending workflows, and the
//! controller that drives them

pub mod commands;
pub mod controller;
pub mod pending;
pub mod selection;

pub use commands::{Command, COMMAND_PREFIX};
pub use controller::{DeferredCommand, SessionController, TurnOutput};
pub use pending::{Mode, Origin, PendingAction, PendingOperation, PendingSelection};
pub use selection::SelectionChoice;
