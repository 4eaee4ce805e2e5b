//! Interactive REPL front-end for a conversational session
//!
//! Owns terminal concerns only: the readline loop, event rendering, and
//! the command table for commands the controller defers (`/help`,
//! `/delete`, `/history`, ...). All conversational state lives in the
//! [`SessionController`].

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::actions::{ActionExecutor, ExtractionService};
use crate::agent::AgentGateway;
use crate::config::SessionConfig;
use crate::display::DisplayEvent;
use crate::session::{
    DeferredCommand, Mode, Origin, PendingAction, PendingOperation, SessionController, TurnOutput,
};

/// Outcome of a deferred slash command
enum SlashResult {
    Continue,
    Quit,
}

/// Interactive session REPL
pub struct ReplSession {
    controller: SessionController,
}

impl ReplSession {
    /// Create a session REPL with explicit collaborators
    pub fn new(
        gateway: Arc<dyn AgentGateway>,
        executor: Arc<dyn ActionExecutor>,
        extraction: Arc<dyn ExtractionService>,
        config: SessionConfig,
    ) -> Self {
        Self {
            controller: SessionController::new(gateway, executor, extraction, config),
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&self.prompt());

            match readline {
                Ok(line) => {
                    let input = line.trim().to_string();
                    // Empty lines are meaningful while capturing or tagging
                    if input.is_empty() && matches!(self.controller.mode(), Mode::Normal) {
                        continue;
                    }
                    if !input.is_empty() {
                        let _ = rl.add_history_entry(&input);
                    }

                    let output = self.controller.handle_input(&input).await;
                    match self.render(output) {
                        SlashResult::Continue => continue,
                        SlashResult::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.controller.mode() {
            Mode::Normal => format!("{} ", ">".bright_green()),
            Mode::CaptureInput { .. } | Mode::ImportInput { .. } => format!("{} ", "|".bright_blue()),
            _ => format!("{} ", "?".bright_yellow()),
        }
    }

    fn render(&mut self, output: TurnOutput) -> SlashResult {
        for event in output.events {
            match event {
                DisplayEvent::User(text) => println!("{} {}", ">".bright_green(), text),
                DisplayEvent::System(text) => println!("{}", text.bright_black()),
                DisplayEvent::Assistant(text) => println!("{}", text),
                DisplayEvent::Error(text) => eprintln!("{}", text.red()),
                DisplayEvent::Success(text) => println!("{}", text.green()),
            }
        }

        match output.deferred {
            Some(command) => self.handle_deferred(command),
            None => SlashResult::Continue,
        }
    }

    /// Commands the controller does not own
    fn handle_deferred(&mut self, command: DeferredCommand) -> SlashResult {
        match command.name.as_str() {
            "help" => {
                self.print_help();
                SlashResult::Continue
            }
            "quit" | "exit" => SlashResult::Quit,
            "history" => {
                println!("{}", self.controller.history().summary().bright_black());
                SlashResult::Continue
            }
            "clear" | "clear-history" => {
                self.controller.clear_history();
                println!("{}", "Conversation history cleared".bright_black());
                SlashResult::Continue
            }
            "delete" => {
                self.start_delete(&command.args);
                SlashResult::Continue
            }
            other => {
                eprintln!("{}", format!("Unknown command: /{}. Type /help for a list.", other).red());
                SlashResult::Continue
            }
        }
    }

    /// Build a manual deletion pending operation from `/delete <ids>`
    fn start_delete(&mut self, args: &str) {
        let mut ids = Vec::new();
        for part in args.replace(' ', "").split(',') {
            if part.is_empty() {
                continue;
            }
            match part.parse::<u64>() {
                Ok(id) => ids.push(id),
                Err(_) => {
                    eprintln!("{}", format!("Invalid todo id: '{}'", part).red());
                    return;
                }
            }
        }

        if ids.is_empty() {
            eprintln!("{}", "Usage: /delete <id>[,<id>...]".red());
            return;
        }

        let action = if ids.len() == 1 {
            PendingAction::SingleDelete { id: ids[0] }
        } else {
            PendingAction::MultiDelete { ids }
        };
        let describe = match &action {
            PendingAction::SingleDelete { id } => format!("Delete todo #{}?", id),
            PendingAction::MultiDelete { ids } => format!("Delete {} todos?", ids.len()),
            _ => String::new(),
        };

        match self
            .controller
            .begin_confirmation(PendingOperation::new(action, Origin::Manual))
        {
            Ok(()) => println!("{}", format!("{} Type 'yes' to confirm or 'no' to cancel.", describe).bright_black()),
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    fn print_welcome(&self) {
        println!("{}", "tasknotes interactive session".bright_white().bold());
        println!("{}", "Type /help for commands, or just describe what you need.".bright_black());
        println!();
    }

    fn print_help(&self) {
        println!("{}", "Commands:".bright_white());
        println!("  /capture        Capture free-form notes and extract todos");
        println!("  /import         Import bulk text as organized notes");
        println!("  /delete <ids>   Delete todos by id (comma-separated)");
        println!("  /history        Show conversation history stats");
        println!("  /clear-history  Clear conversation history");
        println!("  /help           Show this help");
        println!("  /quit           Exit");
        println!();
        println!("{}", "Anything else is sent to the assistant.".bright_black());
    }
}
