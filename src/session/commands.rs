//! Command-prefix parsing
//!
//! The controller only owns the commands that change its own mode
//! (`/capture`, `/import`); everything else is deferred to the embedding
//! front-end's command table.

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enter multi-line capture mode
    Capture,
    /// Enter multi-line import mode
    Import,
    /// Not a controller command; deferred to the front-end
    Other { name: String, args: String },
}

/// Command prefix character
pub const COMMAND_PREFIX: char = '/';

/// Check whether the input line is a command
pub fn is_command(input: &str) -> bool {
    input.starts_with(COMMAND_PREFIX)
}

/// Parse a command line (must start with the prefix)
pub fn parse(input: &str) -> Command {
    let body = input.trim_start_matches(COMMAND_PREFIX);
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (body, ""),
    };

    match name.to_lowercase().as_str() {
        "capture" => Command::Capture,
        "import" | "transfer" => Command::Import,
        other => Command::Other {
            name: other.to_string(),
            args: args.to_string(),
        },
    }
}
