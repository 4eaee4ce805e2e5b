//! Domain types for todos and notes
//!
//! These mirror what the data layer stores; the session core only reads
//! them for display and passes them between collaborators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier for a todo
pub type TodoId = u64;

/// Identifier for a note
pub type NoteId = u64;

/// Priority level for todos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Display suffix used in chat output, e.g. `" [HIGH]"`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::High => " [HIGH]",
            Self::Urgent => " [URGENT]",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A todo item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub focused: bool,
}

impl Todo {
    /// One-line summary used in confirmation previews and success output
    pub fn summary(&self) -> String {
        let due = self
            .due_date
            .map(|d| format!(" (due {})", d.format("%m/%d")))
            .unwrap_or_default();
        format!("#{}: {}{}{}", self.id, self.content, self.priority.label(), due)
    }
}

/// A stored note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Title to display, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// A todo candidate produced by extraction, awaiting user selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoCandidate {
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
}

/// A note candidate produced by bulk import extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedNote {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub content: String,
}

impl ExtractedNote {
    /// Wrap raw captured text as a single untitled note candidate
    pub fn from_raw(content: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            category: String::new(),
            keywords: Vec::new(),
            topics: Vec::new(),
            content: content.into(),
        }
    }
}
