//! Interactive selection markers embedded in agent text
//!
//! Wire format, preserved bit-exact for compatibility with existing
//! agent prompts: `__<NAME>__|<id1>,<id2>,...__` where `NAME` is
//! `EXTRACT_TODOS_INTERACTIVE` or `FOCUS_SUGGESTIONS`. The marker may
//! appear anywhere in the final message text; everything else is the
//! displayable answer.

use tracing::{debug, warn};

use super::{SelectionKind, TurnOutcome};

/// Marker prefix requesting interactive todo extraction from notes
pub const EXTRACT_TODOS_MARKER: &str = "__EXTRACT_TODOS_INTERACTIVE__|";

/// Marker prefix carrying focus-list suggestions
pub const FOCUS_SUGGESTIONS_MARKER: &str = "__FOCUS_SUGGESTIONS__|";

/// Lift raw agent text into a typed turn outcome
///
/// Scans for a selection marker; if one is found it is stripped from the
/// displayed text and its id list parsed. A malformed marker (no closing
/// `__`) degrades to a plain answer with the text shown as-is.
pub fn lift_outcome(text: &str) -> TurnOutcome {
    for (prefix, kind) in [
        (EXTRACT_TODOS_MARKER, SelectionKind::TodoExtraction),
        (FOCUS_SUGGESTIONS_MARKER, SelectionKind::FocusSuggestions),
    ] {
        if let Some(outcome) = parse_marker(text, prefix, kind) {
            return outcome;
        }
    }
    TurnOutcome::Answer(text.to_string())
}

fn parse_marker(text: &str, prefix: &str, kind: SelectionKind) -> Option<TurnOutcome> {
    let start = text.find(prefix)?;
    let ids_start = start + prefix.len();

    let Some(end) = text[ids_start..].find("__").map(|i| ids_start + i) else {
        warn!(%prefix, "Malformed selection marker in agent text, displaying as-is");
        return Some(TurnOutcome::Answer(text.to_string()));
    };

    // Non-numeric fragments are skipped rather than failing the parse
    let ids: Vec<u64> = text[ids_start..end]
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();

    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..start]);
    remainder.push_str(&text[end + 2..]);
    let remainder = remainder.trim().to_string();

    debug!(?kind, count = ids.len(), "Parsed selection marker from agent text");
    Some(TurnOutcome::RequestsSelection {
        kind,
        ids,
        text: remainder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_answer() {
        let outcome = lift_outcome("You have 3 open todos.");
        assert_eq!(outcome, TurnOutcome::Answer("You have 3 open todos.".to_string()));
    }

    #[test]
    fn test_extract_todos_marker() {
        let outcome = lift_outcome("Found some notes. __EXTRACT_TODOS_INTERACTIVE__|45,67,102__");
        assert_eq!(
            outcome,
            TurnOutcome::RequestsSelection {
                kind: SelectionKind::TodoExtraction,
                ids: vec![45, 67, 102],
                text: "Found some notes.".to_string(),
            }
        );
    }

    #[test]
    fn test_focus_suggestions_marker_mid_text() {
        let outcome = lift_outcome("Here are my picks:\n__FOCUS_SUGGESTIONS__|3,7__\nLet me know.");
        assert_eq!(
            outcome,
            TurnOutcome::RequestsSelection {
                kind: SelectionKind::FocusSuggestions,
                ids: vec![3, 7],
                text: "Here are my picks:\n\nLet me know.".to_string(),
            }
        );
    }

    #[test]
    fn test_non_numeric_ids_are_skipped() {
        let outcome = lift_outcome("__FOCUS_SUGGESTIONS__|3, x, 9__");
        match outcome {
            TurnOutcome::RequestsSelection { ids, .. } => assert_eq!(ids, vec![3, 9]),
            other => panic!("Expected selection request, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_marker_degrades_to_answer() {
        let text = "Oops __EXTRACT_TODOS_INTERACTIVE__|45,67";
        assert_eq!(lift_outcome(text), TurnOutcome::Answer(text.to_string()));
    }

    #[test]
    fn test_marker_wire_format_is_exact() {
        // Compatibility contract: these literal prefixes must never change
        assert_eq!(EXTRACT_TODOS_MARKER, "__EXTRACT_TODOS_INTERACTIVE__|");
        assert_eq!(FOCUS_SUGGESTIONS_MARKER, "__FOCUS_SUGGESTIONS__|");
    }
}
