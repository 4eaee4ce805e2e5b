//! Selection token parsing for pending candidate lists

use crate::error::SessionError;

/// The user's reply to a numbered candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChoice {
    /// Abort the workflow without executing anything
    Cancel,
    /// Candidate indices to act on (0-based, sorted, deduplicated) plus
    /// any out-of-range numbers to report individually
    Indices {
        selected: Vec<usize>,
        out_of_range: Vec<i64>,
    },
}

/// Parse a selection reply against a candidate list of `n` items
///
/// `all` selects every candidate; `none`, `cancel`, and `no` abort. Any
/// other input is a comma-separated list of 1-based numbers. A
/// non-numeric token fails the whole parse (the caller keeps the pending
/// state and lets the user retry); out-of-range numbers are collected
/// for individual reporting without failing the rest.
pub fn parse(input: &str, n: usize) -> Result<SelectionChoice, SessionError> {
    let lowered = input.trim().to_lowercase();

    match lowered.as_str() {
        "none" | "cancel" | "no" => return Ok(SelectionChoice::Cancel),
        "all" => {
            return Ok(SelectionChoice::Indices {
                selected: (0..n).collect(),
                out_of_range: Vec::new(),
            });
        }
        _ => {}
    }

    let mut selected = Vec::new();
    let mut out_of_range = Vec::new();

    for part in lowered.replace(' ', "").split(',') {
        if part.is_empty() {
            continue;
        }
        let num: i64 = part.parse().map_err(|_| {
            SessionError::UserInput(format!(
                "Invalid input: '{}'. Enter numbers separated by commas (e.g. '1,2,3')",
                part
            ))
        })?;
        if num >= 1 && (num as usize) <= n {
            let idx = num as usize - 1;
            if !selected.contains(&idx) {
                selected.push(idx);
            }
        } else {
            out_of_range.push(num);
        }
    }

    selected.sort_unstable();
    Ok(SelectionChoice::Indices { selected, out_of_range })
}
