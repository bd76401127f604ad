//! Rustyline helper: slash command and destination completion, inline hints

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

use super::colors::ansi;
use crate::destinations::CATALOG;

/// Slash commands for tab completion
pub const SLASH_COMMANDS: &[&str] = &[
    "/help",
    "/destinations",
    "/context",
    "/sync",
    "/reset",
    "/status",
    "/save",
    "/quit",
    "/exit",
];

/// Shorter words match too many places to be worth a hint
const MIN_PLACE_PREFIX: usize = 2;

pub struct PlannerHelper {
    history: HistoryHinter,
}

impl PlannerHelper {
    pub fn new() -> Self {
        Self {
            history: HistoryHinter::new(),
        }
    }
}

impl Default for PlannerHelper {
    fn default() -> Self {
        Self::new()
    }
}

/// Commands starting with the first word of `line`
pub fn command_candidates(line: &str) -> Vec<&'static str> {
    let word = line.split_whitespace().next().unwrap_or("");
    SLASH_COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(word))
        .collect()
}

/// Rest of the only command the partial command word can become
pub fn command_hint(line: &str) -> Option<String> {
    if line.contains(' ') {
        return None;
    }
    match command_candidates(line).as_slice() {
        [only] => only.get(line.len()..).filter(|rest| !rest.is_empty()).map(str::to_string),
        _ => None,
    }
}

/// Catalog cities and countries starting with `word`, ignoring case
pub fn place_candidates(word: &str) -> Vec<&'static str> {
    if word.chars().count() < MIN_PLACE_PREFIX {
        return Vec::new();
    }
    let word = word.to_lowercase();
    CATALOG
        .iter()
        .flat_map(|dest| [dest.name, dest.country])
        .filter(|place| place.to_lowercase().starts_with(&word))
        .collect()
}

/// Rest of the catalog place the last word of `line` can only be
pub fn destination_hint(line: &str) -> Option<String> {
    let word = &line[word_start(line, line.len())..];
    match place_candidates(word).as_slice() {
        [only] => only.get(word.len()..).filter(|rest| !rest.is_empty()).map(str::to_string),
        _ => None,
    }
}

/// Byte offset where the word ending at `pos` begins
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_alphanumeric())
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0)
}

fn pairs(words: Vec<&'static str>) -> Vec<Pair> {
    words
        .into_iter()
        .map(|word| Pair {
            display: word.to_string(),
            replacement: word.to_string(),
        })
        .collect()
}

impl Completer for PlannerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if line.starts_with('/') {
            // Only the command word itself is completed
            if pos <= line.find(' ').unwrap_or(line.len()) {
                return Ok((0, pairs(command_candidates(line))));
            }
            return Ok((pos, vec![]));
        }

        let start = word_start(line, pos);
        Ok((start, pairs(place_candidates(&line[start..pos]))))
    }
}

impl Hinter for PlannerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        if line.starts_with('/') {
            return command_hint(line);
        }
        destination_hint(line).or_else(|| self.history.hint(line, pos, ctx))
    }
}

impl Highlighter for PlannerHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", ansi::DIM, hint, ansi::RESET))
    }
}

impl Validator for PlannerHelper {}

impl Helper for PlannerHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_candidates() {
        assert_eq!(command_candidates("/s"), vec!["/sync", "/status", "/save"]);
        assert_eq!(command_candidates("/de"), vec!["/destinations"]);
        assert_eq!(command_candidates("/save out.html"), vec!["/save"]);
        assert!(command_candidates("/nope").is_empty());
    }

    #[test]
    fn test_command_hint() {
        assert_eq!(command_hint("/des").as_deref(), Some("tinations"));
        assert_eq!(command_hint("/q").as_deref(), Some("uit"));
        assert_eq!(command_hint("/s"), None);
        assert_eq!(command_hint("/quit"), None);
        assert_eq!(command_hint("/save x"), None);
    }

    #[test]
    fn test_place_candidates() {
        assert_eq!(place_candidates("ba"), vec!["Bali", "Barcelona"]);
        assert_eq!(place_candidates("SP"), vec!["Spain"]);
        assert_eq!(place_candidates("so"), vec!["South Korea"]);
        assert!(place_candidates("t").is_empty());
        assert!(place_candidates("").is_empty());
    }

    #[test]
    fn test_destination_hint() {
        assert_eq!(destination_hint("i want to visit tok").as_deref(), Some("yo"));
        assert_eq!(destination_hint("Bar").as_deref(), Some("celona"));
        assert_eq!(destination_hint("trip to (se").as_deref(), Some("oul"));
        assert_eq!(destination_hint("off to ba"), None);
        assert_eq!(destination_hint("Tokyo"), None);
        assert_eq!(destination_hint("tokyo "), None);
    }

    #[test]
    fn test_word_start() {
        assert_eq!(word_start("visit rom", 9), 6);
        assert_eq!(word_start("rome", 4), 0);
        assert_eq!(word_start("café rom", 9), 6);
    }
}
