// src/render/inline.rs
// Inline emphasis: **strong** first, then *emphasis*

use once_cell::sync::Lazy;
use regex::Regex;

/// Non-greedy paired double asterisks. Never spans lines since callers work per line.
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

/// Inline content of a line, table cell or paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong(Vec<Span>),
    Emphasis(Vec<Span>),
    LineBreak,
}

impl Span {
    /// Plain text with all markup removed
    pub fn plain_text(spans: &[Span]) -> String {
        let mut out = String::new();
        for span in spans {
            match span {
                Span::Text(text) => out.push_str(text),
                Span::Strong(inner) | Span::Emphasis(inner) => out.push_str(&Span::plain_text(inner)),
                Span::LineBreak => out.push('\n'),
            }
        }
        out
    }
}

/// Either a raw character still open to pairing, or a resolved bold span
#[derive(Debug, Clone)]
enum Atom {
    Char(char),
    Node(Span),
}

impl Atom {
    fn is_star(&self) -> bool {
        matches!(self, Atom::Char('*'))
    }
}

/// Parse one line of dialect text into spans.
///
/// Bold is resolved over the whole line before italics, so the asterisks of a
/// `**strong**` pair are never taken for emphasis markers. Italic pairing then
/// runs separately inside each bold span and across the text around them, which
/// keeps `<em>` and `<strong>` properly nested. Unpaired markers stay literal.
pub fn parse_inline(line: &str) -> Vec<Span> {
    let mut atoms = Vec::new();
    let mut last = 0;

    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        atoms.extend(line[last..whole.start()].chars().map(Atom::Char));
        let inner_atoms: Vec<Atom> = inner.as_str().chars().map(Atom::Char).collect();
        atoms.push(Atom::Node(Span::Strong(emphasize(&inner_atoms))));
        last = whole.end();
    }
    atoms.extend(line[last..].chars().map(Atom::Char));

    emphasize(&atoms)
}

/// Pair single asterisks with non-empty content between them
fn emphasize(atoms: &[Atom]) -> Vec<Span> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < atoms.len() {
        if atoms[i].is_star() {
            let close = atoms[i + 1..]
                .iter()
                .position(Atom::is_star)
                .map(|offset| i + 1 + offset);

            if let Some(close) = close {
                if close > i + 1 {
                    out.push(Span::Emphasis(collect(&atoms[i + 1..close])));
                    i = close + 1;
                    continue;
                }
            }
        }

        push_atom(&mut out, &atoms[i]);
        i += 1;
    }

    out
}

fn collect(atoms: &[Atom]) -> Vec<Span> {
    let mut out = Vec::new();
    for atom in atoms {
        push_atom(&mut out, atom);
    }
    out
}

fn push_atom(out: &mut Vec<Span>, atom: &Atom) {
    match atom {
        Atom::Char(c) => match out.last_mut() {
            Some(Span::Text(text)) => text.push(*c),
            _ => out.push(Span::Text(c.to_string())),
        },
        Atom::Node(span) => out.push(span.clone()),
    }
}
