//! Terminal formatting for replies and the context panel
//!
//! Uses the same block tree as the HTML renderer, so a reply prints with
//! the structure it would have in the browser.

use super::colors::ansi::*;
use super::colors::{header, status};
use crate::panel::{DisplayContextPanel, EMPTY_MESSAGE};
use crate::render::{self, Block, Span};

/// Format reply text for the terminal
pub fn format_reply(text: &str) -> String {
    let blocks = render::parse(text);
    let mut out = Vec::with_capacity(blocks.len());

    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Heading { level, content } => {
                if i > 0 {
                    out.push(String::new());
                }
                let color = if *level <= 2 { MAGENTA } else { CYAN };
                let style = format!("{}{}", BOLD, color);
                out.push(format!("{}{}{}", style, format_spans(content, &style), RESET));
            }
            Block::Paragraph(spans) => out.push(format_spans(spans, "")),
            Block::List(items) => {
                for item in items {
                    out.push(format!("  • {}", format_spans(item, "")));
                }
            }
            Block::Table(rows) => out.extend(format_table(rows)),
        }
    }

    out.join("\n")
}

/// Inline spans with nested styles restored after each inner reset
fn format_spans(spans: &[Span], outer: &str) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(text),
            Span::Strong(inner) => {
                let style = format!("{}{}", outer, BOLD);
                out.push_str(&format!("{}{}{}{}", BOLD, format_spans(inner, &style), RESET, outer));
            }
            Span::Emphasis(inner) => {
                let style = format!("{}{}", outer, ITALIC);
                out.push_str(&format!("{}{}{}{}", ITALIC, format_spans(inner, &style), RESET, outer));
            }
            Span::LineBreak => out.push('\n'),
        }
    }
    out
}

fn format_table(rows: &[Vec<Vec<Span>>]) -> Vec<String> {
    let plain: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| Span::plain_text(cell)).collect())
        .collect();

    let columns = plain.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &plain {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .zip(&plain)
        .map(|(row, plain_row)| {
            let cells: Vec<String> = row
                .iter()
                .zip(plain_row)
                .enumerate()
                .map(|(i, (cell, text))| {
                    let pad = widths[i].saturating_sub(text.chars().count());
                    format!("{}{}", format_spans(cell, ""), " ".repeat(pad))
                })
                .collect();
            format!("  {}", cells.join(&format!(" {}│{} ", DIM, RESET)).trim_end())
        })
        .collect()
}

/// Format the context panel as indented label/value lines
pub fn format_panel(panel: &DisplayContextPanel) -> String {
    match panel {
        DisplayContextPanel::Empty => format!("{}\n  {}", header("Trip context"), status(EMPTY_MESSAGE)),
        DisplayContextPanel::Rows(rows) => {
            let mut out = header("Trip context");
            for row in rows {
                out.push_str(&format!("\n  {}{:<12}{} {}", DIM, row.label, RESET, row.value));
            }
            out
        }
    }
}

/// One-line panel summary printed after a reply
pub fn panel_summary(panel: &DisplayContextPanel) -> Option<String> {
    if panel.is_empty() {
        return None;
    }
    let parts: Vec<String> = panel.rows().iter().map(|row| row.to_string()).collect();
    Some(status(&format!("[trip] {}", parts.join(" · "))))
}

/// Strip ANSI escape sequences
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
