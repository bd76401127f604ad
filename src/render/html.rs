// src/render/html.rs
// HTML emission for parsed blocks

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

use super::{Block, Span};

/// Outer container every rendered reply is wrapped in, exactly once
pub const WRAPPER_OPEN: &str = "<div class=\"message-content\">";
pub const WRAPPER_CLOSE: &str = "</div>";

/// Character references that are already escaped and must pass through as-is
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("valid regex")
});

/// Escape text for HTML, leaving existing character references intact so
/// already-escaped backend text is not escaped twice.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' if ENTITY.is_match(&text[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape plain text for HTML, including every `&`.
///
/// For text typed by a person, where `&lt;` means the four characters.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Recover dialect source from a fragment in this renderer's output shape.
///
/// Only the exact tags [`blocks_to_html`] writes are accepted, without
/// attributes; anything else returns `None`. Text is kept escaped, which
/// [`escape_html`] passes through unchanged on the way back.
pub fn to_source(html: &str) -> Option<String> {
    let mut reader = Reader {
        rest: html.strip_prefix(WRAPPER_OPEN)?.strip_suffix(WRAPPER_CLOSE)?,
    };
    let mut blocks = Vec::new();

    while !reader.rest.is_empty() {
        let block = if reader.eat("<h1>") {
            format!("# {}", reader.inline_until("h1")?)
        } else if reader.eat("<h2>") {
            format!("## {}", reader.inline_until("h2")?)
        } else if reader.eat("<h3>") {
            format!("### {}", reader.inline_until("h3")?)
        } else if reader.eat("<p>") {
            reader.inline_until("p")?
        } else if reader.eat("<ul>") {
            let mut items = Vec::new();
            while !reader.eat("</ul>") {
                if !reader.eat("<li>") {
                    return None;
                }
                items.push(format!("- {}", reader.inline_until("li")?));
            }
            items.join("\n")
        } else if reader.eat("<table>") {
            let mut rows = Vec::new();
            while !reader.eat("</table>") {
                if !reader.eat("<tr>") {
                    return None;
                }
                let mut cells = Vec::new();
                while !reader.eat("</tr>") {
                    if !reader.eat("<td>") {
                        return None;
                    }
                    cells.push(reader.inline_until("td")?);
                }
                rows.push(format!("| {} |", cells.join(" | ")));
            }
            rows.join("\n")
        } else {
            return None;
        };
        blocks.push(block);
    }

    Some(blocks.join("\n\n"))
}

struct Reader<'a> {
    rest: &'a str,
}

impl Reader<'_> {
    fn eat(&mut self, token: &str) -> bool {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Inline content up to `</tag>`, with markers restored
    fn inline_until(&mut self, tag: &str) -> Option<String> {
        let close = format!("</{tag}>");
        let mut out = String::new();
        loop {
            if self.eat(&close) {
                return Some(out);
            }
            if self.eat("<br>") {
                out.push('\n');
            } else if self.eat("<strong>") {
                let inner = self.inline_until("strong")?;
                let _ = write!(out, "**{inner}**");
            } else if self.eat("<em>") {
                let inner = self.inline_until("em")?;
                let _ = write!(out, "*{inner}*");
            } else {
                // Text runs end at a tag; an unterminated one is not ours
                let end = self.rest.find('<').filter(|end| *end > 0)?;
                out.push_str(&self.rest[..end]);
                self.rest = &self.rest[end..];
            }
        }
    }
}

pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::from(WRAPPER_OPEN);

    for block in blocks {
        match block {
            Block::Heading { level, content } => {
                let _ = write!(out, "<h{level}>{}</h{level}>", spans_to_html(content));
            }
            Block::Paragraph(spans) => {
                let _ = write!(out, "<p>{}</p>", spans_to_html(spans));
            }
            Block::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    let _ = write!(out, "<li>{}</li>", spans_to_html(item));
                }
                out.push_str("</ul>");
            }
            Block::Table(rows) => {
                out.push_str("<table>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        let _ = write!(out, "<td>{}</td>", spans_to_html(cell));
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</table>");
            }
        }
    }

    out.push_str(WRAPPER_CLOSE);
    out
}

pub fn spans_to_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&escape_html(text)),
            Span::Strong(inner) => {
                let _ = write!(out, "<strong>{}</strong>", spans_to_html(inner));
            }
            Span::Emphasis(inner) => {
                let _ = write!(out, "<em>{}</em>", spans_to_html(inner));
            }
            Span::LineBreak => out.push_str("<br>"),
        }
    }
    out
}
