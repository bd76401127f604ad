//! Markdown-subset renderer
//!
//! Turns assistant replies written in the chat dialect into an HTML fragment.
//! The dialect is small and fixed:
//! - `#`, `##`, `###` headings at line start
//! - `**strong**` and `*emphasis*`
//! - `- ` list items at line start, one per line
//! - pipe-delimited table rows (any line containing `|`)
//! - blank lines between paragraphs, single newlines as line breaks
//!
//! Rendering runs as a pipeline: every line is classified into a
//! [`RenderNode`] (headings, then inline emphasis, then list markers, then
//! table rows), newlines are folded into break nodes, and the node stream is
//! coalesced into [`Block`]s so a run of list items or table rows ends up in
//! exactly one container. The whole fragment is wrapped once in
//! [`WRAPPER_OPEN`]/[`WRAPPER_CLOSE`].

mod html;
mod inline;

pub use html::{WRAPPER_CLOSE, WRAPPER_OPEN, escape_html, escape_text, spans_to_html, to_source};
pub use inline::{Span, parse_inline};

/// Per-line node produced before block coalescing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Heading { level: u8, content: Vec<Span> },
    ListItem(Vec<Span>),
    TableRow(Vec<Vec<Span>>),
    Text(Vec<Span>),
    /// A single newline between two content lines
    LineBreak,
    /// One or more blank lines between two content lines
    ParagraphBreak,
}

/// Coalesced block-level structure of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Span> },
    Paragraph(Vec<Span>),
    List(Vec<Vec<Span>>),
    Table(Vec<Vec<Vec<Span>>>),
}

/// Render dialect text into an HTML fragment.
///
/// Never fails: unmatched markers and unanchored syntax come out as literal
/// text. Feeding a rendered fragment back in returns it unchanged; any other
/// input, wrapped or not, goes through the dialect rules and escaping.
pub fn render(text: &str) -> String {
    if is_rendered(text) {
        return text.to_string();
    }
    html::blocks_to_html(&parse(text))
}

/// True when `text` is exactly what [`render`] emits for some source.
///
/// The fragment is read back into dialect source and rendered again; only a
/// byte-identical result counts.
pub fn is_rendered(text: &str) -> bool {
    to_source(text).is_some_and(|source| html::blocks_to_html(&parse(&source)) == text)
}

/// Parse dialect text into blocks without emitting HTML.
///
/// Shared by the HTML renderer and the terminal formatter.
pub fn parse(text: &str) -> Vec<Block> {
    coalesce(scan(text))
}

/// Classify lines and fold the newlines between them.
///
/// Leading and trailing blank lines are dropped; whitespace-only lines count
/// as blank.
pub fn scan(text: &str) -> Vec<RenderNode> {
    let mut nodes = Vec::new();
    let mut saw_content = false;
    let mut pending_blank = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            pending_blank = true;
            continue;
        }

        if saw_content {
            nodes.push(if pending_blank {
                RenderNode::ParagraphBreak
            } else {
                RenderNode::LineBreak
            });
        }
        saw_content = true;
        pending_blank = false;

        nodes.push(classify_line(line));
    }

    nodes
}

/// Classify one non-blank line.
///
/// Detection is anchored at the first column, and the first matching rule
/// wins: a heading or list line containing `|` stays a heading or list item.
pub fn classify_line(line: &str) -> RenderNode {
    if let Some((level, rest)) = heading(line) {
        return RenderNode::Heading {
            level,
            content: parse_inline(rest),
        };
    }

    if let Some(rest) = line.strip_prefix("- ") {
        return RenderNode::ListItem(parse_inline(rest));
    }

    if line.contains('|') {
        let cells = line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(parse_inline)
            .collect();
        return RenderNode::TableRow(cells);
    }

    RenderNode::Text(parse_inline(line))
}

/// `#`, `##` or `###` followed by a space
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(|rest| (hashes as u8, rest))
}

/// Group the node stream into blocks.
///
/// Consecutive list items (or table rows) separated only by single newlines
/// share one container; any other node or a blank line ends the run. Line
/// breaks only survive between text lines of the same paragraph.
pub fn coalesce(nodes: Vec<RenderNode>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<Span> = Vec::new();
    let mut pending_break = false;
    let mut run_open = false;

    for node in nodes {
        match node {
            RenderNode::LineBreak => pending_break = true,
            RenderNode::ParagraphBreak => {
                flush_paragraph(&mut blocks, &mut paragraph);
                pending_break = false;
                run_open = false;
            }
            RenderNode::Text(spans) => {
                if pending_break && !paragraph.is_empty() {
                    paragraph.push(Span::LineBreak);
                }
                paragraph.extend(spans);
                pending_break = false;
                run_open = false;
            }
            RenderNode::Heading { level, content } => {
                flush_paragraph(&mut blocks, &mut paragraph);
                blocks.push(Block::Heading { level, content });
                pending_break = false;
                run_open = false;
            }
            RenderNode::ListItem(item) => {
                flush_paragraph(&mut blocks, &mut paragraph);
                match blocks.last_mut() {
                    Some(Block::List(items)) if run_open => items.push(item),
                    _ => blocks.push(Block::List(vec![item])),
                }
                pending_break = false;
                run_open = true;
            }
            RenderNode::TableRow(row) => {
                flush_paragraph(&mut blocks, &mut paragraph);
                match blocks.last_mut() {
                    Some(Block::Table(rows)) if run_open => rows.push(row),
                    _ => blocks.push(Block::Table(vec![row])),
                }
                pending_break = false;
                run_open = true;
            }
        }
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<Span>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}
