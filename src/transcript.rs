// src/transcript.rs
// Standalone HTML page for a chat transcript and its context panel

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::orchestrator::{ChatMessage, Role};
use crate::panel::{DisplayContextPanel, EMPTY_MESSAGE};
use crate::render::escape_text;

const PAGE_STYLES: &str = "html,body{margin:0;background:#f4f6fb;color:#1f2937;font-family:system-ui,sans-serif;}\
.layout{display:flex;gap:24px;max-width:1100px;margin:0 auto;padding:24px;}\
.chat{flex:3;display:flex;flex-direction:column;gap:12px;}\
.message{padding:12px 16px;border-radius:12px;max-width:85%;}\
.message.user{align-self:flex-end;background:#2563eb;color:#fff;}\
.message.assistant{align-self:flex-start;background:#fff;box-shadow:0 1px 3px rgba(0,0,0,0.1);}\
.message time{display:block;font-size:0.75rem;opacity:0.6;margin-top:6px;}\
.message-content{line-height:1.6;}\
.message-content h1,.message-content h2,.message-content h3{margin:0.6em 0 0.3em;line-height:1.25;}\
.message-content h2{font-size:1.3rem;border-bottom:1px solid #e5e7eb;padding-bottom:0.2em;}\
.message-content ul{padding-left:1.4em;margin:0.4em 0;}\
.message-content table{border-collapse:collapse;margin:0.6em 0;}\
.message-content td{border:1px solid #e5e7eb;padding:4px 10px;}\
.message-content strong{font-weight:700;}\
.message-content em{font-style:italic;color:#4b5563;}\
.panel{flex:1;background:#fff;border-radius:12px;padding:16px;height:fit-content;box-shadow:0 1px 3px rgba(0,0,0,0.1);}\
.panel h2{font-size:1.1rem;margin-top:0;}\
.panel .empty{color:#6b7280;font-style:italic;}\
.panel dt{font-weight:600;}\
.panel dd{margin:0 0 8px 0;}";

/// Build the full page for a transcript
pub fn render_page(title: &str, transcript: &[ChatMessage], panel: &DisplayContextPanel) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"layout\">\n<main class=\"chat\">\n");
    for message in transcript {
        push_message(&mut body, message);
    }
    body.push_str("</main>\n");
    push_panel(&mut body, panel);
    body.push_str("</div>");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<style>{}</style>
</head>
<body>
{}
</body>
</html>
"#,
        escape_text(title),
        PAGE_STYLES,
        body
    )
}

/// Write the page to `path`, creating parent directories
pub fn save(
    path: &Path,
    title: &str,
    transcript: &[ChatMessage],
    panel: &DisplayContextPanel,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_page(title, transcript, panel))?;
    info!(path = %path.display(), messages = transcript.len(), "Transcript saved");
    Ok(())
}

fn push_message(out: &mut String, message: &ChatMessage) {
    let class = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "<article class=\"message {}\">{}<time datetime=\"{}\">{}</time></article>",
        class,
        message.html,
        message.created_at.to_rfc3339(),
        message.created_at.format("%H:%M")
    );
}

fn push_panel(out: &mut String, panel: &DisplayContextPanel) {
    out.push_str("<aside class=\"panel\">\n<h2>Trip Context</h2>\n");
    match panel {
        DisplayContextPanel::Empty => {
            let _ = writeln!(out, "<p class=\"empty\">{}</p>", EMPTY_MESSAGE);
        }
        DisplayContextPanel::Rows(rows) => {
            out.push_str("<dl>\n");
            for row in rows {
                let _ = writeln!(
                    out,
                    "<dt>{}</dt><dd>{}</dd>",
                    row.label,
                    escape_text(&row.value)
                );
            }
            out.push_str("</dl>\n");
        }
    }
    out.push_str("</aside>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TripContext;
    use crate::panel::merge;

    #[test]
    fn test_page_contains_messages_and_panel() {
        let transcript = vec![
            ChatMessage::user("Tokyo <3"),
            ChatMessage::assistant("## Tokyo\n- Shibuya"),
        ];
        let panel = merge(&TripContext::for_destination("Tokyo"), &DisplayContextPanel::Empty);
        let page = render_page("Trip", &transcript, &panel);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<article class=\"message user\">Tokyo &lt;3"));
        assert!(page.contains("<h2>Tokyo</h2>"));
        assert!(page.contains("<li>Shibuya</li>"));
        assert!(page.contains("<dt>Destination</dt><dd>Tokyo</dd>"));
    }

    #[test]
    fn test_page_never_carries_reply_markup() {
        let transcript = vec![
            ChatMessage::user("a &lt; b"),
            ChatMessage::assistant("<div class=\"message-content\"><img src=x onerror=alert(1)></div>"),
        ];
        let page = render_page("R&D", &transcript, &DisplayContextPanel::Empty);
        assert!(!page.contains("<img"));
        assert!(page.contains("a &amp;lt; b"));
        assert!(page.contains("<title>R&amp;D</title>"));
    }

    #[test]
    fn test_empty_panel_shows_sentinel() {
        let page = render_page("Trip", &[], &DisplayContextPanel::Empty);
        assert!(page.contains(EMPTY_MESSAGE));
        assert!(!page.contains("<dl>"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trip.html");
        save(&path, "Trip", &[ChatMessage::user("hi")], &DisplayContextPanel::Empty).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<title>Trip</title>"));
    }
}
