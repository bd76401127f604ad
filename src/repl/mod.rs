//! Interactive REPL for the trip planner
//!
//! Provides a readline-based interface with:
//! - Command history in ~/.trip-planner/history
//! - Slash commands with tab completion
//! - Replies printed as styled text (or raw HTML with `--html`)

pub mod colors;
mod commands;
mod formatter;
mod helper;

pub use commands::{Command, CommandHandler, CommandOutcome};
pub use formatter::{format_panel, format_reply, panel_summary, strip_ansi};

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{Settings, history_path};
use crate::orchestrator::{Exchange, Orchestrator, SubmitRejected};
use helper::PlannerHelper;

pub struct Repl {
    editor: Editor<PlannerHelper, DefaultHistory>,
    orchestrator: Orchestrator,
    settings: Settings,
    history_path: PathBuf,
    /// Print reply HTML instead of styled text
    html: bool,
}

impl Repl {
    pub fn new(orchestrator: Orchestrator, settings: Settings) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(PlannerHelper::new()));

        Ok(Self {
            editor,
            orchestrator,
            settings,
            history_path: history_path(),
            html: false,
        })
    }

    pub fn with_html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor.save_history(&self.history_path) {
            debug!(error = %e, "Failed to save history");
        }
    }

    /// Run the REPL loop until /quit or Ctrl+D
    pub async fn run(&mut self) -> Result<()> {
        self.load_history();

        println!("Where would you like to go? (Ctrl+D to exit, /help for commands)");
        println!();

        loop {
            let line = match self.editor.readline(&colors::prompt()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("{}", colors::error(&format!("Error: {:?}", err)));
                    break;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history_entry(trimmed)?;

            if let Some(command) = Command::parse(trimmed) {
                let mut handler = CommandHandler {
                    orchestrator: &mut self.orchestrator,
                    settings: &self.settings,
                };
                if handler.handle(command).await? == CommandOutcome::Quit {
                    break;
                }
                continue;
            }

            send(&mut self.orchestrator, trimmed, self.html).await;
        }

        println!("Goodbye!");
        self.save_history();
        Ok(())
    }
}

/// Submit one message and print the reply
pub async fn send(orchestrator: &mut Orchestrator, message: &str, html: bool) {
    match orchestrator.submit(message).await {
        Ok(exchange) => print_exchange(&exchange, html),
        Err(SubmitRejected::Empty) => {}
        Err(e) => println!("{}", colors::warning(&e.to_string())),
    }
}

fn print_exchange(exchange: &Exchange, html: bool) {
    println!("{}", colors::source_tag(exchange.source));
    if html {
        println!("{}", exchange.message.html);
    } else {
        println!("{}", format_reply(&exchange.message.text));
    }
    if let Some(summary) = panel_summary(&exchange.panel) {
        println!("{}", summary);
    }
    println!("{}", colors::separator(40));
}

/// Answer a single message without starting the interactive loop
pub async fn run_once(mut orchestrator: Orchestrator, message: &str, html: bool) -> Result<()> {
    send(&mut orchestrator, message, html).await;
    Ok(())
}
