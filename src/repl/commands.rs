//! Slash command handlers for the REPL
//!
//! Handles /help, /destinations, /context, /sync, /reset, /status, /save and /quit.

use anyhow::Result;
use std::path::PathBuf;

use super::colors;
use super::formatter::format_panel;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::transcript;
use crate::transport::load_destinations;

/// Title of saved transcript pages
const TRANSCRIPT_TITLE: &str = "Trip Planner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Destinations,
    Context,
    Sync,
    Reset,
    Status,
    Save(Option<PathBuf>),
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a line starting with `/`. Returns `None` for ordinary chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        Some(match name {
            "/help" | "/?" => Self::Help,
            "/destinations" => Self::Destinations,
            "/context" => Self::Context,
            "/sync" => Self::Sync,
            "/reset" | "/clear" => Self::Reset,
            "/status" => Self::Status,
            "/save" => Self::Save((!arg.is_empty()).then(|| PathBuf::from(arg))),
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// Command handler with access to REPL state
pub struct CommandHandler<'a> {
    pub orchestrator: &'a mut Orchestrator,
    pub settings: &'a Settings,
}

impl<'a> CommandHandler<'a> {
    pub async fn handle(&mut self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::Help => print_help(),
            Command::Destinations => self.cmd_destinations().await,
            Command::Context => println!("{}", format_panel(self.orchestrator.panel())),
            Command::Sync => self.cmd_sync().await,
            Command::Reset => {
                self.orchestrator.reset().await;
                println!("{}", colors::success("Conversation and trip context cleared."));
            }
            Command::Status => self.cmd_status().await,
            Command::Save(path) => self.cmd_save(path)?,
            Command::Quit => return Ok(CommandOutcome::Quit),
            Command::Unknown(name) => {
                println!("{}", colors::warning(&format!("Unknown command: {}. Try /help", name)));
            }
        }
        Ok(CommandOutcome::Continue)
    }

    /// /destinations - list destinations, backend first
    async fn cmd_destinations(&self) {
        let list = load_destinations(self.orchestrator.transport()).await;
        let origin = if list.from_backend { "backend" } else { "built-in" };
        println!("{}", colors::header(&format!("Destinations ({})", origin)));
        for destination in &list.destinations {
            println!("  {}", destination);
        }
    }

    /// /sync - pull the backend's view of the trip into the panel
    async fn cmd_sync(&mut self) {
        match self.orchestrator.sync_context().await {
            Ok(panel) => println!("{}", format_panel(panel)),
            Err(e) => println!("{}", colors::warning(&format!("Sync failed: {}", e))),
        }
    }

    /// /status - backend health and session info
    async fn cmd_status(&self) {
        let transport = self.orchestrator.transport();
        println!("{}", colors::banner_line("Session", self.orchestrator.session_id()));
        println!("{}", colors::banner_line("Backend", &transport.describe()));

        let health = match transport.health().await {
            Ok(health) => colors::success(&health.status),
            Err(e) => colors::warning(&format!("unreachable ({}), replies are simulated", e)),
        };
        println!("{}", colors::banner_line("Health", &health));

        let state = self.orchestrator.state();
        println!(
            "{}",
            colors::banner_line(
                "Messages",
                &format!("{} ({} exchanges)", state.transcript.len(), state.updates)
            )
        );
    }

    /// /save [path] - write the transcript as an HTML page
    fn cmd_save(&self, path: Option<PathBuf>) -> Result<()> {
        let path = path.unwrap_or_else(|| self.settings.transcript_path.clone());
        match transcript::save(
            &path,
            TRANSCRIPT_TITLE,
            self.orchestrator.transcript(),
            self.orchestrator.panel(),
        ) {
            Ok(()) => println!("{}", colors::success(&format!("Saved {}", path.display()))),
            Err(e) => println!("{}", colors::error(&format!("Save failed: {}", e))),
        }
        Ok(())
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /help              - Show this help");
    println!("  /destinations      - List destinations");
    println!("  /context           - Show the trip context panel");
    println!("  /sync              - Pull trip context from the backend");
    println!("  /reset             - Start over (clears conversation and context)");
    println!("  /status            - Show backend and session status");
    println!("  /save [path]       - Save the conversation as HTML");
    println!("  /quit              - Exit");
}
