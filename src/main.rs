//! trip-planner - conversational travel planning in the terminal
//!
//! Talks to the planning backend when it is reachable and answers locally
//! from the built-in simulator when it is not.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use trip_planner::config::{Config, Overrides, Settings};
use trip_planner::orchestrator::Orchestrator;
use trip_planner::repl::{self, Repl, colors};
use trip_planner::transport::{HttpTransport, OfflineTransport, Transport};

#[derive(Parser)]
#[command(name = "trip-planner")]
#[command(about = "Conversational travel planning client", version)]
struct Args {
    /// Planning backend base URL
    #[arg(long, env = "TRIP_PLANNER_BACKEND_URL")]
    backend_url: Option<String>,

    /// Never contact the backend; every reply is simulated
    #[arg(long, env = "TRIP_PLANNER_OFFLINE")]
    offline: bool,

    /// Backend request timeout in seconds
    #[arg(long, env = "TRIP_PLANNER_TIMEOUT")]
    timeout: Option<u64>,

    /// Default path for /save
    #[arg(long, env = "TRIP_PLANNER_TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// Print replies as HTML fragments instead of styled text
    #[arg(long)]
    html: bool,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Send one message, print the reply and exit
    #[arg(long)]
    once: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.trip-planner/.env or current dir)
    let env_path = dirs::home_dir()
        .map(|h| h.join(".trip-planner").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    let args = Args::parse();

    // Logs go to stderr so they never interleave with replies
    let default_filter = if args.verbose {
        "trip_planner=debug"
    } else {
        "trip_planner=warn"
    };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // CLI args > env vars (handled by clap) > config file > defaults
    let settings = Settings::resolve(
        Overrides {
            backend_url: args.backend_url,
            timeout_secs: args.timeout,
            offline: args.offline,
            transcript_path: args.transcript,
        },
        Config::load(),
    );

    let transport: Box<dyn Transport> = if settings.offline {
        Box::new(OfflineTransport)
    } else {
        Box::new(HttpTransport::new(
            settings.backend_url.clone(),
            settings.request_timeout,
        ))
    };
    let orchestrator = Orchestrator::new(transport);

    if let Some(message) = args.once {
        return repl::run_once(orchestrator, &message, args.html).await;
    }

    println!();
    println!("{}", colors::banner_accent(&format!("  Trip Planner {}", env!("CARGO_PKG_VERSION"))));
    println!("{}", colors::separator(50));
    let backend = if settings.offline {
        colors::warning("offline (simulated replies)")
    } else {
        settings.backend_url.clone()
    };
    println!("{}", colors::banner_line("Backend", &backend));
    println!("{}", colors::banner_line("Timeout", &format!("{}s", settings.request_timeout.as_secs())));
    println!("{}", colors::banner_line("Session", orchestrator.session_id()));
    println!("{}", colors::separator(50));
    println!();

    let mut repl = Repl::new(orchestrator, settings)?.with_html(args.html);
    repl.run().await
}
