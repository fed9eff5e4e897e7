//! # Agora Console
//!
//! The board and its admin pages, served as an interactive shell over
//! fixture data.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast::error::RecvError;

use agora_infra::InMemoryToastSink;

mod commands;
mod config;
mod error;
mod pages;
mod render;
mod reply;
mod session;
mod shell;
mod state;
mod telemetry;

use config::ConsoleConfig;
use session::Session;
use shell::Output;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[derive(Debug, Parser)]
#[command(name = "agora-console", version, about)]
struct Cli {
    /// Act as this user when posting, commenting and reporting
    #[arg(long)]
    user_id: Option<u64>,

    /// Simulated latency of the profile lookup
    #[arg(long)]
    profile_delay_ms: Option<u64>,

    /// Fixture file to load instead of the embedded data set
    #[arg(long, env = "AGORA_FIXTURES")]
    fixtures: Option<PathBuf>,

    /// Print the request and response envelope of every command as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_telemetry(&TelemetryConfig::from_env());

    let mut config = ConsoleConfig::from_env();
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }
    if let Some(delay) = cli.profile_delay_ms {
        config.profile_delay = Duration::from_millis(delay);
    }
    if cli.fixtures.is_some() {
        config.fixtures = cli.fixtures;
    }

    let toasts = Arc::new(InMemoryToastSink::new(config.toast_buffer));
    let mut feed = toasts.subscribe();
    tokio::spawn(async move {
        loop {
            match feed.recv().await {
                Ok(toast) => {
                    tracing::debug!(variant = ?toast.variant, description = %toast.description, "Toast");
                }
                Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "Toast log fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let state = AppState::new(&config, toasts)?;
    let session = Session::mount(state, config).await?;

    let output = if cli.json { Output::Json } else { Output::Text };
    shell::run(session, output).await
}
