//! Newsdesk CLI
//!
//! Command-line interface for talking to a hosted assistant: manage
//! assistants, threads and files, ask questions and summarize the news.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Overrides;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Assistant and news summary CLI", long_about = None)]
struct Cli {
    /// Assistant to use instead of ASSISTANT_ID
    #[arg(long, global = true)]
    assistant: Option<String>,

    /// Thread to use instead of THREAD_ID
    #[arg(long, global = true)]
    thread: Option<String>,

    /// Seconds between run status polls
    #[arg(long, global = true)]
    poll_interval: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk_runner=warn,newsdesk_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::load(Overrides {
        assistant_id: cli.assistant,
        thread_id: cli.thread,
        poll_interval: cli.poll_interval,
    })?;

    handle_command(cli.command, config).await
}
