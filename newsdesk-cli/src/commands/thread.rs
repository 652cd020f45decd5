//! Thread command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use newsdesk_runner::{AssistantSession, Config};

use crate::output::print_thread;

/// Thread subcommands
#[derive(Subcommand)]
pub enum ThreadCommands {
    /// Create a new, empty thread
    Create,
    /// Get thread details
    Get {
        /// Thread ID
        id: String,
    },
}

/// Handle thread commands
pub async fn handle_thread_command(command: ThreadCommands, config: Config) -> Result<()> {
    match command {
        ThreadCommands::Create => create_thread(&config).await,
        ThreadCommands::Get { id } => get_thread(config.with_thread(id)).await,
    }
}

async fn create_thread(config: &Config) -> Result<()> {
    let mut session = AssistantSession::from_config(config).await?;
    let thread = session.create_thread().await?;

    println!("{}", "✓ Thread created successfully!".green().bold());
    println!("  ID:     {}", thread.id.cyan());
    println!(
        "\n  Continue it with {}",
        format!("THREAD_ID={}", thread.id).bold()
    );

    Ok(())
}

async fn get_thread(config: Config) -> Result<()> {
    let session = AssistantSession::from_config(&config).await?;

    if let Some(thread) = session.thread() {
        print_thread(thread);
    }

    Ok(())
}
