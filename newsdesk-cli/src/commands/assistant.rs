//! Assistant command handlers

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::*;
use newsdesk_runner::{AssistantSession, Config};

use crate::output::print_assistant;

/// Assistant subcommands
#[derive(Subcommand)]
pub enum AssistantCommands {
    /// Create a new assistant
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Standing instructions
        #[arg(short, long)]
        instructions: String,

        /// Give the assistant the get_news function (requires NEWS_API_KEY)
        #[arg(long)]
        news: bool,
    },
    /// Get assistant details
    Get {
        /// Assistant ID
        id: String,
    },
}

/// Handle assistant commands
pub async fn handle_assistant_command(command: AssistantCommands, config: Config) -> Result<()> {
    match command {
        AssistantCommands::Create {
            name,
            instructions,
            news,
        } => create_assistant(&config, &name, &instructions, news).await,
        AssistantCommands::Get { id } => get_assistant(config.with_assistant(id)).await,
    }
}

async fn create_assistant(
    config: &Config,
    name: &str,
    instructions: &str,
    news: bool,
) -> Result<()> {
    let mut session = AssistantSession::from_config(config)
        .await
        .context("Failed to connect to the assistant service")?;

    let tools = if news {
        if session.tools().is_empty() {
            bail!("--news requires NEWS_API_KEY to be set");
        }
        session.tools().definitions()
    } else {
        Vec::new()
    };

    let assistant = session.create_assistant(name, instructions, tools).await?;

    println!("{}", "✓ Assistant created successfully!".green().bold());
    println!("  ID:     {}", assistant.id.cyan());
    println!("  Model:  {}", assistant.model.dimmed());
    println!(
        "\n  Reuse it with {}",
        format!("ASSISTANT_ID={}", assistant.id).bold()
    );

    Ok(())
}

async fn get_assistant(config: Config) -> Result<()> {
    let session = AssistantSession::from_config(&config).await?;

    match session.assistant() {
        Some(assistant) => print_assistant(assistant),
        None => println!("{}", "No assistant found.".yellow()),
    }

    Ok(())
}
