//! File command handlers

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use newsdesk_runner::{AssistantSession, Config};

/// File subcommands
#[derive(Subcommand)]
pub enum FileCommands {
    /// Upload a document for file search
    Upload {
        /// Path to the document
        path: PathBuf,
    },
}

/// Handle file commands
pub async fn handle_file_command(command: FileCommands, config: &Config) -> Result<()> {
    let session = AssistantSession::from_config(config).await?;

    match command {
        FileCommands::Upload { path } => {
            let file = session.upload_file(&path).await?;

            println!("{}", "✓ File uploaded successfully!".green().bold());
            println!("  ID:     {}", file.id.cyan());
            println!("  Name:   {}", file.filename);
            println!("  Size:   {} bytes", file.bytes.to_string().dimmed());
            Ok(())
        }
    }
}
