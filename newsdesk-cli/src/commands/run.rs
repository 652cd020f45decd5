//! Run command handlers
//!
//! Runs live on a thread, so these commands need THREAD_ID or `--thread`.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use newsdesk_runner::{AssistantSession, Config, format_elapsed};

use crate::output::{colorize_status, print_steps};

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// Get run status
    Get {
        /// Run ID
        run_id: String,
    },
    /// Show the execution trace of a run
    Steps {
        /// Run ID
        run_id: String,
    },
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, config: &Config) -> Result<()> {
    let session = AssistantSession::from_config(config).await?;

    match command {
        RunCommands::Get { run_id } => {
            let run = session.retrieve_run(&run_id).await?;

            println!("{}", "Run Details:".bold());
            println!("  ID:         {}", run.id.cyan());
            println!("  Assistant:  {}", run.assistant_id.dimmed());
            println!("  Status:     {}", colorize_status(&run.status));
            println!(
                "  Created:    {}",
                run.created_at.format("%Y-%m-%d %H:%M:%S")
            );
            if let Some(elapsed) = run.elapsed() {
                println!("  Duration:   {}", format_elapsed(elapsed));
            }
            if let Some(error) = &run.last_error {
                println!("\n{}", "Error:".bold());
                println!("{}", format!("{}: {}", error.code, error.message).red());
            }
            Ok(())
        }
        RunCommands::Steps { run_id } => {
            let steps = session.run_steps(&run_id).await?;
            print_steps(&steps);
            Ok(())
        }
    }
}
