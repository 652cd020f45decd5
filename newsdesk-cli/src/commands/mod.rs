//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod assistant;
mod ask;
mod file;
mod news;
mod run;
mod thread;

pub use assistant::AssistantCommands;
pub use file::FileCommands;
pub use run::RunCommands;
pub use thread::ThreadCommands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use newsdesk_runner::Config;
use tokio_util::sync::CancellationToken;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Assistant management
    Assistant {
        #[command(subcommand)]
        command: AssistantCommands,
    },
    /// Thread management
    Thread {
        #[command(subcommand)]
        command: ThreadCommands,
    },
    /// File management
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Inspect runs on the current thread
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Ask the configured assistant a question
    Ask {
        /// The message to send
        message: String,

        /// Document to upload and attach for file search
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Extra instructions for this run only
        #[arg(short, long)]
        instructions: Option<String>,

        /// Print the run's execution trace
        #[arg(long)]
        steps: bool,
    },
    /// Summarize the latest news on a topic
    News {
        /// Topic to search for (e.g. "bitcoin")
        topic: String,

        /// Print the run's execution trace
        #[arg(long)]
        steps: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The session configuration, flags already applied
pub async fn handle_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Assistant { command } => {
            assistant::handle_assistant_command(command, config).await
        }
        Commands::Thread { command } => thread::handle_thread_command(command, config).await,
        Commands::File { command } => file::handle_file_command(command, &config).await,
        Commands::Run { command } => run::handle_run_command(command, &config).await,
        Commands::Ask {
            message,
            file,
            instructions,
            steps,
        } => ask::ask(&config, message, file, instructions, steps).await,
        Commands::News { topic, steps } => news::summarize(&config, &topic, steps).await,
    }
}

/// Token cancelled on Ctrl-C, so a long wait can be abandoned cleanly
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            child.cancel();
        }
    });
    token
}
