//! Ask command handler
//!
//! Sends one message to the configured assistant, optionally grounded in an
//! uploaded document, and prints the answer.

use std::path::PathBuf;

use anyhow::{Result, bail};
use newsdesk_runner::{Ask, AssistantSession, Config};

use super::cancel_on_ctrl_c;
use crate::output::report;

pub async fn ask(
    config: &Config,
    question: String,
    file: Option<PathBuf>,
    instructions: Option<String>,
    show_steps: bool,
) -> Result<()> {
    if config.assistant_id.is_none() {
        bail!("No assistant configured: set ASSISTANT_ID or pass --assistant");
    }

    let mut session = AssistantSession::from_config(config).await?;
    let cancel = cancel_on_ctrl_c();

    let exchange = session
        .ask(
            Ask {
                question,
                file,
                instructions,
            },
            &cancel,
        )
        .await?;

    report(&exchange, show_steps)
}
