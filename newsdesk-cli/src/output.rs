//! Terminal rendering of assistants, threads, run steps and run outcomes

use anyhow::{Result, bail};
use colored::*;
use newsdesk_core::domain::assistant::{Assistant, ToolDefinition};
use newsdesk_core::domain::run::{RunStatus, RunStep};
use newsdesk_core::domain::thread::Thread;
use newsdesk_runner::{Exchange, RunOutcome};

/// Print detailed assistant information
pub fn print_assistant(assistant: &Assistant) {
    println!("{}", "Assistant Details:".bold());
    println!("  ID:           {}", assistant.id.cyan());
    println!(
        "  Name:         {}",
        assistant.name.as_deref().unwrap_or("(unnamed)")
    );
    println!("  Model:        {}", assistant.model);
    println!(
        "  Created:      {}",
        assistant.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    if !assistant.tools.is_empty() {
        let tools = assistant
            .tools
            .iter()
            .map(tool_label)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  Tools:        {}", tools.dimmed());
    }

    if let Some(instructions) = &assistant.instructions {
        println!("\n{}", "Instructions:".bold());
        println!("{}", instructions);
    }
}

/// Print detailed thread information
pub fn print_thread(thread: &Thread) {
    println!("{}", "Thread Details:".bold());
    println!("  ID:           {}", thread.id.cyan());
    println!(
        "  Created:      {}",
        thread.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    if !thread.metadata.is_empty() {
        println!("\n{}", "Metadata:".bold());
        for (key, value) in &thread.metadata {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

/// Print the execution trace of a run
pub fn print_steps(steps: &[RunStep]) {
    if steps.is_empty() {
        println!("{}", "No run steps found.".yellow());
        return;
    }

    println!("{}", format!("Run steps ({}):", steps.len()).bold());
    println!("{}", "─".repeat(80).dimmed());
    for step in steps {
        println!(
            "  {} {} {} [{}]",
            "▸".cyan(),
            step.created_at.format("%H:%M:%S").to_string().dimmed(),
            step.kind,
            step.status
        );
        if let Ok(pretty) = serde_json::to_string_pretty(&step.step_details) {
            for line in pretty.lines() {
                println!("      {}", line.dimmed());
            }
        }
    }
    println!("{}", "─".repeat(80).dimmed());
}

/// Print the result of an exchange, failing unless the run completed
pub fn report(exchange: &Exchange, show_steps: bool) -> Result<()> {
    if let RunOutcome::Completed(completion) = &exchange.outcome {
        eprintln!(
            "{} Run {} completed in {}",
            "✓".green(),
            completion.run_id.dimmed(),
            completion.elapsed_display()
        );
        println!("{}", completion.text);
    }

    if show_steps {
        println!();
        print_steps(&exchange.steps);
    }

    if let Some(failure) = describe_failure(&exchange.outcome) {
        eprintln!("{} {}", "✗".red(), failure.red());
        bail!("Run {} did not complete", exchange.run_id);
    }

    Ok(())
}

/// One-line description of a run that did not complete
fn describe_failure(outcome: &RunOutcome) -> Option<String> {
    match outcome {
        RunOutcome::Completed(_) => None,
        RunOutcome::Failed { status, reason } => Some(match reason {
            Some(reason) => format!("Run ended with status {}: {}", status, reason),
            None => format!("Run ended with status {}", status),
        }),
        RunOutcome::TimedOut { waited } => {
            Some(format!("Gave up waiting after {}s", waited.as_secs()))
        }
        RunOutcome::Cancelled => Some("Cancelled".to_string()),
    }
}

/// Colorize run status for display
pub fn colorize_status(status: &RunStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        RunStatus::Queued | RunStatus::RequiresAction => status_str.yellow(),
        RunStatus::InProgress | RunStatus::Cancelling => status_str.cyan(),
        RunStatus::Completed => status_str.green(),
        RunStatus::Failed | RunStatus::Expired | RunStatus::Incomplete => status_str.red(),
        RunStatus::Cancelled | RunStatus::Unknown => status_str.dimmed(),
    }
}

fn tool_label(tool: &ToolDefinition) -> String {
    match tool {
        ToolDefinition::CodeInterpreter => "code_interpreter".to_string(),
        ToolDefinition::FileSearch => "file_search".to_string(),
        ToolDefinition::Function { function } => format!("function:{}", function.name),
    }
}
