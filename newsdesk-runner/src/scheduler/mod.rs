//! Scheduler layer
//!
//! This layer drives a remote run from submission to a terminal state:
//! it polls the run's status, hands pending tool calls to the dispatcher,
//! and extracts the final answer once the run completes.

pub mod poller;

pub use poller::{Completion, PollError, PollPolicy, RunOutcome, RunPoller, format_elapsed};
