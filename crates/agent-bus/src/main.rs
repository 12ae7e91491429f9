//! `agent-busd`: stdio host for the agent command bus.
//!
//! Each stdin line is submitted as one JSON command; each result is written
//! to stdout as one JSON line. Logs go to stderr. The process drains the bus
//! and exits once stdin reaches EOF.

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;

use agent_bus::{
    JsonlNotifier, PlaceholderHandlerProvider, StructuredHealthReporter, SystemConfigLoader,
    bootstrap_with,
};

fn main() -> ExitCode {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let notifier = Arc::new(JsonlNotifier::stdout());

    let agent = match bootstrap_with(
        &SystemConfigLoader,
        reporter,
        PlaceholderHandlerProvider,
        notifier,
    ) {
        Ok(agent) => agent,
        Err(error) if error.telemetry_ready() => {
            tracing::error!(target: "agent_busd", %error, "bootstrap failed");
            return ExitCode::FAILURE;
        }
        Err(error) => {
            eprintln!("agent-busd: {error}");
            return ExitCode::FAILURE;
        }
    };

    let inbound = agent.inbound();
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => inbound.submit(&line),
            Err(error) => {
                tracing::error!(target: "agent_busd", %error, "failed to read stdin");
                break;
            }
        }
    }
    drop(inbound);

    match agent.shutdown() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: "agent_busd", %error, "shutdown failed");
            ExitCode::FAILURE
        }
    }
}
