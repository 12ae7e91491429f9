//! Command handlers and the executor adaptation.
//!
//! A [`CommandHandler`] turns one command into exactly one result. Failures
//! are values: a handler never propagates an error past the processor.
//! [`ExecutorHandler`] wraps a provider's byte-oriented [`CommandExecutor`]
//! into that shape.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::error;

use super::errors::DispatchError;
use super::request::{Command, Payload};
use super::response::CommandResult;
use super::router::DISPATCH_TARGET;
use crate::provider::CommandExecutor;

/// Operation bound to a package/function key.
pub trait CommandHandler: Send + Sync {
    /// Handles the command and returns its result.
    fn handle(&self, command: &Command) -> CommandResult;
}

impl<F> CommandHandler for F
where
    F: Fn(&Command) -> CommandResult + Send + Sync,
{
    fn handle(&self, command: &Command) -> CommandResult {
        self(command)
    }
}

/// Adapts a provider executor to the [`CommandHandler`] contract.
///
/// The payload is re-encoded as JSON and fed to the executor. An empty
/// response becomes an empty payload; anything else must be a JSON object.
/// A panicking executor yields an error result and leaves the processor
/// running.
#[derive(Clone)]
pub struct ExecutorHandler {
    executor: Arc<dyn CommandExecutor>,
}

impl ExecutorHandler {
    /// Wraps the executor.
    #[must_use]
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    fn run(&self, command: &Command) -> Result<Payload, DispatchError> {
        let request = serde_json::to_vec(command.payload()).map_err(DispatchError::EncodePayload)?;
        let mut response = Vec::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.executor
                .execute(&mut response, &mut request.as_slice())
        }))
        .map_err(|payload| {
            let error = DispatchError::executor_panicked(payload.as_ref());
            error!(
                target: DISPATCH_TARGET,
                id = command.id(),
                package = command.package(),
                function = command.function(),
                %error,
                "command executor panicked"
            );
            error
        })?;
        outcome?;

        if response.is_empty() {
            return Ok(Payload::new());
        }

        serde_json::from_slice(&response)
            .map_err(|source| DispatchError::malformed_output(&response, source))
    }
}

impl CommandHandler for ExecutorHandler {
    fn handle(&self, command: &Command) -> CommandResult {
        match self.run(command) {
            Ok(payload) => CommandResult::success(command.id(), payload),
            Err(error) => CommandResult::from_error(command.id(), &error),
        }
    }
}
