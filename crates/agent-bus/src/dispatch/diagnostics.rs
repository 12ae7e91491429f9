//! Diagnostic handlers used by host test harnesses.
//!
//! The `test` package is available until the first `Stop`, which resets the
//! registry to the bootstrap contents only.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use super::errors::DispatchError;
use super::registry::HandlerRegistry;
use super::request::{Command, Payload};
use super::response::CommandResult;

/// Package hosting the diagnostic handlers.
pub const DIAGNOSTIC_PACKAGE: &str = "test";

const THROWN_ERROR: &str = "an error !!";

/// Installs `test/echo`, `test/throwError`, and `test/timeout`.
///
/// `timeout` sleeps for `delay` before echoing, stalling the whole bus.
pub fn install(registry: &mut HandlerRegistry, delay: Duration) {
    registry.insert_handler(DIAGNOSTIC_PACKAGE, "echo", Arc::new(echo));
    registry.insert_handler(DIAGNOSTIC_PACKAGE, "throwError", Arc::new(throw_error));
    registry.insert_handler(
        DIAGNOSTIC_PACKAGE,
        "timeout",
        Arc::new(move |command: &Command| {
            thread::sleep(delay);
            echo(command)
        }),
    );
}

fn echo(command: &Command) -> CommandResult {
    let mut payload = Payload::new();
    payload.insert(
        "echo".to_owned(),
        Value::Object(command.payload().clone()),
    );
    CommandResult::success(command.id(), payload)
}

fn throw_error(command: &Command) -> CommandResult {
    CommandResult::from_error(command.id(), &DispatchError::handler(THROWN_ERROR))
}
