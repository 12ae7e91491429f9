//! Package and function routing for the command processor.
//!
//! The processor owns the [`HandlerRegistry`]. Each command is resolved by
//! package, then by function; ordinary handlers are invoked directly and
//! lifecycle routes are handed to the [`LifecycleController`] together with a
//! mutable borrow of the registry. Unresolved commands produce one of three
//! error results depending on what the caller attempted.

use std::time::Duration;

use tracing::{debug, warn};

use super::diagnostics;
use super::errors::DispatchError;
use super::lifecycle::{BOOTSTRAP_PACKAGE, LifecycleController};
use super::registry::{HandlerRegistry, LifecycleRoute, Route};
use super::request::Command;
use super::response::CommandResult;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::dispatch");

/// Sequential command processor.
///
/// The processor is driven by a single loop; handler invocations and registry
/// transitions never overlap.
pub struct CommandProcessor {
    registry: HandlerRegistry,
    lifecycle: LifecycleController,
}

impl CommandProcessor {
    /// Creates a processor in the inactive state.
    ///
    /// When `diagnostics` is set, the `test` package is installed with the
    /// given delay for `test/timeout`.
    #[must_use]
    pub fn new(lifecycle: LifecycleController, diagnostics: Option<Duration>) -> Self {
        let mut registry = HandlerRegistry::new();
        if let Some(delay) = diagnostics {
            diagnostics::install(&mut registry, delay);
        }
        LifecycleController::install_start(&mut registry);
        Self {
            registry,
            lifecycle,
        }
    }

    /// Read-only view of the registry.
    #[must_use]
    pub const fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Resolves and runs one command, returning exactly one result.
    pub fn process(&mut self, command: &Command) -> CommandResult {
        if command.id().is_empty() {
            warn!(
                target: DISPATCH_TARGET,
                package = command.package(),
                function = command.function(),
                "missing id for command"
            );
        }

        debug!(
            target: DISPATCH_TARGET,
            id = command.id(),
            package = command.package(),
            function = command.function(),
            "routing command"
        );

        let route = self
            .registry
            .resolve(command.package(), command.function())
            .cloned();

        match route {
            Some(Route::Handler(handler)) => handler.handle(command),
            Some(Route::Lifecycle(route)) => {
                self.lifecycle.invoke(route, command, &mut self.registry)
            }
            None => {
                let error = unresolved(command);
                debug!(target: DISPATCH_TARGET, id = command.id(), %error, "unresolved command");
                CommandResult::from_error(command.id(), &error)
            }
        }
    }
}

fn unresolved(command: &Command) -> DispatchError {
    if command.package() == BOOTSTRAP_PACKAGE {
        if command.function() == LifecycleRoute::Start.function() {
            return DispatchError::AlreadyStarted;
        }
        if command.function() == LifecycleRoute::Stop.function() {
            return DispatchError::NotRunning;
        }
    }
    DispatchError::unknown_route(command.package(), command.function())
}
