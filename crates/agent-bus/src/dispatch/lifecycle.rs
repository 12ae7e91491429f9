//! Start/stop transitions of the agent.
//!
//! The lifecycle state is implicit in the registry: while inactive the
//! bootstrap package exposes `Start`; while active it exposes `Stop` next to
//! every provider handler. Each transition completes within one processor
//! iteration, and a failed `Start` leaves the registry untouched.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::errors::DispatchError;
use super::handler::ExecutorHandler;
use super::registry::{HandlerRegistry, LifecycleRoute, Route};
use super::request::{Command, Payload};
use super::response::CommandResult;
use super::router::DISPATCH_TARGET;
use crate::health::HealthReporter;
use crate::provider::HandlerProvider;

/// Package hosting the lifecycle routes.
pub const BOOTSTRAP_PACKAGE: &str = "trustblocagent";

const STARTED_MESSAGE: &str = "trustbloc agent started successfully";
const STOPPED_MESSAGE: &str = "trustbloc agent stopped";

/// Typed options carried by a `Start` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartOptions {
    /// Domain of the bloc the agent operates against.
    #[serde(default, rename = "blocDomain")]
    pub bloc_domain: String,
}

impl StartOptions {
    /// Creates options for the given bloc domain.
    #[must_use]
    pub fn new(bloc_domain: impl Into<String>) -> Self {
        Self {
            bloc_domain: bloc_domain.into(),
        }
    }

    /// Decodes the options from an untyped command payload.
    ///
    /// Unknown keys are ignored and a missing `blocDomain` decodes as empty.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidStartOptions`] when a known key has
    /// the wrong type.
    pub fn from_payload(payload: &Payload) -> Result<Self, DispatchError> {
        Self::deserialize(Value::Object(payload.clone()))
            .map_err(DispatchError::InvalidStartOptions)
    }
}

/// Applies lifecycle transitions to the registry handed in by the processor.
pub struct LifecycleController {
    provider: Box<dyn HandlerProvider>,
    reporter: Arc<dyn HealthReporter>,
}

impl LifecycleController {
    /// Creates a controller over the given provider.
    #[must_use]
    pub fn new(provider: Box<dyn HandlerProvider>, reporter: Arc<dyn HealthReporter>) -> Self {
        Self { provider, reporter }
    }

    /// Runs the lifecycle route for the command.
    pub fn invoke(
        &self,
        route: LifecycleRoute,
        command: &Command,
        registry: &mut HandlerRegistry,
    ) -> CommandResult {
        match route {
            LifecycleRoute::Start => match self.start(command, registry) {
                Ok(result) => result,
                Err(error) => {
                    warn!(
                        target: DISPATCH_TARGET,
                        id = command.id(),
                        %error,
                        "agent start failed"
                    );
                    self.reporter.agent_start_failed(&error);
                    CommandResult::from_error(command.id(), &error)
                }
            },
            LifecycleRoute::Stop => self.stop(command, registry),
        }
    }

    /// Installs the `Start` route under the bootstrap package.
    pub fn install_start(registry: &mut HandlerRegistry) {
        registry.replace_package(
            BOOTSTRAP_PACKAGE,
            LifecycleRoute::Start.function(),
            Route::Lifecycle(LifecycleRoute::Start),
        );
    }

    fn install_stop(registry: &mut HandlerRegistry) {
        registry.replace_package(
            BOOTSTRAP_PACKAGE,
            LifecycleRoute::Stop.function(),
            Route::Lifecycle(LifecycleRoute::Stop),
        );
    }

    fn start(
        &self,
        command: &Command,
        registry: &mut HandlerRegistry,
    ) -> Result<CommandResult, DispatchError> {
        let options = StartOptions::from_payload(command.payload())?;
        let handlers = self.provider.handlers(&options)?;
        let count = handlers.len();

        for handler in handlers {
            debug!(
                target: DISPATCH_TARGET,
                package = handler.package(),
                function = handler.function(),
                "installing handler"
            );
            registry.insert_handler(
                handler.package(),
                handler.function(),
                Arc::new(ExecutorHandler::new(handler.executor())),
            );
        }
        Self::install_stop(registry);

        info!(
            target: DISPATCH_TARGET,
            bloc_domain = options.bloc_domain.as_str(),
            handlers = count,
            "agent started"
        );
        self.reporter.agent_started(&options, count);
        Ok(CommandResult::success(
            command.id(),
            message_payload(STARTED_MESSAGE),
        ))
    }

    fn stop(&self, command: &Command, registry: &mut HandlerRegistry) -> CommandResult {
        registry.clear();
        Self::install_start(registry);

        info!(target: DISPATCH_TARGET, "agent stopped");
        self.reporter.agent_stopped();
        CommandResult::success(command.id(), message_payload(STOPPED_MESSAGE))
    }
}

fn message_payload(message: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("message".to_owned(), json!(message));
    payload
}
