//! Agent bus bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use agent_bus_config::Config;

use crate::bus::{BusError, CommandBus, InboundAdapter};
use crate::dispatch::{CommandProcessor, LifecycleController};
use crate::health::HealthReporter;
use crate::host::HostNotifier;
use crate::provider::HandlerProvider;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the agent bus configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The bus pipeline could not be brought up.
    #[error("failed to start command bus: {source}")]
    Bus {
        /// Underlying pipeline error.
        #[source]
        source: BusError,
    },
}

impl BootstrapError {
    /// Returns `true` when telemetry was installed before the failure, so the
    /// error can be reported through `tracing`.
    #[must_use]
    pub const fn telemetry_ready(&self) -> bool {
        matches!(self, Self::Bus { .. })
    }
}

/// Result of a successful bootstrap invocation.
#[derive(Debug)]
pub struct AgentBus {
    config: Config,
    bus: CommandBus,
    telemetry: TelemetryHandle,
    startup_notification: Option<String>,
}

impl AgentBus {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Returns a new handle for submitting commands.
    #[must_use]
    pub fn inbound(&self) -> InboundAdapter {
        self.bus.inbound()
    }

    /// Id of the `asset-ready` notification, if one was posted.
    #[must_use]
    pub fn startup_notification(&self) -> Option<&str> {
        self.startup_notification.as_deref()
    }

    /// Stops the bus once every outstanding [`InboundAdapter`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::ThreadPanic`] when a worker panicked.
    pub fn shutdown(self) -> Result<(), BusError> {
        self.bus.shutdown()
    }
}

/// Bootstraps the agent bus using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration, telemetry, or the bus
/// pipeline fails. The reporter observes the failure before it is returned.
pub fn bootstrap_with<P>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    provider: P,
    notifier: Arc<dyn HostNotifier>,
) -> Result<AgentBus, BootstrapError>
where
    P: HandlerProvider + 'static,
{
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let lifecycle = LifecycleController::new(Box::new(provider), Arc::clone(&reporter));
    let diagnostics = config
        .diagnostic_handlers()
        .then(|| config.diagnostic_delay());
    let processor = CommandProcessor::new(lifecycle, diagnostics);

    let bus = match start_bus(processor, notifier, &config) {
        Ok(started) => started,
        Err(source) => {
            let error = BootstrapError::Bus { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.bootstrap_succeeded(&config);
    Ok(bus.into_agent(config, telemetry))
}

struct StartedBus {
    bus: CommandBus,
    startup_notification: Option<String>,
}

impl StartedBus {
    fn into_agent(self, config: Config, telemetry: TelemetryHandle) -> AgentBus {
        AgentBus {
            config,
            bus: self.bus,
            telemetry,
            startup_notification: self.startup_notification,
        }
    }
}

fn start_bus(
    processor: CommandProcessor,
    notifier: Arc<dyn HostNotifier>,
    config: &Config,
) -> Result<StartedBus, BusError> {
    let bus = CommandBus::start(processor, notifier)?;
    let startup_notification = if config.test_mode() {
        None
    } else {
        Some(bus.post_startup_notification()?)
    };
    Ok(StartedBus {
        bus,
        startup_notification,
    })
}
