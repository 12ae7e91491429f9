//! Structured health reporting for bootstrap and agent lifecycle events.

use std::sync::Arc;

use agent_bus_config::Config;

use crate::bootstrap::BootstrapError;
use crate::dispatch::{DispatchError, StartOptions};

const HEALTH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked after a `Start` installed the provider's handlers.
    fn agent_started(&self, options: &StartOptions, handlers: usize);

    /// Invoked when a `Start` was rejected.
    fn agent_start_failed(&self, error: &DispatchError);

    /// Invoked after a `Stop` reset the registry.
    fn agent_stopped(&self);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn agent_started(&self, options: &StartOptions, handlers: usize) {
        (**self).agent_started(options, handlers);
    }

    fn agent_start_failed(&self, error: &DispatchError) {
        (**self).agent_start_failed(error);
    }

    fn agent_stopped(&self) {
        (**self).agent_stopped();
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting agent bus bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            test_mode = config.test_mode(),
            diagnostic_handlers = config.diagnostic_handlers(),
            "agent bus bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "agent bus bootstrap failed"
        );
    }

    fn agent_started(&self, options: &StartOptions, handlers: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "agent_started",
            bloc_domain = %options.bloc_domain,
            handlers,
            "agent started"
        );
    }

    fn agent_start_failed(&self, error: &DispatchError) {
        tracing::warn!(
            target: HEALTH_TARGET,
            event = "agent_start_failed",
            error = %error,
            "agent failed to start"
        );
    }

    fn agent_stopped(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "agent_stopped",
            "agent stopped"
        );
    }
}
