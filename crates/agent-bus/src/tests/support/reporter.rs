//! Test double for [`HealthReporter`] that records structured events for assertions.
//!
//! The recorder captures the lifecycle telemetry emitted during bootstrap and
//! `Start`/`Stop` transitions so behaviour tests can validate observable events.

use std::sync::Mutex;

use agent_bus_config::Config;

use crate::bootstrap::BootstrapError;
use crate::dispatch::{DispatchError, StartOptions};
use crate::health::HealthReporter;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
    /// The agent started against a domain with a number of handlers.
    AgentStarted { bloc_domain: String, handlers: usize },
    /// A `Start` was rejected.
    AgentStartFailed(String),
    /// The agent stopped.
    AgentStopped,
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn agent_started(&self, options: &StartOptions, handlers: usize) {
        self.record(HealthEvent::AgentStarted {
            bloc_domain: options.bloc_domain.clone(),
            handlers,
        });
    }

    fn agent_start_failed(&self, error: &DispatchError) {
        self.record(HealthEvent::AgentStartFailed(error.to_string()));
    }

    fn agent_stopped(&self) {
        self.record(HealthEvent::AgentStopped);
    }
}
