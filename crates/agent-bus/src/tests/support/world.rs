//! BDD test world: encapsulates loader, reporter, provider, bus, and the
//! host-side result stream for step functions.

use std::cell::RefCell;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::bootstrap::{AgentBus, BootstrapError, ConfigLoader, bootstrap_with};
use crate::bus::{BusError, InboundAdapter};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::notifier::{ChannelNotifier, ResultStream};
use super::provider::RecordingHandlerProvider;
use super::reporter::RecordingHealthReporter;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    pub provider: RecordingHandlerProvider,
    results: Option<ResultStream>,
    agent: Option<AgentBus>,
    inbound: Option<InboundAdapter>,
    bootstrap_error: Option<BootstrapError>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            provider: RecordingHandlerProvider::default(),
            results: None,
            agent: None,
            inbound: None,
            bootstrap_error: None,
        }
    }

    /// Installs the given loader.
    pub fn use_loader(&mut self, loader: impl ConfigLoader + 'static) {
        self.loader = Box::new(loader);
        self.reset();
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.use_loader(FailingConfigLoader);
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.agent.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        let (notifier, results) = ChannelNotifier::pair();
        match bootstrap_with(
            &*self.loader,
            self.reporter.clone(),
            self.provider.clone(),
            notifier,
        ) {
            Ok(agent) => {
                self.inbound = Some(agent.inbound());
                self.results = Some(results);
                self.agent = Some(agent);
            }
            Err(error) => {
                self.bootstrap_error = Some(error);
            }
        }
    }

    /// Returns the bootstrap error, if any.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the running agent.
    #[must_use]
    pub fn agent(&self) -> Option<&AgentBus> {
        self.agent.as_ref()
    }

    /// Submits raw host input.
    pub fn submit(&self, raw: &str) {
        let inbound = self.inbound.as_ref().expect("agent bus not bootstrapped");
        inbound.submit(raw);
    }

    /// Submits a command built from its parts.
    pub fn send(&self, id: &str, package: &str, function: &str, payload: &Value) {
        let command = json!({ "id": id, "pkg": package, "fn": function, "payload": payload });
        self.submit(&command.to_string());
    }

    /// Host-side stream of delivered results.
    pub fn results(&mut self) -> &mut ResultStream {
        self.results.as_mut().expect("agent bus not bootstrapped")
    }

    /// Waits for the result carrying `id`.
    pub fn result(&mut self, id: &str) -> Value {
        self.results()
            .by_id(id)
            .unwrap_or_else(|| panic!("no result delivered for id {id}"))
    }

    /// Drops the world's inbound handle and stops the bus.
    pub fn shutdown(&mut self) -> Result<(), BusError> {
        self.inbound = None;
        match self.agent.take() {
            Some(agent) => agent.shutdown(),
            None => Ok(()),
        }
    }

    fn reset(&mut self) {
        self.inbound = None;
        self.agent = None;
        self.results = None;
        self.bootstrap_error = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
