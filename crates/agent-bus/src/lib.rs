//! JSON command bus for an embeddable agent.
//!
//! A host submits JSON commands addressed by package and function. A single
//! processor thread resolves each command against a two-level handler
//! registry and hands exactly one JSON result back to the host through a
//! one-way [`HostNotifier`]. Results leave the bus in the order their
//! commands were accepted.
//!
//! The registry starts out inactive, exposing only `trustblocagent/Start`.
//! A successful `Start` asks the configured [`HandlerProvider`] for the full
//! handler set and replaces `Start` with `Stop`; `Stop` returns the registry
//! to its bootstrap contents. Both transitions run inside the processor loop,
//! so no command ever observes a half-applied registry.
//!
//! [`bootstrap_with`] wires configuration, telemetry, the processor, and the
//! bus threads together, and posts an `asset-ready` notification unless the
//! configuration enables test mode.

mod bootstrap;
pub mod bus;
pub mod dispatch;
mod health;
pub mod host;
mod placeholder_provider;
pub mod provider;
mod telemetry;

pub use bootstrap::{
    AgentBus, BootstrapError, ConfigLoader, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use bus::{BusError, CommandBus, InboundAdapter, STARTUP_TOPIC};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use host::{HostNotifier, JsonlNotifier};
pub use placeholder_provider::{PLACEHOLDER_PACKAGE, PlaceholderHandlerProvider};
pub use provider::{
    CommandExecutor, ExecutionError, HandlerProvider, ProvidedHandler, ProviderError,
};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
