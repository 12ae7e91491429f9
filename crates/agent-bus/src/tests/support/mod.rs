//! Test harness utilities for the agent bus suites.

mod config_loader;
mod notifier;
mod provider;
mod reporter;
mod world;

pub use config_loader::{FailingConfigLoader, FileConfigLoader, TestConfigLoader};
pub use notifier::{ChannelNotifier, ResultStream};
pub use provider::RecordingHandlerProvider;
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use world::{TestWorld, world};
