//! Shared configuration for the agent command bus.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file (`--config-path` or `AGENT_BUS_CONFIG_PATH`), then
//! `AGENT_BUS_*` environment variables, then command-line flags.

mod defaults;
mod logging;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_DIAGNOSTIC_DELAY_MS, DEFAULT_LOG_FILTER, default_diagnostic_delay_ms,
    default_diagnostic_handlers, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration shared by the bus library and the `agent-busd` host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "AGENT_BUS")]
pub struct Config {
    /// Filter expression handed to the tracing subscriber.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Suppresses the startup notification sent to the host.
    #[ortho_config(default = false)]
    pub test_mode: bool,
    /// Installs the `test` diagnostic package while the agent is inactive.
    #[ortho_config(default = default_diagnostic_handlers())]
    pub diagnostic_handlers: bool,
    /// Delay applied by the `test/timeout` diagnostic handler.
    #[ortho_config(default = default_diagnostic_delay_ms())]
    pub diagnostic_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            test_mode: false,
            diagnostic_handlers: default_diagnostic_handlers(),
            diagnostic_delay_ms: default_diagnostic_delay_ms(),
        }
    }
}

impl Config {
    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Whether the bus runs under a test harness.
    #[must_use]
    pub const fn test_mode(&self) -> bool {
        self.test_mode
    }

    /// Whether the diagnostic `test` package is installed at bootstrap.
    #[must_use]
    pub const fn diagnostic_handlers(&self) -> bool {
        self.diagnostic_handlers
    }

    /// Delay applied by the `test/timeout` diagnostic handler.
    #[must_use]
    pub const fn diagnostic_delay(&self) -> Duration {
        Duration::from_millis(self.diagnostic_delay_ms)
    }
}
