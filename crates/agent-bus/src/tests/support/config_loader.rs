//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use agent_bus_config::Config;

use crate::bootstrap::ConfigLoader;

/// Delay used by `test/timeout` in test configurations.
pub const TEST_DIAGNOSTIC_DELAY_MS: u64 = 20;

/// Loader returning an in-memory configuration with a short diagnostic delay.
#[derive(Debug, Clone)]
pub struct TestConfigLoader {
    config: Config,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config {
                diagnostic_delay_ms: TEST_DIAGNOSTIC_DELAY_MS,
                ..Config::default()
            },
        }
    }

    /// Suppresses the startup notification.
    #[must_use]
    pub fn in_test_mode(mut self) -> Self {
        self.config.test_mode = true;
        self
    }

    /// Leaves the `test` package out of the registry.
    #[must_use]
    pub fn without_diagnostics(mut self) -> Self {
        self.config.diagnostic_handlers = false;
        self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Loader that reads a TOML file through the `--config-path` flag.
pub struct FileConfigLoader {
    dir: TempDir,
}

impl FileConfigLoader {
    /// Writes `contents` to a temporary configuration file.
    #[must_use]
    pub fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory");
        fs::write(dir.path().join("agent-bus.toml"), contents)
            .expect("failed to write configuration file");
        Self { dir }
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("agent-busd"),
            OsString::from("--config-path"),
            self.dir.path().join("agent-bus.toml").into_os_string(),
        ];
        Config::load_from_iter(args)
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("agent-busd"),
            OsString::from("--log-format"),
            OsString::from("verbose"),
        ];
        Config::load_from_iter(args)
    }
}
