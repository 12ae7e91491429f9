use crate::logging::LogFormat;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Delay applied by the `test/timeout` diagnostic handler, in milliseconds.
pub const DEFAULT_DIAGNOSTIC_DELAY_MS: u64 = 10_000;

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Diagnostic handlers are installed unless explicitly disabled.
pub fn default_diagnostic_handlers() -> bool {
    true
}

/// Default delay for the `test/timeout` diagnostic handler.
pub fn default_diagnostic_delay_ms() -> u64 {
    DEFAULT_DIAGNOSTIC_DELAY_MS
}
