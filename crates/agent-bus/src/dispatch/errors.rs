//! Error types for command dispatch failures.
//!
//! Every variant other than [`DispatchError::MalformedCommand`] is converted
//! into an error result for the host; malformed commands never reach the
//! processor and are only logged.

use std::any::Any;

use thiserror::Error;

use crate::provider::{ExecutionError, ProviderError};

/// Prefix attached to every error message delivered to the host.
pub const ERROR_PREFIX: &str = "trustblocagent: ";

/// Errors surfaced while decoding, resolving, or executing a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Raw request could not be decoded as a command.
    #[error("unable to decode command: {message}")]
    MalformedCommand {
        /// Decoder message.
        message: String,
        /// Underlying JSON error.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// `Start` was sent while the agent is already running.
    #[error("trustbloc agent already started")]
    AlreadyStarted,

    /// `Stop` was sent while the agent is not running.
    #[error("trustbloc agent not running")]
    NotRunning,

    /// No handler is registered for the package/function pair.
    #[error("invalid pkg/fn: {package}/{function}, make sure trustbloc agent is started")]
    UnknownRoute {
        /// Requested package.
        package: String,
        /// Requested function.
        function: String,
    },

    /// `Start` payload did not match the start options schema.
    #[error("invalid start options: {0}")]
    InvalidStartOptions(#[source] serde_json::Error),

    /// The handler provider refused to build a handler set.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Command payload could not be re-encoded for an executor.
    #[error("failed to encode payload: {0}")]
    EncodePayload(#[source] serde_json::Error),

    /// Executor output was not a JSON object.
    #[error("failed to decode command result={output} err={source}")]
    MalformedOutput {
        /// Raw executor output, lossily decoded.
        output: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Executor reported a structured failure.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Executor panicked while handling the command.
    #[error("command executor panicked: {message}")]
    ExecutorPanicked {
        /// Panic payload, when it was a string.
        message: String,
    },

    /// Handler-defined failure with a plain message.
    #[error("{0}")]
    Handler(String),
}

impl DispatchError {
    /// Creates a malformed command error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedCommand {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates an unknown route error.
    #[must_use]
    pub fn unknown_route(package: impl Into<String>, function: impl Into<String>) -> Self {
        Self::UnknownRoute {
            package: package.into(),
            function: function.into(),
        }
    }

    /// Creates a malformed executor output error.
    #[must_use]
    pub fn malformed_output(output: &[u8], source: serde_json::Error) -> Self {
        Self::MalformedOutput {
            output: String::from_utf8_lossy(output).into_owned(),
            source,
        }
    }

    /// Creates an executor panic error from a caught panic payload.
    #[must_use]
    pub fn executor_panicked(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::ExecutorPanicked { message }
    }

    /// Creates a handler-defined error.
    #[must_use]
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }

    /// Message delivered to the host in the `errMsg` field.
    #[must_use]
    pub fn host_message(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}
