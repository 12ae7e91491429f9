//! Interfaces of the external handler provider.
//!
//! Business-logic handlers are not implemented by the bus. When the agent is
//! started, a [`HandlerProvider`] builds the full handler set for the decoded
//! [`StartOptions`]; each handler exposes its package, its function, and a
//! byte-oriented [`CommandExecutor`].

use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

use thiserror::Error;

use crate::dispatch::StartOptions;

/// Structured failure reported by a [`CommandExecutor`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("code: {code}, message: {message}")]
pub struct ExecutionError {
    code: i32,
    message: String,
}

impl ExecutionError {
    /// Builds an execution error from a machine-readable code and a message.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Human-readable failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Lower-level handler contract: reads a JSON request, writes a JSON response.
///
/// Writing nothing is a valid, empty response.
pub trait CommandExecutor: Send + Sync {
    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns an [`ExecutionError`] carrying a code and message when the
    /// command fails.
    fn execute(&self, response: &mut dyn Write, request: &mut dyn Read)
    -> Result<(), ExecutionError>;
}

impl<F> CommandExecutor for F
where
    F: Fn(&mut dyn Write, &mut dyn Read) -> Result<(), ExecutionError> + Send + Sync,
{
    fn execute(
        &self,
        response: &mut dyn Write,
        request: &mut dyn Read,
    ) -> Result<(), ExecutionError> {
        self(response, request)
    }
}

/// A handler supplied by the provider, keyed by its own package and function.
#[derive(Clone)]
pub struct ProvidedHandler {
    package: String,
    function: String,
    executor: Arc<dyn CommandExecutor>,
}

impl ProvidedHandler {
    /// Builds a provided handler.
    #[must_use]
    pub fn new(
        package: impl Into<String>,
        function: impl Into<String>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            package: package.into(),
            function: function.into(),
            executor,
        }
    }

    /// Package owning the handler.
    #[must_use]
    pub fn package(&self) -> &str {
        self.package.as_str()
    }

    /// Function name within the package.
    #[must_use]
    pub fn function(&self) -> &str {
        self.function.as_str()
    }

    /// Executor invoked for matching commands.
    #[must_use]
    pub fn executor(&self) -> Arc<dyn CommandExecutor> {
        Arc::clone(&self.executor)
    }
}

impl fmt::Debug for ProvidedHandler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ProvidedHandler")
            .field("package", &self.package)
            .field("function", &self.function)
            .finish_non_exhaustive()
    }
}

/// Failure reported when the provider cannot build a handler set.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Builds the full handler set installed by `Start`.
pub trait HandlerProvider: Send {
    /// Returns every handler for the supplied options.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the handler set cannot be built; the
    /// registry is then left untouched.
    fn handlers(&self, options: &StartOptions) -> Result<Vec<ProvidedHandler>, ProviderError>;
}

impl<P> HandlerProvider for Box<P>
where
    P: HandlerProvider + ?Sized,
{
    fn handlers(&self, options: &StartOptions) -> Result<Vec<ProvidedHandler>, ProviderError> {
        (**self).handlers(options)
    }
}
