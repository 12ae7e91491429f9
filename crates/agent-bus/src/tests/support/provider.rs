//! Test handler provider: records start requests and supports injected
//! failures for BDD scenarios.

use std::io::{Read, Write};
use std::sync::{Arc, Mutex};

use crate::dispatch::StartOptions;
use crate::provider::{
    ExecutionError, HandlerProvider, ProvidedHandler, ProviderError,
};

/// Provider exposing a small `wallet` package.
///
/// - `wallet/Open` echoes its request bytes.
/// - `wallet/Locked` fails with code 2003.
/// - `wallet/Garbage` writes output that is not JSON.
/// - `wallet/Panic` panics mid-command.
#[derive(Clone, Default)]
pub struct RecordingHandlerProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl RecordingHandlerProvider {
    /// Makes every subsequent request fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        let mut state = self.state.lock().expect("provider state mutex poisoned");
        state.failure = Some(message.into());
    }

    /// Returns the options of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<StartOptions> {
        let state = self.state.lock().expect("provider state mutex poisoned");
        state.requests.clone()
    }
}

impl HandlerProvider for RecordingHandlerProvider {
    fn handlers(&self, options: &StartOptions) -> Result<Vec<ProvidedHandler>, ProviderError> {
        let failure = {
            let mut state = self.state.lock().expect("provider state mutex poisoned");
            state.requests.push(options.clone());
            state.failure.clone()
        };
        if let Some(message) = failure {
            return Err(ProviderError::new(message));
        }
        Ok(vec![
            ProvidedHandler::new("wallet", "Open", Arc::new(echo_request)),
            ProvidedHandler::new("wallet", "Locked", Arc::new(locked)),
            ProvidedHandler::new("wallet", "Garbage", Arc::new(garbage)),
            ProvidedHandler::new("wallet", "Panic", Arc::new(explode)),
        ])
    }
}

#[derive(Default)]
struct ProviderState {
    requests: Vec<StartOptions>,
    failure: Option<String>,
}

fn io_failure(error: &std::io::Error) -> ExecutionError {
    ExecutionError::new(-1, error.to_string())
}

fn echo_request(response: &mut dyn Write, request: &mut dyn Read) -> Result<(), ExecutionError> {
    let mut body = Vec::new();
    request
        .read_to_end(&mut body)
        .map_err(|error| io_failure(&error))?;
    response.write_all(&body).map_err(|error| io_failure(&error))
}

fn locked(_response: &mut dyn Write, _request: &mut dyn Read) -> Result<(), ExecutionError> {
    Err(ExecutionError::new(2003, "vault is locked"))
}

fn garbage(response: &mut dyn Write, _request: &mut dyn Read) -> Result<(), ExecutionError> {
    response
        .write_all(b"<html>")
        .map_err(|error| io_failure(&error))
}

fn explode(_response: &mut dyn Write, _request: &mut dyn Read) -> Result<(), ExecutionError> {
    panic!("wallet backend crashed")
}
