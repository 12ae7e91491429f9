//! Placeholder handler provider used by the stdio host until real agent
//! handlers are wired in.

use std::io::{Read, Write};
use std::sync::Arc;

use serde_json::json;

use crate::dispatch::StartOptions;
use crate::provider::{
    CommandExecutor, ExecutionError, HandlerProvider, ProvidedHandler, ProviderError,
};

const PROVIDER_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::provider::placeholder");

/// Package exposed by the placeholder provider.
pub const PLACEHOLDER_PACKAGE: &str = "agent";

/// Provider exposing a single `agent/Domain` handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderHandlerProvider;

impl HandlerProvider for PlaceholderHandlerProvider {
    fn handlers(&self, options: &StartOptions) -> Result<Vec<ProvidedHandler>, ProviderError> {
        if options.bloc_domain.trim().is_empty() {
            return Err(ProviderError::new("blocDomain must not be empty"));
        }

        tracing::warn!(
            target: PROVIDER_TARGET,
            bloc_domain = %options.bloc_domain,
            "agent handlers are placeholders"
        );

        let domain = options.bloc_domain.clone();
        let executor: Arc<dyn CommandExecutor> = Arc::new(
            move |response: &mut dyn Write, _request: &mut dyn Read| -> Result<(), ExecutionError> {
                let body = json!({ "blocDomain": &domain });
                serde_json::to_writer(response, &body)
                    .map_err(|error| ExecutionError::new(1, error.to_string()))
            },
        );

        Ok(vec![ProvidedHandler::new(
            PLACEHOLDER_PACKAGE,
            "Domain",
            executor,
        )])
    }
}
