//! JSON command dispatch for the agent.
//!
//! Hosts submit commands addressed by package and function. The processor
//! resolves each command against a two-level [`HandlerRegistry`], runs the
//! handler, and yields exactly one [`CommandResult`] carrying the same id.
//!
//! ## Protocol
//!
//! A command is a JSON object:
//!
//! ```json
//! {"id":"1","pkg":"test","fn":"echo","payload":{"x":1}}
//! ```
//!
//! Results are JSON objects with `id` and `isErr` always present:
//!
//! ```json
//! {"id":"1","isErr":false,"payload":{"echo":{"x":1}}}
//! {"id":"2","isErr":true,"errMsg":"trustblocagent: trustbloc agent not running"}
//! ```
//!
//! ## Lifecycle
//!
//! While inactive, the `trustblocagent` package exposes only `Start`. A
//! successful `Start` installs the provider's handlers and swaps `Start` for
//! `Stop`; `Stop` resets the registry to `trustblocagent/Start` alone.

mod diagnostics;
mod errors;
mod handler;
mod lifecycle;
mod registry;
mod request;
mod response;
mod router;

pub use self::diagnostics::DIAGNOSTIC_PACKAGE;
pub use self::errors::{DispatchError, ERROR_PREFIX};
pub use self::handler::{CommandHandler, ExecutorHandler};
pub use self::lifecycle::{BOOTSTRAP_PACKAGE, LifecycleController, StartOptions};
pub use self::registry::{HandlerRegistry, LifecycleRoute, Route};
pub use self::request::{Command, Payload};
pub use self::response::CommandResult;
pub use self::router::CommandProcessor;
