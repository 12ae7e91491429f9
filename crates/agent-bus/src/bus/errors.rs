//! Error types for the bus pipeline threads.

use std::io;

use thiserror::Error;

/// Errors surfaced while starting or stopping the bus.
#[derive(Debug, Error)]
pub enum BusError {
    /// A worker thread could not be spawned.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Name of the worker thread.
        name: &'static str,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// A worker thread panicked before it could be joined.
    #[error("{name} thread panicked")]
    ThreadPanic {
        /// Name of the worker thread.
        name: &'static str,
    },
    /// The outbound queue no longer accepts results.
    #[error("outbound queue closed")]
    Closed,
}
