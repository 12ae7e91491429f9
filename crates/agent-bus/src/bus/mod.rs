//! Threaded command pipeline between the host and the processor.
//!
//! Two rendezvous channels connect three parties: hosts submit through an
//! [`InboundAdapter`], the processor thread resolves and runs each command,
//! and the outbound thread serializes results and hands them to the
//! [`HostNotifier`] in the order they were produced. The processor thread is
//! the sole owner of the handler registry.

mod errors;
mod inbound;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};
use uuid::Uuid;

pub use self::errors::BusError;
pub use self::inbound::InboundAdapter;

use crate::dispatch::{Command, CommandProcessor, CommandResult};
use crate::host::HostNotifier;

pub(crate) const BUS_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::bus");

/// Topic of the unsolicited notification posted once the bus is ready.
pub const STARTUP_TOPIC: &str = "asset-ready";

const PROCESSOR_THREAD: &str = "agent-bus-processor";
const OUTBOUND_THREAD: &str = "agent-bus-outbound";

/// Running bus with its worker threads.
#[derive(Debug)]
pub struct CommandBus {
    inbound: InboundAdapter,
    outbound: SyncSender<CommandResult>,
    processor: JoinHandle<()>,
    delivery: JoinHandle<()>,
}

impl CommandBus {
    /// Spawns the processor and outbound threads.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Spawn`] when a worker thread cannot be created.
    pub fn start(
        processor: CommandProcessor,
        notifier: Arc<dyn HostNotifier>,
    ) -> Result<Self, BusError> {
        let (command_tx, command_rx) = mpsc::sync_channel::<Command>(0);
        let (result_tx, result_rx) = mpsc::sync_channel::<CommandResult>(0);

        let delivery = spawn(OUTBOUND_THREAD, move || run_outbound(&result_rx, &*notifier))?;

        let processor_results = result_tx.clone();
        let processor = match spawn(PROCESSOR_THREAD, move || {
            run_processor(processor, &command_rx, &processor_results);
        }) {
            Ok(handle) => handle,
            Err(error) => {
                drop(result_tx);
                let _ = delivery.join();
                return Err(error);
            }
        };

        info!(target: BUS_TARGET, "command bus running");
        Ok(Self {
            inbound: InboundAdapter::new(command_tx),
            outbound: result_tx,
            processor,
            delivery,
        })
    }

    /// Returns a new handle for submitting commands.
    #[must_use]
    pub fn inbound(&self) -> InboundAdapter {
        self.inbound.clone()
    }

    /// Posts the `asset-ready` notification and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Closed`] when the outbound thread has stopped.
    pub fn post_startup_notification(&self) -> Result<String, BusError> {
        let id = Uuid::new_v4().to_string();
        self.outbound
            .send(CommandResult::notification(id.clone(), STARTUP_TOPIC))
            .map_err(|_| BusError::Closed)?;
        debug!(target: BUS_TARGET, id = id.as_str(), "startup notification posted");
        Ok(id)
    }

    /// Closes the bus and waits for both workers to drain.
    ///
    /// The processor only stops once every [`InboundAdapter`] clone has been
    /// dropped, so callers must release their handles first.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::ThreadPanic`] when a worker panicked.
    pub fn shutdown(self) -> Result<(), BusError> {
        let Self {
            inbound,
            outbound,
            processor,
            delivery,
        } = self;

        drop(inbound);
        let processed = join(PROCESSOR_THREAD, processor);
        drop(outbound);
        let delivered = join(OUTBOUND_THREAD, delivery);

        info!(target: BUS_TARGET, "command bus stopped");
        processed.and(delivered)
    }
}

fn spawn<F>(name: &'static str, body: F) -> Result<JoinHandle<()>, BusError>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_owned())
        .spawn(body)
        .map_err(|source| BusError::Spawn { name, source })
}

fn join(name: &'static str, handle: JoinHandle<()>) -> Result<(), BusError> {
    handle.join().map_err(|_| BusError::ThreadPanic { name })
}

fn run_processor(
    mut processor: CommandProcessor,
    commands: &Receiver<Command>,
    results: &SyncSender<CommandResult>,
) {
    for command in commands {
        let result = processor.process(&command);
        if results.send(result).is_err() {
            warn!(target: BUS_TARGET, "outbound queue closed, stopping processor");
            return;
        }
    }
    debug!(target: BUS_TARGET, "inbound queue closed");
}

fn run_outbound(results: &Receiver<CommandResult>, notifier: &dyn HostNotifier) {
    for result in results {
        match result.to_json() {
            Ok(message) => notifier.notify(&message),
            Err(error) => {
                warn!(
                    target: BUS_TARGET,
                    id = result.id(),
                    %error,
                    "failed to serialize result"
                );
            }
        }
    }
    debug!(target: BUS_TARGET, "outbound queue closed");
}
