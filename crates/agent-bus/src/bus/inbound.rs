//! Host-facing entry point that decodes and enqueues commands.

use std::sync::mpsc::{SendError, SyncSender};

use tracing::warn;

use super::BUS_TARGET;
use crate::dispatch::Command;

/// Cloneable handle through which hosts submit commands.
///
/// Submission hands the command to the processor over a rendezvous channel,
/// so a call may block until the processor is ready for the next command.
#[derive(Debug, Clone)]
pub struct InboundAdapter {
    sender: SyncSender<Command>,
}

impl InboundAdapter {
    pub(crate) const fn new(sender: SyncSender<Command>) -> Self {
        Self { sender }
    }

    /// Decodes one JSON command and enqueues it.
    ///
    /// Malformed input is logged and dropped; the caller never sees an error.
    pub fn submit(&self, raw: &str) {
        match Command::parse(raw) {
            Ok(command) => self.enqueue(command),
            Err(error) => {
                warn!(target: BUS_TARGET, %error, "dropping malformed command");
            }
        }
    }

    /// Enqueues an already decoded command.
    pub fn enqueue(&self, command: Command) {
        if let Err(SendError(command)) = self.sender.send(command) {
            warn!(
                target: BUS_TARGET,
                id = command.id(),
                "command processor stopped, dropping command"
            );
        }
    }
}
