//! Host notifier that forwards results to the test thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use serde_json::Value;

use crate::host::HostNotifier;

const RESULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Notifier that pushes every delivered message onto a channel.
#[derive(Debug)]
pub struct ChannelNotifier {
    sender: Sender<String>,
}

impl ChannelNotifier {
    /// Builds a notifier together with the stream reading its messages.
    #[must_use]
    pub fn pair() -> (Arc<Self>, ResultStream) {
        let (sender, receiver) = mpsc::channel();
        (Arc::new(Self { sender }), ResultStream::new(receiver))
    }
}

impl HostNotifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        // The stream may be gone once a test has finished asserting.
        let _ = self.sender.send(message.to_owned());
    }
}

/// Ordered view of the results delivered to the host.
#[derive(Debug)]
pub struct ResultStream {
    receiver: Receiver<String>,
    seen: Vec<Value>,
}

impl ResultStream {
    fn new(receiver: Receiver<String>) -> Self {
        Self {
            receiver,
            seen: Vec::new(),
        }
    }

    /// Waits for the next delivered result.
    pub fn next(&mut self) -> Option<Value> {
        match self.receiver.recv_timeout(RESULT_TIMEOUT) {
            Ok(message) => {
                let value: Value =
                    serde_json::from_str(&message).expect("host received invalid JSON");
                self.seen.push(value.clone());
                Some(value)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Returns the result carrying `id`, waiting for it when necessary.
    pub fn by_id(&mut self, id: &str) -> Option<Value> {
        if let Some(found) = self.seen.iter().find(|value| value["id"] == id) {
            return Some(found.clone());
        }
        while let Some(value) = self.next() {
            if value["id"] == id {
                return Some(value);
            }
        }
        None
    }

    /// Checks whether any message arrives within `wait`.
    pub fn is_quiet_for(&mut self, wait: Duration) -> bool {
        match self.receiver.recv_timeout(wait) {
            Ok(message) => {
                let value: Value =
                    serde_json::from_str(&message).expect("host received invalid JSON");
                self.seen.push(value);
                false
            }
            Err(_) => true,
        }
    }

    /// Every result observed so far, in delivery order.
    #[must_use]
    pub fn seen(&self) -> &[Value] {
        &self.seen
    }
}
