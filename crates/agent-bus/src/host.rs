//! One-way delivery of serialized results to the embedding host.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::warn;

const HOST_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::host");

/// Host callback receiving each serialized result.
///
/// Delivery is fire-and-forget; the bus never waits for an acknowledgement.
pub trait HostNotifier: Send + Sync {
    /// Delivers one JSON-encoded result.
    fn notify(&self, message: &str);
}

impl<T> HostNotifier for Arc<T>
where
    T: HostNotifier + ?Sized,
{
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Notifier that writes one result per line to a shared writer.
#[derive(Debug)]
pub struct JsonlNotifier<W> {
    writer: Mutex<W>,
}

impl<W> JsonlNotifier<W>
where
    W: Write + Send,
{
    /// Wraps the writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the writer, consuming the notifier.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_line(&self, message: &str) -> io::Result<()> {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        writer.write_all(message.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl JsonlNotifier<io::Stdout> {
    /// Notifier over the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> HostNotifier for JsonlNotifier<W>
where
    W: Write + Send,
{
    fn notify(&self, message: &str) {
        if let Err(error) = self.write_line(message) {
            warn!(target: HOST_TARGET, %error, "failed to deliver result to host");
        }
    }
}
