//! Result messages delivered to the host.
//!
//! Exactly one result is produced per accepted command. A result carries
//! either a success payload, an error message, or (for unsolicited
//! notifications) a topic. Unpopulated fields are omitted from the JSON form:
//!
//! ```json
//! {"id":"1","isErr":false,"payload":{"echo":{"x":1}}}
//! {"id":"3","isErr":true,"errMsg":"trustblocagent: trustbloc agent already started"}
//! {"id":"6f1c...","isErr":false,"topic":"asset-ready"}
//! ```

use serde::{Deserialize, Serialize};

use super::errors::DispatchError;
use super::request::Payload;

/// One response unit crossing the router/host boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    id: String,
    #[serde(rename = "isErr")]
    is_error: bool,
    #[serde(
        rename = "errMsg",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    topic: String,
}

impl CommandResult {
    /// Creates a successful result carrying a payload.
    #[must_use]
    pub fn success(id: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            is_error: false,
            error_message: String::new(),
            payload: Some(payload),
            topic: String::new(),
        }
    }

    /// Creates an error result; the message is delivered verbatim.
    #[must_use]
    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_error: true,
            error_message: message.into(),
            payload: None,
            topic: String::new(),
        }
    }

    /// Creates an error result from a dispatch failure.
    #[must_use]
    pub fn from_error(id: impl Into<String>, error: &DispatchError) -> Self {
        Self::error(id, error.host_message())
    }

    /// Creates an unsolicited notification on the given topic.
    #[must_use]
    pub fn notification(id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_error: false,
            error_message: String::new(),
            payload: None,
            topic: topic.into(),
        }
    }

    /// Correlation token of the originating command.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the command failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }

    /// Failure description, empty on success.
    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Success payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Notification topic, empty for command responses.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Serializes the result to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the outbound adapter logs and skips it.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
