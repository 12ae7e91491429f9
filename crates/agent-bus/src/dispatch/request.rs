//! Command deserialization for the inbound adapter.
//!
//! The host sends one JSON object per call:
//!
//! ```json
//! {"id":"1","pkg":"test","fn":"echo","payload":{"x":1}}
//! ```
//!
//! Missing fields decode to empty values so the processor can report them as
//! unresolved routes instead of silently dropping the request. A `null`
//! payload is treated as an empty object.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::errors::DispatchError;

/// Untyped JSON object carried by commands and results.
pub type Payload = Map<String, Value>;

/// A single request crossing the host boundary.
///
/// Commands are immutable once decoded; handlers only ever see a shared
/// reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Command {
    #[serde(default)]
    id: String,
    #[serde(default, rename = "pkg")]
    package: String,
    #[serde(default, rename = "fn")]
    function: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    payload: Payload,
}

impl Command {
    /// Builds a command from its parts.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        package: impl Into<String>,
        function: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            id: id.into(),
            package: package.into(),
            function: function.into(),
            payload,
        }
    }

    /// Decodes a raw host request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedCommand`] when the input is not a
    /// JSON object matching the command schema.
    pub fn parse(raw: &str) -> Result<Self, DispatchError> {
        serde_json::from_str(raw.trim()).map_err(DispatchError::from_json_error)
    }

    /// Correlation token copied onto the result.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Logical handler group.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Operation within the package.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Handler input, opaque to the router.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Payload, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Payload>::deserialize(deserializer).map(Option::unwrap_or_default)
}
