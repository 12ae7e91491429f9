//! Log record formats understood by the telemetry layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Output format of the records written to stderr.
///
/// Parsing is case-insensitive; serialized names are snake case.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    EnumString,
    Display,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per record, for hosts that collect stderr.
    #[default]
    Json,
    /// Single-line human-readable records.
    Compact,
}

impl LogFormat {
    /// Returns `true` for machine-readable output.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when text names no known [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
