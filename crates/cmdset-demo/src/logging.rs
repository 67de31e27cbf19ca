//! The `--log-format` setting.
//!
//! Accepted spellings come from the enum itself, so the top-level help and
//! the parser cannot drift apart.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Shape of the log lines the demo writes to stderr.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One terse line per event, coloured when stderr is a terminal.
    #[default]
    Compact,
    /// One JSON object per event with its fields flattened.
    Json,
}

impl LogFormat {
    /// Whether lines are meant for a machine reader.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Accepted spellings joined for a usage line, such as `compact|json`.
    #[must_use]
    pub fn choices() -> String {
        Self::VARIANTS.join("|")
    }
}
