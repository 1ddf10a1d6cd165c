//! Value format tags
//!
//! Every stored value carries exactly one format tag. The tag travels to the
//! provider as a numeric flag word and comes back on reads, where it selects
//! how the stored bytes are turned back into a [`Value`](crate::Value).
//!
//! | Format | Flag | Accepts |
//! |--------|------|---------|
//! | `Json` | `0x00` | any value without raw bytes or non-finite floats |
//! | `Native` | `0x01` | any value |
//! | `Bytes` | `0x02` | `Value::Bytes` only |
//! | `Utf8` | `0x04` | `Value::String` only |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flag word for structured (JSON) values
pub const FLAG_JSON: u32 = 0x00;
/// Flag word for natively serialized values
pub const FLAG_NATIVE: u32 = 0x01;
/// Flag word for raw byte values
pub const FLAG_BYTES: u32 = 0x02;
/// Flag word for UTF-8 text values
pub const FLAG_UTF8: u32 = 0x04;

/// Serialization format of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Structured encoding (JSON)
    Json,
    /// Native serialization (MessagePack of the full value model)
    Native,
    /// Raw bytes, stored verbatim
    Bytes,
    /// UTF-8 text, stored verbatim
    Utf8,
}

impl Format {
    /// All formats, in flag order
    pub const ALL: [Format; 4] = [Format::Json, Format::Native, Format::Bytes, Format::Utf8];

    /// Flag word sent to the provider
    pub fn flags(self) -> u32 {
        match self {
            Format::Json => FLAG_JSON,
            Format::Native => FLAG_NATIVE,
            Format::Bytes => FLAG_BYTES,
            Format::Utf8 => FLAG_UTF8,
        }
    }

    /// Recover a format from a provider flag word
    ///
    /// Returns `None` for flag words no format claims.
    pub fn from_flags(flags: u32) -> Option<Format> {
        match flags {
            FLAG_JSON => Some(Format::Json),
            FLAG_NATIVE => Some(Format::Native),
            FLAG_BYTES => Some(Format::Bytes),
            FLAG_UTF8 => Some(Format::Utf8),
            _ => None,
        }
    }

    /// Lowercase name, as used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Native => "native",
            Format::Bytes => "bytes",
            Format::Utf8 => "utf8",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::Json
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}': expected one of json, native, bytes, utf8")]
pub struct ParseFormatError(pub String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "native" => Ok(Format::Native),
            "bytes" => Ok(Format::Bytes),
            "utf8" | "text" => Ok(Format::Utf8),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}
