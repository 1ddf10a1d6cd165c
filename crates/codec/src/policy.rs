//! Format selection policy
//!
//! A call that names no format is encoded with the client's policy: an
//! ordered list of formats configured once. Each format is tried in turn and
//! the first that accepts the value wins. Nothing inspects the value's type
//! to guess a format, so the same value always lands in the same format.

use crate::codec::encode;
use crate::error::{CodecError, CodecResult};
use stratakv_core::{Format, Value};

/// Ordered fallback list of formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPolicy {
    formats: Vec<Format>,
}

impl FormatPolicy {
    /// Create a policy trying `formats` in order
    ///
    /// Duplicate entries are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyPolicy`] if `formats` is empty.
    pub fn new(formats: impl IntoIterator<Item = Format>) -> CodecResult<Self> {
        let mut ordered: Vec<Format> = Vec::new();
        for format in formats {
            if !ordered.contains(&format) {
                ordered.push(format);
            }
        }
        if ordered.is_empty() {
            return Err(CodecError::EmptyPolicy);
        }
        Ok(FormatPolicy { formats: ordered })
    }

    /// Policy that only ever uses one format
    pub fn only(format: Format) -> Self {
        FormatPolicy {
            formats: vec![format],
        }
    }

    /// Formats in the order they are tried
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// Encode `value` with the first format that accepts it
    ///
    /// When every format rejects the value, the error from the first
    /// format is returned.
    pub fn encode(&self, value: &Value) -> CodecResult<(Vec<u8>, Format)> {
        let mut first_err = None;
        for format in &self.formats {
            match encode(value, *format) {
                Ok(bytes) => return Ok((bytes, *format)),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        Err(first_err.unwrap_or(CodecError::EmptyPolicy))
    }

    /// Encode with `format` if given, otherwise with the policy
    pub fn encode_with(
        &self,
        value: &Value,
        format: Option<Format>,
    ) -> CodecResult<(Vec<u8>, Format)> {
        match format {
            Some(format) => encode(value, format).map(|bytes| (bytes, format)),
            None => self.encode(value),
        }
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        FormatPolicy::only(Format::Json)
    }
}
