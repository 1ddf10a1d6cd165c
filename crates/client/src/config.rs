//! Client configuration via `stratakv.toml`
//!
//! Settings that apply to every call a client makes. Per-call options
//! override them where both exist (currently only `quiet`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stratakv_codec::{CodecError, FormatPolicy};
use stratakv_core::Format;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "stratakv.toml";

/// Errors loading or validating a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("failed to access config file '{}': {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The format list is unusable
    #[error("invalid formats: {0}")]
    Formats(#[from] CodecError),
}

/// Client configuration loaded from `stratakv.toml`.
///
/// # Example
///
/// ```toml
/// quiet = false
/// formats = ["json", "native"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Return failed results instead of raising, unless a call overrides it.
    #[serde(default)]
    pub quiet: bool,
    /// Formats tried, in order, for calls that name none.
    #[serde(default = "default_formats")]
    pub formats: Vec<Format>,
}

fn default_formats() -> Vec<Format> {
    vec![Format::Json]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            formats: default_formats(),
        }
    }
}

impl ClientConfig {
    /// Build the format policy described by `formats`.
    ///
    /// # Errors
    ///
    /// Returns an error if `formats` is empty.
    pub fn format_policy(&self) -> Result<FormatPolicy, ConfigError> {
        Ok(FormatPolicy::new(self.formats.iter().copied())?)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# StrataKV client configuration
#
# Return failed results instead of raising errors (default: false).
# Individual calls can still override this.
quiet = false

# Formats tried, in order, when a call does not name one (default: ["json"]).
# Known formats: "json", "native", "bytes", "utf8".
# Example fallback: store anything JSON cannot represent natively.
# formats = ["json", "native"]
formats = ["json"]
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        // Validate the format list eagerly
        config.format_policy()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
