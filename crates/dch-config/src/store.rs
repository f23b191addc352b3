// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Blob storage port and the errors raised while loading detector settings.

use std::path::PathBuf;

use thiserror::Error;

/// Where serialized settings live, addressed by key.
///
/// A missing key is not an error: `read` returns `Ok(None)` and callers fall
/// back to defaults.
pub trait ConfigStore {
    /// Bytes saved under `key`, or `None` when nothing was saved yet.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError>;
    /// Replaces whatever is saved under `key`.
    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure to read, parse, or persist detector settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no per-user config directory.
    #[error("no user config directory on this platform")]
    NoConfigDir,
    /// Reading or writing a settings file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File that could not be accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Stored settings are not valid JSON for the detector config.
    #[error("malformed settings under '{key}': {source}")]
    Malformed {
        /// Store key.
        key: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// Settings parsed but describe an unusable detector.
    #[error("invalid settings under '{key}': {reason}")]
    Invalid {
        /// Store key.
        key: String,
        /// What is wrong.
        reason: &'static str,
    },
}
