// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings directory on disk, one `<key>.json` file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::store::{ConfigError, ConfigStore};

/// A directory of JSON settings files.
///
/// Opening a directory never touches the filesystem; it is created on the
/// first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    base: PathBuf,
}

impl ConfigDir {
    /// The per-user config directory (e.g. `~/.config/dch`).
    pub fn user() -> Result<Self, ConfigError> {
        ProjectDirs::from("dev", "dch", "dch")
            .map(|proj| Self::at(proj.config_dir()))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// A directory at an explicit path.
    pub fn at(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for ConfigDir {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base).map_err(|source| ConfigError::Io {
            path: self.base.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, data).map_err(|source| ConfigError::Io { path, source })
    }
}
