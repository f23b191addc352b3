// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Loading and saving [`DetectorConfig`].

use dch_core::config::CONFIG_KEY;
use dch_core::DetectorConfig;
use tracing::debug;

use crate::store::{ConfigError, ConfigStore};

/// Reads and writes the detector settings kept under [`CONFIG_KEY`].
#[derive(Debug, Clone)]
pub struct DetectorConfigStore<S> {
    store: S,
}

impl<S: ConfigStore> DetectorConfigStore<S> {
    /// Wraps a blob store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved settings, or `None` when nothing (or only whitespace) was saved.
    ///
    /// Fields absent from the stored JSON take their default values.
    pub fn load(&self) -> Result<Option<DetectorConfig>, ConfigError> {
        let Some(bytes) = self.store.read(CONFIG_KEY)? else {
            return Ok(None);
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let config: DetectorConfig =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Malformed {
                key: CONFIG_KEY.to_owned(),
                source,
            })?;
        validate(&config)?;
        debug!(?config, "loaded detector settings");
        Ok(Some(config))
    }

    /// Saved settings, falling back to [`DetectorConfig::default`].
    pub fn load_or_default(&self) -> Result<DetectorConfig, ConfigError> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Validates and persists `config` as pretty-printed JSON.
    pub fn save(&self, config: &DetectorConfig) -> Result<(), ConfigError> {
        validate(config)?;
        let data =
            serde_json::to_vec_pretty(config).map_err(|source| ConfigError::Malformed {
                key: CONFIG_KEY.to_owned(),
                source,
            })?;
        self.store.write(CONFIG_KEY, &data)
    }
}

fn validate(config: &DetectorConfig) -> Result<(), ConfigError> {
    let Some(check) = config.reflection_check else {
        return Ok(());
    };
    if check.entry_z_below.is_finite() && check.exit_z_above.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: CONFIG_KEY.to_owned(),
            reason: "reflection check thresholds must be finite",
        })
    }
}
