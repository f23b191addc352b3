// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Detector settings.

use dch_geom::ReflectionCheck;
use serde::{Deserialize, Serialize};

/// Key under which [`DetectorConfig`] is stored in a config store.
pub const CONFIG_KEY: &str = "dch-detector";

/// Runtime settings of a [`crate::DriftChamber`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// 0 silences the detector, 1 logs an end-of-event summary, 2 and above
    /// also log every recorded point.
    pub verbose_level: u8,
    /// Pull exit positions back onto the volume boundary.
    pub correct_exit_points: bool,
    /// Plausibility check for corrected exits; `null` disables it.
    pub reflection_check: Option<ReflectionCheck>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            verbose_level: 1,
            correct_exit_points: true,
            reflection_check: Some(ReflectionCheck::default()),
        }
    }
}
