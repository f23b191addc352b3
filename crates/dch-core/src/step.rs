// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! What the transport engine reports for one step inside a sensitive volume.

use dch_geom::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::DetectorError;

/// Track transitions flagged on a step. Several may hold at once, e.g. a
/// track crossing a thin volume in a single step both enters and exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepStatus {
    /// First step in the volume.
    pub entering: bool,
    /// Step ends on the volume boundary.
    pub exiting: bool,
    /// Track came to rest.
    pub stopped: bool,
    /// Track was absorbed or decayed.
    pub disappeared: bool,
}

impl StepStatus {
    /// A step strictly inside the volume.
    pub const INSIDE: Self = Self {
        entering: false,
        exiting: false,
        stopped: false,
        disappeared: false,
    };

    /// Status of a step entering the volume.
    pub const ENTERING: Self = Self {
        entering: true,
        ..Self::INSIDE
    };

    /// Status of a step leaving through a boundary.
    pub const EXITING: Self = Self {
        exiting: true,
        ..Self::INSIDE
    };

    /// Returns `true` when this step ends the track's stay in the volume.
    pub const fn is_leaving(&self) -> bool {
        self.exiting || self.stopped || self.disappeared
    }
}

/// One transport step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportStep {
    /// Track number on the host stack.
    pub track_id: i32,
    /// Host identifier of the sensitive volume.
    pub volume_id: i32,
    /// Copy number of the volume (the chamber plane).
    pub copy_no: i32,
    /// Track transitions on this step.
    #[serde(default)]
    pub status: StepStatus,
    /// Track position at the end of the step (cm).
    pub position: Point3,
    /// Track momentum at the end of the step (GeV/c).
    pub momentum: Vec3,
    /// Time of flight since the primary vertex (s).
    pub time_s: f64,
    /// Track length since the primary vertex (cm).
    pub length_cm: f64,
    /// Energy deposited during this step (GeV).
    pub energy_deposit: f64,
}

impl TransportStep {
    /// Rejects steps carrying NaN or infinite quantities.
    pub fn validate(&self) -> Result<(), DetectorError> {
        let non_finite = |field: &'static str| DetectorError::NonFiniteStep {
            track_id: self.track_id,
            field,
        };
        if !self.position.is_finite() {
            return Err(non_finite("position"));
        }
        if !self.momentum.is_finite() {
            return Err(non_finite("momentum"));
        }
        if !self.time_s.is_finite() {
            return Err(non_finite("time"));
        }
        if !self.length_cm.is_finite() {
            return Err(non_finite("length"));
        }
        if !self.energy_deposit.is_finite() {
            return Err(non_finite("energy deposit"));
        }
        Ok(())
    }
}
