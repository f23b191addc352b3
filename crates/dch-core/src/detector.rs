// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The drift-chamber detector: step processing and event bookkeeping.

use std::collections::BTreeMap;

use dch_geom::{BoundaryCorrector, Vec3, VolumeNavigator};
use tracing::{debug, info, trace};

use crate::config::DetectorConfig;
use crate::error::DetectorError;
use crate::point::{DchPoint, PointCollection};
use crate::step::TransportStep;

/// What a processed step did to the detector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The track is still inside; its deposit was added.
    Accumulating,
    /// The track left without depositing energy; nothing was recorded.
    NoDeposit,
    /// A point was recorded at this index of the current collection.
    Recorded(usize),
}

/// Quantities latched while a track crosses a sensitive volume.
#[derive(Debug, Clone, Copy, Default)]
struct TrackState {
    track_id: i32,
    volume_id: i32,
    time_ns: f64,
    length_cm: f64,
    pos_in: Vec3,
    mom_in: Vec3,
    pos_out: Vec3,
    mom_out: Vec3,
    energy_loss: f64,
}

/// Drift-chamber detector module.
///
/// One instance per chamber system. The navigator is passed to every step so
/// the detector never reaches for shared geometry state.
#[derive(Debug, Clone)]
pub struct DriftChamber {
    name: String,
    config: DetectorConfig,
    corrector: BoundaryCorrector,
    state: TrackState,
    points: PointCollection,
    points_per_track: BTreeMap<i32, u32>,
    suspicious_exits: usize,
}

impl Default for DriftChamber {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl DriftChamber {
    /// Creates a detector named `"DriftChamber"`.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_name("DriftChamber", config)
    }

    /// Creates a detector with a custom name (used in log output).
    #[must_use]
    pub fn with_name(name: impl Into<String>, config: DetectorConfig) -> Self {
        Self {
            name: name.into(),
            config,
            corrector: BoundaryCorrector::new(config.reflection_check),
            state: TrackState::default(),
            points: PointCollection::new(),
            points_per_track: BTreeMap::new(),
            suspicious_exits: 0,
        }
    }

    /// Detector name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Processes one step of a track inside a sensitive volume.
    ///
    /// Entering resets the energy-loss sum and latches entry time, length,
    /// position, and momentum. Every step adds its deposit. When the track
    /// exits, stops, or disappears, a point is recorded unless nothing was
    /// deposited. Exits through a boundary get their position corrected with
    /// `nav`, which must describe the same geometry the step came from.
    #[allow(clippy::float_cmp)]
    pub fn process_step<N>(
        &mut self,
        step: &TransportStep,
        nav: &mut N,
    ) -> Result<StepOutcome, DetectorError>
    where
        N: VolumeNavigator + ?Sized,
    {
        step.validate()?;

        if step.status.entering {
            self.state = TrackState {
                time_ns: step.time_s * 1.0e9,
                length_cm: step.length_cm,
                pos_in: step.position,
                mom_in: step.momentum,
                ..TrackState::default()
            };
        }

        self.state.energy_loss += step.energy_deposit;

        if !step.status.is_leaving() {
            return Ok(StepOutcome::Accumulating);
        }

        self.state.track_id = step.track_id;
        self.state.volume_id = step.volume_id;
        self.state.pos_out = step.position;
        self.state.mom_out = step.momentum;

        // Exact zero: nothing was deposited since entry. The latched state is
        // kept; the next entering step starts over anyway.
        if self.state.energy_loss == 0.0 {
            return Ok(StepOutcome::NoDeposit);
        }

        if step.status.exiting && self.config.correct_exit_points {
            let correction =
                self.corrector
                    .correct(nav, self.state.pos_out, step.momentum.normalize());
            if self.corrector.check(&self.state.pos_in, &correction) {
                self.suspicious_exits += 1;
            }
            self.state.pos_out = correction.corrected_point();
        }

        let index = self.add_hit(step.copy_no);
        *self.points_per_track.entry(self.state.track_id).or_insert(0) += 1;
        self.state = TrackState::default();
        Ok(StepOutcome::Recorded(index))
    }

    fn add_hit(&mut self, plane: i32) -> usize {
        let s = &self.state;
        let point = DchPoint {
            track_id: s.track_id,
            detector_id: s.volume_id,
            plane,
            pos_in: s.pos_in,
            pos_out: s.pos_out,
            mom_in: s.mom_in,
            mom_out: s.mom_out,
            time_ns: s.time_ns,
            length_cm: s.length_cm,
            energy_loss: s.energy_loss,
        };
        if self.config.verbose_level > 1 {
            debug!(
                detector = %self.name,
                pos_in = ?point.pos_in.to_array(),
                detector_id = point.detector_id,
                track = point.track_id,
                energy_loss_kev = point.energy_loss * 1.0e6,
                "adding point"
            );
        }
        self.points.push(point)
    }

    /// Start-of-event hook.
    pub fn begin_event(&mut self) {
        trace!(detector = %self.name, "begin event");
    }

    /// Closes the current event.
    ///
    /// Logs a summary when `verbose_level > 0`, clears the collection and
    /// per-track counters, resets the step state, and returns the points that
    /// were recorded.
    pub fn end_of_event(&mut self) -> Vec<DchPoint> {
        if self.config.verbose_level > 0 {
            self.print();
        }
        let points = self.points.take();
        self.points_per_track.clear();
        self.state = TrackState::default();
        points
    }

    /// Logs how many points the current event holds.
    pub fn print(&self) {
        info!(
            detector = %self.name,
            points = self.points.len(),
            "points registered in this event"
        );
    }

    /// Drops all recorded points and resets the step state.
    pub fn reset(&mut self) {
        self.points.clear();
        self.points_per_track.clear();
        self.state = TrackState::default();
    }

    /// The point collection for `index`. The detector owns a single
    /// collection at index 0.
    #[must_use]
    pub const fn collection(&self, index: usize) -> Option<&PointCollection> {
        match index {
            0 => Some(&self.points),
            _ => None,
        }
    }

    /// Points recorded in the current event.
    #[must_use]
    pub const fn points(&self) -> &PointCollection {
        &self.points
    }

    /// Number of points recorded for `track_id` in the current event.
    #[must_use]
    pub fn points_for_track(&self, track_id: i32) -> u32 {
        self.points_per_track.get(&track_id).copied().unwrap_or(0)
    }

    /// Exits flagged by the plausibility check since construction.
    #[must_use]
    pub const fn suspicious_exits(&self) -> usize {
        self.suspicious_exits
    }
}
