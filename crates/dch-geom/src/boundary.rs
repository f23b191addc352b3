// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Exit-boundary correction for tracks leaving a volume.
//!
//! Transport engines report the exit position of a step slightly beyond the
//! true volume boundary. The corrector probes the distance to the boundary
//! looking backwards along the track and steps the exit point back along the
//! original direction by [`CORRECTION_FACTOR`] times that distance.
//!
//! Invariants:
//! - The corrected point lies on the line through the navigator's point along
//!   its direction; there is never lateral displacement.
//! - A zero safety leaves the point unchanged.
//! - The navigator's direction is the exit direction again on return.

use tracing::{debug, warn};

use crate::math::{Direction3, Point3};
use crate::nav::VolumeNavigator;

/// How far back (cm) the boundary search may look.
pub const SAFETY_SEARCH_LIMIT: f64 = 2.0;

/// Multiple of the safety distance the exit point is moved back by.
pub const CORRECTION_FACTOR: f64 = 3.0;

/// Result of one exit-boundary correction.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryCorrection {
    original: Point3,
    direction: Direction3,
    corrected: Point3,
    safety: f64,
}

impl BoundaryCorrection {
    /// The exit point after correction.
    #[must_use]
    pub const fn corrected_point(&self) -> Point3 {
        self.corrected
    }

    /// Safety distance the correction was scaled by.
    #[must_use]
    pub const fn safety_used(&self) -> f64 {
        self.safety
    }

    /// The navigator's point before correction.
    #[must_use]
    pub const fn original_point(&self) -> Point3 {
        self.original
    }

    /// The direction the correction was applied along.
    #[must_use]
    pub const fn direction(&self) -> Direction3 {
        self.direction
    }

    /// Offset from the original to the corrected point.
    #[must_use]
    pub fn displacement(&self) -> Direction3 {
        self.corrected.sub(&self.original)
    }
}

/// Plausibility check for corrected exit points.
///
/// Detector specific: a track that entered upstream of `entry_z_below` should
/// never leave downstream of `exit_z_above`. When it does, the transport step
/// most likely reflected or flipped sign. The defaults match the chamber this
/// was tuned for (30 cm / 30.02 cm).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ReflectionCheck {
    /// Entry z (cm) below which a track is considered upstream.
    pub entry_z_below: f64,
    /// Corrected exit z (cm) above which an upstream track is suspicious.
    pub exit_z_above: f64,
}

impl Default for ReflectionCheck {
    fn default() -> Self {
        Self {
            entry_z_below: 30.0,
            exit_z_above: 30.02,
        }
    }
}

impl ReflectionCheck {
    /// Returns `true` when the pair of points looks like a reflected step.
    #[must_use]
    pub fn is_suspicious(&self, entry: &Point3, corrected_exit: &Point3) -> bool {
        entry.z() < self.entry_z_below && corrected_exit.z() > self.exit_z_above
    }
}

/// Exit-boundary corrector with an optional plausibility check.
///
/// The default corrector runs [`ReflectionCheck::default`]; use
/// `BoundaryCorrector::new(None)` to switch the check off.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundaryCorrector {
    reflection_check: Option<ReflectionCheck>,
}

impl Default for BoundaryCorrector {
    fn default() -> Self {
        Self::new(Some(ReflectionCheck::default()))
    }
}

impl BoundaryCorrector {
    /// Creates a corrector; `None` disables the plausibility check.
    #[must_use]
    pub const fn new(reflection_check: Option<ReflectionCheck>) -> Self {
        Self { reflection_check }
    }

    /// The active plausibility check, if any.
    #[must_use]
    pub const fn reflection_check(&self) -> Option<ReflectionCheck> {
        self.reflection_check
    }

    /// Corrects `exit_point` for a track leaving along `exit_direction`.
    ///
    /// The navigator is re-located at `exit_point` and oriented along
    /// `exit_direction`; the point and direction it reports back are the ones
    /// the correction is computed from. Its direction is unchanged on return.
    pub fn correct<N>(
        &self,
        nav: &mut N,
        exit_point: Point3,
        exit_direction: Direction3,
    ) -> BoundaryCorrection
    where
        N: VolumeNavigator + ?Sized,
    {
        let _ = nav.locate_at(exit_point);
        nav.set_current_direction(exit_direction);
        let original = nav.current_point();
        let direction = nav.current_direction();

        let safety = nav.probe_safety(direction.negate(), SAFETY_SEARCH_LIMIT);
        nav.set_current_direction(direction);

        let corrected = original.sub(&direction.scale(CORRECTION_FACTOR * safety));
        debug!(safety, ?original, ?corrected, "exit point corrected");

        BoundaryCorrection {
            original,
            direction,
            corrected,
            safety,
        }
    }

    /// Runs the plausibility check for a track that entered at `entry_point`.
    ///
    /// Emits a warning and returns `true` when the correction looks like a
    /// reflection. Never alters `correction`.
    pub fn check(&self, entry_point: &Point3, correction: &BoundaryCorrection) -> bool {
        let Some(check) = self.reflection_check else {
            return false;
        };
        let corrected = correction.corrected_point();
        if !check.is_suspicious(entry_point, &corrected) {
            return false;
        }
        warn!(
            direction = ?correction.direction().to_array(),
            safety = correction.safety_used(),
            original = ?correction.original_point().to_array(),
            corrected = ?corrected.to_array(),
            entry_z = entry_point.z(),
            "corrected exit point downstream of plausibility threshold"
        );
        true
    }
}

/// Corrects an exit point with the default corrector.
///
/// The plausibility check needs the track's entry point, so it is not run
/// here; call [`BoundaryCorrector::check`] on the result when the entry is
/// known.
pub fn correct_exit_boundary<N>(
    exit_point: Point3,
    exit_direction: Direction3,
    nav: &mut N,
) -> BoundaryCorrection
where
    N: VolumeNavigator + ?Sized,
{
    BoundaryCorrector::default().correct(nav, exit_point, exit_direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn correction_at(corrected_z: f64) -> BoundaryCorrection {
        BoundaryCorrection {
            original: Vec3::new(0.0, 0.0, 30.01),
            direction: Vec3::UNIT_Z,
            corrected: Vec3::new(0.0, 0.0, corrected_z),
            safety: 0.0,
        }
    }

    #[test]
    fn default_corrector_checks_standard_thresholds() {
        let c = BoundaryCorrector::default();
        assert_eq!(c.reflection_check(), Some(ReflectionCheck::default()));
        assert!(c.check(&Vec3::new(0.0, 0.0, 25.0), &correction_at(30.05)));
        assert!(!c.check(&Vec3::new(0.0, 0.0, 25.0), &correction_at(30.01)));
    }

    #[test]
    fn disabled_check_never_flags() {
        let c = BoundaryCorrector::new(None);
        assert!(c.reflection_check().is_none());
        assert!(!c.check(&Vec3::new(0.0, 0.0, 25.0), &correction_at(30.05)));
    }

    #[test]
    fn suspicious_exit_is_flagged_without_touching_the_result() {
        let c = BoundaryCorrector::new(Some(ReflectionCheck::default()));
        let correction = correction_at(30.05);
        assert!(c.check(&Vec3::new(0.0, 0.0, 25.0), &correction));
        assert_eq!(correction.corrected_point().to_array(), [0.0, 0.0, 30.05]);
    }

    #[test]
    fn thresholds_are_strict() {
        let check = ReflectionCheck::default();
        assert!(!check.is_suspicious(&Vec3::new(0.0, 0.0, 30.0), &Vec3::new(0.0, 0.0, 31.0)));
        assert!(!check.is_suspicious(&Vec3::new(0.0, 0.0, 25.0), &Vec3::new(0.0, 0.0, 30.02)));
        assert!(check.is_suspicious(&Vec3::new(0.0, 0.0, 29.9), &Vec3::new(0.0, 0.0, 30.021)));
    }

    #[test]
    fn custom_thresholds_apply() {
        let c = BoundaryCorrector::new(Some(ReflectionCheck {
            entry_z_below: 100.0,
            exit_z_above: 150.0,
        }));
        assert!(!c.check(&Vec3::new(0.0, 0.0, 25.0), &correction_at(30.05)));
        assert!(c.check(&Vec3::new(0.0, 0.0, 25.0), &correction_at(151.0)));
    }
}
