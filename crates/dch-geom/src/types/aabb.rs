// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Direction3, Point3, Vec3};

/// Axis-aligned box in laboratory coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f64` centimetres.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs a box from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let a = min.to_array();
        let b = max.to_array();
        assert!(
            a[0] <= b[0] && a[1] <= b[1] && a[2] <= b[2],
            "invalid AABB: min > max"
        );
        Self { min, max }
    }

    /// Builds a box centred at `center` with half-extents `hx, hy, hz`.
    ///
    /// # Panics
    /// Panics if a half extent is negative.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f64, hy: f64, hz: f64) -> Self {
        let he = Vec3::new(hx, hy, hz);
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Returns `true` if `point` lies inside or on the surface.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        (0..3).all(|i| {
            point.component(i) >= self.min.component(i)
                && point.component(i) <= self.max.component(i)
        })
    }

    /// Returns `true` if `point` lies strictly inside (not on a face).
    #[must_use]
    pub fn contains_strict(&self, point: &Point3) -> bool {
        (0..3).all(|i| {
            point.component(i) > self.min.component(i)
                && point.component(i) < self.max.component(i)
        })
    }

    /// Returns `true` if `other` lies entirely inside this box (faces may touch).
    #[must_use]
    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// Distance along `direction` from an interior `origin` to the surface.
    ///
    /// Returns `f64::INFINITY` for a zero direction. `direction` is used as
    /// given, so the result is in units of its length.
    #[must_use]
    pub fn distance_to_exit(&self, origin: &Point3, direction: &Direction3) -> f64 {
        let mut t_exit = f64::INFINITY;
        for dim in 0..3 {
            let d = direction.component(dim);
            if d > 0.0 {
                t_exit = t_exit.min((self.max.component(dim) - origin.component(dim)) / d);
            } else if d < 0.0 {
                t_exit = t_exit.min((self.min.component(dim) - origin.component(dim)) / d);
            }
        }
        t_exit.max(0.0)
    }

    /// Distance along `direction` from an exterior `origin` to where the ray
    /// first touches the box, or `None` if it misses.
    ///
    /// An origin already on the surface yields `Some(0.0)` when the ray heads
    /// inwards or grazes the face, and `None` when it heads away.
    #[must_use]
    pub fn distance_to_entry(&self, origin: &Point3, direction: &Direction3) -> Option<f64> {
        let mut t_min: f64 = 0.0;
        let mut t_max: f64 = f64::INFINITY;

        for dim in 0..3 {
            let d = direction.component(dim);
            let o = origin.component(dim);
            let lo = self.min.component(dim);
            let hi = self.max.component(dim);
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let recip = d.recip();
            let t1 = (lo - o) * recip;
            let t2 = (hi - o) * recip;
            let (t_entry, t_exit) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            t_min = t_min.max(t_entry);
            t_max = t_max.min(t_exit);
            if t_max < t_min {
                return None;
            }
        }

        if t_max > 0.0 {
            Some(t_min)
        } else {
            None
        }
    }
}
