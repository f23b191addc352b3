// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vector helpers for detector geometry.
//!
//! All operations are plain `f64` arithmetic without fused multiply-add so that
//! corrected positions are bit-reproducible across targets.

mod vec3;

pub use vec3::Vec3;

/// A position in the laboratory frame (centimetres).
pub type Point3 = Vec3;

/// A travel direction. Not required to be normalized.
pub type Direction3 = Vec3;

/// Degeneracy threshold for lengths (not numeric precision).
pub const EPSILON: f64 = 1e-12;
