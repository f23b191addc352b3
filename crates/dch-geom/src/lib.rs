// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives and volume navigation for the drift chamber.

This crate provides:
- `f64` vectors used as points and directions (`Vec3`, `Point3`, `Direction3`).
- Axis-aligned boxes (`Aabb`) with ray distance queries.
- The `VolumeNavigator` trait: the capability set a transport engine's
  geometry exposes (locate, current point/direction, next boundary, safety).
- `BoxNavigator`: a navigator over a hierarchy of translated boxes.
- The exit-boundary corrector used when a track leaves a sensitive volume.

Design notes:
- No ambient geometry state: navigators are passed in explicitly as `&mut`.
- Lengths are centimetres throughout, matching the transport engine.
"]

/// Exit-boundary correction.
pub mod boundary;
/// Geometry construction errors.
pub mod error;
/// Vector math in `f64`.
pub mod math;
/// Navigator trait and the box-hierarchy implementation.
pub mod nav;
/// Foundational geometric types.
pub mod types;

pub use boundary::{
    correct_exit_boundary, BoundaryCorrection, BoundaryCorrector, ReflectionCheck,
    CORRECTION_FACTOR, SAFETY_SEARCH_LIMIT,
};
pub use error::GeomError;
pub use math::{Direction3, Point3, Vec3};
pub use nav::box_tree::{BoxNavigator, Placement, VolumeIdx, VolumeTree, VolumeTreeBuilder};
pub use nav::VolumeNavigator;
pub use types::aabb::Aabb;
