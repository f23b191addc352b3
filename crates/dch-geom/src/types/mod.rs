// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the navigator.
//!
//! Containment is inclusive on faces for [`aabb::Aabb::contains`]; the
//! navigator uses the strict variant for daughters so that a point lying on a
//! shared face resolves to the mother volume.

#[doc = "Axis-aligned boxes (laboratory frame) with ray distance queries."]
pub mod aabb;
