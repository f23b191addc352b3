// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drift-chamber replay harness.
//!
//! Loads a box geometry and a recorded step trace from JSON, drives a
//! [`dch_core::DriftChamber`] through every event, and writes the recorded
//! points back out. Also answers one-off boundary corrections.

pub mod harness;
pub mod scene;
pub mod trace;
