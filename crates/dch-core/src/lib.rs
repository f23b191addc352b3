// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drift-chamber detector module.
//!
//! The transport engine drives a [`DriftChamber`] one [`TransportStep`] at a
//! time while a track is inside a sensitive volume. Energy deposits are
//! summed between entry and exit; when the track leaves, stops, or disappears
//! a [`DchPoint`] is recorded. Exit positions of tracks leaving through a
//! boundary are pulled back with the boundary corrector from `dch-geom`.
//!
//! Event bookkeeping mirrors the host lifecycle: `begin_event`,
//! `end_of_event`, and `reset`, plus merging of point collections with a
//! track-number offset.

pub mod config;
pub mod detector;
pub mod error;
pub mod point;
pub mod step;

pub use config::DetectorConfig;
pub use detector::{DriftChamber, StepOutcome};
pub use error::DetectorError;
pub use point::{DchPoint, PointCollection};
pub use step::{StepStatus, TransportStep};
