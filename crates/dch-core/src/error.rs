// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors raised by the detector module.

use thiserror::Error;

/// Error type for step processing and collection bookkeeping.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectorError {
    /// The transport engine reported a NaN or infinite quantity.
    #[error("track {track_id}: non-finite {field} in transport step")]
    NonFiniteStep {
        /// Track the step belongs to.
        track_id: i32,
        /// Which quantity was not finite.
        field: &'static str,
    },
    /// Shifting a track number by a merge offset overflowed.
    #[error("track {track_id} overflows when offset by {offset}")]
    TrackIdOverflow {
        /// Original track number.
        track_id: i32,
        /// Offset being applied.
        offset: i32,
    },
}
