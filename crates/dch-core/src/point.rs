// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recorded drift-chamber points and the per-event collection holding them.

use dch_geom::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DetectorError;

/// One track's passage through a sensitive chamber volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DchPoint {
    /// Track number on the host stack.
    pub track_id: i32,
    /// Host identifier of the sensitive volume.
    pub detector_id: i32,
    /// Chamber plane (copy number of the volume).
    pub plane: i32,
    /// Entry position (cm).
    pub pos_in: Vec3,
    /// Exit position after boundary correction (cm).
    pub pos_out: Vec3,
    /// Momentum at entry (GeV/c).
    pub mom_in: Vec3,
    /// Momentum at exit (GeV/c).
    pub mom_out: Vec3,
    /// Time of flight at entry (ns).
    pub time_ns: f64,
    /// Track length at entry (cm).
    pub length_cm: f64,
    /// Total energy loss inside the volume (GeV).
    pub energy_loss: f64,
}

/// Points recorded during one event, in recording order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointCollection {
    points: Vec<DchPoint>,
}

impl PointCollection {
    /// An empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when no points were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DchPoint> {
        self.points.get(index)
    }

    /// All points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[DchPoint] {
        &self.points
    }

    /// Iterates the points in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, DchPoint> {
        self.points.iter()
    }

    /// Appends a point and returns its index.
    pub fn push(&mut self, point: DchPoint) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Moves all points out, leaving the collection empty.
    pub fn take(&mut self) -> Vec<DchPoint> {
        std::mem::take(&mut self.points)
    }

    /// Appends copies of every point in `source` with their track number
    /// shifted by `track_offset`. Used when overlaying events whose stacks
    /// were numbered independently.
    ///
    /// Nothing is appended if any shifted track number would overflow.
    /// Returns the number of points added.
    pub fn merge_from(
        &mut self,
        source: &Self,
        track_offset: i32,
    ) -> Result<usize, DetectorError> {
        info!(entries = source.len(), "drift chamber: entries to add");
        let shifted = source
            .iter()
            .map(|p| {
                p.track_id
                    .checked_add(track_offset)
                    .map(|track_id| DchPoint { track_id, ..*p })
                    .ok_or(DetectorError::TrackIdOverflow {
                        track_id: p.track_id,
                        offset: track_offset,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let added = shifted.len();
        self.points.extend(shifted);
        info!(entries = self.len(), "drift chamber: merged entries");
        Ok(added)
    }
}

impl From<Vec<DchPoint>> for PointCollection {
    fn from(points: Vec<DchPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<DchPoint> for PointCollection {
    fn from_iter<I: IntoIterator<Item = DchPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointCollection {
    type Item = &'a DchPoint;
    type IntoIter = std::slice::Iter<'a, DchPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
