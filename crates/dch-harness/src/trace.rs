// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recorded step traces and their replay through the detector.

use dch_core::{DetectorConfig, DetectorError, DriftChamber, PointCollection, TransportStep};
use dch_geom::{BoxNavigator, VolumeTree};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Steps of one event, in transport order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    /// Steps inside sensitive volumes.
    pub steps: Vec<TransportStep>,
}

/// A sequence of events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    /// Events in run order.
    pub events: Vec<Event>,
}

/// Totals collected over a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replay {
    /// Recorded points per event.
    pub events: Vec<PointCollection>,
    /// Exits flagged by the plausibility check.
    pub suspicious_exits: usize,
}

/// Replays every event of `trace` through a fresh detector.
#[instrument(skip_all, fields(events = trace.events.len()))]
pub fn replay(
    trace: &Trace,
    tree: &VolumeTree,
    config: DetectorConfig,
) -> Result<Replay, DetectorError> {
    let mut nav = BoxNavigator::new(tree);
    let mut dch = DriftChamber::new(config);
    let mut events = Vec::with_capacity(trace.events.len());

    for event in &trace.events {
        dch.begin_event();
        for step in &event.steps {
            dch.process_step(step, &mut nav)?;
        }
        events.push(PointCollection::from(dch.end_of_event()));
    }

    let recorded: usize = events.iter().map(PointCollection::len).sum();
    info!(recorded, suspicious = dch.suspicious_exits(), "replay finished");
    Ok(Replay {
        events,
        suspicious_exits: dch.suspicious_exits(),
    })
}
