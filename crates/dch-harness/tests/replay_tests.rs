// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Replay of the bundled two-chamber fixtures.

use clap::Parser;
use dch_core::DetectorConfig;
use dch_harness::harness::{Cli, Commands};
use dch_harness::scene::GeometryDesc;
use dch_harness::trace::{replay, Trace};

static GEOMETRY: &str = include_str!("../fixtures/two_chambers.json");
static TRACE: &str = include_str!("../fixtures/two_events.json");

fn fixtures() -> (GeometryDesc, Trace) {
    let geometry: GeometryDesc = serde_json::from_str(GEOMETRY).unwrap();
    let trace: Trace = serde_json::from_str(TRACE).unwrap();
    (geometry, trace)
}

#[test]
fn geometry_fixture_builds_both_chambers() {
    let (geometry, _) = fixtures();
    let tree = geometry.build().unwrap();
    assert_eq!(tree.len(), 5);
    assert!(tree.find("DCHLog", 1).is_some());
}

#[test]
fn replay_records_corrected_points_per_event() {
    let (geometry, trace) = fixtures();
    let tree = geometry.build().unwrap();
    let result = replay(&trace, &tree, DetectorConfig::default()).unwrap();

    assert_eq!(result.events.len(), 2);
    let first = &result.events[0];
    assert_eq!(first.len(), 2);

    let p0 = first.get(0).unwrap();
    assert_eq!(p0.plane, 0);
    assert!((p0.pos_out.z() - 28.99).abs() < 1e-9);
    assert!((p0.energy_loss - 3e-6).abs() < 1e-18);
    assert!((p0.time_ns - 1.0).abs() < 1e-12);

    let p1 = first.get(1).unwrap();
    assert_eq!(p1.plane, 1);
    assert!((p1.pos_out.z() - 63.996).abs() < 1e-9);

    // The second event's only track deposits nothing.
    assert!(result.events[1].is_empty());
    assert_eq!(result.suspicious_exits, 0);
}

#[test]
fn unknown_mother_is_reported() {
    let geometry: GeometryDesc = serde_json::from_str(
        r#"{"world": [10, 10, 10], "volumes": [
            {"name": "gas", "mother": "frame", "half_extents": [1, 1, 1]}
        ]}"#,
    )
    .unwrap();
    let err = geometry.build().unwrap_err();
    assert_eq!(err, dch_geom::GeomError::UnknownVolumeName("frame".into()));
}

#[test]
fn correct_subcommand_parses_negative_components() {
    let cli = Cli::try_parse_from([
        "dch-harness",
        "correct",
        "--geometry",
        "g.json",
        "--point",
        "-1.5",
        "0",
        "29.004",
        "--direction",
        "0",
        "0",
        "-1",
    ])
    .unwrap();
    match cli.command {
        Commands::Correct {
            point, direction, ..
        } => {
            assert_eq!(point, vec![-1.5, 0.0, 29.004]);
            assert_eq!(direction, vec![0.0, 0.0, -1.0]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}
