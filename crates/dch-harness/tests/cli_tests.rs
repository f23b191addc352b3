// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Subcommands run end to end against files in a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use dch_core::{DchPoint, DetectorConfig, PointCollection};
use dch_geom::Vec3;
use dch_harness::harness::{log_filter, run_cli, Cli, CorrectionReport};
use tracing::level_filters::LevelFilter;

const CHAMBER: &str = r#"{
  "world": [100.0, 100.0, 100.0],
  "volumes": [
    { "name": "frame", "half_extents": [10.0, 10.0, 6.0], "offset": [0.0, 0.0, 26.0] },
    { "name": "gas", "mother": "frame", "half_extents": [8.0, 8.0, 5.0] }
  ]
}"#;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dch-harness-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn run(args: &[&str]) {
    let argv = std::iter::once("dch-harness").chain(args.iter().copied());
    run_cli(Cli::try_parse_from(argv).unwrap()).unwrap();
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn read<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn point(track_id: i32, z: f64) -> DchPoint {
    DchPoint {
        track_id,
        detector_id: 2,
        plane: 0,
        pos_in: Vec3::new(0.0, 0.0, 21.0),
        pos_out: Vec3::new(0.0, 0.0, z),
        mom_in: Vec3::UNIT_Z,
        mom_out: Vec3::UNIT_Z,
        time_ns: 1.0,
        length_cm: 21.0,
        energy_loss: 1e-6,
    }
}

fn correct_in(dir: &Path, config_dir: &Path) -> CorrectionReport {
    let geometry = dir.join("chamber.json");
    fs::write(&geometry, CHAMBER).unwrap();
    let out = dir.join("report.json");
    run(&[
        "--config-dir",
        path_str(config_dir),
        "correct",
        "--geometry",
        path_str(&geometry),
        "--point",
        "0",
        "0",
        "31.003",
        "--direction",
        "0",
        "0",
        "1",
        "--entry-z",
        "25",
        "--out",
        path_str(&out),
    ]);
    read(&out)
}

#[test]
fn correct_flags_reflected_exit_with_default_settings() {
    let dir = scratch("correct-default");
    let config_dir = dir.join("config");
    let report = correct_in(&dir, &config_dir);

    let z = report.correction.corrected_point().z();
    assert!((z - 30.994).abs() < 1e-9);
    assert!((report.correction.safety_used() - 0.003).abs() < 1e-9);
    assert_eq!(report.suspicious, Some(true));
    // Loading settings must not create the config directory.
    assert!(!config_dir.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn correct_honours_disabled_check_in_config_dir() {
    let dir = scratch("correct-unchecked");
    let config_dir = dir.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("dch-detector.json"), r#"{"reflection_check": null}"#).unwrap();

    let report = correct_in(&dir, &config_dir);
    assert!((report.correction.corrected_point().z() - 30.994).abs() < 1e-9);
    assert_eq!(report.suspicious, Some(false));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn run_writes_points_and_respects_correction_switch() {
    let dir = scratch("run");
    let corrected_out = dir.join("corrected.json");
    let raw_out = dir.join("raw.json");
    let raw_config = dir.join("raw-config");
    fs::create_dir_all(&raw_config).unwrap();
    fs::write(raw_config.join("dch-detector.json"), r#"{"correct_exit_points": false}"#).unwrap();

    for (config_dir, out) in [(dir.join("none"), &corrected_out), (raw_config, &raw_out)] {
        run(&[
            "--config-dir",
            path_str(&config_dir),
            "run",
            "--geometry",
            path_str(&fixture("two_chambers.json")),
            "--trace",
            path_str(&fixture("two_events.json")),
            "--out",
            path_str(out),
        ]);
    }

    let corrected: Vec<PointCollection> = read(&corrected_out);
    assert_eq!(corrected.len(), 2);
    assert!((corrected[0].get(0).unwrap().pos_out.z() - 28.99).abs() < 1e-9);
    assert!((corrected[0].get(1).unwrap().pos_out.z() - 63.996).abs() < 1e-9);
    assert!(corrected[1].is_empty());

    let raw: Vec<PointCollection> = read(&raw_out);
    assert!((raw[0].get(0).unwrap().pos_out.z() - 29.005).abs() < 1e-12);
    assert!((raw[0].get(1).unwrap().pos_out.z() - 64.002).abs() < 1e-12);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn merge_appends_overlay_with_shifted_tracks() {
    let dir = scratch("merge");
    let base = dir.join("base.json");
    let overlay = dir.join("overlay.json");
    let out = dir.join("merged.json");
    let base_points: PointCollection = [point(1, 28.99)].into_iter().collect();
    let overlay_points: PointCollection = [point(1, 28.5), point(2, 28.7)].into_iter().collect();
    fs::write(&base, serde_json::to_string(&base_points).unwrap()).unwrap();
    fs::write(&overlay, serde_json::to_string(&overlay_points).unwrap()).unwrap();

    run(&[
        "--config-dir",
        path_str(&dir.join("config")),
        "merge",
        "--base",
        path_str(&base),
        "--overlay",
        path_str(&overlay),
        "--offset",
        "10",
        "--out",
        path_str(&out),
    ]);

    let merged: PointCollection = read(&out);
    let tracks: Vec<i32> = merged.iter().map(|p| p.track_id).collect();
    assert_eq!(tracks, vec![1, 11, 12]);
    assert!((merged.get(2).unwrap().pos_out.z() - 28.7).abs() < 1e-12);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_write_persists_effective_settings() {
    let dir = scratch("config-write");
    let config_dir = dir.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let file = config_dir.join("dch-detector.json");
    fs::write(&file, r#"{"verbose_level": 3}"#).unwrap();

    run(&["--config-dir", path_str(&config_dir), "config", "--write"]);

    let saved: DetectorConfig = read(&file);
    assert_eq!(
        saved,
        DetectorConfig {
            verbose_level: 3,
            ..DetectorConfig::default()
        }
    );
    let text = fs::read_to_string(&file).unwrap();
    assert!(text.contains("reflection_check"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn log_filter_follows_directives() {
    assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    assert_eq!(log_filter(Some("trace")).max_level_hint(), Some(LevelFilter::TRACE));
    assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
}
