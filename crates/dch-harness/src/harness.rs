// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line interface.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dch_config::{ConfigDir, DetectorConfigStore};
use dch_core::{DetectorConfig, PointCollection};
use dch_geom::{BoundaryCorrection, BoundaryCorrector, BoxNavigator, Vec3};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::scene::GeometryDesc;
use crate::trace::{replay, Trace};

/// Drift-chamber replay harness.
#[derive(Parser, Debug)]
#[command(name = "dch-harness")]
#[command(author, version, about = "Replay drift-chamber step traces and boundary corrections")]
pub struct Cli {
    /// Directory holding `dch-detector.json` (defaults to the user config dir).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Harness subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a step trace and write the recorded points per event
    Run {
        /// Geometry description (JSON)
        #[arg(long)]
        geometry: PathBuf,
        /// Step trace (JSON)
        #[arg(long)]
        trace: PathBuf,
        /// Output file for the points; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Correct a single exit point
    Correct {
        /// Geometry description (JSON)
        #[arg(long)]
        geometry: PathBuf,
        /// Exit point x y z (cm)
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        point: Vec<f64>,
        /// Exit direction dx dy dz
        #[arg(long, num_args = 3, value_names = ["DX", "DY", "DZ"], allow_negative_numbers = true)]
        direction: Vec<f64>,
        /// Entry z (cm) for the plausibility check
        #[arg(long, allow_negative_numbers = true)]
        entry_z: Option<f64>,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Append the points of one collection to another with shifted track numbers
    Merge {
        /// Collection receiving the points (JSON array of points)
        #[arg(long)]
        base: PathBuf,
        /// Collection whose points are copied
        #[arg(long)]
        overlay: PathBuf,
        /// Added to every overlay track number
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective detector settings
    Config {
        /// Also save them to the config directory
        #[arg(long)]
        write: bool,
    },
}

/// Output of the `correct` subcommand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReport {
    /// The correction applied to the exit point.
    pub correction: BoundaryCorrection,
    /// Plausibility verdict; absent when no entry z was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious: Option<bool>,
}

/// Filter used when `RUST_LOG` is unset or empty.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from `RUST_LOG`-style directives.
///
/// Unset, blank, or unparsable directives fall back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Parses the command line, installs logging, and runs the subcommand.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    run_cli(cli)
}

/// Runs an already parsed command line.
pub fn run_cli(cli: Cli) -> Result<()> {
    let store = config_store(cli.config_dir.as_deref());
    let config = match &store {
        Some(store) => store
            .load_or_default()
            .context("failed to load detector config")?,
        None => DetectorConfig::default(),
    };

    match cli.command {
        Commands::Run {
            geometry,
            trace,
            out,
        } => {
            let tree = read_json::<GeometryDesc>(&geometry)?
                .build()
                .context("invalid geometry")?;
            let trace: Trace = read_json(&trace)?;
            let result = replay(&trace, &tree, config).context("replay failed")?;
            if result.suspicious_exits > 0 {
                warn!(count = result.suspicious_exits, "suspicious exits during replay");
            }
            write_json(out.as_deref(), &result.events)
        }
        Commands::Correct {
            geometry,
            point,
            direction,
            entry_z,
            out,
        } => {
            let tree = read_json::<GeometryDesc>(&geometry)?
                .build()
                .context("invalid geometry")?;
            let point = to_vec3("point", &point)?;
            let direction = to_vec3("direction", &direction)?;
            let corrector = BoundaryCorrector::new(config.reflection_check);
            let mut nav = BoxNavigator::new(&tree);
            let correction = corrector.correct(&mut nav, point, direction);
            let suspicious = entry_z.map(|z| {
                let entry = Vec3::new(point.x(), point.y(), z);
                corrector.check(&entry, &correction)
            });
            write_json(
                out.as_deref(),
                &CorrectionReport {
                    correction,
                    suspicious,
                },
            )
        }
        Commands::Merge {
            base,
            overlay,
            offset,
            out,
        } => {
            let mut base: PointCollection = read_json(&base)?;
            let overlay: PointCollection = read_json(&overlay)?;
            let added = base
                .merge_from(&overlay, offset)
                .context("merge failed")?;
            info!(added, total = base.len(), "merged collections");
            write_json(out.as_deref(), &base)
        }
        Commands::Config { write } => {
            if write {
                let store = store.context("no config directory to write to")?;
                store
                    .save(&config)
                    .context("failed to save detector config")?;
                info!("detector config saved");
            }
            write_json(None, &config)
        }
    }
}

fn config_store(dir: Option<&Path>) -> Option<DetectorConfigStore<ConfigDir>> {
    let dir = match dir {
        Some(dir) => ConfigDir::at(dir),
        None => match ConfigDir::user() {
            Ok(dir) => dir,
            Err(err) => {
                warn!(%err, "using default detector config");
                return None;
            }
        },
    };
    Some(DetectorConfigStore::new(dir))
}

fn to_vec3(what: &str, values: &[f64]) -> Result<Vec3> {
    match values {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => bail!("{what} needs exactly three components, got {}", values.len()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
