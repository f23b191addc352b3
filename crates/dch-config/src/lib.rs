// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persistence of drift-chamber detector settings.
//!
//! Settings are JSON behind a small storage port, so tools read them from a
//! config directory and tests from memory.

pub mod detector;
pub mod fs;
pub mod store;

pub use detector::DetectorConfigStore;
pub use fs::ConfigDir;
pub use store::{ConfigError, ConfigStore};
