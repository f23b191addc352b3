// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Errors raised while assembling a volume hierarchy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeomError {
    /// A half extent was negative or not finite.
    #[error("invalid half extents for volume '{name}': {half_extents:?}")]
    InvalidExtent {
        /// Volume name.
        name: String,
        /// Offending half extents.
        half_extents: [f64; 3],
    },
    /// A placement offset was not finite.
    #[error("invalid offset for volume '{name}': {offset:?}")]
    InvalidOffset {
        /// Volume name.
        name: String,
        /// Offending offset.
        offset: [f64; 3],
    },
    /// The mother volume index does not exist in the tree.
    #[error("unknown mother volume index {0}")]
    UnknownVolume(usize),
    /// A mother volume was referenced by a name nobody placed.
    #[error("unknown mother volume '{0}'")]
    UnknownVolumeName(String),
    /// The daughter box is not contained in its mother.
    #[error("volume '{name}' extrudes its mother '{mother}'")]
    Extrusion {
        /// Daughter volume name.
        name: String,
        /// Mother volume name.
        mother: String,
    },
    /// A volume with the same name and copy number is already placed.
    #[error("volume '{name}' copy {copy_no} placed twice")]
    DuplicatePlacement {
        /// Volume name.
        name: String,
        /// Copy number.
        copy_no: i32,
    },
}
