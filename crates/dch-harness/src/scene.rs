// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON description of a box geometry.

use dch_geom::nav::box_tree::Placement;
use dch_geom::{GeomError, Vec3, VolumeTree, VolumeTreeBuilder};
use serde::{Deserialize, Serialize};

fn world_name() -> String {
    "world".to_owned()
}

/// One placed box. Volumes are placed in file order, so a mother must appear
/// before its daughters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDesc {
    /// Volume name.
    pub name: String,
    /// Copy number of this placement.
    #[serde(default)]
    pub copy_no: i32,
    /// Mother volume name (`"world"` by default).
    #[serde(default = "world_name")]
    pub mother: String,
    /// Copy number of the mother placement.
    #[serde(default)]
    pub mother_copy_no: i32,
    /// Half extents (cm).
    pub half_extents: Vec3,
    /// Centre offset from the mother's centre (cm).
    #[serde(default)]
    pub offset: Vec3,
}

/// A world box and the volumes placed in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryDesc {
    /// World half extents (cm), centred on the origin.
    pub world: Vec3,
    /// Placed volumes.
    #[serde(default)]
    pub volumes: Vec<VolumeDesc>,
}

impl GeometryDesc {
    /// Builds the navigable tree.
    pub fn build(&self) -> Result<VolumeTree, GeomError> {
        let mut builder = VolumeTreeBuilder::new(self.world)?;
        for v in &self.volumes {
            let mother = if v.mother == "world" {
                builder.world()
            } else {
                builder
                    .find(&v.mother, v.mother_copy_no)
                    .ok_or_else(|| GeomError::UnknownVolumeName(v.mother.clone()))?
            };
            builder.place(
                mother,
                Placement::new(v.name.clone(), v.half_extents)
                    .at(v.offset)
                    .copy(v.copy_no),
            )?;
        }
        Ok(builder.build())
    }
}
