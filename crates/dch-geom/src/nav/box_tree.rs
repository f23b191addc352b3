// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Navigator over translated axis-aligned boxes.

use crate::error::GeomError;
use crate::math::{Direction3, Point3, Vec3, EPSILON};
use crate::nav::VolumeNavigator;
use crate::types::aabb::Aabb;

/// Distance a probe point is pushed past a boundary to resolve the volume on
/// the far side.
const BOUNDARY_PUSH: f64 = 1e-9;

/// Index of a volume inside a [`VolumeTree`]. The world is always index 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeIdx(usize);

impl VolumeIdx {
    /// The top (world) volume.
    pub const WORLD: Self = Self(0);
}

/// One placed box in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
struct Volume {
    name: String,
    copy_no: i32,
    bounds: Aabb,
    daughters: Vec<VolumeIdx>,
}

/// Describes a box to be placed inside a mother volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    name: String,
    copy_no: i32,
    half_extents: Vec3,
    offset: Vec3,
}

impl Placement {
    /// A box with copy number 0, centred in its mother.
    pub fn new(name: impl Into<String>, half_extents: Vec3) -> Self {
        Self {
            name: name.into(),
            copy_no: 0,
            half_extents,
            offset: Vec3::ZERO,
        }
    }

    /// Offset of the box centre from the mother's centre.
    #[must_use]
    pub fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Copy number of this placement.
    #[must_use]
    pub fn copy(mut self, copy_no: i32) -> Self {
        self.copy_no = copy_no;
        self
    }
}

fn validate_half_extents(name: &str, half_extents: &Vec3) -> Result<(), GeomError> {
    let he = half_extents.to_array();
    if he.iter().all(|h| h.is_finite() && *h >= 0.0) {
        Ok(())
    } else {
        Err(GeomError::InvalidExtent {
            name: name.to_owned(),
            half_extents: he,
        })
    }
}

fn validate_offset(name: &str, offset: &Vec3) -> Result<(), GeomError> {
    if offset.is_finite() {
        Ok(())
    } else {
        Err(GeomError::InvalidOffset {
            name: name.to_owned(),
            offset: offset.to_array(),
        })
    }
}

/// Incrementally assembles a [`VolumeTree`].
///
/// Daughters must lie inside their mother (faces may touch). Sibling overlap
/// is not checked; the first sibling in placement order claims shared points.
#[derive(Debug, Clone)]
pub struct VolumeTreeBuilder {
    volumes: Vec<Volume>,
}

impl VolumeTreeBuilder {
    /// Starts a tree with a world box centred on the origin.
    pub fn new(world_half_extents: Vec3) -> Result<Self, GeomError> {
        validate_half_extents("world", &world_half_extents)?;
        let [hx, hy, hz] = world_half_extents.to_array();
        Ok(Self {
            volumes: vec![Volume {
                name: "world".to_owned(),
                copy_no: 0,
                bounds: Aabb::from_center_half_extents(Vec3::ZERO, hx, hy, hz),
                daughters: Vec::new(),
            }],
        })
    }

    /// The world volume.
    #[must_use]
    pub const fn world(&self) -> VolumeIdx {
        VolumeIdx::WORLD
    }

    /// Looks up an already placed volume.
    #[must_use]
    pub fn find(&self, name: &str, copy_no: i32) -> Option<VolumeIdx> {
        find_volume(&self.volumes, name, copy_no)
    }

    /// Places a box inside `mother` and returns its index.
    pub fn place(
        &mut self,
        mother: VolumeIdx,
        placement: Placement,
    ) -> Result<VolumeIdx, GeomError> {
        let Placement {
            name,
            copy_no,
            half_extents,
            offset,
        } = placement;
        validate_half_extents(&name, &half_extents)?;
        validate_offset(&name, &offset)?;
        let mother_bounds = self
            .volumes
            .get(mother.0)
            .map(|m| m.bounds)
            .ok_or(GeomError::UnknownVolume(mother.0))?;
        if self.find(&name, copy_no).is_some() {
            return Err(GeomError::DuplicatePlacement { name, copy_no });
        }
        let [hx, hy, hz] = half_extents.to_array();
        let bounds =
            Aabb::from_center_half_extents(mother_bounds.center().add(&offset), hx, hy, hz);
        if !mother_bounds.contains_box(&bounds) {
            return Err(GeomError::Extrusion {
                name,
                mother: self.volumes[mother.0].name.clone(),
            });
        }
        let idx = VolumeIdx(self.volumes.len());
        self.volumes.push(Volume {
            name,
            copy_no,
            bounds,
            daughters: Vec::new(),
        });
        self.volumes[mother.0].daughters.push(idx);
        Ok(idx)
    }

    /// Freezes the hierarchy.
    #[must_use]
    pub fn build(self) -> VolumeTree {
        VolumeTree {
            volumes: self.volumes,
        }
    }
}

fn find_volume(volumes: &[Volume], name: &str, copy_no: i32) -> Option<VolumeIdx> {
    volumes
        .iter()
        .position(|v| v.name == name && v.copy_no == copy_no)
        .map(VolumeIdx)
}

/// Immutable hierarchy of translated boxes.
#[derive(Debug, Clone)]
pub struct VolumeTree {
    volumes: Vec<Volume>,
}

impl VolumeTree {
    /// Number of volumes including the world.
    #[must_use]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Always `false`; a tree holds at least the world.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Looks up a volume by name and copy number.
    #[must_use]
    pub fn find(&self, name: &str, copy_no: i32) -> Option<VolumeIdx> {
        find_volume(&self.volumes, name, copy_no)
    }

    /// Deepest volume containing `point`.
    ///
    /// The world is inclusive on its faces; daughters only claim strictly
    /// interior points, so a point on a shared face belongs to the mother.
    #[must_use]
    pub fn locate(&self, point: &Point3) -> Option<VolumeIdx> {
        if !self.volumes[0].bounds.contains(point) {
            return None;
        }
        let mut current = VolumeIdx::WORLD;
        while let Some(next) = self.volumes[current.0]
            .daughters
            .iter()
            .copied()
            .find(|d| self.volumes[d.0].bounds.contains_strict(point))
        {
            current = next;
        }
        Some(current)
    }

    /// Distance from `point` inside `current` to the next boundary along
    /// `direction`, and the volume on the far side of it.
    fn next_boundary(
        &self,
        current: VolumeIdx,
        point: &Point3,
        direction: &Direction3,
    ) -> (f64, Option<VolumeIdx>) {
        if direction.length() <= EPSILON {
            return (f64::INFINITY, None);
        }
        let volume = &self.volumes[current.0];
        let mut step = volume.bounds.distance_to_exit(point, direction);
        let mut entered = None;
        for &d in &volume.daughters {
            if let Some(t) = self.volumes[d.0].bounds.distance_to_entry(point, direction) {
                if t < step {
                    step = t;
                    entered = Some(d);
                }
            }
        }
        if entered.is_none() {
            let beyond = point.add(&direction.scale(step + BOUNDARY_PUSH));
            entered = self.locate(&beyond);
        }
        (step, entered)
    }
}

/// Navigator over a borrowed [`VolumeTree`].
#[derive(Debug, Clone)]
pub struct BoxNavigator<'t> {
    tree: &'t VolumeTree,
    point: Point3,
    direction: Direction3,
    current: Option<VolumeIdx>,
    safety: f64,
}

impl<'t> BoxNavigator<'t> {
    /// Starts at the origin heading along +z.
    #[must_use]
    pub fn new(tree: &'t VolumeTree) -> Self {
        Self {
            tree,
            point: Vec3::ZERO,
            direction: Vec3::UNIT_Z,
            current: tree.locate(&Vec3::ZERO),
            safety: 0.0,
        }
    }

    fn scan(&self, direction: &Direction3, limit: f64) -> (f64, Option<VolumeIdx>) {
        let Some(current) = self.current else {
            return (0.0, None);
        };
        let (step, next) = self.tree.next_boundary(current, &self.point, direction);
        if step <= limit {
            (step, next)
        } else {
            (limit, None)
        }
    }
}

impl VolumeNavigator for BoxNavigator<'_> {
    type Node = VolumeIdx;

    fn locate_at(&mut self, point: Point3) -> Option<VolumeIdx> {
        self.point = point;
        self.current = self.tree.locate(&point);
        self.current
    }

    fn current_point(&self) -> Point3 {
        self.point
    }

    fn current_direction(&self) -> Direction3 {
        self.direction
    }

    fn set_current_direction(&mut self, direction: Direction3) {
        self.direction = direction;
    }

    fn find_next_boundary(&mut self, limit: f64) -> Option<VolumeIdx> {
        let (safety, next) = self.scan(&self.direction, limit);
        self.safety = safety;
        next
    }

    fn safe_distance(&self) -> f64 {
        self.safety
    }

    fn probe_safety(&mut self, direction: Direction3, limit: f64) -> f64 {
        let (safety, _) = self.scan(&direction, limit);
        self.safety = safety;
        safety
    }
}
