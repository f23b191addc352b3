// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Navigator interface and a reference box-hierarchy implementation.
//!
//! A navigator is the transport engine's view of the geometry: it remembers a
//! current point, a current direction, and the result of the last boundary
//! search. Exclusive access is expressed by `&mut self` on every mutating
//! query; one navigator must not be shared between concurrent correction
//! calls.

pub mod box_tree;

use crate::math::{Direction3, Point3};

/// Capability set of a navigable volume hierarchy.
pub trait VolumeNavigator {
    /// Handle identifying a located node.
    type Node;

    /// Locates the deepest node containing `point` and makes `point` current.
    ///
    /// Returns `None` when the point lies outside the top volume.
    fn locate_at(&mut self, point: Point3) -> Option<Self::Node>;

    /// Current point, possibly snapped by the navigator.
    fn current_point(&self) -> Point3;

    /// Current direction.
    fn current_direction(&self) -> Direction3;

    /// Replaces the current direction.
    fn set_current_direction(&mut self, direction: Direction3);

    /// Searches for the next boundary along the current direction, looking no
    /// further than `limit`. Returns the node reached, if any.
    fn find_next_boundary(&mut self, limit: f64) -> Option<Self::Node>;

    /// Safety distance computed by the last [`Self::find_next_boundary`].
    fn safe_distance(&self) -> f64;

    /// Safety distance from the current point along `direction`.
    ///
    /// The default swaps `direction` in, searches, reads the safety and puts
    /// the previous direction back. Navigators that can answer with the
    /// direction as an argument should override this and leave their state
    /// untouched.
    fn probe_safety(&mut self, direction: Direction3, limit: f64) -> f64 {
        let saved = self.current_direction();
        self.set_current_direction(direction);
        let _ = self.find_next_boundary(limit);
        let safety = self.safe_distance();
        self.set_current_direction(saved);
        safety
    }
}
