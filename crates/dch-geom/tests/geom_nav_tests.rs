// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Boundary correction driven by the box navigator.

use dch_geom::nav::box_tree::Placement;
use dch_geom::{
    correct_exit_boundary, BoxNavigator, Vec3, VolumeNavigator, VolumeTree, VolumeTreeBuilder,
};

/// World with one chamber: an aluminium frame wrapping a gas box spanning
/// z in [21, 29].
fn chamber() -> VolumeTree {
    let mut b = VolumeTreeBuilder::new(Vec3::new(200.0, 200.0, 200.0)).unwrap();
    let world = b.world();
    let frame = b
        .place(
            world,
            Placement::new("frame", Vec3::new(55.4, 44.2, 5.0)).at(Vec3::new(0.0, 0.0, 25.0)),
        )
        .unwrap();
    b.place(frame, Placement::new("gas", Vec3::new(51.4, 40.2, 4.0)))
        .unwrap();
    b.build()
}

#[test]
fn overshooting_exit_is_pulled_back_inside() {
    let tree = chamber();
    let mut nav = BoxNavigator::new(&tree);
    let c = correct_exit_boundary(Vec3::new(1.0, 2.0, 29.004), Vec3::UNIT_Z, &mut nav);
    assert!((c.safety_used() - 0.004).abs() < 1e-9);
    assert!((c.corrected_point().z() - 28.992).abs() < 1e-9);
    assert_eq!(c.corrected_point().x(), 1.0);
    assert_eq!(c.corrected_point().y(), 2.0);
    assert_eq!(tree.locate(&c.corrected_point()), tree.find("gas", 0));
}

#[test]
fn exit_exactly_on_the_face_is_not_moved() {
    let tree = chamber();
    let mut nav = BoxNavigator::new(&tree);
    let exit = Vec3::new(0.0, 0.0, 29.0);
    let c = correct_exit_boundary(exit, Vec3::UNIT_Z, &mut nav);
    assert_eq!(c.safety_used(), 0.0);
    assert_eq!(c.corrected_point(), exit);
}

#[test]
fn oblique_exit_through_a_side_face() {
    let tree = chamber();
    let mut nav = BoxNavigator::new(&tree);
    let dir = Vec3::new(0.6, 0.0, 0.8);
    // 0.01 past the x = 51.4 face along the track.
    let exit = Vec3::new(51.4, 0.0, 25.0).add(&dir.scale(0.01));
    let c = correct_exit_boundary(exit, dir, &mut nav);
    assert!((c.safety_used() - 0.01).abs() < 1e-9);
    let expected = Vec3::new(51.4, 0.0, 25.0).sub(&dir.scale(0.02));
    assert!(c.corrected_point().sub(&expected).length() < 1e-9);
    assert_eq!(nav.current_direction(), dir);
}

#[test]
fn exit_far_from_any_boundary_uses_the_search_limit() {
    let tree = chamber();
    let mut nav = BoxNavigator::new(&tree);
    // Downstream of the chamber with nothing behind within 2 cm.
    let c = correct_exit_boundary(Vec3::new(0.0, 0.0, 100.0), Vec3::UNIT_Z, &mut nav);
    assert_eq!(c.safety_used(), 2.0);
    assert!((c.corrected_point().z() - 94.0).abs() < 1e-12);
}

#[test]
fn exit_outside_the_world_is_left_alone() {
    let tree = chamber();
    let mut nav = BoxNavigator::new(&tree);
    let exit = Vec3::new(0.0, 0.0, 250.0);
    let c = correct_exit_boundary(exit, Vec3::UNIT_Z, &mut nav);
    assert_eq!(c.safety_used(), 0.0);
    assert_eq!(c.corrected_point(), exit);
}
