//! Where things are.
//!
//! A `Location` is a local transform relative to an optional parent entity,
//! so a rider's Location can be expressed relative to its mount, a bird's
//! relative to the branch it is perched on, and so on. Anything that needs
//! a world-space position resolves it through [`resolve_world_position()`].

use bevy::prelude::*;

use crate::types::WorldPosition;

/// How many parent hops we are willing to walk before giving up.
/// Any sane hierarchy is far shallower; hitting this means a cycle.
pub const MAX_LOCATION_DEPTH: usize = 64;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Location {
    /// Position relative to the parent (or the world, if there is none).
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub parent: Option<Entity>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.,
            parent: None,
        }
    }
}

impl Location {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: Entity) -> Self {
        self.parent = Some(parent); self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation; self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale; self
    }

    /// Maps a point from this Location's local space into its parent's space.
    fn transform_point(&self, local: Vec3) -> Vec3 {
        self.rotation * (local * self.scale) + self.position
    }
}

/// Resolves the world-space position of `entity`, walking up its Location parents.
///
/// Returns None if the entity has no Location at all, or if the parent chain
/// is deeper than [`MAX_LOCATION_DEPTH`] (i.e. almost certainly cyclic).
///
/// A parent that has no Location of its own ends the walk; whatever we have
/// accumulated up to that point is treated as world space.
pub fn resolve_world_position(world: &World, entity: Entity) -> Option<WorldPosition> {
    let location = world.get::<Location>(entity)?;

    let mut position = location.position;
    let mut next_parent = location.parent;
    let mut depth: usize = 0;

    while let Some(parent) = next_parent {
        depth += 1;

        if depth > MAX_LOCATION_DEPTH {
            #[cfg(feature = "logging")]
            bevy::log::warn!(
                "resolve_world_position: Location chain of {:?} exceeds {} levels; assuming a cycle.",
                entity, MAX_LOCATION_DEPTH
            );
            return None;
        }

        let Some(parent_location) = world.get::<Location>(parent) else {
            break;
        };

        position = parent_location.transform_point(position);
        next_parent = parent_location.parent;
    }

    Some(position)
}


#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_2;
    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {:?}, got {:?}", expected, actual
        );
    }

    #[test]
    fn test_root_location_is_its_own_world_position() {
        let mut world = World::new();
        let e = world.spawn(Location::at(Vec3::new(1., 2., 3.))).id();

        assert_eq!(resolve_world_position(&world, e), Some(Vec3::new(1., 2., 3.)));
    }

    #[test]
    fn test_no_location_resolves_to_none() {
        let mut world = World::new();
        let e = world.spawn_empty().id();

        assert_eq!(resolve_world_position(&world, e), None);
    }

    #[test]
    fn test_child_composes_parent_transform() {
        let mut world = World::new();
        let parent = world.spawn(
            Location::at(Vec3::new(10., 0., 0.))
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2))
            .with_scale(2.)
        ).id();
        let child = world.spawn(Location::at(Vec3::new(1., 0., 0.)).with_parent(parent)).id();

        // (1, 0, 0) scaled to (2, 0, 0), rotated 90deg about Y to (0, 0, -2), then offset.
        assert_close(resolve_world_position(&world, child).unwrap(), Vec3::new(10., 0., -2.));
    }

    #[test]
    fn test_grandchild_walks_whole_chain() {
        let mut world = World::new();
        let grandparent = world.spawn(Location::at(Vec3::new(0., 5., 0.))).id();
        let parent = world.spawn(Location::at(Vec3::new(1., 0., 0.)).with_parent(grandparent)).id();
        let child = world.spawn(Location::at(Vec3::new(0., 0., 1.)).with_parent(parent)).id();

        assert_close(resolve_world_position(&world, child).unwrap(), Vec3::new(1., 5., 1.));
    }

    #[test]
    fn test_parent_without_location_ends_the_walk() {
        let mut world = World::new();
        let parent = world.spawn_empty().id();
        let child = world.spawn(Location::at(Vec3::new(4., 0., 0.)).with_parent(parent)).id();

        assert_eq!(resolve_world_position(&world, child), Some(Vec3::new(4., 0., 0.)));
    }

    #[test]
    fn test_cyclic_chain_resolves_to_none() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn(Location::at(Vec3::X).with_parent(a)).id();
        world.entity_mut(a).insert(Location::at(Vec3::Y).with_parent(b));

        assert_eq!(resolve_world_position(&world, a), None);
    }
}
