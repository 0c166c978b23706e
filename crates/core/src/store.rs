//! The window Tasks get into the entity/component store.
//!
//! Tasks do not own the store and do not hold on to it between ticks; they
//! are handed a `&mut dyn EntityStore` for the duration of one `update()`.
//! Writes are explicit read-modify-write round trips (read a copy, change it,
//! save it back) rather than long-lived borrows into component storage.

use bevy::prelude::*;

use crate::attack_in_proximity::AttackInProximity;
use crate::events::UpdateBehavior;
use crate::follow::FollowWish;
use crate::location;
use crate::types::WorldPosition;


pub trait EntityStore {
    /// World-space position of `entity`, if it has a Location.
    fn world_position(&self, entity: Entity) -> Option<WorldPosition>;

    fn follow_wish(&self, entity: Entity) -> Option<FollowWish>;

    fn attack_in_proximity(&self, entity: Entity) -> Option<AttackInProximity>;

    /// Persists `component` on `entity`, replacing whatever was there.
    /// Does nothing if the entity no longer exists.
    fn save_attack_in_proximity(&mut self, entity: Entity, component: AttackInProximity);

    /// Drops the FollowWish from `entity` entirely.
    /// Does nothing if the entity no longer exists or has no FollowWish.
    fn remove_follow_wish(&mut self, entity: Entity);

    /// Broadcasts an [`UpdateBehavior`] to `entity`.
    fn send_update_behavior(&mut self, entity: Entity);
}


impl EntityStore for World {
    fn world_position(&self, entity: Entity) -> Option<WorldPosition> {
        location::resolve_world_position(self, entity)
    }

    fn follow_wish(&self, entity: Entity) -> Option<FollowWish> {
        self.get::<FollowWish>(entity).copied()
    }

    fn attack_in_proximity(&self, entity: Entity) -> Option<AttackInProximity> {
        self.get::<AttackInProximity>(entity).copied()
    }

    fn save_attack_in_proximity(&mut self, entity: Entity, component: AttackInProximity) {
        match self.get_entity_mut(entity) {
            Err(_err) => {
                #[cfg(feature = "logging")]
                bevy::log::warn!(
                    "Attempted to save AttackInProximity on an Entity ({:?}) that no longer exists - {:?}",
                    entity, _err
                )
            }
            Ok(mut entity_mut) => {
                entity_mut.insert(component);
            }
        }
    }

    fn remove_follow_wish(&mut self, entity: Entity) {
        if let Ok(mut entity_mut) = self.get_entity_mut(entity) {
            entity_mut.remove::<FollowWish>();
        }
    }

    fn send_update_behavior(&mut self, entity: Entity) {
        self.trigger(UpdateBehavior::new(entity));
    }
}
