use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use feral_core::attack_in_proximity::AttackInProximity;
use feral_core::events::{BehaviorTaskFinished, UpdateBehavior};
use feral_core::follow::FollowWish;
use feral_core::location::Location;
use feral_core::status::Status;


/// Counts UpdateBehavior notifications per actor.
#[derive(Resource, Default, Debug)]
pub struct UpdateBehaviorCounter(pub HashMap<Entity, usize>);

impl UpdateBehaviorCounter {
    pub fn count_for(&self, actor: Entity) -> usize {
        self.0.get(&actor).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

/// Keeps every (actor, node name, Status) a Task finished with, in order.
#[derive(Resource, Default, Debug)]
pub struct FinishedTaskLog(pub Vec<(Entity, &'static str, Status)>);

pub fn count_update_behavior(
    trigger: On<UpdateBehavior>,
    mut counter: ResMut<UpdateBehaviorCounter>,
) {
    let actor = trigger.event().entity;
    *counter.0.entry(actor).or_insert(0) += 1;
}

pub fn log_finished_task(
    trigger: On<BehaviorTaskFinished>,
    mut log: ResMut<FinishedTaskLog>,
) {
    let evt = trigger.event();
    #[cfg(feature = "logging")]
    bevy::log::debug!("Task {:?} of {:?} finished with {:?}", evt.node_name, evt.entity, evt.status);
    log.0.push((evt.entity, evt.node_name, evt.status));
}


/// The usual test setup: an actor that was provoked by a target and is chasing it.
#[derive(Debug, Clone, Copy)]
pub struct Chase {
    pub actor: Entity,
    pub target: Entity,
}

pub fn spawn_chase(world: &mut World, actor_at: Vec3, target_at: Vec3) -> Chase {
    let target = world.spawn(Location::at(target_at)).id();
    let actor = world.spawn((
        Location::at(actor_at),
        FollowWish::new(target),
        AttackInProximity::provoked_by(target),
    )).id();

    Chase { actor, target }
}
