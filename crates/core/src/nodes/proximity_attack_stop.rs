/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/

//! Stop condition for actors that attack whoever comes near them.
//!
//! While an actor is chasing down something that provoked it, this Node keeps
//! reporting Running for as long as the chased target stays within
//! `max_distance`. The moment that stops being true - the target ran off,
//! got despawned, lost its Location, or the actor lost its own - the Node
//! reports Failure and calls the whole thing off: the instigator is
//! forgotten, the FollowWish is dropped, and an UpdateBehavior goes out so
//! whatever picks behaviors for the actor gets to choose something new.

use bevy::reflect::Reflect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::NodeConfigError;
use crate::status::Status;
use crate::tree::{Condition, Node, Task, TaskContext};
use crate::types::{self, DeltaTime, Distance};

/// Smallest `max_distance` designers may pick.
pub const MIN_MAX_DISTANCE: Distance = 2.;

/// Largest `max_distance` designers may pick.
pub const MAX_MAX_DISTANCE: Distance = 50.;

pub const DEFAULT_MAX_DISTANCE: Distance = 15.;

const MAX_DISTANCE_FIELD: &str = "max_distance";


#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "CheckProximityAttackStopNodeData"))]
pub struct CheckProximityAttackStopNode {
    max_distance: Distance,
}

impl Default for CheckProximityAttackStopNode {
    fn default() -> Self {
        Self { max_distance: DEFAULT_MAX_DISTANCE }
    }
}

impl CheckProximityAttackStopNode {
    /// Creates a Node with a validated `max_distance`.
    pub fn new(max_distance: Distance) -> Result<Self, NodeConfigError> {
        if !max_distance.is_finite() {
            return Err(NodeConfigError::NotFinite { field: MAX_DISTANCE_FIELD });
        }

        if !(MIN_MAX_DISTANCE..=MAX_MAX_DISTANCE).contains(&max_distance) {
            return Err(NodeConfigError::OutOfRange {
                field: MAX_DISTANCE_FIELD,
                value: max_distance,
                min: MIN_MAX_DISTANCE,
                max: MAX_MAX_DISTANCE,
            });
        }

        Ok(Self { max_distance })
    }

    /// Creates a Node, forcing `max_distance` into the allowed range the way
    /// the tree editor does. Non-finite input falls back to the default.
    pub fn clamped(max_distance: Distance) -> Self {
        if !max_distance.is_finite() {
            return Self::default();
        }

        Self { max_distance: max_distance.clamp(MIN_MAX_DISTANCE, MAX_MAX_DISTANCE) }
    }

    pub fn max_distance(&self) -> Distance {
        self.max_distance
    }

    /// Creates a new Task bound to this Node.
    pub fn create_task(&self) -> CheckProximityAttackStopTask {
        CheckProximityAttackStopTask::new(*self)
    }
}

impl Node for CheckProximityAttackStopNode {
    fn create_task(&self) -> types::BoxedTask {
        Box::new(CheckProximityAttackStopNode::create_task(self))
    }

    fn name(&self) -> &'static str {
        "CheckProximityAttackStop"
    }
}


/// Authoring-side view of the Node; the editor clamps, so loading does too.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CheckProximityAttackStopNodeData {
    #[serde(default = "default_max_distance")]
    max_distance: Distance,
}

#[cfg(feature = "serde")]
fn default_max_distance() -> Distance {
    DEFAULT_MAX_DISTANCE
}

#[cfg(feature = "serde")]
impl From<CheckProximityAttackStopNodeData> for CheckProximityAttackStopNode {
    fn from(data: CheckProximityAttackStopNodeData) -> Self {
        let node = Self::clamped(data.max_distance);

        if node.max_distance != data.max_distance {
            #[cfg(feature = "logging")]
            bevy::log::warn!(
                "CheckProximityAttackStop: max_distance {} is outside [{}, {}], using {} instead.",
                data.max_distance, MIN_MAX_DISTANCE, MAX_MAX_DISTANCE, node.max_distance
            );
        }

        node
    }
}


/// Why the Task decided to stop. Only ever shows up in logs; to the tree,
/// every one of these is the same plain Failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    NoActorLocation,
    NoFollowTarget,
    NoTargetLocation,
    OutOfRange,
}


#[derive(Debug, Clone)]
pub struct CheckProximityAttackStopTask {
    node: CheckProximityAttackStopNode,
}

impl CheckProximityAttackStopTask {
    pub fn new(node: CheckProximityAttackStopNode) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &CheckProximityAttackStopNode {
        &self.node
    }

    fn check(&self, ctx: &TaskContext<'_>) -> Result<(), StopReason> {
        let store = ctx.store();

        let actor_position = store
            .world_position(ctx.actor())
            .ok_or(StopReason::NoActorLocation)?;

        let max_distance_squared = self.node.max_distance * self.node.max_distance;

        let target = store
            .follow_wish(ctx.actor())
            .and_then(|wish| wish.entity_to_follow)
            .ok_or(StopReason::NoFollowTarget)?;

        let target_position = store
            .world_position(target)
            .ok_or(StopReason::NoTargetLocation)?;

        if target_position.distance_squared(actor_position) <= max_distance_squared {
            Ok(())
        } else {
            Err(StopReason::OutOfRange)
        }
    }

    /// Forgets the instigator and drops the chase, then lets everyone know.
    /// The two state changes always happen together.
    fn stop_attacking(ctx: &mut TaskContext<'_>) {
        let actor = ctx.actor();
        let store = ctx.store_mut();

        // No AttackInProximity means there is no instigator to forget.
        if let Some(mut attack) = store.attack_in_proximity(actor) {
            attack.instigator = None;
            store.save_attack_in_proximity(actor, attack);
        }

        store.remove_follow_wish(actor);
        store.send_update_behavior(actor);
    }
}

impl Condition for CheckProximityAttackStopTask {
    fn evaluate(&self, ctx: &TaskContext<'_>) -> Status {
        match self.check(ctx) {
            Ok(()) => Status::Running,
            Err(_reason) => {
                #[cfg(feature = "logging")]
                bevy::log::debug!(
                    "CheckProximityAttackStop: actor {:?} stops attacking - {:?}",
                    ctx.actor(), _reason
                );
                Status::Failure
            }
        }
    }
}

impl Task for CheckProximityAttackStopTask {
    fn update(&mut self, ctx: &mut TaskContext<'_>, _dt: DeltaTime) -> Status {
        let status = self.evaluate(ctx);

        if status.is_failure() {
            Self::stop_attacking(ctx);
        }

        status
    }

    fn handle(&mut self, _result: Status) {}
}
