/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/

use bevy::prelude::*;
use feral_core::attack_in_proximity;
use feral_core::follow;
use feral_core::location;
use feral_core::nodes;
use feral_core::status;
use feral_core::task_runtime;

pub struct FeralPlugin;

impl Plugin for FeralPlugin {
    fn build(&self, app: &mut App) {
        app
        .register_type::<location::Location>()
        .register_type::<follow::FollowWish>()
        .register_type::<attack_in_proximity::AttackInProximity>()
        .register_type::<nodes::CheckProximityAttackStopNode>()
        .register_type::<status::Status>()
        .init_resource::<task_runtime::UserBehaviorTaskRuntimeConfig>()
        .add_systems(
            FixedUpdate,
            task_runtime::tick_behavior_tasks
        )
        ;
    }
}
