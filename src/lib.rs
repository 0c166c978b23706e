#![doc = include_str!("../README.md")]

pub use feral_core::*;

pub mod prelude {
    pub use feral_core::*;
    pub use feral_core::types::*;
    pub use feral_core::attack_in_proximity::AttackInProximity;
    pub use feral_core::errors::NodeConfigError;
    pub use feral_core::events::{BehaviorTaskFinished, UpdateBehavior};
    pub use feral_core::follow::FollowWish;
    pub use feral_core::location::{Location, resolve_world_position};
    pub use feral_core::nodes::{CheckProximityAttackStopNode, CheckProximityAttackStopTask, NodeDefinition};
    pub use feral_core::status::Status;
    pub use feral_core::task_runtime::{BehaviorTask, BehaviorTaskStatus, UserBehaviorTaskRuntimeConfig};
    pub use feral_core::tree::{Condition, Node, Task};

    #[cfg(any(feature = "bevy_plugin", feature = "testing"))]
    pub use feral_bevy_plugin::FeralPlugin;

    #[cfg(feature = "testing")]
    pub use feral_test_plugin::FeralTestPlugin;

    #[cfg(feature = "node_loader")]
    pub use feral_node_loader;
}


#[cfg(test)]
mod tests {
    use bevy::prelude::{App, FixedUpdate, Vec3};
    use feral_bevy_plugin::FeralPlugin;
    use feral_test_plugin::{FeralTestPlugin, UpdateBehaviorCounter, spawn_chase};

    use crate::prelude::{BehaviorTask, BehaviorTaskStatus, CheckProximityAttackStopNode, FollowWish, Location, Status};

    #[test]
    fn test_wolf_gives_up_when_prey_runs_off() {
        let mut app = App::new();
        app.add_plugins((FeralTestPlugin, FeralPlugin));

        let chase = spawn_chase(app.world_mut(), Vec3::ZERO, Vec3::new(10., 0., 0.));
        let node = CheckProximityAttackStopNode::new(15.).unwrap();
        app.world_mut().entity_mut(chase.actor).insert(BehaviorTask::from_node(&node));

        app.world_mut().run_schedule(FixedUpdate);
        assert_eq!(
            app.world().get::<BehaviorTaskStatus>(chase.actor),
            Some(&BehaviorTaskStatus(Status::Running))
        );

        app.world_mut().get_mut::<Location>(chase.target).unwrap().position = Vec3::new(20., 0., 0.);
        app.world_mut().run_schedule(FixedUpdate);

        assert_eq!(
            app.world().get::<BehaviorTaskStatus>(chase.actor),
            Some(&BehaviorTaskStatus(Status::Failure))
        );
        assert!(app.world().get::<FollowWish>(chase.actor).is_none());
        assert_eq!(app.world().resource::<UpdateBehaviorCounter>().total(), 1);
    }
}
