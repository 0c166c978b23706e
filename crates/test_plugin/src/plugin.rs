#[cfg(feature = "logging")]
use bevy::log::LogPlugin;
use bevy::{app::ScheduleRunnerPlugin, prelude::*};

use crate::helpers::*;


pub struct FeralTestPlugin;

impl Plugin for FeralTestPlugin {
    fn build(&self, app: &mut App) {
        app
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_once()),
            #[cfg(feature = "logging")]
            LogPlugin {
                level: bevy::log::Level::DEBUG,
                custom_layer: |_| None,
                filter: "wgpu=error,bevy_render=info,bevy_ecs=info".to_string(),
                fmt_layer: |_| None,
            }
        ))
        .init_resource::<UpdateBehaviorCounter>()
        .init_resource::<FinishedTaskLog>()
        .add_observer(count_update_behavior)
        .add_observer(log_finished_task)
        ;
    }
}
