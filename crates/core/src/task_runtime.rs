use bevy::prelude::*;

use crate::events::BehaviorTaskFinished;
use crate::status::Status;
use crate::tree::{Node, TaskContext};
use crate::types::{self, DeltaTime};


// Task Execution
/// A Component that makes this actor run a behavior-tree Task every tick.
///
/// This is deliberately thin glue, not a tree executor - it owns exactly one
/// Task for the actor, ticks it, and deschedules it once it is done. Plug your
/// own executor in instead if you need composites and friends; the Tasks do
/// not care who ticks them.
#[derive(Component)]
pub struct BehaviorTask {
    // Only ever None while the Task is being ticked.
    task: Option<types::BoxedTask>,
    node_name: &'static str,
}

impl BehaviorTask {
    pub fn new(task: types::BoxedTask, node_name: &'static str) -> Self {
        Self {
            task: Some(task),
            node_name,
        }
    }

    /// Schedules a fresh Task created from `node`.
    pub fn from_node(node: &dyn Node) -> Self {
        #[cfg(feature = "logging")]
        bevy::log::debug!("BehaviorTask::from_node(): creating a new Task for Node {:?}", node.name());

        Self::new(node.create_task(), node.name())
    }

    pub fn node_name(&self) -> &'static str {
        self.node_name
    }
}

impl core::fmt::Debug for BehaviorTask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BehaviorTask")
            .field("node_name", &self.node_name)
            .field("ticking", &self.task.is_none())
            .finish()
    }
}


/// An 'extension' Component recording what the actor's Task reported last tick.
///
/// Stays around after the Task itself is descheduled, so UIs and tests can
/// still tell how it ended.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorTaskStatus(pub Status);

impl BehaviorTaskStatus {
    pub fn get_status(&self) -> &Status {
        &self.0
    }
}


#[derive(Debug, Clone)]
pub struct BehaviorTaskRuntimeConfig {
    remove_finished_tasks: bool,
    record_status: bool,
    notify_finished: bool,
}

impl BehaviorTaskRuntimeConfig {
    pub fn builder() -> BehaviorTaskRuntimeConfigBuilder {
        BehaviorTaskRuntimeConfigBuilder::default()
    }
}

impl Default for BehaviorTaskRuntimeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder pattern for BehaviorTaskRuntimeConfig
#[derive(Default, Debug, Clone)]
pub struct BehaviorTaskRuntimeConfigBuilder {
    remove_finished_tasks: Option<bool>,
    record_status: Option<bool>,
    notify_finished: Option<bool>,
}

impl BehaviorTaskRuntimeConfigBuilder {
    pub fn build(self) -> BehaviorTaskRuntimeConfig {
        BehaviorTaskRuntimeConfig {
            remove_finished_tasks: self.remove_finished_tasks.unwrap_or(true),
            record_status: self.record_status.unwrap_or(true),
            notify_finished: self.notify_finished.unwrap_or(true),
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_remove_finished_tasks(mut self, val: bool) -> Self {
        self.remove_finished_tasks = Some(val); self
    }

    pub fn set_record_status(mut self, val: bool) -> Self {
        self.record_status = Some(val); self
    }

    pub fn set_notify_finished(mut self, val: bool) -> Self {
        self.notify_finished = Some(val); self
    }

    /// Creates a new builder using an existing config as a starting point.
    pub fn from_reference_config(config: &BehaviorTaskRuntimeConfig) -> Self {
        Self {
            remove_finished_tasks: Some(config.remove_finished_tasks),
            record_status: Some(config.record_status),
            notify_finished: Some(config.notify_finished),
        }
    }
}

impl From<&BehaviorTaskRuntimeConfig> for BehaviorTaskRuntimeConfigBuilder {
    fn from(value: &BehaviorTaskRuntimeConfig) -> Self {
        Self::from_reference_config(value)
    }
}


/// A Resource holding the app-wide settings for the Task runtime.
///
/// The provided [`with_config_builder()`](Self::with_config_builder) method lets you
/// tweak it with a closure over the current settings.
#[derive(Default, Resource, Debug)]
pub struct UserBehaviorTaskRuntimeConfig {
    pub config: BehaviorTaskRuntimeConfig,
}

impl UserBehaviorTaskRuntimeConfig {
    pub fn with_config_builder<F: FnOnce(BehaviorTaskRuntimeConfigBuilder) -> BehaviorTaskRuntimeConfigBuilder>(
        &mut self,
        builder: F
    ) -> &mut Self {
        let seeded = BehaviorTaskRuntimeConfigBuilder::from_reference_config(&self.config);
        self.config = builder(seeded).build();
        self
    }
}


/// An exclusive System that ticks every scheduled [`BehaviorTask`] once.
///
/// Tasks get the whole World as their [`EntityStore`](crate::store::EntityStore),
/// so they run one after another on the main schedule thread.
pub fn tick_behavior_tasks(world: &mut World) {
    let dt: DeltaTime = world
        .get_resource::<Time>()
        .map(|time| time.delta_secs())
        .unwrap_or_default();

    let config = world
        .get_resource::<UserBehaviorTaskRuntimeConfig>()
        .map(|res| res.config.clone())
        .unwrap_or_default();

    let mut scheduled = world.query_filtered::<Entity, With<BehaviorTask>>();
    let actors: Vec<Entity> = scheduled.iter(world).collect();

    for actor in actors {
        let taken = world
            .get_mut::<BehaviorTask>(actor)
            .and_then(|mut slot| slot.task.take().map(|task| (task, slot.node_name)));

        let Some((mut task, node_name)) = taken else {
            continue;
        };

        let status = {
            let mut ctx = TaskContext::new(actor, world);
            task.update(&mut ctx, dt)
        };

        // Apply whatever observers of the Task's events queued up.
        world.flush();

        #[cfg(feature = "logging")]
        bevy::log::debug!("tick_behavior_tasks: {:?} on {:?} -> {:?}", node_name, actor, status);

        if status.is_terminal() {
            task.handle(status);
        }

        {
            let Ok(mut actor_mut) = world.get_entity_mut(actor) else {
                // Something reacting to the Task despawned the actor.
                // Nothing left to record or notify about.
                continue;
            };

            if config.record_status {
                actor_mut.insert(BehaviorTaskStatus(status));
            }

            if status.is_terminal() && config.remove_finished_tasks {
                #[cfg(feature = "logging")]
                bevy::log::info!("tick_behavior_tasks: {:?} on {:?} finished with {:?}, descheduling.", node_name, actor, status);
                actor_mut.remove::<BehaviorTask>();
            } else if let Some(mut slot) = actor_mut.get_mut::<BehaviorTask>() {
                slot.task = Some(task);
            }
        }

        if status.is_terminal() && config.notify_finished {
            world.trigger(BehaviorTaskFinished {
                entity: actor,
                node_name,
                status,
            });
        }
    }
}
