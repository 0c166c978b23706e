//! The behavior-tree host contract.
//!
//! A `Node` is the authored, immutable half of a tree element - it holds the
//! configuration designers tweak. Whenever an executor schedules the Node
//! for some actor, it asks it for a fresh `Task`, which is the per-actor,
//! per-scheduling half that actually gets ticked.
//!
//! Tasks never reach into the world on their own; everything they are
//! allowed to read or touch comes in through the `TaskContext` handed to
//! `Task::update()`.

use bevy::prelude::Entity;

use crate::status::Status;
use crate::store::EntityStore;
use crate::types::{self, DeltaTime};


/// Everything a Task gets to see during a single `update()` call:
/// the actor being evaluated and the store the actor's components live in.
pub struct TaskContext<'s> {
    actor: types::ActorEntity,
    store: &'s mut dyn EntityStore,
}

impl<'s> TaskContext<'s> {
    pub fn new(actor: types::ActorEntity, store: &'s mut dyn EntityStore) -> Self {
        Self { actor, store }
    }

    /// The entity the tree is currently evaluating.
    pub fn actor(&self) -> Entity {
        self.actor
    }

    pub fn store(&self) -> &dyn EntityStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn EntityStore {
        &mut *self.store
    }
}


/// The authored half of a tree element.
pub trait Node: Send + Sync {
    /// Creates a new Task bound to this Node. Has no side effects.
    fn create_task(&self) -> types::BoxedTask;

    /// Stable, human-readable identifier for logs and debugging UIs.
    fn name(&self) -> &'static str;
}


/// The per-actor, per-scheduling half of a tree element.
pub trait Task: Send + Sync {
    /// Runs one tick of the Task for `ctx.actor()`.
    fn update(&mut self, ctx: &mut TaskContext<'_>, dt: DeltaTime) -> Status;

    /// Completion hook, called by the executor once the Task (or whatever
    /// it is waiting on) has finished with `result`.
    fn handle(&mut self, result: Status);
}


/// A side-effect free check of the world state, from the point of view of one actor.
///
/// Condition-style Tasks implement this next to `Task` so that the pure
/// evaluation can be reused (and tested) without triggering the reaction
/// the Task attaches to its outcome.
pub trait Condition {
    fn evaluate(&self, ctx: &TaskContext<'_>) -> Status;
}


impl Node for Box<dyn Node> {
    fn create_task(&self) -> types::BoxedTask {
        (**self).create_task()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl Task for Box<dyn Task> {
    fn update(&mut self, ctx: &mut TaskContext<'_>, dt: DeltaTime) -> Status {
        (**self).update(ctx, dt)
    }

    fn handle(&mut self, result: Status) {
        (**self).handle(result)
    }
}
