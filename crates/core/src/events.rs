use bevy::prelude::*;
use crate::status::Status;
use crate::types;

/// An Event that tells the rest of the app an actor's behavior-relevant state
/// was changed underneath it (e.g. it stopped chasing something), so whatever
/// picks behaviors for it should take another look.
///
/// Fire-and-forget; nothing is expected to respond.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct UpdateBehavior {
    /// The actor whose behavior should be re-evaluated.
    pub entity: types::ActorEntity,
}

impl UpdateBehavior {
    pub fn new(actor: types::ActorEntity) -> Self {
        #[cfg(feature = "logging")]
        bevy::log::debug!("Creating a new UpdateBehavior event for {:?}", actor);

        Self { entity: actor }
    }
}


/// An Event notifying Observers that a scheduled Task reached a terminal Status
/// and has been handed its completion callback.
#[derive(EntityEvent, Debug, Clone)]
pub struct BehaviorTaskFinished {
    /// The actor the Task was running for.
    pub entity: types::ActorEntity,

    /// Name of the Node the Task was created from.
    pub node_name: &'static str,

    pub status: Status,
}
