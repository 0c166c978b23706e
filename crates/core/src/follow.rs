use bevy::prelude::*;

use crate::types::TargetEntity;

/// A transient request for this entity to pursue another one.
///
/// Whatever does the actual pathing reads this; behavior nodes add it when
/// the AI decides to chase something and remove it when the chase is over.
/// Bear in mind the target is just an ID and may well be despawned by the
/// time anyone looks at it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct FollowWish {
    pub entity_to_follow: Option<TargetEntity>,
}

impl FollowWish {
    pub fn new(target: TargetEntity) -> Self {
        Self { entity_to_follow: Some(target) }
    }

    pub const fn new_empty() -> Self {
        Self { entity_to_follow: None }
    }
}
