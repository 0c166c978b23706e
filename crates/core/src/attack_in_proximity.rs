use bevy::prelude::*;

use crate::types::InstigatorEntity;

// Marks an actor that turns on whoever wanders too close.
// The instigator is whoever set it off; None means nobody is being attacked right now.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct AttackInProximity {
    pub instigator: Option<InstigatorEntity>,
}

impl AttackInProximity {
    pub fn provoked_by(instigator: InstigatorEntity) -> Self {
        Self { instigator: Some(instigator) }
    }

    pub fn is_provoked(&self) -> bool {
        self.instigator.is_some()
    }
}
