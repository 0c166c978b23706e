//! Type aliases and 'abstracting' newtypes.

/// Type alias for the distance math; the engine's spatial types are f32-based.
pub type Distance = f32;

/// Seconds elapsed since the previous tick, as handed to `Task::update()`.
pub type DeltaTime = f32;

// Type aliases - to express intent better.
pub type ActorEntity = bevy::prelude::Entity;
pub type TargetEntity = bevy::prelude::Entity;
pub type InstigatorEntity = bevy::prelude::Entity;

pub type WorldPosition = bevy::math::Vec3;

pub type BoxedTask = Box<dyn crate::tree::Task>;
pub type BoxedNode = Box<dyn crate::tree::Node>;
