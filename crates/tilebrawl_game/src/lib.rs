//! Tilebrawl Game
//!
//! The arcade scene: a player, a patrolling enemy, a following camera and a
//! tile map, driven by setup, input, update and render systems over one
//! component registry.

pub mod scene;
pub mod schedule;
pub mod systems;

#[cfg(test)]
mod test_support;

pub use scene::{FrameReport, Scene, SceneError, SceneWorld, SystemError};
pub use schedule::{
    shared, InputSystem, RenderSystem, Schedule, SetupSystem, System, UpdateSystem,
};
pub use systems::{arcade_schedule, ArcadeSystems};
