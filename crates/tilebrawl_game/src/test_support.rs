//! Fixtures shared by the system tests.

use crate::scene::SceneWorld;
use crate::systems::{CameraSetupSystem, CharacterSetupSystem, EnemySetupSystem};
use crate::schedule::SetupSystem;
use tilebrawl_asset::MemoryTextureLoader;
use tilebrawl_core::components::{Movement, Sprite, Transform};
use tilebrawl_core::ecs::Entity;
use tilebrawl_core::time::FrameTime;
use tilebrawl_services::settings::Settings;

/// A world populated by the default setup systems.
pub fn arcade_world() -> SceneWorld {
    let settings = Settings::default();
    let mut world = SceneWorld::new();
    let mut loader = MemoryTextureLoader::new();

    CharacterSetupSystem::new(settings.spawns.player)
        .setup(&mut world, &mut loader)
        .unwrap();
    EnemySetupSystem::new(settings.spawns.enemy)
        .setup(&mut world, &mut loader)
        .unwrap();
    CameraSetupSystem::new(settings.camera_component())
        .setup(&mut world, &mut loader)
        .unwrap();
    world
}

pub fn frame(delta_seconds: f64, now_ms: u64) -> FrameTime {
    FrameTime::new(delta_seconds, now_ms)
}

pub fn transform(world: &SceneWorld, entity: Entity) -> Transform {
    *world.registry.component::<Transform>(entity).unwrap()
}

pub fn movement(world: &SceneWorld, entity: Entity) -> Movement {
    *world.registry.component::<Movement>(entity).unwrap()
}

pub fn sprite(world: &SceneWorld, entity: Entity) -> Sprite {
    *world.registry.component::<Sprite>(entity).unwrap()
}

pub fn place(world: &mut SceneWorld, entity: Entity, x: i32, y: i32) {
    *world.registry.component_mut::<Transform>(entity).unwrap() = Transform::new(x, y);
}

pub fn set_velocity(world: &mut SceneWorld, entity: Entity, vx: i32, vy: i32) {
    *world.registry.component_mut::<Movement>(entity).unwrap() = Movement::new(vx, vy);
}
