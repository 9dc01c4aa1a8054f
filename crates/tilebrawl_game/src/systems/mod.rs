//! Gameplay systems and the default arcade schedule.

mod camera_follow;
mod knockdown;
mod movement;
mod player_input;
mod setup;
mod sprite;
mod tilemap;

pub use camera_follow::{CameraFollowSystem, FOLLOW_OFFSET};
pub use knockdown::{KnockdownPointSystem, KnockdownScore};
pub use movement::{MovementSystem, PatrolRoute, PlayfieldBounds};
pub use player_input::{PlayerInputSystem, KICK_ROW, PLAYER_SPEED, PUNCH_ROW};
pub use setup::{CameraSetupSystem, CharacterSetupSystem, EnemySetupSystem};
pub use sprite::{animate, frames_to_advance, SpriteRenderSystem};
pub use tilemap::{TileMap, TileMapSystem, TILE_SIZE};

use crate::schedule::{shared, Schedule};
use std::cell::RefCell;
use std::rc::Rc;
use tilebrawl_core::ecs::SystemRegistrationError;
use tilebrawl_services::settings::Settings;

/// The standard schedule plus handles to systems whose state the host reads.
pub struct ArcadeSystems {
    pub schedule: Schedule,
    pub knockdown: Rc<RefCell<KnockdownPointSystem>>,
}

/// Register every arcade system in frame order.
///
/// Setup: characters, camera, tile map, sprite sheets. Input: player
/// control, then scoring. Update: movement, camera follow, animation.
/// Render: tile map below sprites.
pub fn arcade_schedule(settings: &Settings) -> Result<ArcadeSystems, SystemRegistrationError> {
    let mut schedule = Schedule::new();

    let tilemap = shared(TileMapSystem::new(
        settings.assets.tile_atlas.clone(),
        settings.assets.tile_map.clone(),
    ));
    let sprites = shared(SpriteRenderSystem::new(
        settings.assets.sprite_sheets.clone(),
        settings.simulation.target_fps,
    ));
    let knockdown = shared(KnockdownPointSystem::new());

    schedule.add_setup(shared(CharacterSetupSystem::new(settings.spawns.player)))?;
    schedule.add_setup(shared(EnemySetupSystem::new(settings.spawns.enemy)))?;
    schedule.add_setup(shared(CameraSetupSystem::new(settings.camera_component())))?;
    schedule.add_setup(tilemap.clone())?;
    schedule.add_setup(sprites.clone())?;

    schedule.add_input(shared(PlayerInputSystem::default()))?;
    schedule.add_input(knockdown.clone())?;

    schedule.add_update(shared(MovementSystem::default()))?;
    schedule.add_update(shared(CameraFollowSystem))?;
    schedule.add_update(sprites.clone())?;

    schedule.add_render(tilemap)?;
    schedule.add_render(sprites)?;

    Ok(ArcadeSystems {
        schedule,
        knockdown,
    })
}
