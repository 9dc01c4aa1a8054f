//! Setup systems that populate the scene with its three privileged entities.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{SetupSystem, System};
use tilebrawl_asset::TextureLoader;
use tilebrawl_core::components::{ActionLatch, Camera, Tag};
use tilebrawl_services::settings::SpawnPoint;

/// Creates the player character.
pub struct CharacterSetupSystem {
    spawn: SpawnPoint,
}

impl CharacterSetupSystem {
    pub fn new(spawn: SpawnPoint) -> Self {
        Self { spawn }
    }
}

impl System for CharacterSetupSystem {
    fn name(&self) -> &str {
        "character_setup"
    }
}

impl SetupSystem for CharacterSetupSystem {
    fn setup(&mut self, world: &mut SceneWorld, _: &mut dyn TextureLoader) -> Result<(), SystemError> {
        let player = world
            .registry
            .create_entity(Tag::PLAYER, self.spawn.x, self.spawn.y)?;
        world
            .registry
            .entity_mut(player)
            .with(self.spawn.movement())?
            .with(self.spawn.sprite.to_sprite())?
            .with(ActionLatch::default())?;
        world.player = Some(player);
        tracing::debug!(%player, x = self.spawn.x, y = self.spawn.y, "player spawned");
        Ok(())
    }
}

/// Creates the patrolling enemy.
pub struct EnemySetupSystem {
    spawn: SpawnPoint,
}

impl EnemySetupSystem {
    pub fn new(spawn: SpawnPoint) -> Self {
        Self { spawn }
    }
}

impl System for EnemySetupSystem {
    fn name(&self) -> &str {
        "enemy_setup"
    }
}

impl SetupSystem for EnemySetupSystem {
    fn setup(&mut self, world: &mut SceneWorld, _: &mut dyn TextureLoader) -> Result<(), SystemError> {
        let enemy = world
            .registry
            .create_entity(Tag::ENEMY, self.spawn.x, self.spawn.y)?;
        world
            .registry
            .entity_mut(enemy)
            .with(self.spawn.movement())?
            .with(self.spawn.sprite.to_sprite())?;
        world.enemy = Some(enemy);
        tracing::debug!(%enemy, x = self.spawn.x, y = self.spawn.y, "enemy spawned");
        Ok(())
    }
}

/// Creates the camera at the world origin.
pub struct CameraSetupSystem {
    camera: Camera,
}

impl CameraSetupSystem {
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }
}

impl System for CameraSetupSystem {
    fn name(&self) -> &str {
        "camera_setup"
    }
}

impl SetupSystem for CameraSetupSystem {
    fn setup(&mut self, world: &mut SceneWorld, _: &mut dyn TextureLoader) -> Result<(), SystemError> {
        let camera = world.registry.create_entity(Tag::CAMERA, 0, 0)?;
        world.registry.add_component(camera, self.camera)?;
        world.camera = Some(camera);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilebrawl_asset::MemoryTextureLoader;
    use tilebrawl_core::components::{Movement, Sprite, Transform};
    use tilebrawl_services::settings::SpawnSettings;

    #[test]
    fn default_spawns_match_the_arcade_layout() {
        let spawns = SpawnSettings::default();
        let mut world = SceneWorld::new();
        let mut loader = MemoryTextureLoader::new();

        CharacterSetupSystem::new(spawns.player)
            .setup(&mut world, &mut loader)
            .unwrap();
        EnemySetupSystem::new(spawns.enemy)
            .setup(&mut world, &mut loader)
            .unwrap();
        CameraSetupSystem::new(Camera::new(1, 1280, 720, 1600, 1200))
            .setup(&mut world, &mut loader)
            .unwrap();

        let reg = &world.registry;
        let player = world.player.unwrap();
        assert_eq!(reg.component::<Transform>(player).unwrap(), &Transform::new(200, 250));
        assert_eq!(reg.component::<Movement>(player).unwrap(), &Movement::new(0, 0));
        assert_eq!(
            reg.component::<Sprite>(player).unwrap(),
            &Sprite::new(0, 2, 15.0, 0, 0, 50)
        );
        assert!(!reg.component::<ActionLatch>(player).unwrap().latched);

        let enemy = world.enemy.unwrap();
        assert_eq!(reg.component::<Transform>(enemy).unwrap(), &Transform::new(1100, 650));
        assert_eq!(reg.component::<Movement>(enemy).unwrap(), &Movement::new(200, 0));
        assert_eq!(
            reg.component::<Sprite>(enemy).unwrap(),
            &Sprite::new(1, 2, 25.0, 0, 0, 55)
        );
        assert!(reg.component::<Tag>(enemy).unwrap().is(Tag::ENEMY));

        let camera = world.camera.unwrap();
        assert_eq!(reg.component::<Transform>(camera).unwrap(), &Transform::new(0, 0));
        assert_eq!(reg.component::<Camera>(camera).unwrap().viewport_w, 1280);
    }
}
