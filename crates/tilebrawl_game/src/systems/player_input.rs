//! Keyboard control of the player character.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{InputSystem, System};
use tilebrawl_core::components::{ActionLatch, Movement, Sprite};
use tilebrawl_services::input::{InputEvent, KeyCode};

pub const PLAYER_SPEED: i32 = 400;

/// Sheet rows of the two action poses.
pub const PUNCH_ROW: i32 = 2;
pub const KICK_ROW: i32 = 3;

/// Maps WASD to velocity and O/P to one-shot action poses.
pub struct PlayerInputSystem {
    speed: i32,
}

impl PlayerInputSystem {
    pub fn new(speed: i32) -> Self {
        Self { speed }
    }

    fn key_down(&self, world: &mut SceneWorld, key: KeyCode) -> Result<(), SystemError> {
        let player = world.player()?;
        let reg = &mut world.registry;
        match key {
            KeyCode::A => reg.component_mut::<Movement>(player)?.vx = -self.speed,
            KeyCode::D => reg.component_mut::<Movement>(player)?.vx = self.speed,
            KeyCode::W => reg.component_mut::<Movement>(player)?.vy = -self.speed,
            KeyCode::S => reg.component_mut::<Movement>(player)?.vy = self.speed,
            KeyCode::O | KeyCode::P => {
                let latch = reg.component_mut::<ActionLatch>(player)?;
                if !latch.latched {
                    latch.latched = true;
                    let row = if key == KeyCode::O { PUNCH_ROW } else { KICK_ROW };
                    reg.component_mut::<Sprite>(player)?.frame_y = row;
                }
            }
            _ => {}
        }
        Ok(())
    }

    // Releasing W also runs the S release, and releasing either vertical key
    // clears the action latch.
    fn key_up(&self, world: &mut SceneWorld, key: KeyCode) -> Result<(), SystemError> {
        let player = world.player()?;
        let reg = &mut world.registry;
        match key {
            KeyCode::A | KeyCode::D => reg.component_mut::<Movement>(player)?.vx = 0,
            KeyCode::W | KeyCode::S => {
                reg.component_mut::<Movement>(player)?.vy = 0;
                reg.component_mut::<ActionLatch>(player)?.latched = false;
            }
            KeyCode::O | KeyCode::P => reg.component_mut::<ActionLatch>(player)?.latched = false,
            _ => {}
        }
        Ok(())
    }

    fn update_facing(world: &mut SceneWorld) -> Result<(), SystemError> {
        let player = world.player()?;
        let vx = world.registry.component::<Movement>(player)?.vx;
        let sprite = world.registry.component_mut::<Sprite>(player)?;
        if vx < 0 {
            sprite.frame_x = 1;
        } else if vx > 0 {
            sprite.frame_x = 0;
        }
        Ok(())
    }
}

impl Default for PlayerInputSystem {
    fn default() -> Self {
        Self::new(PLAYER_SPEED)
    }
}

impl System for PlayerInputSystem {
    fn name(&self) -> &str {
        "player_input"
    }
}

impl InputSystem for PlayerInputSystem {
    fn handle(&mut self, world: &mut SceneWorld, event: &InputEvent) -> Result<(), SystemError> {
        match *event {
            InputEvent::KeyDown(key) => self.key_down(world, key)?,
            InputEvent::KeyUp(key) => self.key_up(world, key)?,
            InputEvent::Quit => {}
        }
        Self::update_facing(world)
    }
}
