//! Integrates velocities: bounded for the player, patrol route for the rest.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{System, UpdateSystem};
use tilebrawl_core::components::{Movement, Sprite, Tag, Transform};
use tilebrawl_core::ecs::{Entity, World};
use tilebrawl_core::query;
use tilebrawl_core::time::FrameTime;

/// Open interval the player's position must stay strictly inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayfieldBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl PlayfieldBounds {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x > self.min_x && x < self.max_x && y > self.min_y && y < self.max_y
    }
}

impl Default for PlayfieldBounds {
    fn default() -> Self {
        Self {
            min_x: 130,
            max_x: 1200,
            min_y: 245,
            max_y: 890,
        }
    }
}

/// Horizontal back-and-forth route. Waypoints match on exact x only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatrolRoute {
    pub left_turn_x: i32,
    pub right_turn_x: i32,
    pub punch_at_x: i32,
    pub kick_at_x: i32,
    pub speed: i32,
}

impl Default for PatrolRoute {
    fn default() -> Self {
        Self {
            left_turn_x: 600,
            right_turn_x: 1100,
            punch_at_x: 700,
            kick_at_x: 1000,
            speed: 200,
        }
    }
}

/// Truncating integer step, matching how positions are stored.
fn step(position: i32, velocity: i32, dt: f64) -> i32 {
    (f64::from(position) + f64::from(velocity) * dt) as i32
}

#[derive(Default)]
pub struct MovementSystem {
    bounds: PlayfieldBounds,
    route: PatrolRoute,
}

impl MovementSystem {
    fn move_player(&self, reg: &mut World, entity: Entity, dt: f64) -> Result<(), SystemError> {
        let velocity = *reg.component::<Movement>(entity)?;
        let transform = reg.component_mut::<Transform>(entity)?;
        let x = step(transform.x, velocity.vx, dt);
        let y = step(transform.y, velocity.vy, dt);

        if self.bounds.contains(x, y) {
            transform.x = x;
            transform.y = y;
        } else {
            tracing::trace!(%entity, x, y, "player move rejected");
        }
        Ok(())
    }

    fn patrol(&self, reg: &mut World, entity: Entity, dt: f64) -> Result<(), SystemError> {
        let x = reg.component::<Transform>(entity)?.x;
        let mut vx = reg.component::<Movement>(entity)?.vx;

        let sprite = reg.component_mut::<Sprite>(entity)?;
        if x <= self.route.left_turn_x {
            vx = self.route.speed;
            sprite.frame_x = 0;
        }
        if x == self.route.punch_at_x {
            sprite.frame_y = 2;
        }
        if x == self.route.kick_at_x {
            sprite.frame_y = 3;
        }
        if x >= self.route.right_turn_x {
            vx = -self.route.speed;
            sprite.frame_x = 1;
        }

        reg.component_mut::<Movement>(entity)?.vx = vx;
        reg.component_mut::<Transform>(entity)?.x = step(x, vx, dt);
        Ok(())
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }
}

impl UpdateSystem for MovementSystem {
    fn update(&mut self, world: &mut SceneWorld, time: &FrameTime) -> Result<(), SystemError> {
        let reg = &mut world.registry;
        for entity in query!(reg, [Transform, Movement, Tag, Sprite]) {
            if reg.component::<Tag>(entity)?.is_player() {
                self.move_player(reg, entity, time.delta_seconds)?;
            } else {
                self.patrol(reg, entity, time.delta_seconds)?;
            }
        }
        Ok(())
    }
}
