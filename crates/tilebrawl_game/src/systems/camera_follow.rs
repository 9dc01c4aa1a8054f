//! Keeps the camera centred on the player while it stays inside the world.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{System, UpdateSystem};
use tilebrawl_core::components::{Camera, Transform};
use tilebrawl_core::time::FrameTime;

/// Offset, in unzoomed pixels, added to the centred camera position.
pub const FOLLOW_OFFSET: i32 = 12;

#[derive(Default)]
pub struct CameraFollowSystem;

impl CameraFollowSystem {
    /// Candidate camera position for one axis.
    fn candidate(player: i32, viewport: i32, zoom: i32) -> i32 {
        player - viewport / 2 + FOLLOW_OFFSET * zoom
    }
}

impl System for CameraFollowSystem {
    fn name(&self) -> &str {
        "camera_follow"
    }
}

impl UpdateSystem for CameraFollowSystem {
    fn update(&mut self, world: &mut SceneWorld, _time: &FrameTime) -> Result<(), SystemError> {
        let player = world.player()?;
        let camera = world.camera()?;

        let target = *world.registry.component::<Transform>(player)?;
        let cam = *world.registry.component::<Camera>(camera)?;
        let position = world.registry.component_mut::<Transform>(camera)?;

        // Each axis commits on its own.
        let x = Self::candidate(target.x, cam.viewport_w, cam.zoom);
        if x > 0 && x < cam.world_w - cam.viewport_w {
            position.x = x;
        }
        let y = Self::candidate(target.y, cam.viewport_h, cam.zoom);
        if y > 0 && y < cam.world_h - cam.viewport_h {
            position.y = y;
        }
        Ok(())
    }
}
