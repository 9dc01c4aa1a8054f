//! Plain-data components shared by every scene.
//!
//! All fields are integers in world units except the animation duration.
//! Origin is the top-left corner of the world, y grows downward.

use crate::define_component;

/// Role name attached to every entity created through `World::create_entity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub const PLAYER: &'static str = "PLAYER";
    pub const ENEMY: &'static str = "ENEMY";
    pub const CAMERA: &'static str = "CAMERA";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn is_player(&self) -> bool {
        self.is(Self::PLAYER)
    }
}

/// World position of the entity's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    pub x: i32,
    pub y: i32,
}

impl Transform {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub vx: i32,
    pub vy: i32,
}

impl Movement {
    pub fn new(vx: i32, vy: i32) -> Self {
        Self { vx, vy }
    }
}

/// Viewport into the world. Zoom scales rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub zoom: i32,
    pub viewport_w: i32,
    pub viewport_h: i32,
    pub world_w: i32,
    pub world_h: i32,
}

impl Camera {
    pub fn new(zoom: i32, viewport_w: i32, viewport_h: i32, world_w: i32, world_h: i32) -> Self {
        Self {
            zoom,
            viewport_w,
            viewport_h,
            world_w,
            world_h,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1, 0, 0, 0, 0)
    }
}

/// Frame of a sprite sheet drawn for an entity.
///
/// `frame_x` is the sheet column (facing), `frame_y` the row (animation
/// frame or action pose). `frame_y` is kept in `[0, frames)` by the
/// animation system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub sheet_index: usize,
    pub frames: i32,
    pub duration_seconds: f32,
    pub frame_x: i32,
    pub frame_y: i32,
    pub size: i32,
    pub last_update_ms: u64,
}

impl Sprite {
    pub fn new(
        sheet_index: usize,
        frames: i32,
        duration_seconds: f32,
        frame_x: i32,
        frame_y: i32,
        size: i32,
    ) -> Self {
        Self {
            sheet_index,
            frames,
            duration_seconds,
            frame_x,
            frame_y,
            size,
            last_update_ms: 0,
        }
    }

    /// Whether the animation system should ever advance this sprite.
    pub fn is_animated(&self) -> bool {
        self.duration_seconds > 0.0
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(0, 1, 0.0, 0, 0, 24)
    }
}

/// One-shot action guard. Set when an action pose starts, cleared on key-up,
/// so keyboard autorepeat does not retrigger the pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionLatch {
    pub latched: bool,
}

define_component!(Tag, 1, "Tag");
define_component!(Transform, 2, "Transform");
define_component!(Movement, 3, "Movement");
define_component!(Camera, 4, "Camera");
define_component!(Sprite, 5, "Sprite");
define_component!(ActionLatch, 6, "ActionLatch");
