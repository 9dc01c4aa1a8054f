//! Tilebrawl Render System
//!
//! The renderer surface systems draw through, plus two headless backends:
//! a recording renderer and a software compositor.

pub mod backend;
pub mod software;

pub use backend::{DrawCall, RecordingRenderer};
pub use software::{RenderError, SoftwareRenderer};

use tilebrawl_asset::TextureHandle;

/// Axis-aligned rectangle in pixels. Top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Whether the two rectangles share any pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Drawing surface for one frame.
///
/// Callers issue `clear`, any number of draws, then `present`.
pub trait Renderer {
    fn clear(&mut self);

    /// Copy `src` from `texture` into `dst` on the surface, scaling as needed.
    fn draw_textured_rect(&mut self, texture: TextureHandle, src: Rect, dst: Rect);

    fn present(&mut self);
}
