//! Recording backend
//!
//! Keeps every draw call instead of drawing. Headless hosts use it to report
//! what a frame would have shown; tests assert on exact rectangles.

use crate::{Rect, Renderer};
use tilebrawl_asset::TextureHandle;

/// One `draw_textured_rect` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub src: Rect,
    pub dst: Rect,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    clears: u64,
    presents: u64,
    total_draws: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls issued since the last `clear`.
    pub fn pending(&self) -> &[DrawCall] {
        &self.pending
    }

    /// Draw calls of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.clears += 1;
        self.pending.clear();
    }

    fn draw_textured_rect(&mut self, texture: TextureHandle, src: Rect, dst: Rect) {
        self.total_draws += 1;
        self.pending.push(DrawCall { texture, src, dst });
    }

    fn present(&mut self) {
        self.presents += 1;
        self.last_frame = std::mem::take(&mut self.pending);
        tracing::trace!(draws = self.last_frame.len(), "frame presented");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tilebrawl_asset::{TextureInfo, TextureRegistry};

    #[test]
    fn present_moves_pending_calls_to_last_frame() {
        let mut registry = TextureRegistry::new();
        let tex = registry.register(TextureInfo {
            path: PathBuf::from("tiles.png"),
            width: 16,
            height: 16,
        });

        let mut renderer = RecordingRenderer::new();
        renderer.clear();
        renderer.draw_textured_rect(tex, Rect::new(0, 0, 16, 16), Rect::new(5, 5, 32, 32));
        assert_eq!(renderer.pending().len(), 1);

        renderer.present();
        assert!(renderer.pending().is_empty());
        assert_eq!(
            renderer.last_frame(),
            &[DrawCall {
                texture: tex,
                src: Rect::new(0, 0, 16, 16),
                dst: Rect::new(5, 5, 32, 32)
            }]
        );
        assert_eq!((renderer.clears(), renderer.presents()), (1, 1));
    }
}
