//! Software compositor
//!
//! Nearest-neighbour blits into an RGBA framebuffer. Fully transparent
//! source pixels are skipped; everything else overwrites.

use crate::{Rect, Renderer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tilebrawl_asset::{PixelImage, TextureHandle};

const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write frame to {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("framebuffer has inconsistent dimensions")]
    Framebuffer,
}

pub struct SoftwareRenderer {
    framebuffer: PixelImage,
    textures: HashMap<TextureHandle, PixelImage>,
    frames: u64,
    missing_texture_draws: u64,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: PixelImage::solid_color(width, height, CLEAR_COLOR),
            textures: HashMap::new(),
            frames: 0,
            missing_texture_draws: 0,
        }
    }

    pub fn add_texture(&mut self, handle: TextureHandle, pixels: PixelImage) {
        self.textures.insert(handle, pixels);
    }

    pub fn framebuffer(&self) -> &PixelImage {
        &self.framebuffer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draws skipped because their texture was never added.
    pub fn missing_texture_draws(&self) -> u64 {
        self.missing_texture_draws
    }

    /// Encode the current framebuffer as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let image = image::RgbaImage::from_raw(
            self.framebuffer.width(),
            self.framebuffer.height(),
            self.framebuffer.as_bytes().to_vec(),
        )
        .ok_or(RenderError::Framebuffer)?;

        image.save(path).map_err(|source| RenderError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "frame written");
        Ok(())
    }
}

impl Renderer for SoftwareRenderer {
    fn clear(&mut self) {
        let (w, h) = (self.framebuffer.width(), self.framebuffer.height());
        self.framebuffer = PixelImage::solid_color(w, h, CLEAR_COLOR);
    }

    fn draw_textured_rect(&mut self, texture: TextureHandle, src: Rect, dst: Rect) {
        let Some(tex) = self.textures.get(&texture) else {
            self.missing_texture_draws += 1;
            return;
        };
        if src.is_empty() || dst.is_empty() {
            return;
        }

        let fb_w = self.framebuffer.width() as i32;
        let fb_h = self.framebuffer.height() as i32;
        if !dst.intersects(&Rect::new(0, 0, fb_w, fb_h)) {
            return;
        }

        for dy in 0..dst.h {
            let ty = dst.y + dy;
            if !(0..fb_h).contains(&ty) {
                continue;
            }
            let sy = src.y + dy * src.h / dst.h;
            for dx in 0..dst.w {
                let tx = dst.x + dx;
                if !(0..fb_w).contains(&tx) {
                    continue;
                }
                let sx = src.x + dx * src.w / dst.w;
                if sx < 0 || sy < 0 {
                    continue;
                }
                match tex.pixel(sx as u32, sy as u32) {
                    Some(px) if px[3] != 0 => self.framebuffer.set_pixel(tx as u32, ty as u32, px),
                    _ => {}
                }
            }
        }
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilebrawl_asset::{TextureInfo, TextureRegistry};

    fn handle(registry: &mut TextureRegistry, name: &str) -> TextureHandle {
        registry.register(TextureInfo {
            path: PathBuf::from(name),
            width: 2,
            height: 2,
        })
    }

    #[test]
    fn blit_scales_and_clips() {
        let mut registry = TextureRegistry::new();
        let tex = handle(&mut registry, "sheet.png");

        let mut sheet = PixelImage::solid_color(2, 2, [255, 0, 0, 255]);
        sheet.set_pixel(1, 0, [0, 255, 0, 255]);

        let mut renderer = SoftwareRenderer::new(4, 4);
        renderer.add_texture(tex, sheet);
        renderer.clear();
        // Source column 1 scaled 2x, partly off the left edge.
        renderer.draw_textured_rect(tex, Rect::new(1, 0, 1, 1), Rect::new(-1, 0, 2, 2));
        renderer.present();

        let fb = renderer.framebuffer();
        assert_eq!(fb.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(fb.pixel(0, 1), Some([0, 255, 0, 255]));
        assert_eq!(fb.pixel(1, 0), Some(CLEAR_COLOR));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn transparent_pixels_and_unknown_textures_are_skipped() {
        let mut registry = TextureRegistry::new();
        let tex = handle(&mut registry, "ghost.png");
        let unknown = handle(&mut registry, "unknown.png");

        let mut renderer = SoftwareRenderer::new(2, 2);
        renderer.add_texture(tex, PixelImage::solid_color(2, 2, [9, 9, 9, 0]));
        renderer.draw_textured_rect(tex, Rect::new(0, 0, 2, 2), Rect::new(0, 0, 2, 2));
        renderer.draw_textured_rect(unknown, Rect::new(0, 0, 2, 2), Rect::new(0, 0, 2, 2));

        assert_eq!(renderer.framebuffer().pixel(1, 1), Some(CLEAR_COLOR));
        assert_eq!(renderer.missing_texture_draws(), 1);
    }

    #[test]
    fn saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let renderer = SoftwareRenderer::new(3, 2);
        renderer.save_png(&path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
    }
}
