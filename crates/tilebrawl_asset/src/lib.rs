//! Tilebrawl Asset Pipeline
//!
//! Texture loading and decoded images. Systems only see opaque
//! [`TextureHandle`]s; the host decides where pixels actually live.

mod image_loader;
mod memory_loader;

pub use image_loader::ImageTextureLoader;
pub use memory_loader::MemoryTextureLoader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid image data: {0}")]
    InvalidImage(String),
}

/// Texture handle (opaque ID)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What the registry remembers about a loaded texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Texture registry
///
/// Hands out handles and deduplicates loads by path.
pub struct TextureRegistry {
    next_id: u64,
    textures: HashMap<TextureHandle, TextureInfo>,
    by_path: HashMap<PathBuf, TextureHandle>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            textures: HashMap::new(),
            by_path: HashMap::new(),
        }
    }

    pub fn register(&mut self, info: TextureInfo) -> TextureHandle {
        if let Some(&handle) = self.by_path.get(&info.path) {
            return handle;
        }
        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        self.by_path.insert(info.path.clone(), handle);
        self.textures.insert(handle, info);
        handle
    }

    pub fn lookup(&self, path: &Path) -> Option<TextureHandle> {
        self.by_path.get(path).copied()
    }

    pub fn info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelImage {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AssetError::InvalidImage(format!(
                "{width}x{height} RGBA image needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            width,
            height,
            data: color.repeat(pixel_count),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let offset = (y as usize * self.width as usize + x as usize) * 4;
            self.data[offset..offset + 4].copy_from_slice(&rgba);
        }
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Interface through which setup systems obtain textures and images.
pub trait TextureLoader {
    /// Make an image file available as a drawable texture.
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError>;

    /// Decode an image file to CPU-side pixels.
    fn decode_image(&mut self, path: &Path) -> Result<PixelImage, AssetError>;
}
