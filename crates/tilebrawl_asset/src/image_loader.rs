//! Image loading backed by the `image` crate
//!
//! Decodes PNG files to RGBA8 and keeps the decoded pixels of every loaded
//! texture, keyed by handle, for whatever presents them.

use crate::{AssetError, PixelImage, TextureHandle, TextureInfo, TextureLoader, TextureRegistry};
use std::collections::HashMap;
use std::path::Path;

pub struct ImageTextureLoader {
    registry: TextureRegistry,
    pixels: HashMap<TextureHandle, PixelImage>,
}

impl ImageTextureLoader {
    pub fn new() -> Self {
        Self {
            registry: TextureRegistry::new(),
            pixels: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &TextureRegistry {
        &self.registry
    }

    /// Decoded pixels of a loaded texture.
    pub fn texture(&self, handle: TextureHandle) -> Option<&PixelImage> {
        self.pixels.get(&handle)
    }

    /// Every loaded texture with its pixels.
    pub fn textures(&self) -> impl Iterator<Item = (TextureHandle, &PixelImage)> {
        self.pixels.iter().map(|(&handle, image)| (handle, image))
    }

    fn decode(path: &Path) -> Result<PixelImage, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), "decoding image");
        let img = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelImage::from_rgba(width, height, rgba.into_raw())
    }
}

impl Default for ImageTextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureLoader for ImageTextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError> {
        if let Some(handle) = self.registry.lookup(path) {
            return Ok(handle);
        }

        let image = Self::decode(path)?;
        let handle = self.registry.register(TextureInfo {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        });
        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            texture = handle.id(),
            "texture loaded"
        );
        self.pixels.insert(handle, image);
        Ok(handle)
    }

    fn decode_image(&mut self, path: &Path) -> Result<PixelImage, AssetError> {
        Self::decode(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn decodes_png_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "map.png", 3, 2, [1, 2, 0, 255]);

        let mut loader = ImageTextureLoader::new();
        let image = loader.decode_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.pixel(2, 1), Some([1, 2, 0, 255]));
    }

    #[test]
    fn textures_are_loaded_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "tiles.png", 32, 16, [255, 0, 0, 255]);

        let mut loader = ImageTextureLoader::new();
        let a = loader.load_texture(&path).unwrap();
        let b = loader.load_texture(&path).unwrap();

        assert_eq!(a, b);
        assert_eq!(loader.registry().len(), 1);
        assert_eq!(loader.texture(a).map(|t| t.width()), Some(32));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = ImageTextureLoader::new();
        let err = loader
            .load_texture(&dir.path().join("brock.png"))
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let mut loader = ImageTextureLoader::new();
        assert!(matches!(
            loader.decode_image(&path),
            Err(AssetError::Decode { .. })
        ));
    }
}
