//! In-memory texture loader for headless runs and tests.

use crate::{AssetError, PixelImage, TextureHandle, TextureInfo, TextureLoader, TextureRegistry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serves images registered up front instead of reading files.
#[derive(Default)]
pub struct MemoryTextureLoader {
    registry: TextureRegistry,
    images: HashMap<PathBuf, PixelImage>,
}

impl MemoryTextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `image` available under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: PixelImage) {
        self.images.insert(path.into(), image);
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, image: PixelImage) -> Self {
        self.insert(path, image);
        self
    }

    pub fn registry(&self) -> &TextureRegistry {
        &self.registry
    }

    fn image(&self, path: &Path) -> Result<&PixelImage, AssetError> {
        self.images.get(path).ok_or_else(|| AssetError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

impl TextureLoader for MemoryTextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError> {
        let image = self.image(path)?;
        let info = TextureInfo {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        };
        Ok(self.registry.register(info))
    }

    fn decode_image(&mut self, path: &Path) -> Result<PixelImage, AssetError> {
        self.image(path).cloned()
    }
}
