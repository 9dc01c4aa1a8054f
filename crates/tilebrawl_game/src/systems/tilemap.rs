//! Tile map background.
//!
//! The map is an image: each pixel picks a tile from the atlas, red channel
//! for the atlas column and green for the row.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{RenderSystem, SetupSystem, System};
use std::path::PathBuf;
use tilebrawl_asset::{PixelImage, TextureHandle, TextureLoader};
use tilebrawl_core::components::{Camera, Transform};
use tilebrawl_render::{Rect, Renderer};

/// Edge length of one atlas tile, in pixels.
pub const TILE_SIZE: i32 = 16;

/// Decoded map: one atlas source rectangle per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Rect>,
}

impl TileMap {
    pub fn from_image(image: &PixelImage) -> Self {
        let tiles = image
            .pixels()
            .map(|[r, g, _, _]| {
                Rect::new(
                    i32::from(r) * TILE_SIZE,
                    i32::from(g) * TILE_SIZE,
                    TILE_SIZE,
                    TILE_SIZE,
                )
            })
            .collect();
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Atlas rectangle of the cell at `(column, row)`.
    pub fn tile(&self, column: usize, row: usize) -> Option<Rect> {
        if column >= self.width {
            return None;
        }
        self.tiles.get(row * self.width + column).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rect]> {
        self.tiles.chunks(self.width.max(1))
    }
}

pub struct TileMapSystem {
    atlas_path: PathBuf,
    map_path: PathBuf,
    atlas: Option<TextureHandle>,
    map: Option<TileMap>,
}

impl TileMapSystem {
    pub fn new(atlas_path: impl Into<PathBuf>, map_path: impl Into<PathBuf>) -> Self {
        Self {
            atlas_path: atlas_path.into(),
            map_path: map_path.into(),
            atlas: None,
            map: None,
        }
    }

    pub fn map(&self) -> Option<&TileMap> {
        self.map.as_ref()
    }

    pub fn atlas(&self) -> Option<TextureHandle> {
        self.atlas
    }
}

impl System for TileMapSystem {
    fn name(&self) -> &str {
        "tilemap"
    }
}

impl SetupSystem for TileMapSystem {
    fn setup(
        &mut self,
        _world: &mut SceneWorld,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SystemError> {
        let atlas = loader.load_texture(&self.atlas_path)?;
        let map = TileMap::from_image(&loader.decode_image(&self.map_path)?);
        tracing::info!(
            columns = map.width(),
            rows = map.height(),
            path = %self.map_path.display(),
            "tile map loaded"
        );
        self.atlas = Some(atlas);
        self.map = Some(map);
        Ok(())
    }
}

impl RenderSystem for TileMapSystem {
    fn render(&mut self, world: &SceneWorld, renderer: &mut dyn Renderer) -> Result<(), SystemError> {
        let (Some(atlas), Some(map)) = (self.atlas, self.map.as_ref()) else {
            return Err(SystemError::Invalid("tile map rendered before setup".into()));
        };

        let camera = world.camera()?;
        let view = world.registry.component::<Transform>(camera)?;
        let step = world.registry.component::<Camera>(camera)?.zoom * TILE_SIZE;

        // Columns and rows share one square step.
        let mut dst = Rect::new(-view.x, -view.y, step, step);
        for row in map.rows() {
            dst.x = -view.x;
            for &src in row {
                renderer.draw_textured_rect(atlas, src, dst);
                dst.x += step;
            }
            dst.y += step;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{arcade_world, place};
    use tilebrawl_asset::MemoryTextureLoader;
    use tilebrawl_render::RecordingRenderer;

    fn map_image() -> PixelImage {
        let mut image = PixelImage::solid_color(3, 2, [0, 0, 0, 255]);
        image.set_pixel(1, 0, [2, 5, 9, 255]);
        image.set_pixel(2, 1, [1, 1, 0, 255]);
        image
    }

    fn loaded_system() -> TileMapSystem {
        let mut loader = MemoryTextureLoader::new()
            .with_image("tiles.png", PixelImage::solid_color(64, 64, [255; 4]))
            .with_image("map.png", map_image());
        let mut system = TileMapSystem::new("tiles.png", "map.png");
        system.setup(&mut arcade_world(), &mut loader).unwrap();
        system
    }

    #[test]
    fn pixels_select_atlas_cells() {
        let map = TileMap::from_image(&map_image());
        assert_eq!((map.width(), map.height()), (3, 2));
        assert_eq!(map.tile(0, 0), Some(Rect::new(0, 0, 16, 16)));
        assert_eq!(map.tile(1, 0), Some(Rect::new(32, 80, 16, 16)));
        assert_eq!(map.tile(2, 1), Some(Rect::new(16, 16, 16, 16)));
        assert_eq!(map.tile(3, 0), None);
    }

    #[test]
    fn columns_step_uniformly_by_zoomed_tile_size() {
        let mut world = arcade_world();
        let camera = world.camera.unwrap();
        place(&mut world, camera, 0, 0);

        let mut system = loaded_system();
        let mut renderer = RecordingRenderer::new();
        system.render(&world, &mut renderer).unwrap();

        let first_row: Vec<i32> = renderer.pending()[..3].iter().map(|c| c.dst.x).collect();
        assert_eq!(first_row, vec![0, 16, 32]);
        assert_eq!(renderer.pending()[3].dst.y, 16);
    }

    #[test]
    fn grid_starts_at_negative_camera_and_steps_by_zoomed_tile() {
        let mut world = arcade_world();
        let camera = world.camera.unwrap();
        place(&mut world, camera, 10, 20);
        world.registry.component_mut::<Camera>(camera).unwrap().zoom = 2;

        let mut system = loaded_system();
        let mut renderer = RecordingRenderer::new();
        system.render(&world, &mut renderer).unwrap();

        let dsts: Vec<Rect> = renderer.pending().iter().map(|c| c.dst).collect();
        assert_eq!(
            dsts,
            vec![
                Rect::new(-10, -20, 32, 32),
                Rect::new(22, -20, 32, 32),
                Rect::new(54, -20, 32, 32),
                Rect::new(-10, 12, 32, 32),
                Rect::new(22, 12, 32, 32),
                Rect::new(54, 12, 32, 32),
            ]
        );
        assert_eq!(renderer.pending()[1].src, Rect::new(32, 80, 16, 16));
        assert!(renderer
            .pending()
            .iter()
            .all(|c| Some(c.texture) == system.atlas()));
    }

    #[test]
    fn render_before_setup_is_an_error() {
        let world = arcade_world();
        let mut system = TileMapSystem::new("tiles.png", "map.png");
        assert!(system.render(&world, &mut RecordingRenderer::new()).is_err());
    }

    #[test]
    fn missing_map_fails_setup() {
        let mut loader = MemoryTextureLoader::new()
            .with_image("tiles.png", PixelImage::solid_color(16, 16, [255; 4]));
        let mut system = TileMapSystem::new("tiles.png", "map.png");
        let err = system.setup(&mut arcade_world(), &mut loader).unwrap_err();
        assert!(matches!(err, SystemError::Asset(_)));
    }
}
