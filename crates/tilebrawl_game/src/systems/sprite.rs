//! Sprite sheets: loading, frame animation and drawing.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{RenderSystem, SetupSystem, System, UpdateSystem};
use std::path::PathBuf;
use tilebrawl_asset::{TextureHandle, TextureLoader};
use tilebrawl_core::components::{Camera, Sprite, Transform};
use tilebrawl_core::query;
use tilebrawl_core::time::FrameTime;
use tilebrawl_render::{Rect, Renderer};

/// Frames to advance after `elapsed_ms` for a sprite whose animation spans
/// `duration_seconds` at `target_fps`.
pub fn frames_to_advance(elapsed_ms: u64, duration_seconds: f32, target_fps: u32) -> i64 {
    if duration_seconds <= 0.0 || target_fps == 0 {
        return 0;
    }
    let elapsed = elapsed_ms as f64 / 1000.0;
    let frame_rate = f64::from(duration_seconds) / f64::from(target_fps);
    (elapsed / frame_rate).floor() as i64
}

/// Advance one sprite's row. Returns whether at least one frame elapsed.
pub fn animate(sprite: &mut Sprite, now_ms: u64, target_fps: u32) -> bool {
    if !sprite.is_animated() {
        return false;
    }
    let elapsed = now_ms.saturating_sub(sprite.last_update_ms);
    let advance = frames_to_advance(elapsed, sprite.duration_seconds, target_fps);
    if advance < 1 {
        return false;
    }
    let frames = i64::from(sprite.frames.max(1));
    let row = i64::from(sprite.frame_y).rem_euclid(frames) + advance.rem_euclid(frames);
    sprite.frame_y = row.rem_euclid(frames) as i32;
    sprite.last_update_ms = now_ms;
    true
}

/// Loads the sprite sheets, animates every sprite and draws them relative
/// to the camera.
pub struct SpriteRenderSystem {
    sheet_paths: Vec<PathBuf>,
    sheets: Vec<TextureHandle>,
    target_fps: u32,
}

impl SpriteRenderSystem {
    pub fn new(sheet_paths: Vec<PathBuf>, target_fps: u32) -> Self {
        Self {
            sheet_paths,
            sheets: Vec::new(),
            target_fps,
        }
    }

    /// Handles of the loaded sheets, indexed by `Sprite::sheet_index`.
    pub fn sheets(&self) -> &[TextureHandle] {
        &self.sheets
    }
}

impl System for SpriteRenderSystem {
    fn name(&self) -> &str {
        "sprite"
    }
}

impl SetupSystem for SpriteRenderSystem {
    fn setup(
        &mut self,
        _world: &mut SceneWorld,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SystemError> {
        self.sheets = self
            .sheet_paths
            .iter()
            .map(|path| loader.load_texture(path))
            .collect::<Result<_, _>>()?;
        tracing::info!(sheets = self.sheets.len(), "sprite sheets loaded");
        Ok(())
    }
}

impl UpdateSystem for SpriteRenderSystem {
    fn update(&mut self, world: &mut SceneWorld, time: &FrameTime) -> Result<(), SystemError> {
        let reg = &mut world.registry;
        for entity in query!(reg, [Sprite]) {
            let sprite = reg.component_mut::<Sprite>(entity)?;
            animate(sprite, time.now_ms, self.target_fps);
        }
        Ok(())
    }
}

impl RenderSystem for SpriteRenderSystem {
    fn render(&mut self, world: &SceneWorld, renderer: &mut dyn Renderer) -> Result<(), SystemError> {
        let camera = world.camera()?;
        let reg = &world.registry;
        let view = *reg.component::<Transform>(camera)?;
        let zoom = reg.component::<Camera>(camera)?.zoom;

        for entity in query!(reg, [Transform, Sprite]) {
            let position = reg.component::<Transform>(entity)?;
            let sprite = reg.component::<Sprite>(entity)?;
            let texture = self.sheets.get(sprite.sheet_index).copied().ok_or_else(|| {
                SystemError::Invalid(format!(
                    "{entity} uses sprite sheet {} but only {} are loaded",
                    sprite.sheet_index,
                    self.sheets.len()
                ))
            })?;

            let src = Rect::new(
                sprite.frame_x * sprite.size,
                sprite.frame_y * sprite.size,
                sprite.size,
                sprite.size,
            );
            let dst_size = zoom * sprite.size;
            let dst = Rect::new(position.x - view.x, position.y - view.y, dst_size, dst_size);
            renderer.draw_textured_rect(texture, src, dst);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{arcade_world, frame, place, sprite};
    use std::path::Path;
    use tilebrawl_asset::{MemoryTextureLoader, PixelImage};
    use tilebrawl_render::{DrawCall, RecordingRenderer};

    fn loader() -> MemoryTextureLoader {
        MemoryTextureLoader::new()
            .with_image("player.png", PixelImage::solid_color(100, 200, [255; 4]))
            .with_image("enemy.png", PixelImage::solid_color(110, 220, [255; 4]))
    }

    fn system() -> SpriteRenderSystem {
        SpriteRenderSystem::new(vec!["player.png".into(), "enemy.png".into()], 60)
    }

    #[test]
    fn row_advances_by_whole_frames_and_wraps() {
        // 15s over 60fps: one frame per 250ms
        let mut s = Sprite::new(0, 2, 15.0, 0, 0, 50);
        assert!(!animate(&mut s, 249, 60));
        assert_eq!(s.frame_y, 0);

        assert!(animate(&mut s, 250, 60));
        assert_eq!((s.frame_y, s.last_update_ms), (1, 250));

        // Three frames later: (1 + 3) mod 2
        assert!(animate(&mut s, 1000, 60));
        assert_eq!(s.frame_y, 0);
    }

    #[test]
    fn row_stays_in_range_for_any_advance() {
        for frames in 1..6 {
            for start in 0..frames {
                for now in [0u64, 1, 250, 777, 10_000, 86_400_000, u64::MAX] {
                    let mut s = Sprite::new(0, frames, 3.0, 0, start, 24);
                    animate(&mut s, now, 60);
                    assert!((0..frames).contains(&s.frame_y), "{frames} {start} {now}");
                }
            }
        }
    }

    #[test]
    fn action_rows_wrap_back_into_range() {
        let mut s = Sprite::new(0, 2, 15.0, 0, 3, 50);
        animate(&mut s, 250, 60);
        assert_eq!(s.frame_y, 0);
    }

    #[test]
    fn zero_duration_never_animates() {
        let mut s = Sprite::new(0, 4, 0.0, 0, 1, 24);
        for frame in 0..1000u64 {
            animate(&mut s, frame * 16, 60);
        }
        assert_eq!(s.frame_y, 1);
        assert_eq!(s.last_update_ms, 0);
    }

    #[test]
    fn update_animates_every_sprite() {
        let mut world = arcade_world();
        let (player, enemy) = (world.player.unwrap(), world.enemy.unwrap());

        // Enemy: 25s over 60fps is ~416ms per frame
        let mut system = system();
        system.update(&mut world, &frame(0.0, 300)).unwrap();
        assert_eq!(sprite(&world, player).frame_y, 1);
        assert_eq!(sprite(&world, enemy).frame_y, 0);

        system.update(&mut world, &frame(0.0, 420)).unwrap();
        assert_eq!(sprite(&world, enemy).frame_y, 1);
    }

    #[test]
    fn setup_loads_every_sheet() {
        let mut world = arcade_world();
        let mut loader = loader();
        let mut system = system();
        system.setup(&mut world, &mut loader).unwrap();

        assert_eq!(system.sheets().len(), 2);
        assert_eq!(
            loader.registry().lookup(Path::new("enemy.png")),
            Some(system.sheets()[1])
        );
    }

    #[test]
    fn missing_sheet_fails_setup() {
        let mut world = arcade_world();
        let mut loader = MemoryTextureLoader::new();
        let err = system().setup(&mut world, &mut loader).unwrap_err();
        assert!(matches!(err, SystemError::Asset(_)));
    }

    #[test]
    fn draws_relative_to_camera_with_zoom() {
        let mut world = arcade_world();
        let (player, enemy, camera) = (
            world.player.unwrap(),
            world.enemy.unwrap(),
            world.camera.unwrap(),
        );
        place(&mut world, camera, 100, 40);
        world.registry.component_mut::<Camera>(camera).unwrap().zoom = 2;
        {
            let s = world.registry.component_mut::<Sprite>(player).unwrap();
            s.frame_x = 1;
            s.frame_y = 1;
        }

        let mut system = system();
        system.setup(&mut world, &mut loader()).unwrap();
        let mut renderer = RecordingRenderer::new();
        system.render(&world, &mut renderer).unwrap();

        let sheets = system.sheets();
        assert_eq!(
            renderer.pending(),
            &[
                DrawCall {
                    texture: sheets[0],
                    src: Rect::new(50, 50, 50, 50),
                    dst: Rect::new(100, 210, 100, 100),
                },
                DrawCall {
                    texture: sheets[1],
                    src: Rect::new(0, 0, 55, 55),
                    dst: Rect::new(1000, 610, 110, 110),
                },
            ]
        );
        assert_eq!(
            world.registry.component::<Transform>(enemy).unwrap(),
            &Transform::new(1100, 650)
        );
    }

    #[test]
    fn unknown_sheet_index_is_an_error() {
        let mut world = arcade_world();
        let player = world.player.unwrap();
        world.registry.component_mut::<Sprite>(player).unwrap().sheet_index = 7;

        let mut system = system();
        system.setup(&mut world, &mut loader()).unwrap();
        let err = system
            .render(&world, &mut RecordingRenderer::new())
            .unwrap_err();
        assert!(matches!(err, SystemError::Invalid(_)));
    }
}
