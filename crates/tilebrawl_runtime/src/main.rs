//! Tilebrawl Runtime
//!
//! Headless host: loads settings and assets, replays the scripted input and
//! runs the arcade scene for a fixed number of frames.

mod options;

use anyhow::{Context, Result};
use clap::Parser;
use options::Options;
use std::path::Path;
use std::time::{Duration, Instant};
use tilebrawl_asset::ImageTextureLoader;
use tilebrawl_core::ecs::SystemRole;
use tilebrawl_core::time::{Clock, FixedStepClock, SystemClock};
use tilebrawl_game::{arcade_schedule, ArcadeSystems, Scene};
use tilebrawl_metrics::FrameTimer;
use tilebrawl_render::{RecordingRenderer, Renderer, SoftwareRenderer};
use tilebrawl_services::input::ScriptedInput;
use tilebrawl_services::settings::Settings;
use tracing_subscriber::EnvFilter;

/// What a headless run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub quit_requested: bool,
    pub score: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = Options::parse();

    tracing::info!("Tilebrawl v{}", tilebrawl_core::VERSION);
    let settings = load_settings(&options)?;
    let summary = run(&settings, options.screenshot.as_deref(), options.realtime)?;
    tracing::info!(
        frames = summary.frames,
        quit = summary.quit_requested,
        score = %summary.score,
        "run finished"
    );
    Ok(())
}

fn load_settings(options: &Options) -> Result<Settings> {
    let mut settings = match &options.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(root) = &options.assets {
        settings.assets = settings.assets.rooted_at(root);
    }
    if let Some(frames) = options.frames {
        settings.simulation.frames = frames;
    }
    Ok(settings)
}

/// Set the scene up and run it, writing the last frame to `screenshot` when
/// given. `realtime` paces frames on the wall clock.
fn run(settings: &Settings, screenshot: Option<&Path>, realtime: bool) -> Result<RunSummary> {
    settings.validate()?;
    let ArcadeSystems {
        schedule,
        knockdown,
    } = arcade_schedule(settings)?;
    let mut scene = Scene::new(schedule);
    for role in SystemRole::ALL {
        for (handle, descriptor) in scene.schedule().registry().iter(role) {
            tracing::debug!(%handle, system = descriptor.name(), "scheduled");
        }
    }

    let mut loader = ImageTextureLoader::new();
    scene.setup(&mut loader).context("scene setup failed")?;

    let fixed = FixedStepClock::at_fps(settings.simulation.target_fps);
    let wall = SystemClock::new();
    let (clock, pace): (&dyn Clock, Option<Duration>) = if realtime {
        let period = Duration::from_secs(1) / settings.simulation.target_fps;
        (&wall, Some(period))
    } else {
        (&fixed, None)
    };

    let (frames, quit_requested) = match screenshot {
        Some(path) => {
            let mut renderer = SoftwareRenderer::new(
                u32::try_from(settings.window.width)?,
                u32::try_from(settings.window.height)?,
            );
            for (handle, pixels) in loader.textures() {
                renderer.add_texture(handle, pixels.clone());
            }
            let outcome = run_frames(&mut scene, settings, clock, pace, &mut renderer)?;
            renderer
                .save_png(path)
                .with_context(|| format!("writing screenshot {}", path.display()))?;
            tracing::info!(path = %path.display(), "screenshot written");
            outcome
        }
        None => {
            let mut renderer = RecordingRenderer::new();
            let outcome = run_frames(&mut scene, settings, clock, pace, &mut renderer)?;
            tracing::debug!(draws = renderer.total_draws(), "draw calls recorded");
            outcome
        }
    };

    for (name, timing) in scene.profiler().report() {
        tracing::debug!(
            system = %name,
            calls = timing.calls,
            average_us = timing.average().as_micros() as u64,
            max_us = timing.max.as_micros() as u64,
            "system timing"
        );
    }
    for (name, value) in scene.counters().iter() {
        tracing::debug!(counter = name, value, "counter");
    }

    let score = knockdown.borrow().score().to_string();
    Ok(RunSummary {
        frames,
        quit_requested,
        score,
    })
}

/// Run frames until the configured count or a quit request. With `pace`,
/// each frame is stretched to at least that long.
fn run_frames(
    scene: &mut Scene,
    settings: &Settings,
    clock: &dyn Clock,
    pace: Option<Duration>,
    renderer: &mut dyn Renderer,
) -> Result<(u64, bool)> {
    let mut input = ScriptedInput::from_script(&settings.input_script);
    let mut timer = FrameTimer::new(settings.simulation.target_fps as usize);

    let mut frames = 0;
    while frames < settings.simulation.frames {
        let started = Instant::now();
        timer.begin();
        let report = scene.run(&mut input, clock, renderer)?;
        timer.end();
        frames += 1;

        if report.quit_requested {
            tracing::info!(frame = report.frame, "quit requested");
            return Ok((frames, true));
        }
        if frames % u64::from(settings.simulation.target_fps) == 0 {
            tracing::debug!(
                frame = report.frame,
                frame_ms = timer.frame_time_ms(),
                "frame timing"
            );
        }
        if let Some(period) = pace {
            std::thread::sleep(period.saturating_sub(started.elapsed()));
        }
    }
    Ok((frames, false))
}
