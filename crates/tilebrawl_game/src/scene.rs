//! Scene: component registry, privileged handles and the frame loop

use crate::schedule::Schedule;
use thiserror::Error;
use tilebrawl_asset::{AssetError, TextureLoader};
use tilebrawl_core::components::Tag;
use tilebrawl_core::ecs::{Entity, SystemRole, World, WorldError};
use tilebrawl_core::time::{Clock, FrameClock, FrameTime};
use tilebrawl_metrics::{Counter, SystemProfiler};
use tilebrawl_render::Renderer;
use tilebrawl_services::input::{InputEvent, InputSource};

/// Failure inside a single system call.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("scene has no {0} entity")]
    MissingHandle(&'static str),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene must be set up before running frames")]
    NotSetUp,

    #[error("scene is already set up")]
    AlreadySetUp,

    #[error("setup finished without a {0} entity")]
    MissingRole(&'static str),

    #[error("{role} system '{system}' failed: {source}")]
    System {
        system: String,
        role: SystemRole,
        #[source]
        source: SystemError,
    },
}

/// What systems see: the registry plus the three privileged handles.
#[derive(Default)]
pub struct SceneWorld {
    pub registry: World,
    pub player: Option<Entity>,
    pub enemy: Option<Entity>,
    pub camera: Option<Entity>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self) -> Result<Entity, SystemError> {
        self.player.ok_or(SystemError::MissingHandle(Tag::PLAYER))
    }

    pub fn enemy(&self) -> Result<Entity, SystemError> {
        self.enemy.ok_or(SystemError::MissingHandle(Tag::ENEMY))
    }

    pub fn camera(&self) -> Result<Entity, SystemError> {
        self.camera.ok_or(SystemError::MissingHandle(Tag::CAMERA))
    }
}

/// Summary of one executed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub delta_seconds: f64,
    pub now_ms: u64,
    /// Events drained from the input source, `Quit` included.
    pub events: usize,
    pub quit_requested: bool,
}

pub struct Scene {
    world: SceneWorld,
    schedule: Schedule,
    frame_clock: FrameClock,
    profiler: SystemProfiler,
    counters: Counter,
    set_up: bool,
}

impl Scene {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            world: SceneWorld::new(),
            schedule,
            frame_clock: FrameClock::new(),
            profiler: SystemProfiler::new(),
            counters: Counter::new(),
            set_up: false,
        }
    }

    pub fn world(&self) -> &SceneWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SceneWorld {
        &mut self.world
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }

    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_clock.frame_count()
    }

    /// Run every setup system once, in registration order.
    pub fn setup(&mut self, loader: &mut dyn TextureLoader) -> Result<(), SceneError> {
        if self.set_up {
            return Err(SceneError::AlreadySetUp);
        }

        for system in self.schedule.setup_systems() {
            let mut system = system.borrow_mut();
            let name = system.name().to_string();
            let world = &mut self.world;
            self.profiler
                .time_system(&name, || system.setup(world, &mut *loader))
                .map_err(|source| SceneError::System {
                    system: name,
                    role: SystemRole::Setup,
                    source,
                })?;
        }

        for (role, handle) in [
            (Tag::PLAYER, self.world.player),
            (Tag::ENEMY, self.world.enemy),
            (Tag::CAMERA, self.world.camera),
        ] {
            match handle {
                Some(entity) if self.world.registry.is_alive(entity) => {}
                _ => return Err(SceneError::MissingRole(role)),
            }
        }

        self.set_up = true;
        tracing::info!(
            entities = self.world.registry.entity_count(),
            systems = SystemRole::ALL
                .iter()
                .map(|&role| self.schedule.len(role))
                .sum::<usize>(),
            "scene set up"
        );
        Ok(())
    }

    /// Execute one frame: input, update, render.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        clock: &dyn Clock,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameReport, SceneError> {
        if !self.set_up {
            return Err(SceneError::NotSetUp);
        }

        let mut report = FrameReport::default();
        while let Some(event) = input.poll() {
            report.events += 1;
            if event == InputEvent::Quit {
                report.quit_requested = true;
                continue;
            }
            self.dispatch_input(&event)?;
        }
        self.counters.increment("input.events", report.events as u64);

        let time = self.frame_clock.advance(clock.now_ms());
        report.frame = time.frame;
        report.delta_seconds = time.delta_seconds;
        report.now_ms = time.now_ms;

        self.dispatch_update(&time)?;

        renderer.clear();
        self.dispatch_render(renderer)?;
        renderer.present();

        self.counters.increment("frames", 1);
        tracing::trace!(frame = time.frame, dt = time.delta_seconds, "frame done");
        Ok(report)
    }

    fn dispatch_input(&mut self, event: &InputEvent) -> Result<(), SceneError> {
        for system in self.schedule.input_systems() {
            let mut system = system.borrow_mut();
            let name = system.name().to_string();
            let world = &mut self.world;
            self.profiler
                .time_system(&name, || system.handle(world, event))
                .map_err(|source| SceneError::System {
                    system: name,
                    role: SystemRole::Input,
                    source,
                })?;
        }
        Ok(())
    }

    fn dispatch_update(&mut self, time: &FrameTime) -> Result<(), SceneError> {
        for system in self.schedule.update_systems() {
            let mut system = system.borrow_mut();
            let name = system.name().to_string();
            let world = &mut self.world;
            self.profiler
                .time_system(&name, || system.update(world, time))
                .map_err(|source| SceneError::System {
                    system: name,
                    role: SystemRole::Update,
                    source,
                })?;
        }
        Ok(())
    }

    fn dispatch_render(&mut self, renderer: &mut dyn Renderer) -> Result<(), SceneError> {
        for system in self.schedule.render_systems() {
            let mut system = system.borrow_mut();
            let name = system.name().to_string();
            let world = &self.world;
            self.profiler
                .time_system(&name, || system.render(world, &mut *renderer))
                .map_err(|source| SceneError::System {
                    system: name,
                    role: SystemRole::Render,
                    source,
                })?;
        }
        Ok(())
    }
}
