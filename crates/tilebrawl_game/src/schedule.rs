//! System roles and the per-role schedule
//!
//! A system implements any subset of the four role traits. The schedule
//! keeps one ordered list per role; a system taking part in several roles
//! is shared between those lists.

use crate::scene::{SceneWorld, SystemError};
use std::cell::RefCell;
use std::rc::Rc;
use tilebrawl_asset::TextureLoader;
use tilebrawl_core::ecs::{
    SystemDescriptor, SystemHandle, SystemRegistrationError, SystemRegistry, SystemRole,
};
use tilebrawl_core::time::FrameTime;
use tilebrawl_render::Renderer;
use tilebrawl_services::input::InputEvent;

/// Shared base of every role trait.
pub trait System {
    /// Name used for registration, logs and profiling.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Runs once, before the first frame.
pub trait SetupSystem: System {
    fn setup(
        &mut self,
        world: &mut SceneWorld,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SystemError>;
}

/// Runs once per polled input event.
pub trait InputSystem: System {
    fn handle(&mut self, world: &mut SceneWorld, event: &InputEvent) -> Result<(), SystemError>;
}

/// Runs once per frame, after input.
pub trait UpdateSystem: System {
    fn update(&mut self, world: &mut SceneWorld, time: &FrameTime) -> Result<(), SystemError>;
}

/// Runs once per frame, after updates. Rendering never mutates the world.
pub trait RenderSystem: System {
    fn render(&mut self, world: &SceneWorld, renderer: &mut dyn Renderer)
        -> Result<(), SystemError>;
}

/// Wrap a system for registration under one or more roles.
pub fn shared<S>(system: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(system))
}

/// Ordered per-role system lists.
#[derive(Default)]
pub struct Schedule {
    registry: SystemRegistry,
    setup: Vec<Rc<RefCell<dyn SetupSystem>>>,
    input: Vec<Rc<RefCell<dyn InputSystem>>>,
    update: Vec<Rc<RefCell<dyn UpdateSystem>>>,
    render: Vec<Rc<RefCell<dyn RenderSystem>>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_setup<S: SetupSystem + 'static>(
        &mut self,
        system: Rc<RefCell<S>>,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let handle = self.register(&*system.borrow(), SystemRole::Setup)?;
        self.setup.push(system);
        Ok(handle)
    }

    pub fn add_input<S: InputSystem + 'static>(
        &mut self,
        system: Rc<RefCell<S>>,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let handle = self.register(&*system.borrow(), SystemRole::Input)?;
        self.input.push(system);
        Ok(handle)
    }

    pub fn add_update<S: UpdateSystem + 'static>(
        &mut self,
        system: Rc<RefCell<S>>,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let handle = self.register(&*system.borrow(), SystemRole::Update)?;
        self.update.push(system);
        Ok(handle)
    }

    pub fn add_render<S: RenderSystem + 'static>(
        &mut self,
        system: Rc<RefCell<S>>,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let handle = self.register(&*system.borrow(), SystemRole::Render)?;
        self.render.push(system);
        Ok(handle)
    }

    /// Registration bookkeeping: names, handles and component access.
    pub fn registry(&self) -> &SystemRegistry {
        &self.registry
    }

    pub fn len(&self, role: SystemRole) -> usize {
        self.registry.len(role)
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub(crate) fn setup_systems(&self) -> &[Rc<RefCell<dyn SetupSystem>>] {
        &self.setup
    }

    pub(crate) fn input_systems(&self) -> &[Rc<RefCell<dyn InputSystem>>] {
        &self.input
    }

    pub(crate) fn update_systems(&self) -> &[Rc<RefCell<dyn UpdateSystem>>] {
        &self.update
    }

    pub(crate) fn render_systems(&self) -> &[Rc<RefCell<dyn RenderSystem>>] {
        &self.render
    }

    fn register<S: System + ?Sized>(
        &mut self,
        system: &S,
        role: SystemRole,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let handle = self
            .registry
            .register(SystemDescriptor::new(system.name(), role))?;
        tracing::debug!(system = system.name(), %handle, "system registered");
        Ok(handle)
    }
}
