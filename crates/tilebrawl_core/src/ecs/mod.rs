//! Entity Component System core types.
//!
//! A `World` owns one sparse column per component kind, indexed by entity
//! index. Entities are plain value handles; systems look components up
//! through the world on every access and never hold references across calls.

mod component;
mod entity;
mod macros;
mod storage;
mod system_descriptor;
mod system_handle;
mod system_registration_error;
mod system_registry;
mod world;

pub use component::{Component, ComponentId, ComponentMeta};
pub use entity::Entity;
pub use storage::Column;
pub use system_descriptor::{SystemDescriptor, SystemRole};
pub use system_handle::SystemHandle;
pub use system_registration_error::SystemRegistrationError;
pub use system_registry::SystemRegistry;
pub use world::{EntityMut, World, WorldError};
