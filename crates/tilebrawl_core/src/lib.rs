//! Tilebrawl Core
//!
//! Contains the fundamental simulation pieces:
//! - Entity Component System (ECS)
//! - Gameplay components
//! - System descriptors and registry
//! - Frame time and clocks

pub mod components;
pub mod ecs;
pub mod time;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
