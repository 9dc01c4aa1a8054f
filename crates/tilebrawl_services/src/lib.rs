//! Tilebrawl Services Layer
//!
//! Platform-facing services: input events and sources, settings.

pub mod input;
pub mod settings;

pub use input::{InputEvent, InputSource, KeyCode, ScriptedEvent, ScriptedInput};
pub use settings::{Settings, SettingsError};
