//! Knockdown score kept from action key presses.

use crate::scene::{SceneWorld, SystemError};
use crate::schedule::{InputSystem, System};
use std::fmt;
use tilebrawl_services::input::{InputEvent, KeyCode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnockdownScore {
    pub player: u32,
    pub opponent: u32,
}

impl fmt::Display for KnockdownScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.player, self.opponent)
    }
}

/// Counts O presses for the player and P presses for the opponent.
///
/// Every key-down counts, autorepeat included.
#[derive(Default)]
pub struct KnockdownPointSystem {
    score: KnockdownScore,
}

impl KnockdownPointSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> KnockdownScore {
        self.score
    }
}

impl System for KnockdownPointSystem {
    fn name(&self) -> &str {
        "knockdown_points"
    }
}

impl InputSystem for KnockdownPointSystem {
    fn handle(&mut self, _world: &mut SceneWorld, event: &InputEvent) -> Result<(), SystemError> {
        match event {
            InputEvent::KeyDown(KeyCode::O) => self.score.player += 1,
            InputEvent::KeyDown(KeyCode::P) => self.score.opponent += 1,
            _ => return Ok(()),
        }
        tracing::info!(score = %self.score, "points");
        Ok(())
    }
}
