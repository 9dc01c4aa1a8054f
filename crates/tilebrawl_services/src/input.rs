//! Input events and input sources
//!
//! The scene drains an [`InputSource`] once per frame until it returns
//! `None`. Sources decide where events come from: a platform event queue,
//! a recorded script, or a test.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Keyboard keys the game reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    D,
    W,
    S,
    O,
    P,
    Other(u32),
}

/// One polled platform event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Quit,
}

/// Source of input events for the frame loop.
pub trait InputSource {
    /// Next pending event, or `None` when the queue is drained for this frame.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// One entry of a recorded input script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub event: InputEvent,
}

/// Replays events keyed by frame number.
///
/// Each `None` returned from [`InputSource::poll`] ends the current frame,
/// so a scene that drains the source once per frame sees every event on the
/// frame it was scripted for.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frame: u64,
    pending: BTreeMap<u64, VecDeque<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event delivered on the first frame, in order.
    pub fn immediate(events: impl IntoIterator<Item = InputEvent>) -> Self {
        let mut input = Self::new();
        for event in events {
            input.push(0, event);
        }
        input
    }

    pub fn from_script(script: &[ScriptedEvent]) -> Self {
        let mut input = Self::new();
        for entry in script {
            input.push(entry.frame, entry.event);
        }
        input
    }

    /// Queue an event for a frame. Events for past frames are never delivered.
    pub fn push(&mut self, frame: u64, event: InputEvent) {
        self.pending.entry(frame).or_default().push_back(event);
    }

    /// Frame the next `poll` delivers events for.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Events not yet delivered, across all frames.
    pub fn remaining(&self) -> usize {
        self.pending
            .range(self.frame..)
            .map(|(_, queue)| queue.len())
            .sum()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        if let Some(event) = self
            .pending
            .get_mut(&self.frame)
            .and_then(|queue| queue.pop_front())
        {
            return Some(event);
        }
        self.pending.remove(&self.frame);
        self.frame += 1;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(input: &mut impl InputSource) -> Vec<InputEvent> {
        std::iter::from_fn(|| input.poll()).collect()
    }

    #[test]
    fn events_arrive_on_their_frame() {
        let mut input = ScriptedInput::new();
        input.push(0, InputEvent::KeyDown(KeyCode::D));
        input.push(2, InputEvent::KeyUp(KeyCode::D));
        input.push(0, InputEvent::KeyDown(KeyCode::W));

        assert_eq!(
            drain(&mut input),
            vec![
                InputEvent::KeyDown(KeyCode::D),
                InputEvent::KeyDown(KeyCode::W)
            ]
        );
        assert_eq!(drain(&mut input), vec![]);
        assert_eq!(drain(&mut input), vec![InputEvent::KeyUp(KeyCode::D)]);
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.frame(), 3);
    }

    #[test]
    fn script_deserializes_from_json() {
        let json = r#"[
            {"frame": 1, "event": {"KeyDown": "O"}},
            {"frame": 1, "event": "Quit"}
        ]"#;
        let script: Vec<ScriptedEvent> = serde_json::from_str(json).unwrap();
        let mut input = ScriptedInput::from_script(&script);

        assert_eq!(input.remaining(), 2);
        assert!(input.poll().is_none());
        assert_eq!(input.poll(), Some(InputEvent::KeyDown(KeyCode::O)));
        assert_eq!(input.poll(), Some(InputEvent::Quit));
    }
}
