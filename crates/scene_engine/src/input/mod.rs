//! Input events delivered to systems
//!
//! The host (window layer, test harness, CLI runner) pushes events into the
//! world's [`InputQueue`]; systems read them during the next update and the
//! queue is cleared once the frame's systems have run.

use serde::{Deserialize, Serialize};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// P key
    P,
    /// S key
    S,
    /// W key
    W,
    /// Backquote / tilde key
    Backquote,
    /// Space bar
    Space,
    /// Escape key
    Escape,
    /// Enter key
    Enter,
    /// F1 key
    F1,
}

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key went down this frame
    KeyPressed(KeyCode),
    /// Key went up this frame
    KeyReleased(KeyCode),
}

/// Events collected since the last world update
#[derive(Debug, Default, Clone)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event for the next update
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Whether `key` was pressed since the last clear
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.events.contains(&InputEvent::KeyPressed(key))
    }

    /// Pending events in arrival order
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all pending events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_was_pressed_ignores_releases() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyReleased(KeyCode::P));
        assert!(!queue.was_pressed(KeyCode::P));

        queue.push(InputEvent::KeyPressed(KeyCode::P));
        assert!(queue.was_pressed(KeyCode::P));
        assert_eq!(queue.events().len(), 2);
    }

    #[test]
    fn test_clear_empties_queue() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyPressed(KeyCode::Space));
        queue.clear();
        assert!(queue.is_empty());
    }
}
