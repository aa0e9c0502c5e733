//! Keyboard bindings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// A raw keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Press(Key),
    Release(Key),
}

/// Event pattern an action can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    Press(Key),
    /// Release of any key
    AnyRelease,
}

/// What a binding does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    StopMove,
    Launch,
}

#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    bindings: HashMap<Binding, Action>,
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paddle controls: arrows to move, releasing any key stops
    pub fn paddle_controls() -> Self {
        let mut bindings = Self::new();
        bindings.bind(Binding::Press(Key::Left), Action::MoveLeft);
        bindings.bind(Binding::Press(Key::Right), Action::MoveRight);
        bindings.bind(Binding::AnyRelease, Action::StopMove);
        bindings
    }

    /// Bind `action`, replacing whatever was bound to `binding`
    pub fn bind(&mut self, binding: Binding, action: Action) {
        self.bindings.insert(binding, action);
    }

    pub fn unbind(&mut self, binding: Binding) -> Option<Action> {
        self.bindings.remove(&binding)
    }

    /// Action bound to `event`, if any
    pub fn action_for(&self, event: KeyEvent) -> Option<Action> {
        let binding = match event {
            KeyEvent::Press(key) => Binding::Press(key),
            KeyEvent::Release(_) => Binding::AnyRelease,
        };
        self.bindings.get(&binding).copied()
    }
}
