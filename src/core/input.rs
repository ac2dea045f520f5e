//! # Input Dispatcher
//!
//! Translates raw key identifiers into engine commands.
//!
//! Keys are named the way browsers name them in `KeyboardEvent.key`
//! (`"ArrowLeft"`, `"Enter"`, `" "`, ...), plus the legacy and remote-control
//! aliases TV platforms emit. Repeat events are dropped before lookup: one
//! physical press is one command, however long the key is held.

use std::collections::HashMap;

use crate::core::selector::Direction;

/// What a recognized key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    Activate,
    Back,
    Refresh,
}

/// A raw key-down as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub repeat: bool,
}

impl KeyEvent {
    pub fn press(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            repeat: false,
        }
    }

    pub fn repeat(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            repeat: true,
        }
    }
}

/// Result of offering a key to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours (or a repeat); let the host handle it normally.
    Ignored,
    Handled {
        command: Command,
        prevent_default: bool,
    },
}

/// Lookup table from key identifier to command.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<String, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self {
            bindings: HashMap::new(),
        };
        map.bind_all(["ArrowLeft", "Left"], Command::Move(Direction::Left));
        map.bind_all(["ArrowRight", "Right"], Command::Move(Direction::Right));
        map.bind_all(["ArrowUp", "Up"], Command::Move(Direction::Up));
        map.bind_all(["ArrowDown", "Down"], Command::Move(Direction::Down));
        map.bind_all(["Enter", "OK", " "], Command::Activate);
        // F1 is the red button on most remotes
        map.bind_all(["Backspace", "Escape", "Back", "F1"], Command::Back);
        map.bind_all(["F5"], Command::Refresh);
        map
    }
}

impl KeyMap {
    pub fn bind(&mut self, key: impl Into<String>, command: Command) {
        self.bindings.insert(key.into(), command);
    }

    pub fn bind_all<I, S>(&mut self, keys: I, command: Command)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self.bind(key, command);
        }
    }

    pub fn lookup(&self, key: &str) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    /// Offers `event` to the map. Repeats and unknown keys are ignored.
    pub fn dispatch(&self, event: &KeyEvent) -> KeyOutcome {
        if event.repeat {
            return KeyOutcome::Ignored;
        }
        match self.lookup(&event.key) {
            // every bound key is fully ours, including the reload key so the
            // host does not reload a second time
            Some(command) => KeyOutcome::Handled {
                command,
                prevent_default: true,
            },
            None => KeyOutcome::Ignored,
        }
    }
}
