//! Keyboard tracking
//!
//! Hosts feed raw key names (as reported by the platform, e.g. `"ArrowLeft"`,
//! `"a"`, `" "`) into a [`KeyTracker`]. Once per frame the tracker turns the
//! held set and the presses since the last frame into a [`TickInput`].

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
    Space,
    U,
    M,
    R,
    I,
    Enter,
    Escape,
}

impl Key {
    /// Parse a platform key name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "arrowleft" | "left" => Key::ArrowLeft,
            "arrowright" | "right" => Key::ArrowRight,
            "arrowup" | "up" => Key::ArrowUp,
            "arrowdown" | "down" => Key::ArrowDown,
            "a" => Key::A,
            "d" => Key::D,
            "w" => Key::W,
            "s" => Key::S,
            " " | "space" | "spacebar" => Key::Space,
            "u" => Key::U,
            "m" => Key::M,
            "r" => Key::R,
            "i" => Key::I,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// Held keys plus the presses not yet consumed by a frame
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashSet<Key>,
    pressed: Vec<Key>,
    idle_mode: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Auto-repeat of an already held key is not a new press.
    pub fn key_down(&mut self, name: &str) {
        let Some(key) = Key::from_name(name) else {
            return;
        };
        if self.held.insert(key) {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.held.remove(&key);
        }
    }

    /// Drop all held keys (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Build this frame's input and consume pending presses
    pub fn frame_input(&mut self) -> TickInput {
        let held = |a: Key, b: Key| self.held.contains(&a) || self.held.contains(&b);
        let mut input = TickInput {
            left: held(Key::A, Key::ArrowLeft),
            right: held(Key::D, Key::ArrowRight),
            up: held(Key::W, Key::ArrowUp),
            down: held(Key::S, Key::ArrowDown),
            fire: self.held.contains(&Key::Space),
            ..Default::default()
        };

        for key in self.pressed.drain(..) {
            match key {
                Key::Space => input.start = true,
                // 's' is both move-down (held) and shield (press)
                Key::S => input.shield = true,
                Key::U => input.toggle_menu = true,
                Key::M => input.toggle_sound = true,
                Key::R => input.reset = true,
                Key::ArrowUp => input.menu_up = true,
                Key::ArrowDown => input.menu_down = true,
                Key::Enter => input.menu_confirm = true,
                Key::Escape => input.menu_cancel = true,
                Key::I => {
                    self.idle_mode = !self.idle_mode;
                    log::info!("Idle mode: {}", self.idle_mode);
                }
                _ => {}
            }
        }
        input.idle_mode = self.idle_mode;
        input
    }
}
