use std::collections::HashSet;

use glam::{DVec2, Vec2};

use crate::camera::CameraMovement;

/// Identifier for a physical keyboard key the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Character(char),
}

impl KeyCode {
    /// Letter key; the character is normalized to upper case.
    pub fn letter(ch: char) -> Self {
        Self::Character(ch.to_ascii_uppercase())
    }
}

/// Keys polled once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub quit: KeyCode,
}

impl KeyBindings {
    /// Movement keys paired with the camera step they trigger, in poll order.
    pub fn movement(&self) -> [(KeyCode, CameraMovement); 4] {
        [
            (self.forward, CameraMovement::Forward),
            (self.backward, CameraMovement::Backward),
            (self.left, CameraMovement::Left),
            (self.right, CameraMovement::Right),
        ]
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::letter('W'),
            backward: KeyCode::letter('S'),
            left: KeyCode::letter('A'),
            right: KeyCode::letter('D'),
            quit: KeyCode::Escape,
        }
    }
}

/// Keyboard and cursor state owned by the render thread.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    bindings: KeyBindings,
    last_cursor: DVec2,
    first_mouse: bool,
}

impl InputState {
    /// Starts with the cursor assumed at `initial_cursor` (usually the window
    /// centre) and the first-sample flag armed.
    pub fn new(initial_cursor: DVec2) -> Self {
        Self::with_bindings(initial_cursor, KeyBindings::default())
    }

    pub fn with_bindings(initial_cursor: DVec2, bindings: KeyBindings) -> Self {
        Self {
            keys: HashSet::new(),
            bindings,
            last_cursor: initial_cursor,
            first_mouse: true,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_key_down(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub fn set_key_up(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Forgets every held key, e.g. when the window loses focus and the
    /// matching release events will never arrive.
    pub fn release_all_keys(&mut self) {
        self.keys.clear();
    }

    /// Re-arms the first-sample flag so the next cursor sample only seeds
    /// the tracker instead of producing a jump.
    pub fn reset_cursor_tracking(&mut self) {
        self.first_mouse = true;
    }

    pub fn last_cursor(&self) -> DVec2 {
        self.last_cursor
    }

    /// Records a cursor sample and returns the look offset it produces.
    ///
    /// The Y component is inverted: screen space grows downward while a
    /// positive pitch looks up.
    pub fn cursor_moved(&mut self, position: DVec2) -> Vec2 {
        if self.first_mouse {
            self.last_cursor = position;
            self.first_mouse = false;
        }

        let x_offset = position.x - self.last_cursor.x;
        let y_offset = self.last_cursor.y - position.y;
        self.last_cursor = position;

        Vec2::new(x_offset as f32, y_offset as f32)
    }

    /// Camera steps for the movement keys currently held down.
    pub fn held_movements(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        self.bindings
            .movement()
            .into_iter()
            .filter(|(key, _)| self.is_key_down(*key))
            .map(|(_, movement)| movement)
    }

    pub fn quit_requested(&self) -> bool {
        self.is_key_down(self.bindings.quit)
    }
}
