//! Key binding with toggle or hold activation.

use scrim_core::Key;
use serde::{Deserialize, Serialize};

/// How a keybind activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeybindMode {
    /// Each press of the bound key flips the active flag.
    Toggle,
    /// Active while the bound key is held down.
    Hold,
}

/// The user-visible value of a keybind: the bound key and whether the bind
/// is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindValue {
    pub key: Option<Key>,
    pub active: bool,
}

/// State for a keybind control.
///
/// Clicking the control enters capture mode; the next key press becomes the
/// bound key without activating it. Outside capture, presses of the bound
/// key drive the active flag according to the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeybindState {
    key: Option<Key>,
    mode: KeybindMode,
    active: bool,
    capturing: bool,
}

impl KeybindState {
    pub fn new(key: Option<Key>, mode: KeybindMode) -> Self {
        Self {
            key,
            mode,
            active: false,
            capturing: false,
        }
    }

    pub fn value(&self) -> KeybindValue {
        KeybindValue {
            key: self.key,
            active: self.active,
        }
    }

    pub fn key(&self) -> Option<Key> {
        self.key
    }

    pub fn mode(&self) -> KeybindMode {
        self.mode
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether the control is waiting for the next key press to rebind.
    pub fn capturing(&self) -> bool {
        self.capturing
    }

    pub fn set_key(&mut self, key: Option<Key>) {
        self.key = key;
    }

    pub(crate) fn toggle_capture(&mut self) {
        self.capturing = !self.capturing;
    }

    /// Handle a key press. Returns the new value when the active flag
    /// changed.
    pub(crate) fn key_down(&mut self, key: Key) -> Option<KeybindValue> {
        if self.capturing {
            self.key = Some(key);
            self.capturing = false;
            log::trace!("keybind captured {key:?}");
            return None;
        }
        if self.key != Some(key) {
            return None;
        }
        match self.mode {
            KeybindMode::Toggle => {
                self.active = !self.active;
                Some(self.value())
            }
            KeybindMode::Hold => {
                if self.active {
                    None
                } else {
                    self.active = true;
                    Some(self.value())
                }
            }
        }
    }

    /// Handle a key release. Only hold-mode binds deactivate here.
    pub(crate) fn key_up(&mut self, key: Key) -> Option<KeybindValue> {
        if self.mode == KeybindMode::Hold && self.active && self.key == Some(key) {
            self.active = false;
            return Some(self.value());
        }
        None
    }

    /// Restore a persisted value. Capture state never persists.
    pub(crate) fn restore(&mut self, value: KeybindValue) {
        self.key = value.key;
        self.active = value.active;
        self.capturing = false;
    }

    pub(crate) fn extract(&mut self, previous: &KeybindState) {
        self.key = previous.key;
        self.active = previous.active;
    }
}
