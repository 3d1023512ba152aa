//! The typed value-control family.
//!
//! Each control is a leaf component owning one typed value behind the
//! [`ControlState`] tag. Typed lookups validate the tag through
//! [`FromControl`] instead of inspecting runtime types.

mod button;
mod checkbox;
mod keybind;
mod list;
mod slider;

pub use button::ButtonState;
pub use checkbox::CheckboxState;
pub use keybind::{KeybindMode, KeybindState, KeybindValue};
pub use list::ListState;
pub use slider::SliderState;

use std::fmt;

use scrim_core::{InputMessage, Key, MessageKind, Point};
use serde_json::Value;

use crate::settings::{PersistenceFailure, SettingsPath, SettingsStore, StoreError};
use crate::theme::Theme;

// =============================================================================
// Value kinds and snapshots
// =============================================================================

/// Declared kind tag of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Slider,
    Checkbox,
    List,
    Keybind,
    Button,
    Separator,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Slider => "slider",
            ValueKind::Checkbox => "checkbox",
            ValueKind::List => "list",
            ValueKind::Keybind => "keybind",
            ValueKind::Button => "button",
            ValueKind::Separator => "separator",
        };
        f.write_str(name)
    }
}

/// Snapshot of a control's value, as carried by change events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Slider(i32),
    Checkbox(bool),
    List(usize),
    Keybind(KeybindValue),
}

/// Types readable out of a control through a typed lookup.
///
/// The implementations tie each Rust type to one declared [`ValueKind`]:
/// `i32` to sliders, `bool` to checkboxes, `usize` to list selections and
/// [`KeybindValue`] to keybinds.
pub trait FromControl: Sized {
    /// The kind this type reads from, used in mismatch errors.
    const KIND: ValueKind;

    fn from_state(state: &ControlState) -> Option<Self>;
}

impl FromControl for i32 {
    const KIND: ValueKind = ValueKind::Slider;

    fn from_state(state: &ControlState) -> Option<Self> {
        match state {
            ControlState::Slider(slider) => Some(slider.value()),
            _ => None,
        }
    }
}

impl FromControl for bool {
    const KIND: ValueKind = ValueKind::Checkbox;

    fn from_state(state: &ControlState) -> Option<Self> {
        match state {
            ControlState::Checkbox(checkbox) => Some(checkbox.checked()),
            _ => None,
        }
    }
}

impl FromControl for usize {
    const KIND: ValueKind = ValueKind::List;

    fn from_state(state: &ControlState) -> Option<Self> {
        match state {
            ControlState::List(list) => Some(list.index()),
            _ => None,
        }
    }
}

impl FromControl for KeybindValue {
    const KIND: ValueKind = ValueKind::Keybind;

    fn from_state(state: &ControlState) -> Option<Self> {
        match state {
            ControlState::Keybind(keybind) => Some(keybind.value()),
            _ => None,
        }
    }
}

// =============================================================================
// ControlState
// =============================================================================

/// Per-kind state behind a control.
#[derive(Debug)]
pub enum ControlState {
    Slider(SliderState),
    Checkbox(CheckboxState),
    List(ListState),
    Keybind(KeybindState),
    Button(ButtonState),
    Separator,
}

impl ControlState {
    pub fn kind(&self) -> ValueKind {
        match self {
            ControlState::Slider(_) => ValueKind::Slider,
            ControlState::Checkbox(_) => ValueKind::Checkbox,
            ControlState::List(_) => ValueKind::List,
            ControlState::Keybind(_) => ValueKind::Keybind,
            ControlState::Button(_) => ValueKind::Button,
            ControlState::Separator => ValueKind::Separator,
        }
    }

    /// Whether this kind participates in persistence.
    pub(crate) fn persisted(&self) -> bool {
        !matches!(self, ControlState::Button(_) | ControlState::Separator)
    }

    pub(crate) fn to_stored(&self) -> Option<Value> {
        match self {
            ControlState::Slider(slider) => Some(Value::from(slider.value())),
            ControlState::Checkbox(checkbox) => Some(Value::from(checkbox.checked())),
            ControlState::List(list) => Some(Value::from(list.index() as u64)),
            ControlState::Keybind(keybind) => serde_json::to_value(keybind.value()).ok(),
            ControlState::Button(_) | ControlState::Separator => None,
        }
    }

    /// Apply a persisted value, clamping it into the control's current
    /// constraints instead of rejecting it.
    pub(crate) fn apply_stored(&mut self, value: Value) -> Result<(), StoreError> {
        match self {
            ControlState::Slider(slider) => {
                slider.set_value(serde_json::from_value(value)?);
            }
            ControlState::Checkbox(checkbox) => {
                checkbox.set_checked(serde_json::from_value(value)?);
            }
            ControlState::List(list) => {
                list.set_index(serde_json::from_value(value)?);
            }
            ControlState::Keybind(keybind) => {
                keybind.restore(serde_json::from_value(value)?);
            }
            ControlState::Button(_) | ControlState::Separator => {}
        }
        Ok(())
    }

    /// Transplant a previous generation's value, applying the current
    /// constraints. Mismatched kinds are ignored.
    pub fn extract(&mut self, previous: &ControlState) {
        match (self, previous) {
            (ControlState::Slider(new), ControlState::Slider(old)) => new.extract(old),
            (ControlState::Checkbox(new), ControlState::Checkbox(old)) => new.extract(old),
            (ControlState::List(new), ControlState::List(old)) => new.extract(old),
            (ControlState::Keybind(new), ControlState::Keybind(old)) => new.extract(old),
            (new, old) => {
                log::debug!(
                    "extract skipped: kind changed from {} to {}",
                    old.kind(),
                    new.kind()
                );
            }
        }
    }
}

// =============================================================================
// Control
// =============================================================================

/// A leaf component holding one typed user-editable value.
pub struct Control {
    name: String,
    display_name: String,
    unique_suffix: String,
    visible: bool,
    interacting: bool,
    position: Point,
    slot_width: i32,
    width_cache: Option<i32>,
    state: ControlState,
}

impl Control {
    fn with_state(name: impl Into<String>, display_name: impl Into<String>, state: ControlState) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            unique_suffix: String::new(),
            visible: false,
            interacting: false,
            position: Point::ZERO,
            slot_width: 0,
            width_cache: None,
            state,
        }
    }

    pub fn slider(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: i32,
        min: i32,
        max: i32,
    ) -> Self {
        Self::with_state(
            name,
            display_name,
            ControlState::Slider(SliderState::new(value, min, max)),
        )
    }

    pub fn checkbox(name: impl Into<String>, display_name: impl Into<String>, checked: bool) -> Self {
        Self::with_state(
            name,
            display_name,
            ControlState::Checkbox(CheckboxState::new(checked)),
        )
    }

    pub fn list(
        name: impl Into<String>,
        display_name: impl Into<String>,
        options: Vec<String>,
        index: usize,
    ) -> Self {
        Self::with_state(
            name,
            display_name,
            ControlState::List(ListState::new(options, index)),
        )
    }

    pub fn keybind(
        name: impl Into<String>,
        display_name: impl Into<String>,
        key: Option<Key>,
        mode: KeybindMode,
    ) -> Self {
        Self::with_state(
            name,
            display_name,
            ControlState::Keybind(KeybindState::new(key, mode)),
        )
    }

    pub fn button(
        name: impl Into<String>,
        display_name: impl Into<String>,
        action: impl FnMut() + 'static,
    ) -> Self {
        Self::with_state(name, display_name, ControlState::Button(ButtonState::new(action)))
    }

    pub fn separator(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::with_state(name, display_name, ControlState::Separator)
    }

    /// Append a disambiguating suffix to the persisted key, for when several
    /// independent instances share a name.
    pub fn unique_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unique_suffix = suffix.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn suffix(&self) -> &str {
        &self.unique_suffix
    }

    pub fn kind(&self) -> ValueKind {
        self.state.kind()
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Mutable state access for programmatic changes. Mutations through here
    /// do not fire change notifications.
    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether a press or drag on this control is in flight.
    pub fn interacting(&self) -> bool {
        self.interacting
    }

    /// Position stamped by the container during the last draw pass.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Width of the column this control occupies, stamped by the container.
    pub fn slot_width(&self) -> i32 {
        self.slot_width
    }

    /// Transplant the value of a previous generation of this control.
    pub fn extract(&mut self, previous: &Control) {
        self.state.extract(&previous.state);
    }

    pub(crate) fn key(&self) -> String {
        format!("{}{}", self.name, self.unique_suffix)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_slot_width(&mut self, width: i32) {
        self.slot_width = width;
    }

    pub(crate) fn width(&mut self, theme: &dyn Theme) -> i32 {
        if let Some(width) = self.width_cache {
            return width;
        }
        let width = theme.control_width(self);
        self.width_cache = Some(width);
        width
    }

    pub(crate) fn reset_width(&mut self) {
        self.width_cache = None;
    }

    pub(crate) fn draw(&mut self, position: Point, theme: &mut dyn Theme) {
        self.position = position;
        theme.draw_control(self);
    }

    pub(crate) fn update(&mut self) {
        if let ControlState::Button(button) = &mut self.state {
            button.settle();
        }
    }

    /// Route one input message. Returns a snapshot of the new value when it
    /// changed, which the container turns into a change event.
    pub(crate) fn on_input(&mut self, message: &InputMessage, theme: &dyn Theme) -> Option<ControlValue> {
        // A release always ends an active press, even when the control is
        // hidden or the cursor left the bounds (the drag is captured).
        if message.kind == MessageKind::PointerUp {
            self.interacting = false;
            return None;
        }
        if !self.visible {
            return None;
        }

        let bounds = theme.control_bounds(self);
        match &mut self.state {
            ControlState::Slider(slider) => match message.kind {
                MessageKind::PointerMove if self.interacting => slider
                    .drag_to(message.cursor.x, self.position.x, self.slot_width)
                    .map(ControlValue::Slider),
                MessageKind::PointerDown
                    if !self.interacting && bounds.contains(message.cursor) =>
                {
                    self.interacting = true;
                    slider
                        .drag_to(message.cursor.x, self.position.x, self.slot_width)
                        .map(ControlValue::Slider)
                }
                _ => None,
            },
            ControlState::Checkbox(checkbox) => match message.kind {
                MessageKind::PointerDown if bounds.contains(message.cursor) => {
                    self.interacting = true;
                    Some(ControlValue::Checkbox(checkbox.toggle()))
                }
                _ => None,
            },
            ControlState::List(list) => match message.kind {
                MessageKind::PointerDown if bounds.contains(message.cursor) => {
                    self.interacting = true;
                    // Left half steps back, right half steps forward.
                    let forward = message.cursor.x >= bounds.x + bounds.width / 2;
                    list.step(forward).map(ControlValue::List)
                }
                _ => None,
            },
            ControlState::Keybind(keybind) => match message.kind {
                MessageKind::PointerDown if bounds.contains(message.cursor) => {
                    self.interacting = true;
                    keybind.toggle_capture();
                    None
                }
                MessageKind::KeyDown => match message.key {
                    Some(key) => keybind.key_down(key).map(ControlValue::Keybind),
                    None => None,
                },
                MessageKind::KeyUp => match message.key {
                    Some(key) => keybind.key_up(key).map(ControlValue::Keybind),
                    None => None,
                },
                _ => None,
            },
            ControlState::Button(button) => match message.kind {
                MessageKind::PointerDown if bounds.contains(message.cursor) => {
                    self.interacting = true;
                    button.press();
                    None
                }
                _ => None,
            },
            ControlState::Separator => None,
        }
    }

    pub(crate) fn load_from(
        &mut self,
        store: &dyn SettingsStore,
        path: &SettingsPath,
        failures: &mut Vec<PersistenceFailure>,
    ) {
        if !self.state.persisted() {
            return;
        }
        match store.load(path, &self.key()) {
            Ok(Some(value)) => {
                if let Err(error) = self.state.apply_stored(value) {
                    failures.push(PersistenceFailure::new(path, self.key(), error));
                }
            }
            // Nothing stored: keep the in-memory default.
            Ok(None) => {}
            Err(error) => failures.push(PersistenceFailure::new(path, self.key(), error)),
        }
    }

    pub(crate) fn save_to(
        &self,
        store: &mut dyn SettingsStore,
        path: &SettingsPath,
        failures: &mut Vec<PersistenceFailure>,
    ) {
        let Some(value) = self.state.to_stored() else {
            return;
        };
        if let Err(error) = store.save(path, &self.key(), &value) {
            failures.push(PersistenceFailure::new(path, self.key(), error));
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("visible", &self.visible)
            .field("interacting", &self.interacting)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
