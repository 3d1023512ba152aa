//! Action button.

use std::fmt;

/// State for a button control: a press callback and a one-frame pressed
/// flash for the theme to render. Buttons hold no persisted value.
pub struct ButtonState {
    action: Box<dyn FnMut()>,
    pressed: bool,
}

impl ButtonState {
    pub fn new(action: impl FnMut() + 'static) -> Self {
        Self {
            action: Box::new(action),
            pressed: false,
        }
    }

    /// Whether the button was pressed since the last update tick.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub(crate) fn press(&mut self) {
        self.pressed = true;
        (self.action)();
    }

    /// Decay the one-frame pressed flash.
    pub(crate) fn settle(&mut self) {
        self.pressed = false;
    }
}

impl fmt::Debug for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonState")
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}
