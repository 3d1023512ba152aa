//! Boolean checkbox.

/// State for a checkbox control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckboxState {
    checked: bool,
}

impl CheckboxState {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flip the value; returns the new state.
    pub(crate) fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }

    pub(crate) fn extract(&mut self, previous: &CheckboxState) {
        self.checked = previous.checked;
    }
}
