//! Change notification types.

use crate::values::ControlValue;

/// Snapshot of a value change, delivered synchronously on the dispatch
/// thread at the moment the value settles.
///
/// The event fires on the immediate container's subscribers first, then
/// bubbles to each ancestor container, and is finally returned from
/// [`crate::MenuContext::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Name of the control whose value changed.
    pub source: String,
    /// Name of the control's immediate container.
    pub container: String,
    /// The new value.
    pub value: ControlValue,
}

/// Handle returned by [`crate::Menu::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);

pub(crate) type ChangeHandler = Box<dyn FnMut(&ChangeEvent)>;
