//! Retained-mode menu framework for overlaid interfaces.
//!
//! A tree of containers ([`Menu`]) and typed value controls
//! ([`values::Control`]) that owns its own layout, input routing, persistence
//! and change notification, while delegating every pixel to a
//! [`theme::Theme`] implementation. The embedding application constructs one
//! [`MenuContext`] per process, attaches root menus to it, and pumps it once
//! per frame: `dispatch` with the decoded input message, then `draw`, then
//! `update`.

pub mod component;
pub mod error;
pub mod event;
pub mod menu;
pub mod registry;
pub mod settings;
pub mod theme;
pub mod values;

pub use scrim_core::{InputMessage, Key, MessageKind, Point, Rect};

pub use component::Item;
pub use error::MenuError;
pub use event::{ChangeEvent, HandlerId};
pub use menu::Menu;
pub use registry::MenuContext;

pub mod prelude {
    pub use scrim_core::{InputMessage, Key, MessageKind, Point, Rect};

    pub use crate::component::Item;
    pub use crate::error::MenuError;
    pub use crate::event::{ChangeEvent, HandlerId};
    pub use crate::menu::Menu;
    pub use crate::registry::MenuContext;
    pub use crate::settings::{
        JsonFileStore, MemoryStore, PersistenceErrors, SettingsPath, SettingsStore,
    };
    pub use crate::theme::{BasicTheme, Theme};
    pub use crate::values::{
        Control, ControlState, ControlValue, FromControl, KeybindMode, KeybindValue, ValueKind,
    };
}
