//! The component slot.
//!
//! Every child of a container is either a nested menu or a value control,
//! tagged explicitly. Ownership of a subtree is the child slot itself:
//! removing a child hands the `Item` back to the caller, and there is no
//! back-pointer to clear.

use scrim_core::Point;

use crate::menu::Menu;
use crate::settings::{PersistenceFailure, SettingsPath, SettingsStore};
use crate::theme::Theme;
use crate::values::Control;

pub enum Item {
    Menu(Menu),
    Control(Control),
}

impl From<Menu> for Item {
    fn from(menu: Menu) -> Self {
        Item::Menu(menu)
    }
}

impl From<Control> for Item {
    fn from(control: Control) -> Self {
        Item::Control(control)
    }
}

impl Item {
    /// Stable machine identifier, unique among siblings.
    pub fn name(&self) -> &str {
        match self {
            Item::Menu(menu) => menu.name(),
            Item::Control(control) => control.name(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Item::Menu(menu) => menu.display_name(),
            Item::Control(control) => control.display_name(),
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Item::Menu(menu) => menu.visible(),
            Item::Control(control) => control.visible(),
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            Item::Menu(menu) => Some(menu),
            Item::Control(_) => None,
        }
    }

    pub fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match self {
            Item::Menu(menu) => Some(menu),
            Item::Control(_) => None,
        }
    }

    pub fn as_control(&self) -> Option<&Control> {
        match self {
            Item::Menu(_) => None,
            Item::Control(control) => Some(control),
        }
    }

    pub fn as_control_mut(&mut self) -> Option<&mut Control> {
        match self {
            Item::Menu(_) => None,
            Item::Control(control) => Some(control),
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        match self {
            Item::Menu(menu) => menu.set_visible(visible),
            Item::Control(control) => control.set_visible(visible),
        }
    }

    pub(crate) fn set_slot_width(&mut self, width: i32) {
        match self {
            Item::Menu(menu) => menu.set_slot_width(width),
            Item::Control(control) => control.set_slot_width(width),
        }
    }

    pub(crate) fn width(&mut self, theme: &dyn Theme) -> i32 {
        match self {
            Item::Menu(menu) => menu.width(theme),
            Item::Control(control) => control.width(theme),
        }
    }

    /// Invalidate the cached width; the next query recomputes from the theme.
    pub fn reset_width(&mut self) {
        match self {
            Item::Menu(menu) => menu.reset_width(),
            Item::Control(control) => control.reset_width(),
        }
    }

    pub(crate) fn draw(&mut self, position: Point, theme: &mut dyn Theme) {
        match self {
            Item::Menu(menu) => menu.draw(position, theme),
            Item::Control(control) => control.draw(position, theme),
        }
    }

    pub(crate) fn update(&mut self) {
        match self {
            Item::Menu(menu) => menu.update(),
            Item::Control(control) => control.update(),
        }
    }

    pub(crate) fn load_into(
        &mut self,
        store: &dyn SettingsStore,
        parent: &SettingsPath,
        failures: &mut Vec<PersistenceFailure>,
    ) {
        match self {
            Item::Menu(menu) => menu.load_into(store, parent, failures),
            Item::Control(control) => control.load_from(store, parent, failures),
        }
    }

    pub(crate) fn save_into(
        &self,
        store: &mut dyn SettingsStore,
        parent: &SettingsPath,
        failures: &mut Vec<PersistenceFailure>,
    ) {
        match self {
            Item::Menu(menu) => menu.save_into(store, parent, failures),
            Item::Control(control) => control.save_to(store, parent, failures),
        }
    }
}
