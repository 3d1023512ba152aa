//! The container component.
//!
//! A menu owns an ordered, keyed collection of child components and manages
//! their visibility and toggle state. Collapsing a menu recursively collapses
//! every descendant; expanding re-shows direct children without expanding
//! previously collapsed submenus.

mod input;

pub(crate) use input::InputOutcome;

use scrim_core::Point;

use crate::component::Item;
use crate::error::MenuError;
use crate::event::{ChangeEvent, ChangeHandler, HandlerId};
use crate::settings::{PersistenceErrors, PersistenceFailure, SettingsPath, SettingsStore};
use crate::theme::Theme;
use crate::values::{Control, FromControl};

pub struct Menu {
    name: String,
    display_name: String,
    unique_suffix: String,
    root: bool,
    shared_settings: bool,
    visible: bool,
    toggled: bool,
    hovering: bool,
    position: Point,
    slot_width: i32,
    width_cache: Option<i32>,
    /// Cursor offset from the shared anchor while a drag is in flight.
    drag: Option<Point>,
    children: Vec<Item>,
    handlers: Vec<(HandlerId, ChangeHandler)>,
    next_handler: u64,
}

impl Menu {
    fn with_flags(name: impl Into<String>, display_name: impl Into<String>, root: bool) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            unique_suffix: String::new(),
            root,
            shared_settings: false,
            // Roots are visible from the start; a nested menu becomes
            // visible when its parent expands.
            visible: root,
            toggled: false,
            hovering: false,
            position: Point::ZERO,
            slot_width: 0,
            width_cache: None,
            drag: None,
            children: Vec::new(),
            handlers: Vec::new(),
            next_handler: 0,
        }
    }

    /// Create a nested menu.
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::with_flags(name, display_name, false)
    }

    /// Create a root menu, attachable to a [`crate::MenuContext`].
    pub fn root(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::with_flags(name, display_name, true)
    }

    /// Append a disambiguating suffix to the persisted path segment, for
    /// when several independent instances share a name.
    pub fn unique_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unique_suffix = suffix.into();
        self
    }

    /// Persist this subtree under the shared namespace instead of the
    /// owning module's.
    pub fn shared_settings(mut self, shared: bool) -> Self {
        self.shared_settings = shared;
        self
    }

    // -------------------------------------------------------------------------
    // Identity and state
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn suffix(&self) -> &str {
        &self.unique_suffix
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    pub fn is_shared(&self) -> bool {
        self.shared_settings
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn toggled(&self) -> bool {
        self.toggled
    }

    pub fn hovering(&self) -> bool {
        self.hovering
    }

    /// Position stamped during the last draw pass.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Width of the column this menu is drawn in, stamped by its owner.
    pub fn slot_width(&self) -> i32 {
        self.slot_width
    }

    /// Set the toggled (expanded) state.
    ///
    /// Direct children's visibility follows the new state. Collapsing also
    /// forces every descendant menu closed, in one recursive pass.
    pub fn set_toggled(&mut self, toggled: bool) {
        self.toggled = toggled;
        for child in &mut self.children {
            child.set_visible(toggled);
            if !toggled
                && let Item::Menu(menu) = child
            {
                menu.set_toggled(false);
            }
        }
    }

    /// Set visibility. For roots this is the embedder's show/hide policy;
    /// for nested menus it is driven by the ancestors' toggle state. An
    /// expanded menu passes the new visibility on to its direct children.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if self.toggled {
            for child in &mut self.children {
                child.set_visible(visible);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Add a child component. Fails without mutating when the name collides
    /// with an existing sibling. The child's visibility mirrors this menu's
    /// current toggle state.
    pub fn add(&mut self, item: impl Into<Item>) -> Result<(), MenuError> {
        let mut item = item.into();
        if self.children.iter().any(|child| child.name() == item.name()) {
            return Err(MenuError::DuplicateName {
                parent: self.name.clone(),
                name: item.name().to_string(),
            });
        }
        item.set_visible(self.toggled);
        self.children.push(item);
        Ok(())
    }

    /// Detach a child by name, handing ownership back to the caller. No
    /// recursive teardown happens; the returned subtree is the caller's.
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let index = self.children.iter().position(|child| child.name() == name)?;
        Some(self.children.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.children.iter().find(|child| child.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.children.iter_mut().find(|child| child.name() == name)
    }

    pub fn submenu(&self, name: &str) -> Option<&Menu> {
        self.get(name).and_then(Item::as_menu)
    }

    pub fn submenu_mut(&mut self, name: &str) -> Option<&mut Menu> {
        self.get_mut(name).and_then(Item::as_menu_mut)
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.get(name).and_then(Item::as_control)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.get_mut(name).and_then(Item::as_control_mut)
    }

    /// Children in draw order.
    pub fn children(&self) -> impl Iterator<Item = &Item> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Read the typed value of a named child control.
    ///
    /// Fails with [`MenuError::NotFound`] when no such child exists and with
    /// [`MenuError::TypeMismatch`] when the child's declared kind does not
    /// match `T`.
    pub fn value_of<T: FromControl>(&self, name: &str) -> Result<T, MenuError> {
        let item = self
            .get(name)
            .ok_or_else(|| MenuError::NotFound(name.to_string()))?;
        item.as_control()
            .and_then(|control| T::from_state(control.state()))
            .ok_or_else(|| MenuError::TypeMismatch {
                name: name.to_string(),
                requested: T::KIND,
            })
    }

    /// Transplant values from a previous generation of this tree, matching
    /// children by name and applying each control's current constraints.
    pub fn extract_from(&mut self, previous: &Menu) {
        for child in &mut self.children {
            match child {
                Item::Menu(menu) => {
                    if let Some(old) = previous.submenu(menu.name()) {
                        menu.extract_from(old);
                    }
                }
                Item::Control(control) => {
                    if let Some(old) = previous.control(control.name()) {
                        control.extract(old);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Change notification
    // -------------------------------------------------------------------------

    /// Subscribe to value changes within this subtree. Handlers run
    /// synchronously on the dispatch thread at the moment of change.
    pub fn on_change(&mut self, handler: impl FnMut(&ChangeEvent) + 'static) -> HandlerId {
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Drop a subscription. Returns whether the handler existed.
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler, _)| *handler != id);
        self.handlers.len() != before
    }

    pub(crate) fn fire(&mut self, event: &ChangeEvent) {
        if self.handlers.is_empty() {
            return;
        }
        let mut handlers = std::mem::take(&mut self.handlers);
        for (_, handler) in &mut handlers {
            handler(event);
        }
        handlers.append(&mut self.handlers);
        self.handlers = handlers;
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Intrinsic header width, computed by the theme and cached until
    /// [`Menu::reset_width`].
    pub fn width(&mut self, theme: &dyn Theme) -> i32 {
        if let Some(width) = self.width_cache {
            return width;
        }
        let width = theme.menu_width(self);
        self.width_cache = Some(width);
        width
    }

    /// Width of the child column: the widest child's intrinsic width.
    pub fn content_width(&mut self, theme: &dyn Theme) -> i32 {
        let mut width = 0;
        for child in &mut self.children {
            width = width.max(child.width(theme));
        }
        width
    }

    /// Invalidate cached widths, children first (their widths feed into the
    /// column width).
    pub fn reset_width(&mut self) {
        for child in &mut self.children {
            child.reset_width();
        }
        self.width_cache = None;
    }

    pub(crate) fn set_slot_width(&mut self, width: i32) {
        self.slot_width = width;
    }

    /// Stamp the position, draw the header through the theme, then lay out
    /// and draw visible children one row each in the adjacent column.
    pub(crate) fn draw(&mut self, position: Point, theme: &mut dyn Theme) {
        self.position = position;
        theme.draw_menu(self);
        if !self.toggled {
            return;
        }
        let column = self.content_width(theme);
        let row = theme.container_height();
        let own_width = self.slot_width;
        let mut y = position.y;
        for child in &mut self.children {
            if !child.visible() {
                continue;
            }
            child.set_slot_width(column);
            child.draw(Point::new(position.x + own_width, y), theme);
            y += row;
        }
    }

    pub(crate) fn update(&mut self) {
        for child in &mut self.children {
            child.update();
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// The path this menu's own values persist under, given the containing
    /// scope. A shared-settings menu re-roots its subtree under the shared
    /// namespace, keeping the segment hierarchy from itself down.
    pub fn settings_path(&self, parent: &SettingsPath) -> SettingsPath {
        let mut path = if self.shared_settings {
            SettingsPath::shared()
        } else {
            parent.clone()
        };
        path.push(format!("{}{}", self.name, self.unique_suffix));
        path
    }

    /// Recursively load persisted values for this subtree. Absent values
    /// keep their in-memory defaults; per-node failures are collected and
    /// returned as one batch without aborting the traversal.
    pub fn load(&mut self, store: &dyn SettingsStore, parent: &SettingsPath) -> Result<(), PersistenceErrors> {
        let mut failures = Vec::new();
        self.load_into(store, parent, &mut failures);
        PersistenceErrors::into_result(failures)
    }

    /// Recursively save this subtree's values. Same batching policy as
    /// [`Menu::load`].
    pub fn save(&self, store: &mut dyn SettingsStore, parent: &SettingsPath) -> Result<(), PersistenceErrors> {
        let mut failures = Vec::new();
        self.save_into(store, parent, &mut failures);
        PersistenceErrors::into_result(failures)
    }

    pub(crate) fn load_into(
        &mut self,
        store: &dyn SettingsStore,
        parent: &SettingsPath,
        failures: &mut Vec<PersistenceFailure>,
    ) {
        let path = self.settings_path(parent);
        for child in &mut self.children {
            child.load_into(store, &path, failures);
        }
    }

    pub(crate) fn save_into(
        &self,
        store: &mut dyn SettingsStore,
        parent: &SettingsPath,
        failures: &mut Vec<PersistenceFailure>,
    ) {
        let path = self.settings_path(parent);
        for child in &self.children {
            child.save_into(store, &path, failures);
        }
    }

    pub(crate) fn key(&self) -> String {
        format!("{}{}", self.name, self.unique_suffix)
    }
}
