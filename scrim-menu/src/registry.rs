//! The menu context: the explicitly-passed registry of attached roots.
//!
//! One context is constructed at startup by the embedding application with a
//! store, a theme and the module identity, and dropped at shutdown. It owns
//! top-level positioning (the shared anchor all roots hang off), the frame
//! hooks (draw, update, dispatch) and the persistence fan-out.

use scrim_core::{InputMessage, Point};

use crate::component::Item;
use crate::error::MenuError;
use crate::event::ChangeEvent;
use crate::menu::Menu;
use crate::settings::{PersistenceErrors, SettingsPath, SettingsStore};
use crate::theme::Theme;

pub struct MenuContext {
    module: String,
    anchor: Point,
    theme: Box<dyn Theme>,
    store: Box<dyn SettingsStore>,
    roots: Vec<Menu>,
}

impl MenuContext {
    pub fn new(
        module: impl Into<String>,
        theme: impl Theme + 'static,
        store: impl SettingsStore + 'static,
    ) -> Self {
        Self {
            module: module.into(),
            anchor: Point::new(40, 40),
            theme: Box::new(theme),
            store: Box::new(store),
            roots: Vec::new(),
        }
    }

    /// Identity of the embedding module, the namespace non-shared settings
    /// persist under.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The shared on-screen anchor all roots are stacked below. Dragging any
    /// menu header moves this.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    pub fn theme(&self) -> &dyn Theme {
        &*self.theme
    }

    pub fn store(&self) -> &dyn SettingsStore {
        &*self.store
    }

    fn base_path(&self) -> SettingsPath {
        SettingsPath::module(&self.module)
    }

    // -------------------------------------------------------------------------
    // Roots
    // -------------------------------------------------------------------------

    /// Attach a root menu and run its initial load pass so it comes up with
    /// persisted values. Fails for a menu not constructed as a root, or when
    /// an attached root already has the same identity (two trees resolving
    /// to the same settings path is a configuration error).
    pub fn attach(&mut self, menu: Menu) -> Result<(), MenuError> {
        if !menu.is_root() {
            return Err(MenuError::InvalidAttach {
                name: menu.name().to_string(),
                reason: "not a root menu",
            });
        }
        if self.roots.iter().any(|root| root.key() == menu.key()) {
            return Err(MenuError::InvalidAttach {
                name: menu.name().to_string(),
                reason: "a root with this identity is already attached",
            });
        }

        let mut menu = menu;
        let base = self.base_path();
        if let Err(errors) = menu.load(&*self.store, &base) {
            for failure in &errors.failures {
                log::warn!(
                    "load failed for {}/{}: {}",
                    failure.path,
                    failure.key,
                    failure.error
                );
            }
        }
        log::info!("attached root menu '{}'", menu.name());
        self.roots.push(menu);
        Ok(())
    }

    /// Attached roots in draw order.
    pub fn roots(&self) -> impl Iterator<Item = &Menu> {
        self.roots.iter()
    }

    pub fn root(&self, name: &str) -> Option<&Menu> {
        self.roots.iter().find(|root| root.name() == name)
    }

    pub fn root_mut(&mut self, name: &str) -> Option<&mut Menu> {
        self.roots.iter_mut().find(|root| root.name() == name)
    }

    /// Insert a component into an attached tree, then re-run the root's load
    /// pass so the fresh subtree picks up persisted values immediately.
    ///
    /// `path` names the chain of submenus below the root; empty adds
    /// directly to the root.
    pub fn add_to(
        &mut self,
        root: &str,
        path: &[&str],
        item: impl Into<Item>,
    ) -> Result<(), MenuError> {
        let base = self.base_path();
        let root_menu = self
            .roots
            .iter_mut()
            .find(|candidate| candidate.name() == root)
            .ok_or_else(|| MenuError::NotFound(root.to_string()))?;

        let mut target = &mut *root_menu;
        for segment in path {
            target = target
                .submenu_mut(segment)
                .ok_or_else(|| MenuError::NotFound((*segment).to_string()))?;
        }
        target.add(item)?;

        if let Err(errors) = root_menu.load(&*self.store, &base) {
            for failure in &errors.failures {
                log::warn!(
                    "load failed for {}/{}: {}",
                    failure.path,
                    failure.key,
                    failure.error
                );
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Frame hooks
    // -------------------------------------------------------------------------

    /// Forward one decoded message to every root in draw order. When a root
    /// flips open, every other root is forced closed before the next root
    /// processes the message. Returns the change events that fired, after
    /// subscriber delivery.
    pub fn dispatch(&mut self, message: &InputMessage) -> Vec<ChangeEvent> {
        let mut events = Vec::new();
        for i in 0..self.roots.len() {
            let outcome = self.roots[i].on_input(message, &*self.theme, &mut self.anchor);
            if outcome.toggled_open {
                for j in 0..self.roots.len() {
                    if j != i {
                        self.roots[j].set_toggled(false);
                    }
                }
            }
            events.extend(outcome.events);
        }
        events
    }

    /// Draw all visible roots stacked below the anchor, one row each, in a
    /// column as wide as the widest root.
    pub fn draw(&mut self) {
        let row = self.theme.container_height();
        let mut column = 0;
        for root in &mut self.roots {
            column = column.max(root.width(&*self.theme));
        }

        let anchor = self.anchor;
        let mut y = anchor.y;
        for root in &mut self.roots {
            root.set_slot_width(column);
            if root.visible() {
                root.draw(Point::new(anchor.x, y), &mut *self.theme);
                y += row;
            }
        }
    }

    /// Per-frame bookkeeping fan-out.
    pub fn update(&mut self) {
        for root in &mut self.roots {
            root.update();
        }
    }

    /// Invalidate every cached width, children before parents.
    pub fn reset_widths(&mut self) {
        for root in &mut self.roots {
            root.reset_width();
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Reload every attached tree's persisted values. Failures are batched;
    /// siblings of a failing subtree still load.
    pub fn load_all(&mut self) -> Result<(), PersistenceErrors> {
        let base = self.base_path();
        let mut failures = Vec::new();
        for root in &mut self.roots {
            root.load_into(&*self.store, &base, &mut failures);
        }
        PersistenceErrors::into_result(failures)
    }

    /// Save every attached tree's values. Same batching policy as
    /// [`MenuContext::load_all`].
    pub fn save_all(&mut self) -> Result<(), PersistenceErrors> {
        let base = self.base_path();
        let mut failures = Vec::new();
        for root in &self.roots {
            root.save_into(&mut *self.store, &base, &mut failures);
        }
        PersistenceErrors::into_result(failures)
    }
}
