//! Input routing for containers.
//!
//! A menu runs hit-test, drag and toggle logic on itself first, then fans
//! the same message out to every child. The fan-out is unconditional — a
//! hidden control still sees release messages so transient press state
//! cannot leak — except that a consumed toggle returns immediately, skipping
//! the toggling menu's own children for that pass.
//!
//! Sibling exclusivity is enforced by the owner of the sibling collection:
//! this menu for its child submenus, the context for root menus.

use scrim_core::{InputMessage, MessageKind, Point, Rect};

use crate::component::Item;
use crate::event::ChangeEvent;
use crate::theme::Theme;

use super::Menu;

/// What one dispatch pass over a component produced.
#[derive(Default)]
pub(crate) struct InputOutcome {
    /// This menu flipped open; the owner must collapse its siblings.
    pub toggled_open: bool,
    /// Change events from this subtree, already delivered to subscribers
    /// at and below the container they originated in.
    pub events: Vec<ChangeEvent>,
}

impl Menu {
    pub(crate) fn on_input(
        &mut self,
        message: &InputMessage,
        theme: &dyn Theme,
        anchor: &mut Point,
    ) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        // A release drops the drag no matter where the cursor is.
        if message.kind == MessageKind::PointerUp {
            self.drag = None;
        }

        if self.visible {
            if message.kind == MessageKind::PointerMove
                && let Some(offset) = self.drag
            {
                *anchor = Point::new(message.cursor.x - offset.x, message.cursor.y - offset.y);
            }

            let header = Rect::new(
                self.position.x,
                self.position.y,
                self.slot_width,
                theme.container_height(),
            );
            if header.contains(message.cursor) {
                if message.kind == MessageKind::PointerDown {
                    self.drag = Some(Point::new(
                        message.cursor.x - anchor.x,
                        message.cursor.y - anchor.y,
                    ));
                }
                self.hovering = true;
                if message.kind == MessageKind::PointerDown && !self.children.is_empty() {
                    let open = !self.toggled;
                    self.set_toggled(open);
                    log::trace!("menu '{}' toggled {}", self.name, open);
                    outcome.toggled_open = open;
                    // Short-circuit: the toggling menu's own children do not
                    // see this message.
                    return outcome;
                }
            } else {
                self.hovering = false;
            }
        }

        self.dispatch_to_children(message, theme, anchor, &mut outcome);
        outcome
    }

    fn dispatch_to_children(
        &mut self,
        message: &InputMessage,
        theme: &dyn Theme,
        anchor: &mut Point,
        outcome: &mut InputOutcome,
    ) {
        for i in 0..self.children.len() {
            let (toggled_open, events) = match &mut self.children[i] {
                Item::Menu(menu) => {
                    let child = menu.on_input(message, theme, anchor);
                    (child.toggled_open, child.events)
                }
                Item::Control(control) => {
                    let mut events = Vec::new();
                    if let Some(value) = control.on_input(message, theme) {
                        log::debug!("'{}' changed in '{}'", control.name(), self.name);
                        events.push(ChangeEvent {
                            source: control.name().to_string(),
                            container: self.name.clone(),
                            value,
                        });
                    }
                    (false, events)
                }
            };

            if toggled_open {
                for j in 0..self.children.len() {
                    if j != i
                        && let Item::Menu(sibling) = &mut self.children[j]
                    {
                        sibling.set_toggled(false);
                    }
                }
            }

            for event in events {
                self.fire(&event);
                outcome.events.push(event);
            }
        }
    }
}
