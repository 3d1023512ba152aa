//! The visual contract.
//!
//! All pixel geometry and drawing is supplied by a theme; the tree only
//! delegates, passing the component itself. A backend implements this trait
//! once per control family and the framework stays renderer-agnostic.

mod basic;

pub use basic::BasicTheme;

use scrim_core::Rect;

use crate::menu::Menu;
use crate::values::Control;

pub trait Theme {
    /// Height of one component row.
    fn container_height(&self) -> i32;

    /// Intrinsic width of a menu's header row.
    fn menu_width(&self, menu: &Menu) -> i32;

    /// Intrinsic width of a value control's row.
    fn control_width(&self, control: &Control) -> i32;

    /// On-screen rectangle of a menu's header, from its stamped position
    /// and the column width its owner assigned.
    fn menu_bounds(&self, menu: &Menu) -> Rect {
        let position = menu.position();
        Rect::new(
            position.x,
            position.y,
            menu.slot_width(),
            self.container_height(),
        )
    }

    /// On-screen rectangle of a control's row.
    fn control_bounds(&self, control: &Control) -> Rect {
        let position = control.position();
        Rect::new(
            position.x,
            position.y,
            control.slot_width(),
            self.container_height(),
        )
    }

    /// Draw one menu header. Children are drawn through their own calls.
    fn draw_menu(&mut self, menu: &Menu);

    /// Draw one value control row.
    fn draw_control(&mut self, control: &Control);
}
