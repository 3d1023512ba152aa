//! Geometry-only reference theme.
//!
//! Computes widths from text metrics and leaves drawing to trace logging.
//! Used by tests and as the fallback when an embedder has not supplied a
//! real backend yet.

use unicode_width::UnicodeWidthStr;

use crate::menu::Menu;
use crate::values::{Control, ValueKind};

use super::Theme;

/// Reserved row width for a slider's track.
const SLIDER_TRACK: i32 = 100;
/// Reserved row width for a list's cycle arrows.
const LIST_ARROWS: i32 = 24;
/// Reserved row width for a keybind's key box.
const KEY_BOX: i32 = 48;
/// Reserved row width for a checkbox glyph.
const CHECK_BOX: i32 = 16;

#[derive(Debug, Clone)]
pub struct BasicTheme {
    char_width: i32,
    row_height: i32,
    padding: i32,
}

impl BasicTheme {
    pub fn new() -> Self {
        Self {
            char_width: 8,
            row_height: 24,
            padding: 10,
        }
    }

    fn label_width(&self, text: &str) -> i32 {
        UnicodeWidthStr::width(text) as i32 * self.char_width + self.padding * 2
    }
}

impl Default for BasicTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for BasicTheme {
    fn container_height(&self) -> i32 {
        self.row_height
    }

    fn menu_width(&self, menu: &Menu) -> i32 {
        // Label plus a square cell for the expansion arrow.
        self.label_width(menu.display_name()) + self.row_height
    }

    fn control_width(&self, control: &Control) -> i32 {
        let extra = match control.kind() {
            ValueKind::Slider => SLIDER_TRACK,
            ValueKind::List => LIST_ARROWS,
            ValueKind::Keybind => KEY_BOX,
            ValueKind::Checkbox => CHECK_BOX,
            ValueKind::Button | ValueKind::Separator => 0,
        };
        self.label_width(control.display_name()) + extra
    }

    fn draw_menu(&mut self, menu: &Menu) {
        let position = menu.position();
        log::trace!(
            "menu '{}' at ({}, {}) toggled={}",
            menu.name(),
            position.x,
            position.y,
            menu.toggled()
        );
    }

    fn draw_control(&mut self, control: &Control) {
        let position = control.position();
        log::trace!(
            "{} '{}' at ({}, {})",
            control.kind(),
            control.name(),
            position.x,
            position.y
        );
    }
}
