use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A single decoded input message, delivered once per frame to the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMessage {
    pub kind: MessageKind,
    pub cursor: Point,
    pub key: Option<Key>,
}

impl InputMessage {
    pub const fn pointer(kind: MessageKind, cursor: Point) -> Self {
        Self {
            kind,
            cursor,
            key: None,
        }
    }

    pub const fn key(kind: MessageKind, cursor: Point, key: Key) -> Self {
        Self {
            kind,
            cursor,
            key: Some(key),
        }
    }

    /// Decode a crossterm event into a message.
    ///
    /// Key events carry no cursor of their own, so the host supplies the last
    /// known pointer position. Returns None for events the menu tree does not
    /// consume (resize, focus, paste, scroll).
    pub fn from_event(event: &crossterm::event::Event, last_cursor: Point) -> Option<Self> {
        use crossterm::event::{Event, KeyEventKind, MouseEventKind};

        match event {
            Event::Mouse(mouse) => {
                let cursor = Point::new(i32::from(mouse.column), i32::from(mouse.row));
                let kind = match mouse.kind {
                    MouseEventKind::Down(_) => MessageKind::PointerDown,
                    MouseEventKind::Up(_) => MessageKind::PointerUp,
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => MessageKind::PointerMove,
                    _ => return None,
                };
                Some(Self::pointer(kind, cursor))
            }
            Event::Key(key) => {
                let kind = match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => MessageKind::KeyDown,
                    KeyEventKind::Release => MessageKind::KeyUp,
                };
                Some(Self::key(kind, last_cursor, Key::from(key.code)))
            }
            _ => None,
        }
    }
}

/// Input message kinds routed through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    PointerDown,
    PointerUp,
    PointerMove,
    KeyDown,
    KeyUp,
}

/// Key code carried by keyboard messages. Serializable so keybinds can
/// round-trip through the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            // Keys the menu tree has no use for collapse to a null char
            _ => Key::Char('\0'),
        }
    }
}
