use compact_str::CompactString;
use std::ops::{BitOr, BitOrAssign};

use crate::ui::core::geom::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Numeric button id as reported to subscribers (1 left, 2 right, 3 middle).
    pub fn id(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Signed step along the scroll axis: up/left are negative.
    pub fn delta(self) -> i32 {
        match self {
            ScrollDirection::Up | ScrollDirection::Left => -1,
            ScrollDirection::Down | ScrollDirection::Right => 1,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, ScrollDirection::Up | ScrollDirection::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const SUPER: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for KeyModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

/// Every primitive input the engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: u16, y: u16, button: MouseButton },
    PointerUp { x: u16, y: u16, button: MouseButton },
    PointerDrag { x: u16, y: u16, button: MouseButton },
    Touch { x: u16, y: u16 },
    Scroll { direction: ScrollDirection, x: u16, y: u16 },
    Char(char),
    Key(KeyEvent),
    KeyUp(KeyEvent),
    Resize { width: u16, height: u16 },
    Paste(String),
    /// Application-defined event, delivered to subscribers only.
    Custom {
        name: CompactString,
        args: Vec<serde_json::Value>,
    },
}

impl InputEvent {
    /// Name used to route the event to subscribers.
    pub fn name(&self) -> &str {
        match self {
            InputEvent::PointerDown { .. } => "pointer_down",
            InputEvent::PointerUp { .. } => "pointer_up",
            InputEvent::PointerDrag { .. } => "pointer_drag",
            InputEvent::Touch { .. } => "touch",
            InputEvent::Scroll { .. } => "scroll",
            InputEvent::Char(_) => "char",
            InputEvent::Key(_) => "key",
            InputEvent::KeyUp(_) => "key_up",
            InputEvent::Resize { .. } => "resize",
            InputEvent::Paste(_) => "paste",
            InputEvent::Custom { name, .. } => name.as_str(),
        }
    }

    pub fn pos(&self) -> Option<Pos> {
        match *self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerUp { x, y, .. }
            | InputEvent::PointerDrag { x, y, .. }
            | InputEvent::Touch { x, y }
            | InputEvent::Scroll { x, y, .. } => Some(Pos::new(x, y)),
            _ => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.pos().is_some()
    }

    pub fn custom(name: impl Into<CompactString>, args: Vec<serde_json::Value>) -> Self {
        InputEvent::Custom {
            name: name.into(),
            args,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
