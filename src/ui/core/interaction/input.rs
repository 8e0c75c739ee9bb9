use super::geom::Pos;
use super::id::ElementId;
use super::runtime::Ui;
use crate::core::event::{InputEvent, KeyEvent, MouseButton, ScrollDirection};

/// Per-element notification kinds user handlers can attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    Press,
    Release,
    Click,
    Drag,
    DragEnd,
    Scroll,
    Touch,
    Char,
    Key,
    Focus,
    Blur,
    Destroy,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HookEvent {
    Press {
        pos: Pos,
        button: MouseButton,
    },
    Release {
        pos: Pos,
        button: MouseButton,
        in_bounds: bool,
    },
    Click {
        pos: Pos,
        button: MouseButton,
    },
    Drag {
        pos: Pos,
        delta: (i32, i32),
    },
    DragEnd {
        pos: Pos,
    },
    Scroll {
        direction: ScrollDirection,
        pos: Pos,
    },
    Touch {
        pos: Pos,
    },
    Char(char),
    Key(KeyEvent),
    Focus,
    Blur,
    Destroy,
}

impl HookEvent {
    pub fn hook(&self) -> Hook {
        match self {
            HookEvent::Press { .. } => Hook::Press,
            HookEvent::Release { .. } => Hook::Release,
            HookEvent::Click { .. } => Hook::Click,
            HookEvent::Drag { .. } => Hook::Drag,
            HookEvent::DragEnd { .. } => Hook::DragEnd,
            HookEvent::Scroll { .. } => Hook::Scroll,
            HookEvent::Touch { .. } => Hook::Touch,
            HookEvent::Char(_) => Hook::Char,
            HookEvent::Key(_) => Hook::Key,
            HookEvent::Focus => Hook::Focus,
            HookEvent::Blur => Hook::Blur,
            HookEvent::Destroy => Hook::Destroy,
        }
    }
}

/// User handler layered over an element's built-in behaviour. For `Press` and
/// `Scroll` a `true` return claims the notification and stops bubbling; the
/// return value is ignored for every other hook.
pub type Handler = Box<dyn FnMut(&mut Ui, ElementId, &HookEvent) -> bool>;

/// Broadcast subscriber, keyed by event name.
pub type Subscriber = Box<dyn FnMut(&mut Ui, &InputEvent)>;
