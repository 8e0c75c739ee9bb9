//! Element behaviour. Every node in the scene store owns one boxed `Element`;
//! optional capabilities are exposed through the `as_*` accessors.

use super::geom::{Pos, Rect, Size};
use super::painter::Painter;
use super::style::Style;
use super::theme::ThemeRegistry;
use crate::core::error::HookError;
use crate::core::event::{KeyEvent, MouseButton, ScrollDirection};
use std::any::Any;
use std::time::Duration;

/// Interaction flags of the element being drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementState {
    pub focused: bool,
    pub pressed: bool,
    pub dragging: bool,
}

pub struct DrawCtx {
    pub bounds: Rect,
    /// Bounds shrunk by border and padding.
    pub content: Rect,
    /// The engine has already drawn a border around `bounds`.
    pub border: bool,
    /// Resolved fg/bg of the node.
    pub style: Style,
    pub state: ElementState,
}

impl DrawCtx {
    /// Bounds inside the border, if any.
    pub fn inner(&self) -> Rect {
        if self.border {
            self.bounds.inset(super::layout::Insets::all(1))
        } else {
            self.bounds
        }
    }
}

/// Passed to `Element::apply_theme` whenever the active theme changes or the
/// element is constructed.
pub struct ThemeCtx<'a> {
    pub themes: &'a ThemeRegistry,
    /// The node's resolved fg/bg.
    pub style: Style,
}

impl ThemeCtx<'_> {
    pub fn role(&self, role: &str, fallback: u8) -> u8 {
        self.themes.resolve_color(role, fallback)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub pos: Pos,
    pub button: MouseButton,
}

/// Pointer capability. `on_press` and `on_scroll` return `true` to claim the
/// notification and stop bubbling.
pub trait PointerTarget {
    fn on_press(&mut self, _ev: &PointerEvent) -> bool {
        false
    }

    fn on_release(&mut self, _ev: &PointerEvent, _in_bounds: bool) {}

    fn on_click(&mut self, _ev: &PointerEvent) {}

    fn on_drag(&mut self, _pos: Pos, _delta: (i32, i32)) {}

    fn on_drag_end(&mut self, _pos: Pos) {}

    fn on_scroll(&mut self, _direction: ScrollDirection, _pos: Pos) -> bool {
        false
    }

    fn on_touch(&mut self, _pos: Pos) {}
}

/// Keyboard capability, only ever invoked on the focused element. Returning
/// `true` activates the element: it is then clicked as if by the pointer.
pub trait KeyTarget {
    fn on_char(&mut self, _ch: char) -> bool {
        false
    }

    fn on_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }
}

pub trait Updatable {
    /// Advance by `dt`; returns whether anything visible changed.
    fn update(&mut self, dt: Duration) -> bool;
}

/// Container capability: sizes and offsets for the children, in child order.
pub trait Layout {
    /// Extent of the laid-out children, excluding padding and border.
    fn measure(&self, children: &[Size]) -> Size;

    /// Child origins relative to the content box.
    fn arrange(&self, children: &[Size], content: Size) -> Vec<Pos>;
}

pub trait Element: Any {
    /// Type tag.
    fn kind(&self) -> &'static str;

    fn draw(&self, painter: &mut Painter, ctx: &DrawCtx);

    /// Size used when the options do not declare one.
    fn preferred_size(&self) -> Size {
        Size::new(1, 1)
    }

    fn focusable(&self) -> bool {
        false
    }

    /// Roles used for fg/bg when the options leave them unset.
    fn default_roles(&self) -> (&'static str, &'static str) {
        (super::theme::roles::TEXT, super::theme::roles::BACKGROUND)
    }

    fn apply_theme(&mut self, _ctx: &ThemeCtx<'_>) {}

    fn on_focus(&mut self) {}

    fn on_blur(&mut self) {}

    fn on_destroy(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerTarget> {
        None
    }

    fn as_keys(&mut self) -> Option<&mut dyn KeyTarget> {
        None
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        None
    }

    fn layout(&self) -> Option<&dyn Layout> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Element {
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Element>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/ui/core/widget.rs"]
mod tests;
