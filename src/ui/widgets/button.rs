use super::text_width;
use crate::core::event::{KeyCode, KeyEvent};
use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::style::{colors, Style};
use crate::ui::core::theme::roles;
use crate::ui::core::widget::{
    DrawCtx, Element, KeyTarget, PointerEvent, PointerTarget, ThemeCtx,
};
use std::any::Any;

/// Clickable, focusable label. Claims presses so they stop bubbling.
#[derive(Clone, Debug)]
pub struct Button {
    label: String,
    clicks: u32,
    active: u8,
    focus: u8,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            clicks: 0,
            active: colors::CYAN,
            focus: colors::LIGHT_BLUE,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Completed activations: clicks plus Enter/Space while focused.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Element for Button {
    fn kind(&self) -> &'static str {
        "button"
    }

    fn preferred_size(&self) -> Size {
        Size::new(text_width(&self.label).saturating_add(4), 1)
    }

    fn focusable(&self) -> bool {
        true
    }

    fn default_roles(&self) -> (&'static str, &'static str) {
        (roles::INTERACTIVE_TEXT, roles::INTERACTIVE)
    }

    fn apply_theme(&mut self, ctx: &ThemeCtx<'_>) {
        self.active = ctx.role(roles::ACTIVE, colors::CYAN);
        self.focus = ctx.role(roles::FOCUS, colors::LIGHT_BLUE);
    }

    fn draw(&self, painter: &mut Painter, ctx: &DrawCtx) {
        let style = if ctx.state.pressed {
            Style::new(ctx.style.fg, self.active)
        } else if ctx.state.focused {
            Style::new(ctx.style.fg, self.focus)
        } else {
            ctx.style
        };
        let area = ctx.inner();
        painter.fill_rect(area, style);

        let w = text_width(&self.label);
        let x = area.x.saturating_add(area.w.saturating_sub(w) / 2);
        let y = area.y.saturating_add(area.h.saturating_sub(1) / 2);
        painter.text_clipped(Pos::new(x, y), self.label.as_str(), style, area);
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerTarget> {
        Some(self)
    }

    fn as_keys(&mut self) -> Option<&mut dyn KeyTarget> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl PointerTarget for Button {
    fn on_press(&mut self, _ev: &PointerEvent) -> bool {
        true
    }

    fn on_click(&mut self, _ev: &PointerEvent) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

impl KeyTarget for Button {
    fn on_char(&mut self, ch: char) -> bool {
        ch == ' '
    }

    fn on_key(&mut self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Enter
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/button.rs"]
mod tests;
