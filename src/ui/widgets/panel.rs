use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::Painter;
use crate::ui::core::style::{colors, Style};
use crate::ui::core::theme::roles;
use crate::ui::core::widget::{DrawCtx, Element, ThemeCtx};
use std::any::Any;

/// Surface-coloured box. With a border, the title sits on the top edge.
#[derive(Clone, Debug)]
pub struct Panel {
    title: Option<String>,
    title_fg: u8,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            title: None,
            title_fg: colors::BRIGHT_WHITE,
        }
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::new()
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for Panel {
    fn kind(&self) -> &'static str {
        "panel"
    }

    fn default_roles(&self) -> (&'static str, &'static str) {
        (roles::TEXT, roles::SURFACE)
    }

    fn apply_theme(&mut self, ctx: &ThemeCtx<'_>) {
        self.title_fg = ctx.role(roles::TITLE, colors::BRIGHT_WHITE);
    }

    fn draw(&self, painter: &mut Painter, ctx: &DrawCtx) {
        painter.fill_rect(ctx.inner(), ctx.style);

        let Some(title) = self.title.as_deref() else {
            return;
        };
        if !ctx.border || ctx.bounds.w < 5 {
            return;
        }
        // Keep the corners intact.
        let clip = Rect::new(
            ctx.bounds.x.saturating_add(1),
            ctx.bounds.y,
            ctx.bounds.w.saturating_sub(2),
            1,
        );
        painter.text_clipped(
            Pos::new(ctx.bounds.x.saturating_add(2), ctx.bounds.y),
            format!(" {title} "),
            Style::new(self.title_fg, ctx.style.bg),
            clip,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/panel.rs"]
mod tests;
