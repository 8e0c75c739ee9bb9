use super::text_width;
use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::widget::{DrawCtx, Element};
use std::any::Any;

/// Static text. Each `\n` starts a new line.
#[derive(Clone, Debug, Default)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Element for Label {
    fn kind(&self) -> &'static str {
        "label"
    }

    fn preferred_size(&self) -> Size {
        let mut w = 0u16;
        let mut h = 0u16;
        for line in self.text.lines() {
            w = w.max(text_width(line));
            h = h.saturating_add(1);
        }
        Size::new(w.max(1), h.max(1))
    }

    fn draw(&self, painter: &mut Painter, ctx: &DrawCtx) {
        painter.fill_rect(ctx.inner(), ctx.style);
        let area = ctx.content;
        for (row, line) in self.text.lines().enumerate() {
            let row = row.min(u16::MAX as usize) as u16;
            if row >= area.h {
                break;
            }
            painter.text_clipped(
                Pos::new(area.x, area.y.saturating_add(row)),
                line,
                ctx.style,
                area,
            );
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/label.rs"]
mod tests;
