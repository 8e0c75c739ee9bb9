use super::text_width;
use crate::core::event::{KeyCode, KeyEvent};
use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::style::colors;
use crate::ui::core::theme::roles;
use crate::ui::core::widget::{
    DrawCtx, Element, KeyTarget, PointerEvent, PointerTarget, ThemeCtx,
};
use std::any::Any;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 10;

/// Single-line editable text. The cursor is a byte offset that always sits on
/// a grapheme boundary.
#[derive(Clone, Debug)]
pub struct TextField {
    text: String,
    cursor: usize,
    placeholder: String,
    max_len: Option<usize>,
    muted: u8,
}

impl TextField {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            placeholder: String::new(),
            max_len: None,
            muted: colors::GRAY,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Limit the field to `max` graphemes.
    pub fn with_max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if let Some(max) = self.max_len {
            if self.text.graphemes(true).count() >= max {
                return;
            }
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        // A combining mark may have merged into the previous grapheme.
        self.cursor = self.snap(self.cursor);
    }

    pub fn backspace(&mut self) {
        let prev = self.prev_boundary();
        if prev < self.cursor {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        let next = self.next_boundary();
        if next > self.cursor {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
            .unwrap_or(self.cursor)
    }

    /// Round `idx` up to the end of the grapheme containing it.
    fn snap(&self, idx: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(start, g)| (start, start + g.len()))
            .find(|(start, end)| *start < idx && idx <= *end)
            .map(|(_, end)| end)
            .unwrap_or(idx)
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible `[start, end)` byte window of `text` within `width` cells that keeps
/// the cursor cell on screen. Never splits a grapheme.
pub(crate) fn visible_window(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (cursor, cursor);
    }
    // One cell is reserved for the cursor itself.
    let budget = width.saturating_sub(1);
    let mut start = 0;
    if text[..cursor].width() > budget {
        let mut used = 0;
        start = cursor;
        for (idx, g) in text[..cursor].grapheme_indices(true).rev() {
            let w = g.width();
            if used + w > budget {
                break;
            }
            used += w;
            start = idx;
        }
    }

    let mut end = start;
    let mut used = 0;
    for g in text[start..].graphemes(true) {
        let w = g.width();
        if used + w > width {
            break;
        }
        used += w;
        end += g.len();
    }
    (start, end)
}

impl Element for TextField {
    fn kind(&self) -> &'static str {
        "text_field"
    }

    fn preferred_size(&self) -> Size {
        let w = text_width(&self.text).max(text_width(&self.placeholder));
        Size::new(w.saturating_add(1).max(MIN_WIDTH), 1)
    }

    fn focusable(&self) -> bool {
        true
    }

    fn default_roles(&self) -> (&'static str, &'static str) {
        (roles::INPUT_TEXT, roles::INPUT)
    }

    fn apply_theme(&mut self, ctx: &ThemeCtx<'_>) {
        self.muted = ctx.role(roles::MUTED, colors::GRAY);
    }

    fn draw(&self, painter: &mut Painter, ctx: &DrawCtx) {
        painter.fill_rect(ctx.inner(), ctx.style);
        let area = ctx.content;
        if area.is_empty() {
            return;
        }

        if self.text.is_empty() && !ctx.state.focused {
            painter.text_clipped(
                area.pos(),
                self.placeholder.as_str(),
                ctx.style.fg(self.muted),
                area,
            );
            return;
        }

        let (start, end) = visible_window(&self.text, self.cursor, usize::from(area.w));
        painter.text_clipped(area.pos(), &self.text[start..end], ctx.style, area);

        if ctx.state.focused {
            let col = self.text[start..self.cursor].width().min(usize::from(area.w - 1)) as u16;
            painter.request_cursor(Pos::new(area.x + col, area.y));
        }
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

impl PointerTarget for TextField {
    fn on_press(&mut self, _ev: &PointerEvent) -> bool {
        true
    }
}

impl KeyTarget for TextField {
    fn on_char(&mut self, ch: char) -> bool {
        self.insert_char(ch);
        false
    }

    fn on_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
        false
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/text_field.rs"]
mod tests;
