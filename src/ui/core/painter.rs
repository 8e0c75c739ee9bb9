use super::geom::{Pos, Rect};
use super::style::Style;
use crate::ui::backend::Surface;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderKind {
    Plain,
    Double,
}

impl BorderKind {
    fn glyphs(self) -> (char, char, char, char, char, char) {
        match self {
            BorderKind::Plain => ('┌', '┐', '└', '┘', '─', '│'),
            BorderKind::Double => ('╔', '╗', '╚', '╝', '═', '║'),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintCmd {
    FillRect {
        rect: Rect,
        style: Style,
    },
    HLine {
        pos: Pos,
        len: u16,
        ch: char,
        style: Style,
    },
    VLine {
        pos: Pos,
        len: u16,
        ch: char,
        style: Style,
    },
    Text {
        pos: Pos,
        text: String,
        style: Style,
        clip: Option<Rect>,
    },
    Border {
        rect: Rect,
        style: Style,
        kind: BorderKind,
    },
}

/// Paint commands recorded by one element's draw, replayed onto a surface.
#[derive(Debug, Default)]
pub struct Painter {
    cmds: Vec<PaintCmd>,
    cursor: Option<Pos>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.cursor = None;
    }

    pub fn cmds(&self) -> &[PaintCmd] {
        &self.cmds
    }

    pub fn push(&mut self, cmd: PaintCmd) {
        self.cmds.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: Rect, style: Style) {
        self.cmds.push(PaintCmd::FillRect { rect, style });
    }

    pub fn hline(&mut self, pos: Pos, len: u16, ch: char, style: Style) {
        self.cmds.push(PaintCmd::HLine { pos, len, ch, style });
    }

    pub fn vline(&mut self, pos: Pos, len: u16, ch: char, style: Style) {
        self.cmds.push(PaintCmd::VLine { pos, len, ch, style });
    }

    pub fn text(&mut self, pos: Pos, text: impl Into<String>, style: Style) {
        self.cmds.push(PaintCmd::Text {
            pos,
            text: text.into(),
            style,
            clip: None,
        });
    }

    pub fn text_clipped(
        &mut self,
        pos: Pos,
        text: impl Into<String>,
        style: Style,
        clip: Rect,
    ) {
        self.cmds.push(PaintCmd::Text {
            pos,
            text: text.into(),
            style,
            clip: Some(clip),
        });
    }

    pub fn border(&mut self, rect: Rect, style: Style, kind: BorderKind) {
        self.cmds.push(PaintCmd::Border { rect, style, kind });
    }

    /// Ask for the blinking text cursor at `pos` once the frame is presented.
    pub fn request_cursor(&mut self, pos: Pos) {
        self.cursor = Some(pos);
    }

    pub fn cursor(&self) -> Option<Pos> {
        self.cursor
    }

    /// Replay recorded commands onto `surface` through its primitives.
    pub fn flush(&self, surface: &mut dyn Surface) {
        for cmd in &self.cmds {
            match cmd {
                PaintCmd::FillRect { rect, style } => {
                    let line = " ".repeat(usize::from(rect.w));
                    for y in rect.y..rect.bottom() {
                        put(surface, Pos::new(rect.x, y), &line, *style);
                    }
                }
                PaintCmd::HLine { pos, len, ch, style } => {
                    if *len > 0 {
                        put(surface, *pos, &ch.to_string().repeat(usize::from(*len)), *style);
                    }
                }
                PaintCmd::VLine { pos, len, ch, style } => {
                    let glyph = ch.to_string();
                    for dy in 0..*len {
                        put(surface, Pos::new(pos.x, pos.y.saturating_add(dy)), &glyph, *style);
                    }
                }
                PaintCmd::Text {
                    pos,
                    text,
                    style,
                    clip,
                } => match clip {
                    None => put(surface, *pos, text, *style),
                    Some(clip) => {
                        if let Some((start, visible)) = clip_text(*pos, text, *clip) {
                            put(surface, start, &visible, *style);
                        }
                    }
                },
                PaintCmd::Border { rect, style, kind } => draw_border(surface, *rect, *style, *kind),
            }
        }
    }
}

fn put(surface: &mut dyn Surface, pos: Pos, text: &str, style: Style) {
    surface.set_fg(style.fg);
    surface.set_bg(style.bg);
    surface.move_to(pos);
    surface.write(text);
}

/// Portion of `text` drawn at `pos` that falls inside `clip`. Wide glyphs are
/// never split; the returned start moves right past clipped leading cells.
pub fn clip_text(pos: Pos, text: &str, clip: Rect) -> Option<(Pos, String)> {
    if clip.is_empty() || pos.y < clip.y || pos.y >= clip.bottom() {
        return None;
    }
    let mut x = pos.x;
    let mut start = None;
    let mut out = String::new();
    for g in text.graphemes(true) {
        let w = UnicodeWidthStr::width(g) as u16;
        if w == 0 {
            if start.is_some() {
                out.push_str(g);
            }
            continue;
        }
        if x >= clip.right() {
            break;
        }
        // Do not partially render wide glyphs.
        if x.saturating_add(w) > clip.right() {
            break;
        }
        if x >= clip.x {
            start.get_or_insert(x);
            out.push_str(g);
        }
        x = x.saturating_add(w);
    }
    let start = start?;
    Some((Pos::new(start, pos.y), out))
}

fn draw_border(surface: &mut dyn Surface, rect: Rect, style: Style, kind: BorderKind) {
    if rect.w < 2 || rect.h < 2 {
        return;
    }
    let (tl, tr, bl, br, h, v) = kind.glyphs();
    let inner = usize::from(rect.w - 2);
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    let top_line = format!("{tl}{}{tr}", h.to_string().repeat(inner));
    let bottom_line = format!("{bl}{}{br}", h.to_string().repeat(inner));
    put(surface, Pos::new(rect.x, rect.y), &top_line, style);
    put(surface, Pos::new(rect.x, bottom), &bottom_line, style);

    let side = v.to_string();
    for y in rect.y.saturating_add(1)..bottom {
        put(surface, Pos::new(rect.x, y), &side, style);
        put(surface, Pos::new(right, y), &side, style);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/painter.rs"]
mod tests;
