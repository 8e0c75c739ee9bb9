//! Display surfaces.
//!
//! The engine only talks to the `Surface` trait; `ratatui` types stay behind the
//! terminal implementation so the core builds without a terminal.

use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::style::Style;
use std::any::Any;
use std::io;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Character-cell display the engine draws onto.
pub trait Surface {
    fn size(&self) -> Size;

    /// Current foreground palette index for subsequent writes.
    fn set_fg(&mut self, index: u8);

    fn set_bg(&mut self, index: u8);

    fn move_to(&mut self, pos: Pos);

    /// Write at the write cursor, advancing it; clipped at the surface edge.
    fn write(&mut self, text: &str);

    /// Blank every cell with the current colours.
    fn clear(&mut self);

    fn set_palette(&mut self, index: u8, rgb: u32);

    fn reset_palette(&mut self);

    /// Position the blinking text-entry cursor, or hide it.
    fn set_cursor(&mut self, pos: Option<Pos>);

    fn present(&mut self) -> io::Result<()>;

    /// Host reported a new size.
    fn resize(&mut self, _size: Size) {}

    fn as_any(&self) -> &dyn Any;
}

impl dyn Surface {
    pub fn downcast_ref<T: Surface + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub symbol: String,
    pub style: Style,
}

impl Cell {
    fn blank(style: Style) -> Self {
        Self {
            symbol: " ".to_string(),
            style,
        }
    }
}

/// Cell buffer with a pen (colours + write cursor), shared by the surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    size: Size,
    cells: Vec<Cell>,
    pen: Style,
    at: Pos,
}

impl CellGrid {
    pub fn new(size: Size) -> Self {
        let len = usize::from(size.w) * usize::from(size.h);
        Self {
            size,
            cells: vec![Cell::blank(Style::default()); len],
            pen: Style::default(),
            at: Pos::default(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        let pen = self.pen;
        *self = Self::new(size);
        self.pen = pen;
    }

    pub fn pen(&self) -> Style {
        self.pen
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        let idx = self.idx(x, y)?;
        self.cells.get(idx)
    }

    pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let idx = self.idx(x, y)?;
        self.cells.get_mut(idx)
    }

    /// Symbols of one row concatenated, for assertions and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.size.w)
            .filter_map(|x| self.cell(x, y))
            .map(|c| c.symbol.as_str())
            .collect()
    }

    pub fn set_fg(&mut self, index: u8) {
        self.pen.fg = index;
    }

    pub fn set_bg(&mut self, index: u8) {
        self.pen.bg = index;
    }

    pub fn move_to(&mut self, pos: Pos) {
        self.at = pos;
    }

    pub fn clear(&mut self) {
        let blank = Cell::blank(self.pen);
        self.cells.iter_mut().for_each(|c| *c = blank.clone());
        self.at = Pos::default();
    }

    pub fn write(&mut self, text: &str) {
        let y = self.at.y;
        if y >= self.size.h {
            return;
        }
        let style = self.pen;
        let mut x = self.at.x;
        for g in text.graphemes(true) {
            let w = UnicodeWidthStr::width(g) as u16;
            if w == 0 {
                continue;
            }
            if x >= self.size.w {
                break;
            }
            // Do not partially render wide glyphs.
            if w > 1 && x.saturating_add(w) > self.size.w {
                break;
            }
            if let Some(cell) = self.cell_mut(x, y) {
                cell.symbol = g.to_string();
                cell.style = style;
            }
            // Continuation cells of a wide glyph hold an empty symbol.
            for dx in 1..w {
                if let Some(cell) = self.cell_mut(x.saturating_add(dx), y) {
                    cell.symbol.clear();
                    cell.style = style;
                }
            }
            x = x.saturating_add(w);
        }
        self.at = Pos::new(x, y);
    }

    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.size.w || y >= self.size.h {
            return None;
        }
        Some(usize::from(y) * usize::from(self.size.w) + usize::from(x))
    }
}

#[cfg(feature = "tui")]
#[path = "ratatui.rs"]
pub mod terminal;

#[cfg(test)]
#[path = "../../../tests/unit/ui/backend/grid.rs"]
mod tests;
