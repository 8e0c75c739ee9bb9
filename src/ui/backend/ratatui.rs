use super::{CellGrid, Surface};
use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::palette::{detect_terminal_color_support, Palette, TerminalColorSupport};
use crate::ui::core::style::{Color, Style};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color as RColor, Style as RStyle};
use ratatui::Terminal;
use std::any::Any;
use std::io;

/// Terminal surface: draws into a cell grid and mirrors it into a ratatui
/// frame on `present`, letting ratatui diff and flush the changes.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    grid: CellGrid,
    palette: Palette,
    support: TerminalColorSupport,
    cursor: Option<Pos>,
}

impl TerminalSurface {
    pub fn new(stdout: io::Stdout) -> io::Result<Self> {
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        let area = terminal.size()?;
        Ok(Self {
            terminal,
            grid: CellGrid::new(Size::new(area.width, area.height)),
            palette: Palette::new(),
            support: detect_terminal_color_support(),
            cursor: None,
        })
    }

    pub fn color_support(&self) -> TerminalColorSupport {
        self.support
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> Size {
        self.grid.size()
    }

    fn set_fg(&mut self, index: u8) {
        self.grid.set_fg(index);
    }

    fn set_bg(&mut self, index: u8) {
        self.grid.set_bg(index);
    }

    fn move_to(&mut self, pos: Pos) {
        self.grid.move_to(pos);
    }

    fn write(&mut self, text: &str) {
        self.grid.write(text);
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn set_palette(&mut self, index: u8, rgb: u32) {
        self.palette.set(index, rgb);
    }

    fn reset_palette(&mut self) {
        self.palette.reset();
    }

    fn set_cursor(&mut self, pos: Option<Pos>) {
        self.cursor = pos;
    }

    fn present(&mut self) -> io::Result<()> {
        let Self {
            terminal,
            grid,
            palette,
            support,
            cursor,
        } = self;
        terminal.draw(|frame| {
            copy_into(grid, palette, *support, frame.buffer_mut());
            if let Some(pos) = *cursor {
                // Without this call ratatui hides the cursor for the frame.
                frame.set_cursor_position((pos.x, pos.y));
            }
        })?;
        Ok(())
    }

    fn resize(&mut self, size: Size) {
        self.grid.resize(size);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn copy_into(grid: &CellGrid, palette: &Palette, support: TerminalColorSupport, buf: &mut Buffer) {
    let size = grid.size();
    for y in 0..size.h {
        for x in 0..size.w {
            let (Some(src), Some(dst)) = (grid.cell(x, y), buf.cell_mut((x, y))) else {
                continue;
            };
            let symbol = if src.symbol.is_empty() { " " } else { src.symbol.as_str() };
            dst.set_symbol(symbol)
                .set_style(to_ratatui_style(palette, support, src.style));
        }
    }
}

fn to_ratatui_style(palette: &Palette, support: TerminalColorSupport, s: Style) -> RStyle {
    RStyle::default()
        .fg(to_ratatui_color(palette.to_color(s.fg, support)))
        .bg(to_ratatui_color(palette.to_color(s.bg, support)))
}

fn to_ratatui_color(c: Color) -> RColor {
    match c {
        Color::Reset => RColor::Reset,
        Color::Rgb(r, g, b) => RColor::Rgb(r, g, b),
        Color::Indexed(i) => RColor::Indexed(i),
    }
}

// Surface behaviour is covered through `TestSurface`, which shares `CellGrid`.
