/// Concrete terminal colour, produced only when a palette index is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Reset,
    Rgb(u8, u8, u8),
    Indexed(u8),
}

impl Color {
    pub fn from_rgb_u32(rgb: u32) -> Self {
        Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// Palette indices of the 16-entry surface palette (ANSI order).
pub mod colors {
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;
    pub const GRAY: u8 = 8;
    pub const LIGHT_RED: u8 = 9;
    pub const LIGHT_GREEN: u8 = 10;
    pub const LIGHT_YELLOW: u8 = 11;
    pub const LIGHT_BLUE: u8 = 12;
    pub const LIGHT_MAGENTA: u8 = 13;
    pub const LIGHT_CYAN: u8 = 14;
    pub const BRIGHT_WHITE: u8 = 15;

    pub const COUNT: usize = 16;
}

/// Foreground/background pair of palette indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: u8,
    pub bg: u8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: colors::WHITE,
            bg: colors::BLACK,
        }
    }
}

impl Style {
    pub const fn new(fg: u8, bg: u8) -> Self {
        Self { fg, bg }
    }

    pub fn fg(mut self, color: u8) -> Self {
        self.fg = color;
        self
    }

    pub fn bg(mut self, color: u8) -> Self {
        self.bg = color;
        self
    }

    /// Swap foreground and background (used for pressed/selected highlights).
    pub fn reversed(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/ui/core/style.rs"]
mod tests;
