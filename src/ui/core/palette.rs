//! The 16-entry surface palette and its mapping onto terminal colours.

use super::style::{colors, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn parse_color_support(value: &str) -> Option<TerminalColorSupport> {
    match value.trim().to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" | "rgb" => Some(TerminalColorSupport::TrueColor),
        "256" | "ansi256" => Some(TerminalColorSupport::Ansi256),
        "16" | "ansi16" | "basic" => Some(TerminalColorSupport::Ansi16),
        _ => None,
    }
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Some(support) = std::env::var("ZUI_COLOR_SUPPORT")
        .ok()
        .as_deref()
        .and_then(parse_color_support)
    {
        return support;
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();

    if colorterm.contains("truecolor")
        || colorterm.contains("24bit")
        || colorterm.contains("direct")
        || term.contains("truecolor")
        || term.contains("24bit")
        || term.contains("direct")
    {
        return TerminalColorSupport::TrueColor;
    }

    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }

    TerminalColorSupport::Ansi16
}

/// Index -> true-colour remap. Unmapped entries fall back to the terminal's own colour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: [Option<u32>; colors::COUNT],
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: u8, rgb: u32) {
        if let Some(slot) = self.entries.get_mut(index as usize) {
            *slot = Some(rgb & 0x00FF_FFFF);
        }
    }

    pub fn reset(&mut self) {
        self.entries = [None; colors::COUNT];
    }

    pub fn get(&self, index: u8) -> Option<u32> {
        self.entries.get(index as usize).copied().flatten()
    }

    pub fn is_remapped(&self) -> bool {
        self.entries.iter().any(Option::is_some)
    }

    /// Effective RGB of an index: the remap if present, else the standard ANSI colour.
    pub fn rgb(&self, index: u8) -> u32 {
        self.get(index).unwrap_or_else(|| {
            let (r, g, b) = ansi256_index_to_rgb(index & 0x0f);
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
    }

    pub fn to_color(&self, index: u8, support: TerminalColorSupport) -> Color {
        match self.get(index) {
            Some(rgb) => map_color_for_support(Color::from_rgb_u32(rgb), support),
            None => Color::Indexed(index & 0x0f),
        }
    }
}

pub fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (_, Color::Reset) => Color::Reset,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi256, Color::Indexed(i)) => Color::Indexed(i),
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) if i <= 15 => Color::Indexed(i),
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
    }
}

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    // ANSI 0..15 depend on the terminal theme; only the standardized 16..255 cube is predictable.
    let mut best_index = 16u8;
    let mut best_distance = u32::MAX;
    for index in 16u16..=255u16 {
        let index_u8 = index as u8;
        let (pr, pg, pb) = ansi256_index_to_rgb(index_u8);
        let distance = color_distance_sq(r, g, b, pr, pg, pb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index_u8;
        }
    }
    best_index
}

fn rgb_to_ansi16_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;
    for (index, (pr, pg, pb)) in ANSI16_RGB.iter().copied().enumerate() {
        let distance = color_distance_sq(r, g, b, pr, pg, pb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index as u8;
        }
    }
    best_index
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }
    if (16..=231).contains(&index) {
        let level = [0u8, 95, 135, 175, 215, 255];
        let offset = index - 16;
        let r = level[(offset / 36) as usize];
        let g = level[((offset / 6) % 6) as usize];
        let b = level[(offset % 6) as usize];
        return (r, g, b);
    }
    let gray = 8u8.saturating_add((index - 232).saturating_mul(10));
    (gray, gray, gray)
}

fn color_distance_sq(r1: u8, g1: u8, b1: u8, r2: u8, g2: u8, b2: u8) -> u32 {
    let dr = i32::from(r1) - i32::from(r2);
    let dg = i32::from(g1) - i32::from(g2);
    let db = i32::from(b1) - i32::from(b2);
    (dr * dr + dg * dg + db * db) as u32
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/palette.rs"]
mod tests;
