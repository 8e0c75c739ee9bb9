//! Built-in elements.

pub mod button;
pub mod grid;
pub mod label;
pub mod panel;
pub mod progress;
pub mod stack;
pub mod text_field;

pub use button::Button;
pub use grid::Grid;
pub use label::Label;
pub use panel::Panel;
pub use progress::ProgressBar;
pub use stack::{Align, Axis, Stack};
pub use text_field::TextField;

use unicode_width::UnicodeWidthStr;

/// Display width of `text`, saturated to `u16`.
pub(crate) fn text_width(text: &str) -> u16 {
    text.width().min(u16::MAX as usize) as u16
}
