use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::widget::{DrawCtx, Element, Layout};
use std::any::Any;

/// Row-major grid. Each column is as wide as its widest child, each row as
/// tall as its tallest child.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    columns: usize,
    spacing: u16,
}

impl Grid {
    /// `columns` is raised to at least one.
    pub fn new(columns: usize, spacing: u16) -> Self {
        Self {
            columns: columns.max(1),
            spacing,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn tracks(&self, children: &[Size]) -> (Vec<u16>, Vec<u16>) {
        let cols = self.columns.min(children.len());
        let rows = children.len().div_ceil(self.columns);
        let mut widths = vec![0u16; cols];
        let mut heights = vec![0u16; rows];
        for (i, child) in children.iter().enumerate() {
            let (row, col) = (i / self.columns, i % self.columns);
            widths[col] = widths[col].max(child.w);
            heights[row] = heights[row].max(child.h);
        }
        (widths, heights)
    }

    fn span(&self, tracks: &[u16]) -> u16 {
        let gaps = (tracks.len().saturating_sub(1)).min(u16::MAX as usize) as u16;
        tracks
            .iter()
            .fold(0u16, |acc, t| acc.saturating_add(*t))
            .saturating_add(gaps.saturating_mul(self.spacing))
    }
}

impl Layout for Grid {
    fn measure(&self, children: &[Size]) -> Size {
        let (widths, heights) = self.tracks(children);
        Size::new(self.span(&widths), self.span(&heights))
    }

    fn arrange(&self, children: &[Size], _content: Size) -> Vec<Pos> {
        let (widths, heights) = self.tracks(children);
        let starts = |tracks: &[u16]| -> Vec<u16> {
            let mut at = 0u16;
            tracks
                .iter()
                .map(|t| {
                    let start = at;
                    at = at.saturating_add(*t).saturating_add(self.spacing);
                    start
                })
                .collect()
        };
        let xs = starts(&widths);
        let ys = starts(&heights);
        (0..children.len())
            .map(|i| Pos::new(xs[i % self.columns], ys[i / self.columns]))
            .collect()
    }
}

impl Element for Grid {
    fn kind(&self) -> &'static str {
        "grid"
    }

    fn draw(&self, _painter: &mut Painter, _ctx: &DrawCtx) {}

    fn layout(&self) -> Option<&dyn Layout> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/grid.rs"]
mod tests;
