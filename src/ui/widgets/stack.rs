use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::widget::{DrawCtx, Element, Layout};
use std::any::Any;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Cross-axis alignment of children narrower than the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// Lays children out one after another along `axis`, `spacing` cells apart.
/// Draws nothing itself.
#[derive(Clone, Copy, Debug)]
pub struct Stack {
    axis: Axis,
    spacing: u16,
    align: Align,
}

impl Stack {
    pub fn vertical(spacing: u16) -> Self {
        Self {
            axis: Axis::Vertical,
            spacing,
            align: Align::Start,
        }
    }

    pub fn horizontal(spacing: u16) -> Self {
        Self {
            axis: Axis::Horizontal,
            spacing,
            align: Align::Start,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn spacing(&self) -> u16 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: u16) {
        self.spacing = spacing;
    }

    /// (main, cross) extents of a child.
    fn split(&self, size: Size) -> (u16, u16) {
        match self.axis {
            Axis::Vertical => (size.h, size.w),
            Axis::Horizontal => (size.w, size.h),
        }
    }

    fn join(&self, main: u16, cross: u16) -> (u16, u16) {
        match self.axis {
            Axis::Vertical => (cross, main),
            Axis::Horizontal => (main, cross),
        }
    }
}

impl Layout for Stack {
    fn measure(&self, children: &[Size]) -> Size {
        let mut main = 0u16;
        let mut cross = 0u16;
        for (i, child) in children.iter().enumerate() {
            let (m, c) = self.split(*child);
            if i > 0 {
                main = main.saturating_add(self.spacing);
            }
            main = main.saturating_add(m);
            cross = cross.max(c);
        }
        let (w, h) = self.join(main, cross);
        Size::new(w, h)
    }

    fn arrange(&self, children: &[Size], content: Size) -> Vec<Pos> {
        let (_, avail) = self.split(content);
        let mut cursor = 0u16;
        children
            .iter()
            .map(|child| {
                let (m, c) = self.split(*child);
                let off = match self.align {
                    Align::Start => 0,
                    Align::Center => avail.saturating_sub(c) / 2,
                    Align::End => avail.saturating_sub(c),
                };
                let (x, y) = self.join(cursor, off);
                cursor = cursor.saturating_add(m).saturating_add(self.spacing);
                Pos::new(x, y)
            })
            .collect()
    }
}

impl Element for Stack {
    fn kind(&self) -> &'static str {
        match self.axis {
            Axis::Vertical => "vstack",
            Axis::Horizontal => "hstack",
        }
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
#[path = "../../../tests/unit/ui/widgets/stack.rs"]
mod tests;
