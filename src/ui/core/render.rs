//! Frame pass: measure, position and draw the active render list.

use super::geom::{Pos, Rect, Size};
use super::id::ElementId;
use super::layout::{resolve_child, resolve_root_at};
use super::painter::BorderKind;
use super::runtime::Ui;
use super::style::colors;
use super::theme::roles;
use super::widget::{DrawCtx, ElementState};
use crate::core::error::Result;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

impl Ui {
    /// Redraw everything if the dirty flag is set. Returns whether a frame was drawn.
    pub fn render(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        let fg = self.themes.resolve_color(roles::TEXT, colors::WHITE);
        let bg = self.themes.resolve_color(roles::BACKGROUND, colors::BLACK);
        self.surface.set_fg(fg);
        self.surface.set_bg(bg);
        self.surface.clear();

        self.layout_pass();

        let mut cursor = None;
        let roots: Vec<ElementId> = self.store.render_list().iter().map(|e| e.id).collect();
        for root in roots {
            self.draw_subtree(root, &mut cursor);
        }
        self.surface.set_cursor(cursor);
        self.surface.present()?;

        self.dirty = false;
        self.frames += 1;
        Ok(true)
    }

    /// Advance every element of the active render list by `dt`. Marks the frame
    /// dirty once if any element reported a change.
    pub fn update(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        for id in self.store.active_elements() {
            let Some(node) = self.store.node_mut(id) else {
                continue;
            };
            let kind = node.element.kind();
            let Some(target) = node.element.as_updatable() else {
                continue;
            };
            match catch_unwind(AssertUnwindSafe(|| target.update(dt))) {
                Ok(true) => changed = true,
                Ok(false) => {}
                Err(_) => tracing::error!(kind, "element update panicked; skipped this frame"),
            }
        }
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Recompute sizes and bounds of every element on the render list.
    pub(crate) fn layout_pass(&mut self) {
        let display = self.surface.size();
        let entries = self.store.render_list().to_vec();
        for entry in entries {
            let size = self.measure(entry.id);
            let origin = entry.origin.resolve(display);
            let Some(node) = self.store.node_mut(entry.id) else {
                continue;
            };
            node.bounds = match node.latched {
                Some(pos) => Rect::from_pos_size(pos, size),
                None => resolve_root_at(&node.placement, size, display, origin),
            };
            self.place_children(entry.id);
        }
    }

    /// Bottom-up size: declared size, else the container's children extent plus
    /// border and padding, else the element's preferred size.
    fn measure(&mut self, id: ElementId) -> Size {
        let children = match self.store.node(id) {
            Some(node) => node.children.clone(),
            None => return Size::default(),
        };
        let sizes: Vec<Size> = children.iter().map(|c| self.measure(*c)).collect();

        let Some(node) = self.store.node_mut(id) else {
            return Size::default();
        };
        let inset = node.inset().saturating_mul(2);
        let auto = match node.element.layout() {
            Some(layout) => {
                let extent = layout.measure(&sizes);
                Size::new(extent.w.saturating_add(inset), extent.h.saturating_add(inset))
            }
            None if !sizes.is_empty() => {
                // Plain parents wrap their largest child.
                let preferred = node.element.preferred_size();
                let w = sizes.iter().map(|s| s.w).max().unwrap_or(0);
                let h = sizes.iter().map(|s| s.h).max().unwrap_or(0);
                Size::new(
                    w.saturating_add(inset).max(preferred.w),
                    h.saturating_add(inset).max(preferred.h),
                )
            }
            None => node.element.preferred_size(),
        };
        node.size = Size::new(node.width.unwrap_or(auto.w), node.height.unwrap_or(auto.h));
        node.size
    }

    fn place_children(&mut self, id: ElementId) {
        let Some(node) = self.store.node(id) else {
            return;
        };
        let content = node.content();
        let children = node.children.clone();
        let sizes: Vec<Size> = children
            .iter()
            .map(|c| self.store.node(*c).map(|n| n.size).unwrap_or_default())
            .collect();
        let offsets = node
            .element
            .layout()
            .map(|layout| layout.arrange(&sizes, content.size()));

        for (i, child) in children.iter().enumerate() {
            let Some(child_node) = self.store.node_mut(*child) else {
                continue;
            };
            child_node.bounds = match &offsets {
                Some(offsets) => {
                    let at = offsets.get(i).copied().unwrap_or_default();
                    Rect::from_pos_size(
                        Pos::new(
                            content.x.saturating_add(at.x),
                            content.y.saturating_add(at.y),
                        ),
                        child_node.size,
                    )
                }
                None => resolve_child(&child_node.placement, child_node.size, content),
            };
            self.place_children(*child);
        }
    }

    fn draw_subtree(&mut self, id: ElementId, cursor: &mut Option<Pos>) {
        let Some(node) = self.store.node(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let ctx = DrawCtx {
            bounds: node.bounds,
            content: node.content(),
            border: node.border,
            style: node.style,
            state: ElementState {
                focused: self.focused == Some(id),
                pressed: self.pressed == Some(id),
                dragging: self.dragged == Some(id),
            },
        };

        self.painter.clear();
        if node.border {
            self.painter
                .border(node.bounds, node.border_style, BorderKind::Plain);
        }
        let painter = &mut self.painter;
        let drawn = catch_unwind(AssertUnwindSafe(|| node.element.draw(painter, &ctx)));
        match drawn {
            Ok(()) => {
                self.painter.flush(self.surface.as_mut());
                if let Some(pos) = self.painter.cursor() {
                    *cursor = Some(pos);
                }
            }
            Err(_) => {
                tracing::error!(kind = node.element.kind(), "element draw panicked; skipped this frame");
            }
        }

        let children = node.children.clone();
        for child in children {
            self.draw_subtree(child, cursor);
        }
    }
}
