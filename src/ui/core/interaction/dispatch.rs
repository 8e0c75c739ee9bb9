//! Input dispatch: hit testing, press/release/click/drag protocol, bubbling,
//! keyboard delivery to the focused element, then the broadcast to subscribers.

use super::geom::{Pos, Rect, Size};
use super::id::ElementId;
use super::input::HookEvent;
use super::runtime::Ui;
use super::widget::PointerEvent;
use crate::core::event::{InputEvent, KeyEvent, MouseButton, ScrollDirection};

impl Ui {
    /// Single entry point for every primitive input event.
    pub fn dispatch(&mut self, event: InputEvent) {
        if event.is_pointer() && self.dirty {
            self.layout_pass();
        }

        match &event {
            InputEvent::PointerDown { x, y, button } => {
                self.pointer_down(Pos::new(*x, *y), *button)
            }
            InputEvent::PointerUp { x, y, button } => self.pointer_up(Pos::new(*x, *y), *button),
            InputEvent::PointerDrag { x, y, .. } => self.pointer_drag(Pos::new(*x, *y)),
            InputEvent::Touch { x, y } => self.touch(Pos::new(*x, *y)),
            InputEvent::Scroll { direction, x, y } => self.scroll(*direction, Pos::new(*x, *y)),
            InputEvent::Char(ch) => self.deliver_char(*ch),
            InputEvent::Key(key) => self.deliver_key(key),
            // Releases only reach subscribers.
            InputEvent::KeyUp(_) => {}
            InputEvent::Resize { width, height } => {
                self.surface.resize(Size::new(*width, *height));
                self.mark_dirty();
            }
            InputEvent::Paste(text) => {
                for ch in text.chars() {
                    self.deliver_char(ch);
                }
            }
            InputEvent::Custom { .. } => {}
        }

        self.broadcast(&event);
    }

    pub fn hit_test(&self, pos: Pos) -> Option<ElementId> {
        self.store.hit_test(pos)
    }

    fn pointer_down(&mut self, pos: Pos, button: MouseButton) {
        self.last_pos = Some(pos);
        self.dragged = None;
        let Some(hit) = self.store.hit_test(pos) else {
            return;
        };
        self.focus_on_pointer(hit);

        let ev = PointerEvent { pos, button };
        let mut claimant = None;
        let mut cur = Some(hit);
        while let Some(id) = cur {
            if self.press(id, &ev) {
                claimant = Some(id);
                break;
            }
            cur = self.store.node(id).and_then(|n| n.parent);
        }

        // Fall back to the raw hit so release and click always have a target.
        self.pressed = claimant
            .or(Some(hit))
            .filter(|id| self.store.contains(*id));
        self.mark_dirty();
    }

    fn pointer_up(&mut self, pos: Pos, button: MouseButton) {
        self.last_pos = Some(pos);

        if let Some(dragged) = self.dragged.take() {
            if let Some(target) = self
                .store
                .node_mut(dragged)
                .and_then(|n| n.element.as_pointer())
            {
                target.on_drag_end(pos);
            }
            self.run_handlers(dragged, &HookEvent::DragEnd { pos });
            self.mark_dirty();
        }

        let Some(pressed) = self.pressed else {
            return;
        };
        let Some(bounds) = self.store.node(pressed).map(|n| n.bounds) else {
            self.pressed = None;
            return;
        };
        let in_bounds = bounds.contains(pos);
        let ev = PointerEvent { pos, button };

        if let Some(target) = self
            .store
            .node_mut(pressed)
            .and_then(|n| n.element.as_pointer())
        {
            target.on_release(&ev, in_bounds);
        }
        self.run_handlers(
            pressed,
            &HookEvent::Release {
                pos,
                button,
                in_bounds,
            },
        );
        if in_bounds {
            self.click(pressed, &ev);
        }

        self.pressed = None;
        self.mark_dirty();
    }

    fn pointer_drag(&mut self, pos: Pos) {
        let last = self.last_pos.replace(pos);
        let Some(pressed) = self.pressed else {
            return;
        };
        let Some(node) = self.store.node_mut(pressed) else {
            self.pressed = None;
            return;
        };
        let delta = last
            .map(|l| {
                (
                    i32::from(pos.x) - i32::from(l.x),
                    i32::from(pos.y) - i32::from(l.y),
                )
            })
            .unwrap_or((0, 0));

        let draggable = node.draggable;
        if draggable && delta != (0, 0) {
            if node.parent.is_none() {
                let origin = Pos::clamped(
                    i32::from(node.bounds.x) + delta.0,
                    i32::from(node.bounds.y) + delta.1,
                );
                node.latched = Some(origin);
                node.bounds = Rect::from_pos_size(origin, node.bounds.size());
            } else {
                node.placement.offset_x += delta.0;
                node.placement.offset_y += delta.1;
            }
        }
        if let Some(target) = node.element.as_pointer() {
            target.on_drag(pos, delta);
        }

        if draggable {
            self.dragged = Some(pressed);
        }
        self.run_handlers(pressed, &HookEvent::Drag { pos, delta });
        self.mark_dirty();
    }

    fn touch(&mut self, pos: Pos) {
        self.last_pos = Some(pos);
        let Some(hit) = self.store.hit_test(pos) else {
            return;
        };
        self.focus_on_pointer(hit);

        if let Some(target) = self
            .store
            .node_mut(hit)
            .and_then(|n| n.element.as_pointer())
        {
            target.on_touch(pos);
        }
        self.run_handlers(hit, &HookEvent::Touch { pos });

        let ev = PointerEvent {
            pos,
            button: MouseButton::Left,
        };
        self.press(hit, &ev);
        self.click(hit, &ev);
        self.mark_dirty();
    }

    fn scroll(&mut self, direction: ScrollDirection, pos: Pos) {
        self.last_pos = Some(pos);
        let Some(hit) = self.store.hit_test(pos) else {
            return;
        };
        let mut cur = Some(hit);
        while let Some(id) = cur {
            let builtin = self
                .store
                .node_mut(id)
                .and_then(|n| n.element.as_pointer())
                .is_some_and(|target| target.on_scroll(direction, pos));
            let user = self.run_handlers(id, &HookEvent::Scroll { direction, pos });
            if builtin || user {
                break;
            }
            cur = self.store.node(id).and_then(|n| n.parent);
        }
        self.mark_dirty();
    }

    fn deliver_char(&mut self, ch: char) {
        let Some(id) = self.focused else {
            return;
        };
        let activated = self
            .store
            .node_mut(id)
            .and_then(|n| n.element.as_keys())
            .is_some_and(|target| target.on_char(ch));
        self.run_handlers(id, &HookEvent::Char(ch));
        if activated {
            self.activate(id);
        }
        self.mark_dirty();
    }

    fn deliver_key(&mut self, key: &KeyEvent) {
        let Some(id) = self.focused else {
            return;
        };
        let activated = self
            .store
            .node_mut(id)
            .and_then(|n| n.element.as_keys())
            .is_some_and(|target| target.on_key(key));
        self.run_handlers(id, &HookEvent::Key(*key));
        if activated {
            self.activate(id);
        }
        self.mark_dirty();
    }

    /// Keyboard activation: a left click at the element's origin.
    fn activate(&mut self, id: ElementId) {
        let Some(pos) = self.store.node(id).map(|n| n.bounds.pos()) else {
            return;
        };
        self.click(
            id,
            &PointerEvent {
                pos,
                button: MouseButton::Left,
            },
        );
    }

    fn focus_on_pointer(&mut self, hit: ElementId) {
        if self.store.node(hit).is_some_and(|n| n.focusable) {
            self.set_focus(Some(hit), false);
        }
    }

    /// Built-in press then user handlers; draggable elements always claim.
    fn press(&mut self, id: ElementId, ev: &PointerEvent) -> bool {
        let Some(node) = self.store.node_mut(id) else {
            return false;
        };
        let draggable = node.draggable;
        let builtin = node
            .element
            .as_pointer()
            .is_some_and(|target| target.on_press(ev));
        let user = self.run_handlers(
            id,
            &HookEvent::Press {
                pos: ev.pos,
                button: ev.button,
            },
        );
        builtin || user || draggable
    }

    fn click(&mut self, id: ElementId, ev: &PointerEvent) {
        if let Some(target) = self
            .store
            .node_mut(id)
            .and_then(|n| n.element.as_pointer())
        {
            target.on_click(ev);
        }
        self.run_handlers(
            id,
            &HookEvent::Click {
                pos: ev.pos,
                button: ev.button,
            },
        );
    }
}
