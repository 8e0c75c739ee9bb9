//! The engine context. `Ui` owns the display surface, the scene store, the
//! theme registry and all interaction state (focus, pressed, dragged, dirty).

use super::builder::Builder;
use super::geom::{Pos, Rect, Size};
use super::id::{ElementId, SubscriptionId};
use super::input::{Handler, Hook, HookEvent, Subscriber};
use super::layout::{Anchor, Placement};
use super::painter::Painter;
use super::style::{colors, Style};
use super::theme::{roles, ColorSpec, Theme, ThemeRegistry};
use super::tree::{ElementOptions, Node, SceneLink, SceneStore};
use super::widget::{Element, ThemeCtx};
use crate::core::error::{Result, UiError};
use crate::core::event::InputEvent;
use crate::ui::backend::test::TestSurface;
use crate::ui::backend::Surface;
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde_json::Value;
use slotmap::SlotMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub struct Ui {
    pub(crate) surface: Box<dyn Surface>,
    pub(crate) store: SceneStore,
    pub(crate) themes: ThemeRegistry,
    pub(crate) focused: Option<ElementId>,
    pub(crate) pressed: Option<ElementId>,
    pub(crate) dragged: Option<ElementId>,
    pub(crate) last_pos: Option<Pos>,
    pub(crate) dirty: bool,
    pub(crate) painter: Painter,
    building: usize,
    rebuild_pending: bool,
    subscription_ids: SlotMap<SubscriptionId, ()>,
    globals: FxHashMap<CompactString, Vec<(SubscriptionId, Subscriber)>>,
    pub(crate) frames: u64,
    stopped: bool,
}

impl Ui {
    pub fn new(surface: Box<dyn Surface>) -> Self {
        let mut ui = Self {
            surface,
            store: SceneStore::new(),
            themes: ThemeRegistry::with_default(),
            focused: None,
            pressed: None,
            dragged: None,
            last_pos: None,
            dirty: true,
            painter: Painter::new(),
            building: 0,
            rebuild_pending: false,
            subscription_ids: SlotMap::with_key(),
            globals: FxHashMap::default(),
            frames: 0,
            stopped: false,
        };
        ui.apply_active_theme();
        ui.store.rebuild_render_list();
        ui
    }

    /// Engine drawing onto a headless `TestSurface`.
    pub fn headless(width: u16, height: u16) -> Self {
        Self::new(Box::new(TestSurface::new(width, height)))
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    pub fn test_surface(&self) -> Option<&TestSurface> {
        self.surface.downcast_ref::<TestSurface>()
    }

    pub fn display_size(&self) -> Size {
        self.surface.size()
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn node(&self, id: ElementId) -> Option<&Node> {
        self.store.node(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.store.contains(id)
    }

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.store.node(id).map(Node::bounds)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.store.node(id)?.parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.store.node(id).map(Node::children).unwrap_or(&[])
    }

    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.store.find(name)
    }

    pub fn element(&self, id: ElementId) -> Option<&dyn Element> {
        self.store.node(id).map(Node::element)
    }

    pub fn element_as<T: Element>(&self, id: ElementId) -> Option<&T> {
        self.store.node(id)?.element.downcast_ref::<T>()
    }

    /// Mutate an element in place and flag the frame dirty.
    pub fn with_element<T: Element, R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let element = self.store.node_mut(id)?.element.downcast_mut::<T>()?;
        let out = f(element);
        self.mark_dirty();
        Some(out)
    }

    // ---- scenes and elements ----

    /// Create an element. It attaches to `options.parent` when given, else to
    /// `options.scene`, else to the active scene.
    pub fn add<E: Element>(&mut self, element: E, options: ElementOptions) -> Result<ElementId> {
        self.add_boxed(Box::new(element), options)
    }

    pub fn add_boxed(
        &mut self,
        element: Box<dyn Element>,
        options: ElementOptions,
    ) -> Result<ElementId> {
        let parent = options.parent;
        let scene: CompactString = options
            .scene
            .clone()
            .unwrap_or_else(|| self.store.active().into());
        match parent {
            Some(p) if !self.store.contains(p) => return Err(UiError::UnknownElement),
            None if self.store.scene(&scene).is_none() => {
                return Err(UiError::UnknownScene(scene.to_string()))
            }
            _ => {}
        }

        let id = self.store.insert(Node::new(element, options));
        let attached = match parent {
            Some(p) => self.store.attach_child(p, id),
            None => self.store.attach_root(&scene, id),
        };
        if let Err(err) = attached {
            self.store.remove(id);
            return Err(err);
        }

        self.apply_theme_to(id);
        self.structure_changed();
        Ok(id)
    }

    /// Run `f` with a builder whose `add` calls attach to `container`. Layout and
    /// the render-list rebuild happen once, after the outermost builder returns.
    pub fn build(
        &mut self,
        container: ElementId,
        f: impl FnOnce(&mut Builder<'_>) -> Result<()>,
    ) -> Result<()> {
        if !self.store.contains(container) {
            return Err(UiError::UnknownElement);
        }
        self.building += 1;
        let result = f(&mut Builder::new(self, container));
        self.building -= 1;
        if self.building == 0 && self.rebuild_pending {
            self.rebuild_pending = false;
            self.structure_changed();
        }
        result
    }

    /// Move `child` under `parent`, detaching it from wherever it was.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if !self.store.contains(parent) || !self.store.contains(child) {
            return Err(UiError::UnknownElement);
        }
        if parent == child || self.store.is_ancestor(child, parent) {
            return Err(UiError::InvalidParent);
        }
        self.store.detach(child);
        self.store.attach_child(parent, child)?;
        self.structure_changed();
        Ok(())
    }

    /// Destroy `child` if it belongs to `parent`.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<bool> {
        if self.store.node(child).and_then(|n| n.parent) != Some(parent) {
            return Ok(false);
        }
        self.destroy_element(child)?;
        Ok(true)
    }

    pub fn active_scene(&self) -> &str {
        self.store.active()
    }

    pub fn scene_names(&self) -> Vec<String> {
        self.store.scene_names().map(str::to_string).collect()
    }

    pub fn create_scene(&mut self, name: &str) {
        self.store.ensure_scene(name);
    }

    pub fn set_active_scene(&mut self, name: &str) {
        self.store.set_active(name);
        tracing::debug!(scene = name, "scene activated");
        self.structure_changed();
    }

    /// Draw `child` after `parent`'s roots, shifted by the offsets from the
    /// anchor point (or the parent scene's origin when no anchor is given).
    pub fn add_child_scene(
        &mut self,
        parent: &str,
        child: &str,
        x_offset: i32,
        y_offset: i32,
        anchor: Option<Anchor>,
    ) -> Result<()> {
        self.store.link_scene(
            parent,
            SceneLink {
                scene: child.into(),
                x_offset,
                y_offset,
                anchor,
            },
        )?;
        self.structure_changed();
        Ok(())
    }

    pub fn remove_child_scene(&mut self, parent: &str, child: &str) -> Result<bool> {
        let removed = self.store.unlink_scene(parent, child)?;
        if removed {
            self.structure_changed();
        }
        Ok(removed)
    }

    /// Destroy every root of `name` and drop its child-scene links.
    pub fn clear_scene(&mut self, name: &str) -> Result<()> {
        let roots = self
            .store
            .scene(name)
            .ok_or_else(|| UiError::UnknownScene(name.to_string()))?
            .roots
            .clone();
        for root in roots {
            self.destroy_recursive(root);
        }
        if let Some(scene) = self.store.scene_mut(name) {
            scene.roots.clear();
            scene.children.clear();
        }
        if self.store.active() == name {
            self.set_active_scene(name);
        } else {
            self.structure_changed();
        }
        Ok(())
    }

    /// Tear down `id` and its subtree, children first.
    pub fn destroy_element(&mut self, id: ElementId) -> Result<()> {
        if !self.store.contains(id) {
            return Err(UiError::UnknownElement);
        }
        self.destroy_recursive(id);
        self.structure_changed();
        Ok(())
    }

    fn destroy_recursive(&mut self, id: ElementId) {
        let children = match self.store.node(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.destroy_recursive(child);
        }

        if let Some(node) = self.store.node_mut(id) {
            for (_, list) in node.subscriptions.drain() {
                for (sub, _) in list {
                    self.subscription_ids.remove(sub);
                }
            }
        }
        for slot in [&mut self.focused, &mut self.pressed, &mut self.dragged] {
            if *slot == Some(id) {
                *slot = None;
            }
        }

        let handlers = catch_unwind(AssertUnwindSafe(|| {
            self.run_handlers(id, &HookEvent::Destroy);
        }));
        if handlers.is_err() {
            tracing::warn!(?id, "destroy handler panicked");
        }
        if let Some(node) = self.store.node_mut(id) {
            let kind = node.element.kind();
            match catch_unwind(AssertUnwindSafe(|| node.element.on_destroy())) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!(kind, %err, "destroy hook failed"),
                Err(_) => tracing::warn!(kind, "destroy hook panicked"),
            }
        }

        self.store.detach(id);
        self.store.remove(id);
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()> {
        let node = self.store.node_mut(id).ok_or(UiError::UnknownElement)?;
        if node.visible != visible {
            node.visible = visible;
            self.structure_changed();
        }
        Ok(())
    }

    /// Replace the declared placement; clears any drag latch.
    pub fn set_position(&mut self, id: ElementId, placement: Placement) -> Result<()> {
        let node = self.store.node_mut(id).ok_or(UiError::UnknownElement)?;
        node.placement = placement;
        node.latched = None;
        self.mark_dirty();
        Ok(())
    }

    pub fn set_size(&mut self, id: ElementId, width: u16, height: u16) -> Result<()> {
        let node = self.store.node_mut(id).ok_or(UiError::UnknownElement)?;
        node.width = Some(width);
        node.height = Some(height);
        node.size = Size::new(width, height);
        self.mark_dirty();
        Ok(())
    }

    /// Elements of the active render list, in draw order (roots only).
    pub fn render_list(&self) -> Vec<ElementId> {
        self.store.render_list().iter().map(|e| e.id).collect()
    }

    pub fn is_reachable(&self, id: ElementId) -> bool {
        self.store.is_reachable(id)
    }

    pub(crate) fn structure_changed(&mut self) {
        if self.building > 0 {
            self.rebuild_pending = true;
            return;
        }
        self.store.rebuild_render_list();
        self.repair_focus();
        self.mark_dirty();
    }

    fn repair_focus(&mut self) {
        if let Some(focused) = self.focused {
            if !self.store.is_reachable(focused) {
                self.set_focus(None, true);
            }
        }
    }

    // ---- themes ----

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    pub fn register_theme(&mut self, name: &str, theme: Theme) -> Result<()> {
        self.themes.register(name, theme)
    }

    pub fn register_theme_json(&mut self, name: &str, value: &Value) -> Result<()> {
        self.themes.register_json(name, value)
    }

    pub fn set_theme(&mut self, name: &str) -> Result<()> {
        self.themes.set_active(name)?;
        tracing::debug!(theme = name, "theme activated");
        self.apply_active_theme();
        Ok(())
    }

    pub fn active_theme(&self) -> Option<&str> {
        self.themes.active_name()
    }

    pub fn resolve_color(&self, role: &str, fallback: u8) -> u8 {
        self.themes.resolve_color(role, fallback)
    }

    pub fn resolve_opt_color(&self, spec: &ColorSpec, default_role: &str, fallback: u8) -> u8 {
        self.themes.resolve_opt_color(spec, default_role, fallback)
    }

    pub fn resolve_theme_path(&self, path: &str) -> Option<&Value> {
        self.themes.resolve_theme_path(path)
    }

    fn apply_active_theme(&mut self) {
        let palette = self.themes.active().and_then(|t| t.palette.clone());
        self.surface.reset_palette();
        for (index, rgb) in palette.into_iter().flatten() {
            self.surface.set_palette(index, rgb);
        }

        for id in self.store.all_elements() {
            self.apply_theme_to(id);
        }

        let bg = self.themes.resolve_color(roles::BACKGROUND, colors::BLACK);
        self.surface.set_bg(bg);
        self.surface.clear();
        self.mark_dirty();
    }

    fn apply_theme_to(&mut self, id: ElementId) {
        let Some(node) = self.store.node_mut(id) else {
            return;
        };
        let (fg_role, bg_role) = node.element.default_roles();
        let style = Style::new(
            self.themes.resolve_opt_color(&node.fg, fg_role, colors::WHITE),
            self.themes.resolve_opt_color(&node.bg, bg_role, colors::BLACK),
        );
        node.style = style;
        node.border_style = Style::new(
            self.themes.resolve_color(roles::BORDER, style.fg),
            style.bg,
        );
        node.element.apply_theme(&ThemeCtx {
            themes: &self.themes,
            style,
        });
    }

    // ---- dirty flag and lifecycle ----

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Frames drawn so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Ask the scheduler to end its loop.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    // ---- focus ----

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn pressed(&self) -> Option<ElementId> {
        self.pressed
    }

    pub fn dragged(&self) -> Option<ElementId> {
        self.dragged
    }

    pub fn last_pointer(&self) -> Option<Pos> {
        self.last_pos
    }

    /// Move keyboard focus. Refused while the current focus is locked unless
    /// `force` is set, and for elements that are not focusable and reachable.
    /// Returns whether focus now matches `target`.
    pub fn set_focus(&mut self, target: Option<ElementId>, force: bool) -> bool {
        if self.focused == target {
            return true;
        }
        if !force
            && self
                .focused
                .and_then(|f| self.store.node(f))
                .is_some_and(|n| n.lock)
        {
            return false;
        }
        if let Some(id) = target {
            let eligible = self.store.node(id).is_some_and(|n| n.focusable)
                && self.store.is_reachable(id);
            if !eligible {
                return false;
            }
        }

        if let Some(prev) = self.focused {
            if let Some(node) = self.store.node_mut(prev) {
                node.element.on_blur();
            }
            self.run_handlers(prev, &HookEvent::Blur);
        }
        self.focused = target;
        if let Some(id) = target {
            if let Some(node) = self.store.node_mut(id) {
                node.element.on_focus();
            }
            self.run_handlers(id, &HookEvent::Focus);
        }
        self.mark_dirty();
        self.focused == target
    }

    pub fn clear_focus(&mut self) -> bool {
        self.set_focus(None, false)
    }

    // ---- handlers and subscriptions ----

    /// Append a handler for `hook` on `id`; handlers run in registration order
    /// after the element's built-in behaviour.
    pub fn on(
        &mut self,
        id: ElementId,
        hook: Hook,
        handler: impl FnMut(&mut Ui, ElementId, &HookEvent) -> bool + 'static,
    ) -> Result<()> {
        let node = self.store.node_mut(id).ok_or(UiError::UnknownElement)?;
        node.handlers
            .entry(hook)
            .or_default()
            .push(Box::new(handler) as Handler);
        Ok(())
    }

    /// Run the user handlers of `id` for `event`; true if any claimed it.
    pub(crate) fn run_handlers(&mut self, id: ElementId, event: &HookEvent) -> bool {
        let hook = event.hook();
        let Some(mut list) = self
            .store
            .node_mut(id)
            .and_then(|n| n.handlers.remove(&hook))
        else {
            return false;
        };
        let mut claimed = false;
        for handler in list.iter_mut() {
            claimed |= handler(self, id, event);
        }
        if let Some(node) = self.store.node_mut(id) {
            let added = node.handlers.remove(&hook).unwrap_or_default();
            list.extend(added);
            node.handlers.insert(hook, list);
        }
        claimed
    }

    /// Subscribe to broadcasts named `name`, delivered only while `id` is
    /// visible and reachable from the active scene.
    pub fn subscribe(
        &mut self,
        id: ElementId,
        name: &str,
        f: impl FnMut(&mut Ui, &InputEvent) + 'static,
    ) -> Result<SubscriptionId> {
        if !self.store.contains(id) {
            return Err(UiError::UnknownElement);
        }
        let sub = self.subscription_ids.insert(());
        if let Some(node) = self.store.node_mut(id) {
            node.subscriptions
                .entry(name.into())
                .or_default()
                .push((sub, Box::new(f)));
        }
        Ok(sub)
    }

    pub fn subscribe_global(
        &mut self,
        name: &str,
        f: impl FnMut(&mut Ui, &InputEvent) + 'static,
    ) -> SubscriptionId {
        let sub = self.subscription_ids.insert(());
        self.globals
            .entry(name.into())
            .or_default()
            .push((sub, Box::new(f)));
        sub
    }

    pub fn unsubscribe(&mut self, sub: SubscriptionId) -> bool {
        if self.subscription_ids.remove(sub).is_none() {
            return false;
        }
        for list in self.globals.values_mut() {
            list.retain(|(s, _)| *s != sub);
        }
        for id in self.store.ids().collect::<Vec<_>>() {
            if let Some(node) = self.store.node_mut(id) {
                for list in node.subscriptions.values_mut() {
                    list.retain(|(s, _)| *s != sub);
                }
            }
        }
        true
    }

    /// Broadcast an application-defined event through the subscriber path.
    pub fn emit_event(&mut self, name: &str, args: Vec<Value>) {
        self.broadcast(&InputEvent::custom(name, args));
    }

    /// Element-local subscribers (render order, reachable only), then globals.
    pub(crate) fn broadcast(&mut self, event: &InputEvent) {
        let name: CompactString = event.name().into();
        for id in self.store.active_elements() {
            if self.store.is_reachable(id) {
                self.run_subscribers(Some(id), &name, event);
            }
        }
        self.run_subscribers(None, &name, event);
    }

    fn run_subscribers(&mut self, owner: Option<ElementId>, name: &CompactString, event: &InputEvent) {
        let taken = match owner {
            Some(id) => self
                .store
                .node_mut(id)
                .and_then(|n| n.subscriptions.remove(name)),
            None => self.globals.remove(name),
        };
        let Some(mut list) = taken else {
            return;
        };

        for (sub, f) in list.iter_mut() {
            if self.subscription_ids.contains_key(*sub) {
                f(self, event);
            }
        }
        list.retain(|(sub, _)| self.subscription_ids.contains_key(*sub));

        let slot = match owner {
            Some(id) => match self.store.node_mut(id) {
                Some(node) => node.subscriptions.entry(name.clone()).or_default(),
                None => {
                    // The owner was destroyed by one of its own subscribers.
                    for (sub, _) in list {
                        self.subscription_ids.remove(sub);
                    }
                    return;
                }
            },
            None => self.globals.entry(name.clone()).or_default(),
        };
        let added = std::mem::take(slot);
        list.extend(added);
        *slot = list;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/runtime.rs"]
mod tests;
