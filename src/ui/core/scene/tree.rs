//! Scene graph store: one arena of element nodes, named scenes holding root
//! elements and offset child scenes, and the flattened render list of the
//! active scene.

use super::geom::{Pos, Rect, Size};
use super::id::{ElementId, SubscriptionId};
use super::input::{Handler, Hook, Subscriber};
use super::layout::{content_box, Anchor, Placement};
use super::style::Style;
use super::theme::ColorSpec;
use super::widget::Element;
use crate::core::error::{Result, UiError};
use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

/// Scene that exists (and is active) from the start.
pub const DEFAULT_SCENE: &str = "main";

/// Construction options. Everything is optional; missing fields take defaults.
#[derive(Clone, Debug)]
pub struct ElementOptions {
    pub parent: Option<ElementId>,
    pub scene: Option<CompactString>,
    pub placement: Placement,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub visible: bool,
    /// `None` uses the element's own default.
    pub focusable: Option<bool>,
    /// Keep focus until another element is focused with `force`.
    pub lock: bool,
    pub draggable: bool,
    pub border: bool,
    pub padding: u16,
    pub fg: ColorSpec,
    pub bg: ColorSpec,
    pub name: Option<CompactString>,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            parent: None,
            scene: None,
            placement: Placement::default(),
            width: None,
            height: None,
            visible: true,
            focusable: None,
            lock: false,
            draggable: false,
            border: false,
            padding: 0,
            fg: ColorSpec::Default,
            bg: ColorSpec::Default,
            name: None,
        }
    }
}

impl ElementOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn scene(mut self, scene: &str) -> Self {
        self.scene = Some(scene.into());
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.placement.x = Some(x);
        self.placement.y = Some(y);
        self
    }

    pub fn percent(mut self, x: f32, y: f32) -> Self {
        self.placement.x_percent = Some(x);
        self.placement.y_percent = Some(y);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.placement.anchor = Some(anchor);
        self
    }

    pub fn offset(mut self, dx: i32, dy: i32) -> Self {
        self.placement.offset_x = dx;
        self.placement.offset_y = dy;
        self
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = Some(focusable);
        self
    }

    pub fn lock(mut self) -> Self {
        self.lock = true;
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn fg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.fg = color.into();
        self
    }

    pub fn bg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.bg = color.into();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }
}

pub struct Node {
    pub(crate) element: Box<dyn Element>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    /// Owning scene, for roots.
    pub(crate) scene: Option<CompactString>,
    pub(crate) placement: Placement,
    pub(crate) width: Option<u16>,
    pub(crate) height: Option<u16>,
    pub(crate) visible: bool,
    pub(crate) focusable: bool,
    pub(crate) lock: bool,
    pub(crate) draggable: bool,
    pub(crate) border: bool,
    pub(crate) padding: u16,
    pub(crate) fg: ColorSpec,
    pub(crate) bg: ColorSpec,
    pub(crate) name: Option<CompactString>,
    pub(crate) style: Style,
    pub(crate) border_style: Style,
    pub(crate) size: Size,
    pub(crate) bounds: Rect,
    /// Absolute origin of a root moved by dragging; overrides its placement.
    pub(crate) latched: Option<Pos>,
    pub(crate) handlers: FxHashMap<Hook, Vec<Handler>>,
    pub(crate) subscriptions: FxHashMap<CompactString, Vec<(SubscriptionId, Subscriber)>>,
}

impl Node {
    pub(crate) fn new(element: Box<dyn Element>, options: ElementOptions) -> Self {
        let preferred = element.preferred_size();
        let focusable = options.focusable.unwrap_or_else(|| element.focusable());
        Self {
            parent: None,
            children: Vec::new(),
            scene: None,
            placement: options.placement,
            width: options.width,
            height: options.height,
            visible: options.visible,
            focusable,
            lock: options.lock,
            draggable: options.draggable,
            border: options.border,
            padding: options.padding,
            fg: options.fg,
            bg: options.bg,
            name: options.name,
            style: Style::default(),
            border_style: Style::default(),
            size: Size::new(
                options.width.unwrap_or(preferred.w),
                options.height.unwrap_or(preferred.h),
            ),
            bounds: Rect::default(),
            latched: None,
            handlers: FxHashMap::default(),
            subscriptions: FxHashMap::default(),
            element,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.element.kind()
    }

    pub fn element(&self) -> &dyn Element {
        self.element.as_ref()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Bounds shrunk by border and padding.
    pub fn content(&self) -> Rect {
        content_box(self.bounds, self.border, self.padding)
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn is_locked(&self) -> bool {
        self.lock
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn padding(&self) -> u16 {
        self.padding
    }

    /// Border plus padding on each side.
    pub(crate) fn inset(&self) -> u16 {
        u16::from(self.border).saturating_add(self.padding)
    }
}

/// A child scene reference, drawn after the parent's own roots.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLink {
    pub scene: CompactString,
    pub x_offset: i32,
    pub y_offset: i32,
    pub anchor: Option<Anchor>,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub name: CompactString,
    pub roots: Vec<ElementId>,
    pub children: Vec<SceneLink>,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Where a render-list entry's scene sits on the display. The innermost
/// anchored link wins; offsets accumulate along the chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneOrigin {
    pub anchor: Option<Anchor>,
    pub dx: i32,
    pub dy: i32,
}

impl SceneOrigin {
    fn then(self, link: &SceneLink) -> Self {
        Self {
            anchor: link.anchor.or(self.anchor),
            dx: self.dx + link.x_offset,
            dy: self.dy + link.y_offset,
        }
    }

    pub fn resolve(&self, display: Size) -> (i32, i32) {
        let (ax, ay) = self.anchor.map(|a| a.point(display)).unwrap_or((0, 0));
        (ax + self.dx, ay + self.dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderEntry {
    pub id: ElementId,
    pub origin: SceneOrigin,
}

pub struct SceneStore {
    nodes: SlotMap<ElementId, Node>,
    scenes: Vec<Scene>,
    active: CompactString,
    render_list: Vec<RenderEntry>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            scenes: vec![Scene::new(DEFAULT_SCENE)],
            active: DEFAULT_SCENE.into(),
            render_list: Vec::new(),
        }
    }

    pub fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes.keys()
    }

    pub(crate) fn insert(&mut self, node: Node) -> ElementId {
        self.nodes.insert(node)
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name() == Some(name))
            .map(|(id, _)| id)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name == name)
    }

    pub(crate) fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.name == name)
    }

    pub(crate) fn ensure_scene(&mut self, name: &str) -> &mut Scene {
        if let Some(idx) = self.scenes.iter().position(|s| s.name == name) {
            return &mut self.scenes[idx];
        }
        self.scenes.push(Scene::new(name));
        let last = self.scenes.len() - 1;
        &mut self.scenes[last]
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|s| s.name.as_str())
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub(crate) fn set_active(&mut self, name: &str) {
        self.ensure_scene(name);
        self.active = name.into();
    }

    pub(crate) fn attach_root(&mut self, scene: &str, id: ElementId) -> Result<()> {
        let scene_name: CompactString = scene.into();
        let scene = self
            .scene_mut(scene)
            .ok_or_else(|| UiError::UnknownScene(scene_name.to_string()))?;
        if !scene.roots.contains(&id) {
            scene.roots.push(id);
        }
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownElement)?;
        node.parent = None;
        node.scene = Some(scene_name);
        Ok(())
    }

    pub(crate) fn attach_child(&mut self, parent: ElementId, id: ElementId) -> Result<()> {
        if parent == id || self.is_ancestor(id, parent) {
            return Err(UiError::InvalidParent);
        }
        let parent_node = self.nodes.get_mut(parent).ok_or(UiError::UnknownElement)?;
        if !parent_node.children.contains(&id) {
            parent_node.children.push(id);
        }
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownElement)?;
        node.parent = Some(parent);
        node.scene = None;
        Ok(())
    }

    /// Splice `id` out of its parent's children or its scene's roots.
    pub(crate) fn detach(&mut self, id: ElementId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let parent = node.parent.take();
        let scene = node.scene.take();
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        if let Some(scene) = scene.and_then(|s| self.scene_mut(&s)) {
            scene.roots.retain(|r| *r != id);
        }
    }

    /// Whether `ancestor` is on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut cur = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes.get(p).and_then(|n| n.parent);
        }
        false
    }

    pub fn root_of(&self, id: ElementId) -> Option<ElementId> {
        let mut cur = id;
        loop {
            let node = self.nodes.get(cur)?;
            match node.parent {
                Some(p) => cur = p,
                None => return Some(cur),
            }
        }
    }

    /// `id` and all its descendants, depth-first, parents before children.
    pub fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.nodes.get(cur) else {
                continue;
            };
            out.push(cur);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub(crate) fn link_scene(&mut self, parent: &str, link: SceneLink) -> Result<()> {
        if self.scene(&link.scene).is_none() {
            return Err(UiError::UnknownScene(link.scene.to_string()));
        }
        let scene = self
            .scene_mut(parent)
            .ok_or_else(|| UiError::UnknownScene(parent.to_string()))?;
        scene.children.retain(|l| l.scene != link.scene);
        scene.children.push(link);
        Ok(())
    }

    pub(crate) fn unlink_scene(&mut self, parent: &str, child: &str) -> Result<bool> {
        let scene = self
            .scene_mut(parent)
            .ok_or_else(|| UiError::UnknownScene(parent.to_string()))?;
        let before = scene.children.len();
        scene.children.retain(|l| l.scene != child);
        Ok(scene.children.len() != before)
    }

    pub fn render_list(&self) -> &[RenderEntry] {
        &self.render_list
    }

    /// Visible roots of the active scene, then its child scenes depth-first.
    /// Each scene contributes at most once.
    pub(crate) fn rebuild_render_list(&mut self) {
        let mut list = Vec::new();
        let mut seen = FxHashSet::default();
        let active = self.active.clone();
        self.collect_scene(&active, SceneOrigin::default(), &mut seen, &mut list);
        self.render_list = list;
    }

    fn collect_scene(
        &self,
        name: &str,
        origin: SceneOrigin,
        seen: &mut FxHashSet<CompactString>,
        out: &mut Vec<RenderEntry>,
    ) {
        let Some(scene) = self.scene(name) else {
            return;
        };
        if !seen.insert(scene.name.clone()) {
            return;
        }
        for &id in &scene.roots {
            if self.nodes.get(id).is_some_and(|n| n.visible) {
                out.push(RenderEntry { id, origin });
            }
        }
        for link in &scene.children {
            self.collect_scene(&link.scene, origin.then(link), seen, out);
        }
    }

    /// Visible along its whole parent chain, with its root in the render list.
    pub fn is_reachable(&self, id: ElementId) -> bool {
        let mut cur = id;
        loop {
            let Some(node) = self.nodes.get(cur) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            match node.parent {
                Some(p) => cur = p,
                None => return self.render_list.iter().any(|e| e.id == cur),
            }
        }
    }

    /// Deepest visible element containing `pos`; topmost root first.
    pub fn hit_test(&self, pos: Pos) -> Option<ElementId> {
        self.render_list
            .iter()
            .rev()
            .find_map(|entry| self.hit_node(entry.id, pos))
    }

    fn hit_node(&self, id: ElementId, pos: Pos) -> Option<ElementId> {
        let node = self.nodes.get(id)?;
        if !node.visible || !node.bounds.contains(pos) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|child| self.hit_node(*child, pos))
            .or(Some(id))
    }

    /// Every node reachable from the active render list, parents first.
    pub(crate) fn active_elements(&self) -> Vec<ElementId> {
        self.render_list
            .iter()
            .flat_map(|entry| self.subtree(entry.id))
            .collect()
    }

    /// Every node of every scene, parents first.
    pub(crate) fn all_elements(&self) -> Vec<ElementId> {
        self.scenes
            .iter()
            .flat_map(|scene| scene.roots.iter())
            .flat_map(|root| self.subtree(*root))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/ui/core/tree.rs"]
mod tests;
