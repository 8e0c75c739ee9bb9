use super::*;
use crate::ui::core::painter::Painter;
use crate::ui::core::widget::DrawCtx;
use std::any::Any;

struct Block;

impl Element for Block {
    fn kind(&self) -> &'static str {
        "block"
    }

    fn draw(&self, _painter: &mut Painter, _ctx: &DrawCtx) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn block(store: &mut SceneStore, options: ElementOptions) -> ElementId {
    store.insert(Node::new(Box::new(Block), options))
}

fn root(store: &mut SceneStore, scene: &str, bounds: Rect) -> ElementId {
    let id = block(store, ElementOptions::new());
    store.attach_root(scene, id).unwrap();
    store.node_mut(id).unwrap().bounds = bounds;
    id
}

fn child(store: &mut SceneStore, parent: ElementId, bounds: Rect) -> ElementId {
    let id = block(store, ElementOptions::new());
    store.attach_child(parent, id).unwrap();
    store.node_mut(id).unwrap().bounds = bounds;
    id
}

fn ids(store: &SceneStore) -> Vec<ElementId> {
    store.render_list().iter().map(|e| e.id).collect()
}

#[test]
fn new_store_has_active_default_scene() {
    let store = SceneStore::new();
    assert_eq!(store.active(), DEFAULT_SCENE);
    assert!(store.scene(DEFAULT_SCENE).is_some());
    assert!(store.is_empty());
    assert!(store.render_list().is_empty());
}

#[test]
fn options_fill_node_fields() {
    let node = Node::new(
        Box::new(Block),
        ElementOptions::new()
            .size(4, 2)
            .border()
            .padding(1)
            .draggable()
            .lock()
            .focusable(true)
            .name("b"),
    );
    assert_eq!(node.kind(), "block");
    assert_eq!(node.size(), Size::new(4, 2));
    assert!(node.has_border());
    assert_eq!(node.padding(), 1);
    assert_eq!(node.inset(), 2);
    assert!(node.is_draggable());
    assert!(node.is_locked());
    assert!(node.is_focusable());
    assert!(node.is_visible());
    assert_eq!(node.name(), Some("b"));
}

#[test]
fn attach_root_requires_known_scene() {
    let mut store = SceneStore::new();
    let id = block(&mut store, ElementOptions::new());
    assert!(matches!(
        store.attach_root("nope", id),
        Err(UiError::UnknownScene(name)) if name == "nope"
    ));
    store.attach_root(DEFAULT_SCENE, id).unwrap();
    assert_eq!(store.node(id).unwrap().scene(), Some(DEFAULT_SCENE));
}

#[test]
fn attach_child_rejects_cycles() {
    let mut store = SceneStore::new();
    let a = root(&mut store, DEFAULT_SCENE, Rect::default());
    let b = child(&mut store, a, Rect::default());
    let c = child(&mut store, b, Rect::default());

    assert!(matches!(store.attach_child(c, a), Err(UiError::InvalidParent)));
    assert!(matches!(store.attach_child(b, b), Err(UiError::InvalidParent)));
    assert!(store.is_ancestor(a, c));
    assert!(!store.is_ancestor(c, a));
    assert_eq!(store.root_of(c), Some(a));
    assert_eq!(store.subtree(a), vec![a, b, c]);
}

#[test]
fn detach_splices_from_parent_and_scene() {
    let mut store = SceneStore::new();
    let a = root(&mut store, DEFAULT_SCENE, Rect::default());
    let b = child(&mut store, a, Rect::default());

    store.detach(b);
    assert!(store.node(a).unwrap().children().is_empty());
    assert_eq!(store.node(b).unwrap().parent(), None);

    store.detach(a);
    assert!(store.scene(DEFAULT_SCENE).unwrap().roots.is_empty());
}

#[test]
fn render_list_holds_visible_roots_then_child_scenes() {
    let mut store = SceneStore::new();
    store.ensure_scene("overlay");
    let a = root(&mut store, DEFAULT_SCENE, Rect::default());
    let hidden = root(&mut store, DEFAULT_SCENE, Rect::default());
    store.node_mut(hidden).unwrap().visible = false;
    let o = root(&mut store, "overlay", Rect::default());
    let other = {
        store.ensure_scene("other");
        root(&mut store, "other", Rect::default())
    };

    store
        .link_scene(
            DEFAULT_SCENE,
            SceneLink {
                scene: "overlay".into(),
                x_offset: 2,
                y_offset: 1,
                anchor: None,
            },
        )
        .unwrap();
    store.rebuild_render_list();

    assert_eq!(ids(&store), vec![a, o]);
    assert!(!store.is_reachable(hidden));
    assert!(!store.is_reachable(other));
    assert!(store.is_reachable(o));
    assert_eq!(
        store.render_list()[1].origin.resolve(Size::new(80, 24)),
        (2, 1)
    );
}

#[test]
fn scene_cycles_contribute_once() {
    let mut store = SceneStore::new();
    store.ensure_scene("b");
    let a = root(&mut store, DEFAULT_SCENE, Rect::default());
    let b = root(&mut store, "b", Rect::default());
    let link = |scene: &str| SceneLink {
        scene: scene.into(),
        x_offset: 0,
        y_offset: 0,
        anchor: None,
    };
    store.link_scene(DEFAULT_SCENE, link("b")).unwrap();
    store.link_scene("b", link(DEFAULT_SCENE)).unwrap();
    store.rebuild_render_list();

    assert_eq!(ids(&store), vec![a, b]);
}

#[test]
fn link_scene_replaces_and_validates() {
    let mut store = SceneStore::new();
    assert!(store
        .link_scene(
            DEFAULT_SCENE,
            SceneLink {
                scene: "ghost".into(),
                x_offset: 0,
                y_offset: 0,
                anchor: None,
            }
        )
        .is_err());

    store.ensure_scene("hud");
    for dx in [1, 5] {
        store
            .link_scene(
                DEFAULT_SCENE,
                SceneLink {
                    scene: "hud".into(),
                    x_offset: dx,
                    y_offset: 0,
                    anchor: None,
                },
            )
            .unwrap();
    }
    let links = &store.scene(DEFAULT_SCENE).unwrap().children;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].x_offset, 5);

    assert!(store.unlink_scene(DEFAULT_SCENE, "hud").unwrap());
    assert!(!store.unlink_scene(DEFAULT_SCENE, "hud").unwrap());
}

#[test]
fn nested_scene_origin_uses_innermost_anchor() {
    let display = Size::new(80, 24);
    let outer = SceneLink {
        scene: "a".into(),
        x_offset: 3,
        y_offset: 2,
        anchor: Some(Anchor::BottomRight),
    };
    let inner = SceneLink {
        scene: "b".into(),
        x_offset: -1,
        y_offset: 1,
        anchor: Some(Anchor::Center),
    };
    let origin = SceneOrigin::default().then(&outer).then(&inner);
    let (cx, cy) = Anchor::Center.point(display);
    assert_eq!(origin.resolve(display), (cx + 2, cy + 3));
}

#[test]
fn hit_test_prefers_last_root_and_deepest_child() {
    let mut store = SceneStore::new();
    let back = root(&mut store, DEFAULT_SCENE, Rect::new(0, 0, 10, 10));
    let front = root(&mut store, DEFAULT_SCENE, Rect::new(5, 5, 10, 10));
    let inner = child(&mut store, front, Rect::new(6, 6, 2, 2));
    store.rebuild_render_list();

    assert_eq!(store.hit_test(Pos::new(1, 1)), Some(back));
    assert_eq!(store.hit_test(Pos::new(6, 6)), Some(inner));
    assert_eq!(store.hit_test(Pos::new(9, 9)), Some(front));
    assert_eq!(store.hit_test(Pos::new(40, 20)), None);

    store.node_mut(inner).unwrap().visible = false;
    assert_eq!(store.hit_test(Pos::new(6, 6)), Some(front));
}

#[test]
fn hit_test_requires_containment_by_ancestors() {
    let mut store = SceneStore::new();
    let parent = root(&mut store, DEFAULT_SCENE, Rect::new(0, 0, 4, 4));
    // Overflows its parent.
    child(&mut store, parent, Rect::new(2, 2, 6, 6));
    store.rebuild_render_list();

    assert_eq!(store.hit_test(Pos::new(6, 6)), None);
}

#[test]
fn find_looks_up_names() {
    let mut store = SceneStore::new();
    let id = block(&mut store, ElementOptions::new().name("ok"));
    assert_eq!(store.find("ok"), Some(id));
    assert_eq!(store.find("nope"), None);
}

#[test]
fn active_and_all_elements_walk_subtrees() {
    let mut store = SceneStore::new();
    store.ensure_scene("off");
    let a = root(&mut store, DEFAULT_SCENE, Rect::default());
    let b = child(&mut store, a, Rect::default());
    let c = root(&mut store, "off", Rect::default());
    store.rebuild_render_list();

    assert_eq!(store.active_elements(), vec![a, b]);
    assert_eq!(store.all_elements(), vec![a, b, c]);

    store.set_active("off");
    store.rebuild_render_list();
    assert_eq!(store.active_elements(), vec![c]);
}
