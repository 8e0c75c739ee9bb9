pub mod builder;
pub mod geom;
pub mod id;
pub mod layout;
pub mod painter;
pub mod palette;
pub mod runtime;
pub mod theme;

#[path = "primitives/style.rs"]
pub mod style;

#[path = "scene/tree.rs"]
pub mod tree;
#[path = "scene/widget.rs"]
pub mod widget;

#[path = "interaction/input.rs"]
pub mod input;
#[path = "interaction/dispatch.rs"]
mod dispatch;

mod render;
