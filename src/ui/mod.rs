//! UI layer.
//!
//! `core` holds the engine proper (scene store, positioning, themes, input
//! dispatch, render pass). Elements draw through a `Painter` onto a `backend`
//! surface, so the engine never sees `ratatui` types. `widgets` holds the
//! built-in elements and layout containers.

pub mod core;

pub mod backend;

pub mod widgets;
