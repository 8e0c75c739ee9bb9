//! zui - retained-mode terminal UI engine
//!
//! Modules:
//! - core: input events and the engine error type
//! - ui: scene store, positioning, themes, dispatch, rendering, surfaces, widgets
//! - runtime: the frame/input scheduler
//! - tui: crossterm event conversion and terminal lifetime (feature `tui`)
//! - settings: JSON user settings

pub mod core;
pub mod runtime;
pub mod settings;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;

pub use crate::ui::core::runtime::Ui;
