//! Engine-wide primitives shared by the UI layer and the terminal glue:
//! - event: strongly typed input events
//! - error: the error type returned by fallible engine operations

pub mod error;
pub mod event;

pub use error::{HookError, Result, UiError};
pub use event::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, ScrollDirection};
