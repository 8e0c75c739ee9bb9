//! Terminal host glue: crossterm event conversion and raw-mode lifetime.
//! Only compiled with the `tui` feature; the engine itself never touches the
//! terminal directly.

pub mod crossterm;
pub mod terminal_guard;
