//! Conversion from crossterm events to engine input events, plus the blocking
//! reader thread that feeds the scheduler's input channel.

use crate::core::event::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, ScrollDirection};
use crossterm::event::{Event, KeyEventKind, MouseEventKind};
use std::io;
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;

/// One terminal event can expand to several engine events: a printable key
/// press becomes `Key` followed by `Char`.
pub fn into_input_events(event: Event) -> Vec<InputEvent> {
    match event {
        Event::Key(key) => key_events(key),
        Event::Mouse(mouse) => into_pointer_event(mouse).into_iter().collect(),
        Event::Resize(width, height) => vec![InputEvent::Resize { width, height }],
        Event::Paste(text) => vec![InputEvent::Paste(text)],
        Event::FocusGained | Event::FocusLost => Vec::new(),
    }
}

fn key_events(raw: crossterm::event::KeyEvent) -> Vec<InputEvent> {
    let key = into_key_event(raw);
    if raw.kind == KeyEventKind::Release {
        return vec![InputEvent::KeyUp(key)];
    }
    let mut out = vec![InputEvent::Key(key)];
    if let KeyCode::Char(ch) = key.code {
        let chorded = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT);
        if !chorded && !ch.is_control() {
            out.push(InputEvent::Char(ch));
        }
    }
    out
}

pub fn into_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    let mut modifiers = into_key_modifiers(event.modifiers);
    let code = into_key_code(event.code, &mut modifiers);
    KeyEvent::new(code, modifiers)
}

fn into_key_modifiers(mods: crossterm::event::KeyModifiers) -> KeyModifiers {
    use crossterm::event::KeyModifiers as Ct;

    [
        (Ct::SHIFT, KeyModifiers::SHIFT),
        (Ct::CONTROL, KeyModifiers::CONTROL),
        (Ct::ALT, KeyModifiers::ALT),
        (Ct::SUPER, KeyModifiers::SUPER),
    ]
    .into_iter()
    .filter(|(ct, _)| mods.contains(*ct))
    .fold(KeyModifiers::NONE, |acc, (_, m)| acc | m)
}

fn into_key_code(code: crossterm::event::KeyCode, modifiers: &mut KeyModifiers) -> KeyCode {
    use crossterm::event::KeyCode as Ct;

    match code {
        Ct::Char(ch) => KeyCode::Char(ch),
        Ct::Enter => KeyCode::Enter,
        Ct::Tab => KeyCode::Tab,
        Ct::BackTab => KeyCode::BackTab,
        Ct::Esc => KeyCode::Esc,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Delete => KeyCode::Delete,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::F(n) => KeyCode::F(n),
        // Terminals report ctrl+space as NUL.
        Ct::Null => {
            *modifiers |= KeyModifiers::CONTROL;
            KeyCode::Char(' ')
        }
        _ => KeyCode::Unknown,
    }
}

fn into_mouse_button(button: crossterm::event::MouseButton) -> MouseButton {
    match button {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Bare pointer motion has no engine counterpart and maps to `None`.
pub fn into_pointer_event(event: crossterm::event::MouseEvent) -> Option<InputEvent> {
    let (x, y) = (event.column, event.row);
    let scroll = |direction| Some(InputEvent::Scroll { direction, x, y });
    match event.kind {
        MouseEventKind::Down(b) => Some(InputEvent::PointerDown {
            x,
            y,
            button: into_mouse_button(b),
        }),
        MouseEventKind::Up(b) => Some(InputEvent::PointerUp {
            x,
            y,
            button: into_mouse_button(b),
        }),
        MouseEventKind::Drag(b) => Some(InputEvent::PointerDrag {
            x,
            y,
            button: into_mouse_button(b),
        }),
        MouseEventKind::ScrollUp => scroll(ScrollDirection::Up),
        MouseEventKind::ScrollDown => scroll(ScrollDirection::Down),
        MouseEventKind::ScrollLeft => scroll(ScrollDirection::Left),
        MouseEventKind::ScrollRight => scroll(ScrollDirection::Right),
        MouseEventKind::Moved => None,
    }
}

/// Read terminal events on a dedicated thread until the read fails or the
/// receiving side of `tx` is dropped.
pub fn spawn_input_thread(tx: UnboundedSender<InputEvent>) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("zui-input".into())
        .spawn(move || loop {
            let event = match crossterm::event::read() {
                Ok(event) => event,
                Err(err) => {
                    tracing::error!(%err, "terminal read failed; input thread exiting");
                    return;
                }
            };
            for ev in into_input_events(event) {
                if tx.send(ev).is_err() {
                    return;
                }
            }
        })
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
