use super::*;
use crossterm::event::{
    KeyCode as CtCode, KeyEvent as CtKey, KeyEventKind as CtKind, KeyEventState,
    KeyModifiers as CtMods, MouseButton as CtButton, MouseEvent as CtMouse,
};

fn key(code: CtCode, mods: CtMods, kind: CtKind) -> Event {
    Event::Key(CtKey {
        code,
        modifiers: mods,
        kind,
        state: KeyEventState::NONE,
    })
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CtMouse {
    CtMouse {
        kind,
        column,
        row,
        modifiers: CtMods::NONE,
    }
}

#[test]
fn printable_press_emits_key_then_char() {
    let events = into_input_events(key(CtCode::Char('a'), CtMods::NONE, CtKind::Press));
    assert_eq!(
        events,
        vec![
            InputEvent::Key(KeyEvent::simple(KeyCode::Char('a'))),
            InputEvent::Char('a'),
        ]
    );
}

#[test]
fn shifted_repeat_still_types() {
    let events = into_input_events(key(CtCode::Char('A'), CtMods::SHIFT, CtKind::Repeat));
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], InputEvent::Char('A'));
}

#[test]
fn chorded_keys_do_not_type() {
    let events = into_input_events(key(CtCode::Char('c'), CtMods::CONTROL, CtKind::Press));
    assert_eq!(
        events,
        vec![InputEvent::Key(KeyEvent::ctrl(KeyCode::Char('c')))]
    );

    let events = into_input_events(key(CtCode::Enter, CtMods::NONE, CtKind::Press));
    assert_eq!(events, vec![InputEvent::Key(KeyEvent::simple(KeyCode::Enter))]);
}

#[test]
fn release_maps_to_key_up_only() {
    let events = into_input_events(key(CtCode::Char('x'), CtMods::NONE, CtKind::Release));
    assert_eq!(
        events,
        vec![InputEvent::KeyUp(KeyEvent::simple(KeyCode::Char('x')))]
    );
}

#[test]
fn ctrl_space_normalizes_from_null() {
    let ev = into_key_event(CtKey::new(CtCode::Null, CtMods::NONE));
    assert_eq!(ev, KeyEvent::ctrl(KeyCode::Char(' ')));
}

#[test]
fn modifiers_combine() {
    let ev = into_key_event(CtKey::new(CtCode::Left, CtMods::CONTROL | CtMods::ALT));
    assert!(ev.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT));
    assert!(!ev.modifiers.contains(KeyModifiers::SHIFT));
}

#[test]
fn mouse_buttons_map_to_pointer_events() {
    assert_eq!(
        into_pointer_event(mouse(MouseEventKind::Down(CtButton::Right), 3, 4)),
        Some(InputEvent::PointerDown {
            x: 3,
            y: 4,
            button: MouseButton::Right,
        })
    );
    assert_eq!(
        into_pointer_event(mouse(MouseEventKind::Drag(CtButton::Left), 5, 6)),
        Some(InputEvent::PointerDrag {
            x: 5,
            y: 6,
            button: MouseButton::Left,
        })
    );
    assert_eq!(
        into_pointer_event(mouse(MouseEventKind::Up(CtButton::Middle), 0, 0)),
        Some(InputEvent::PointerUp {
            x: 0,
            y: 0,
            button: MouseButton::Middle,
        })
    );
}

#[test]
fn wheel_maps_to_scroll_and_motion_is_dropped() {
    assert_eq!(
        into_pointer_event(mouse(MouseEventKind::ScrollDown, 1, 2)),
        Some(InputEvent::Scroll {
            direction: ScrollDirection::Down,
            x: 1,
            y: 2,
        })
    );
    assert_eq!(into_pointer_event(mouse(MouseEventKind::Moved, 1, 2)), None);
}

#[test]
fn resize_paste_and_focus() {
    assert_eq!(
        into_input_events(Event::Resize(80, 24)),
        vec![InputEvent::Resize {
            width: 80,
            height: 24,
        }]
    );
    assert_eq!(
        into_input_events(Event::Paste("hi".into())),
        vec![InputEvent::Paste("hi".into())]
    );
    assert!(into_input_events(Event::FocusLost).is_empty());
}
