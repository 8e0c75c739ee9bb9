use super::*;

#[test]
fn pointer_events_report_position() {
    let ev = InputEvent::PointerDown {
        x: 3,
        y: 4,
        button: MouseButton::Left,
    };
    assert_eq!(ev.pos(), Some(Pos::new(3, 4)));
    assert!(ev.is_pointer());
    assert_eq!(ev.name(), "pointer_down");
}

#[test]
fn keyboard_events_have_no_position() {
    let ev = InputEvent::Key(KeyEvent::simple(KeyCode::Enter));
    assert_eq!(ev.pos(), None);
    assert_eq!(ev.name(), "key");
    assert_eq!(InputEvent::KeyUp(KeyEvent::simple(KeyCode::Enter)).name(), "key_up");
}

#[test]
fn custom_events_are_routed_by_their_own_name() {
    let ev = InputEvent::custom("rednet_message", vec![serde_json::json!(7)]);
    assert_eq!(ev.name(), "rednet_message");
}

#[test]
fn modifiers_combine() {
    let mut mods = KeyModifiers::CONTROL;
    mods |= KeyModifiers::SHIFT;
    assert!(mods.contains(KeyModifiers::CONTROL));
    assert!(mods.contains(KeyModifiers::SHIFT));
    assert!(!mods.contains(KeyModifiers::ALT));
    assert!(KeyModifiers::NONE.is_empty());
}

#[test]
fn button_ids_and_scroll_deltas() {
    assert_eq!(MouseButton::Left.id(), 1);
    assert_eq!(MouseButton::Right.id(), 2);
    assert_eq!(MouseButton::Middle.id(), 3);
    assert_eq!(ScrollDirection::Up.delta(), -1);
    assert_eq!(ScrollDirection::Down.delta(), 1);
    assert!(!ScrollDirection::Left.is_vertical());
}
