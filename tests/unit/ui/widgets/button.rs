use super::*;
use crate::core::event::MouseButton;
use crate::ui::backend::test::TestSurface;
use crate::ui::core::geom::Rect;
use crate::ui::core::widget::ElementState;

fn ctx(bounds: Rect, state: ElementState) -> DrawCtx {
    DrawCtx {
        bounds,
        content: bounds,
        border: false,
        style: Style::new(15, 4),
        state,
    }
}

fn press() -> PointerEvent {
    PointerEvent {
        pos: Pos::new(0, 0),
        button: MouseButton::Left,
    }
}

#[test]
fn preferred_size_pads_label() {
    assert_eq!(Button::new("OK").preferred_size(), Size::new(6, 1));
}

#[test]
fn press_is_claimed_and_click_counts() {
    let mut button = Button::new("OK");
    assert!(button.on_press(&press()));
    assert_eq!(button.clicks(), 0);
    button.on_click(&press());
    assert_eq!(button.clicks(), 1);
}

#[test]
fn enter_and_space_activate() {
    let mut button = Button::new("OK");
    assert!(button.on_key(&KeyEvent::simple(KeyCode::Enter)));
    assert!(button.on_char(' '));
    assert!(!button.on_char('x'));
    assert!(!button.on_key(&KeyEvent::simple(KeyCode::Esc)));
    // Activation is counted by the click that follows, not here.
    assert_eq!(button.clicks(), 0);
}

#[test]
fn draw_centers_label_and_highlights_pressed() {
    let mut button = Button::new("OK");
    button.active = 6;
    let bounds = Rect::new(0, 0, 6, 1);

    let mut surface = TestSurface::new(6, 1);
    let mut painter = Painter::new();
    button.draw(&mut painter, &ctx(bounds, ElementState::default()));
    painter.flush(&mut surface);
    assert_eq!(surface.row_text(0), "  OK  ");
    assert_eq!(surface.cell(2, 0).unwrap().style.bg, 4);

    let mut painter = Painter::new();
    let state = ElementState {
        pressed: true,
        ..ElementState::default()
    };
    button.draw(&mut painter, &ctx(bounds, state));
    painter.flush(&mut surface);
    assert_eq!(surface.cell(2, 0).unwrap().style.bg, 6);
}
