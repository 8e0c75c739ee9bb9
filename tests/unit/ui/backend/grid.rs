use super::*;

#[test]
fn write_advances_cursor_with_pen_colours() {
    let mut grid = CellGrid::new(Size::new(6, 2));
    grid.set_fg(3);
    grid.set_bg(4);
    grid.move_to(Pos::new(1, 1));
    grid.write("ab");
    grid.write("c");

    assert_eq!(grid.row_text(1), " abc  ");
    let cell = grid.cell(2, 1).unwrap();
    assert_eq!(cell.style, Style::new(3, 4));
    assert_eq!(grid.cell(0, 1).unwrap().style, Style::default());
}

#[test]
fn write_clips_at_right_edge() {
    let mut grid = CellGrid::new(Size::new(3, 1));
    grid.move_to(Pos::new(1, 0));
    grid.write("hello");
    assert_eq!(grid.row_text(0), " he");
}

#[test]
fn write_below_surface_is_ignored() {
    let mut grid = CellGrid::new(Size::new(3, 1));
    grid.move_to(Pos::new(0, 5));
    grid.write("x");
    assert_eq!(grid.row_text(0), "   ");
}

#[test]
fn wide_glyph_that_does_not_fit_is_dropped() {
    let mut grid = CellGrid::new(Size::new(1, 1));
    grid.write("👍");
    assert_eq!(grid.cell(0, 0).unwrap().symbol, " ");
}

#[test]
fn wide_glyph_occupies_continuation_cell() {
    let mut grid = CellGrid::new(Size::new(3, 1));
    grid.write("👍x");
    assert_eq!(grid.cell(0, 0).unwrap().symbol, "👍");
    assert_eq!(grid.cell(1, 0).unwrap().symbol, "");
    assert_eq!(grid.cell(2, 0).unwrap().symbol, "x");
}

#[test]
fn clear_uses_current_background() {
    let mut grid = CellGrid::new(Size::new(2, 2));
    grid.write("ab");
    grid.set_bg(5);
    grid.clear();
    assert_eq!(grid.row_text(0), "  ");
    assert_eq!(grid.cell(1, 1).unwrap().style.bg, 5);
}

#[test]
fn resize_keeps_pen() {
    let mut grid = CellGrid::new(Size::new(2, 2));
    grid.set_fg(9);
    grid.resize(Size::new(4, 1));
    assert_eq!(grid.size(), Size::new(4, 1));
    assert_eq!(grid.pen().fg, 9);
    assert!(grid.cell(3, 0).is_some());
    assert!(grid.cell(0, 1).is_none());
}
