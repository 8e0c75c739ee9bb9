use super::*;

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[test]
fn parse_color_support_accepts_aliases() {
    assert_eq!(
        parse_color_support(" TrueColor "),
        Some(TerminalColorSupport::TrueColor)
    );
    assert_eq!(
        parse_color_support("ansi256"),
        Some(TerminalColorSupport::Ansi256)
    );
    assert_eq!(parse_color_support("basic"), Some(TerminalColorSupport::Ansi16));
    assert_eq!(parse_color_support("sixel"), None);
}

#[test]
fn explicit_override_takes_precedence() {
    let _guard = ENV_LOCK.lock().unwrap();
    let previous = std::env::var_os("ZUI_COLOR_SUPPORT");

    std::env::set_var("ZUI_COLOR_SUPPORT", "16");
    assert_eq!(
        detect_terminal_color_support(),
        TerminalColorSupport::Ansi16
    );

    match previous {
        Some(v) => std::env::set_var("ZUI_COLOR_SUPPORT", v),
        None => std::env::remove_var("ZUI_COLOR_SUPPORT"),
    }
}

#[test]
fn unmapped_entries_stay_indexed() {
    let palette = Palette::new();
    assert!(!palette.is_remapped());
    assert_eq!(
        palette.to_color(colors::CYAN, TerminalColorSupport::TrueColor),
        Color::Indexed(colors::CYAN)
    );
    assert_eq!(palette.rgb(colors::BLACK), 0x000000);
    assert_eq!(palette.rgb(colors::BRIGHT_WHITE), 0xFFFFFF);
}

#[test]
fn remapped_entries_become_true_colour() {
    let mut palette = Palette::new();
    palette.set(colors::BLUE, 0x3366CC);
    assert!(palette.is_remapped());
    assert_eq!(palette.get(colors::BLUE), Some(0x3366CC));
    assert_eq!(
        palette.to_color(colors::BLUE, TerminalColorSupport::TrueColor),
        Color::Rgb(0x33, 0x66, 0xCC)
    );

    palette.reset();
    assert_eq!(palette.get(colors::BLUE), None);
}

#[test]
fn out_of_range_index_is_ignored() {
    let mut palette = Palette::new();
    palette.set(16, 0x123456);
    assert!(!palette.is_remapped());
}

#[test]
fn remap_downgrades_without_true_colour() {
    let mut palette = Palette::new();
    palette.set(colors::RED, 0xFF0000);
    assert_eq!(
        palette.to_color(colors::RED, TerminalColorSupport::Ansi16),
        Color::Indexed(9)
    );
    assert_eq!(
        palette.to_color(colors::RED, TerminalColorSupport::Ansi256),
        Color::Indexed(196)
    );
}

#[test]
fn ansi256_mapping_prefers_standard_cube() {
    assert_eq!(
        map_color_for_support(Color::Rgb(0, 0, 0), TerminalColorSupport::Ansi256),
        Color::Indexed(16)
    );
    assert_eq!(
        map_color_for_support(Color::Reset, TerminalColorSupport::Ansi16),
        Color::Reset
    );
}
