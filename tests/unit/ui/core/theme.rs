use super::*;
use serde_json::json;

fn registry_with(theme: Theme) -> ThemeRegistry {
    let mut registry = ThemeRegistry::new();
    let name = theme.name.clone();
    registry.register(&name, theme).unwrap();
    registry.set_active(&name).unwrap();
    registry
}

#[test]
fn literal_index_bypasses_theming() {
    let registry = registry_with(Theme::new("t", [("interactive", 9)]));
    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::Literal(5), "interactive", 3),
        5
    );
    assert_eq!(
        ThemeRegistry::new().resolve_opt_color(&ColorSpec::Literal(5), "interactive", 3),
        5
    );
}

#[test]
fn default_spec_uses_default_role_then_fallback() {
    let registry = registry_with(Theme::new("t", [("interactive", 9)]));
    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::Default, "interactive", 3),
        9
    );

    let registry = registry_with(Theme::new("bare", [("text", 7)]));
    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::Default, "interactive", 3),
        3
    );
}

#[test]
fn named_role_resolves_or_falls_back() {
    let registry = registry_with(Theme::new("t", [("error", 1)]));
    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::from("error"), "text", 7),
        1
    );
    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::from("missing"), "error", 7),
        7
    );
}

#[test]
fn dotted_role_walks_nested_tables() {
    let theme = Theme::new("t", [("text", 7)])
        .with_table("editor", json!({ "gutter": { "fg": 8 }, "name": "x" }));
    let registry = registry_with(theme);

    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::from("editor.gutter.fg"), "text", 0),
        8
    );
    assert_eq!(
        registry.resolve_opt_color(&ColorSpec::from("editor.name"), "text", 4),
        4
    );
    assert_eq!(
        registry.resolve_theme_path("editor.gutter.fg"),
        Some(&json!(8))
    );
    assert_eq!(registry.resolve_theme_path("editor.missing.fg"), None);
    assert_eq!(registry.resolve_theme_path("roles.text"), Some(&json!(7)));
}

#[test]
fn resolve_without_active_theme_uses_fallback() {
    let registry = ThemeRegistry::new();
    assert_eq!(registry.resolve_color("text", 2), 2);
    assert_eq!(registry.resolve_theme_path("roles.text"), None);
}

#[test]
fn from_json_requires_roles_table() {
    let err = Theme::from_json("broken", &json!({ "palette": {} })).unwrap_err();
    assert!(matches!(err, UiError::InvalidTheme { ref theme, .. } if theme == "broken"));

    let err = Theme::from_json("broken", &json!("not a table")).unwrap_err();
    assert!(matches!(err, UiError::InvalidTheme { .. }));
}

#[test]
fn from_json_rejects_non_numeric_palette_entries() {
    let value = json!({
        "roles": { "text": 7 },
        "palette": { "1": "red" }
    });
    let err = Theme::from_json("t", &value).unwrap_err();
    assert!(err.to_string().contains("palette entry 1"));

    let value = json!({
        "roles": { "text": 7 },
        "palette": { "16": 0xff0000 }
    });
    assert!(Theme::from_json("t", &value).is_err());
}

#[test]
fn from_json_reads_roles_palette_and_extra_tables() {
    let value = json!({
        "roles": { "background": 0, "text": 15 },
        "palette": { "0": 0x101010, "15": 0xf0f0f0 },
        "chart": { "bar": 2 }
    });
    let theme = Theme::from_json("dark", &value).unwrap();
    assert_eq!(theme.role("text"), Some(15));
    assert_eq!(
        theme.palette.as_ref().and_then(|p| p.get(&0)).copied(),
        Some(0x101010)
    );
    assert_eq!(theme.path("chart.bar"), Some(&json!(2)));
}

#[test]
fn set_active_fails_for_unknown_theme() {
    let mut registry = ThemeRegistry::new();
    let err = registry.set_active("nope").unwrap_err();
    assert!(matches!(err, UiError::UnknownTheme(ref name) if name == "nope"));
    assert_eq!(registry.active_name(), None);
}

#[test]
fn register_renames_theme_to_registered_name() {
    let mut registry = ThemeRegistry::new();
    registry
        .register("alias", Theme::new("original", [("text", 7)]))
        .unwrap();
    assert_eq!(registry.get("alias").map(|t| t.name.as_str()), Some("alias"));
    assert!(registry.contains("alias"));
    assert!(!registry.contains("original"));
}

#[test]
fn default_theme_defines_standard_roles() {
    let theme = Theme::default_theme();
    for role in [roles::BACKGROUND, roles::TEXT, roles::INTERACTIVE, roles::FOCUS] {
        assert!(theme.role(role).is_some(), "missing {role}");
    }
}

#[test]
fn with_default_starts_active() {
    let registry = ThemeRegistry::with_default();
    assert_eq!(registry.active_name(), Some("default"));
    assert_eq!(registry.resolve_color(roles::BACKGROUND, 9), colors::BLACK);
}
