//! Themes map semantic role names to palette indices, optionally remapping the
//! palette itself, and may carry application-defined nested tables.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::style::colors;
use crate::core::error::{Result, UiError};

/// Standard role names used by the built-in elements.
pub mod roles {
    pub const BACKGROUND: &str = "background";
    pub const TEXT: &str = "text";
    pub const MUTED: &str = "muted";
    pub const SURFACE: &str = "surface";
    pub const BORDER: &str = "border";
    pub const TITLE: &str = "title";
    pub const INTERACTIVE: &str = "interactive";
    pub const INTERACTIVE_TEXT: &str = "interactiveText";
    pub const ACTIVE: &str = "active";
    pub const FOCUS: &str = "focus";
    pub const INPUT: &str = "input";
    pub const INPUT_TEXT: &str = "inputText";
    pub const PROGRESS: &str = "progress";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
}

/// How an element asks for a colour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ColorSpec {
    /// Use the element's default role.
    #[default]
    Default,
    /// Literal palette index; never themed.
    Literal(u8),
    /// Role name or dotted path into the active theme.
    Role(CompactString),
}

impl From<u8> for ColorSpec {
    fn from(index: u8) -> Self {
        ColorSpec::Literal(index)
    }
}

impl From<&str> for ColorSpec {
    fn from(role: &str) -> Self {
        ColorSpec::Role(role.into())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    pub roles: BTreeMap<String, u8>,
    pub palette: Option<BTreeMap<u8, u32>>,
    table: Value,
}

impl Theme {
    pub fn new<'a>(name: &str, roles: impl IntoIterator<Item = (&'a str, u8)>) -> Self {
        let roles: BTreeMap<String, u8> = roles
            .into_iter()
            .map(|(role, index)| (role.to_string(), index))
            .collect();
        let mut table = Map::new();
        table.insert("name".to_string(), Value::from(name));
        table.insert(
            "roles".to_string(),
            Value::Object(
                roles
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(*v)))
                    .collect(),
            ),
        );
        Self {
            name: name.to_string(),
            roles,
            palette: None,
            table: Value::Object(table),
        }
    }

    pub fn with_palette(mut self, palette: impl IntoIterator<Item = (u8, u32)>) -> Self {
        let palette: BTreeMap<u8, u32> = palette.into_iter().collect();
        if let Value::Object(table) = &mut self.table {
            table.insert(
                "palette".to_string(),
                Value::Object(
                    palette
                        .iter()
                        .map(|(k, v)| (k.to_string(), Value::from(*v)))
                        .collect(),
                ),
            );
        }
        self.palette = Some(palette);
        self
    }

    /// Attach an application-defined table reachable through `resolve_theme_path`.
    pub fn with_table(mut self, key: &str, value: Value) -> Self {
        if let Value::Object(table) = &mut self.table {
            table.insert(key.to_string(), value);
        }
        self
    }

    /// Build a theme from a JSON definition, validating its structure.
    pub fn from_json(name: &str, value: &Value) -> Result<Self> {
        let invalid = |reason: String| UiError::InvalidTheme {
            theme: name.to_string(),
            reason,
        };

        let table = value
            .as_object()
            .ok_or_else(|| invalid("theme definition must be a table".to_string()))?;
        let role_table = table
            .get("roles")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("missing roles table".to_string()))?;

        let mut roles = BTreeMap::new();
        for (role, index) in role_table {
            let index = index
                .as_u64()
                .filter(|i| *i < colors::COUNT as u64)
                .ok_or_else(|| invalid(format!("role {role} is not a palette index")))?;
            roles.insert(role.clone(), index as u8);
        }

        let palette = match table.get("palette") {
            None | Some(Value::Null) => None,
            Some(Value::Object(entries)) => {
                let mut palette = BTreeMap::new();
                for (key, rgb) in entries {
                    let index = key
                        .parse::<u8>()
                        .ok()
                        .filter(|i| usize::from(*i) < colors::COUNT)
                        .ok_or_else(|| invalid(format!("palette key {key} is not an index")))?;
                    let rgb = rgb
                        .as_u64()
                        .filter(|v| *v <= 0x00FF_FFFF)
                        .ok_or_else(|| invalid(format!("palette entry {key} is not numeric")))?;
                    palette.insert(index, rgb as u32);
                }
                Some(palette)
            }
            Some(_) => return Err(invalid("palette must be a table".to_string())),
        };

        Ok(Self {
            name: name.to_string(),
            roles,
            palette,
            table: value.clone(),
        })
    }

    pub fn role(&self, role: &str) -> Option<u8> {
        self.roles.get(role).copied()
    }

    /// Walk nested tables by dotted segments; `None` on any missing segment.
    pub fn path(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.table, |node, segment| node.as_object()?.get(segment))
    }

    /// The theme every engine starts with.
    pub fn default_theme() -> Self {
        Theme::new(
            "default",
            [
                (roles::BACKGROUND, colors::BLACK),
                (roles::TEXT, colors::WHITE),
                (roles::MUTED, colors::GRAY),
                (roles::SURFACE, colors::BLACK),
                (roles::BORDER, colors::GRAY),
                (roles::TITLE, colors::LIGHT_CYAN),
                (roles::INTERACTIVE, colors::BLUE),
                (roles::INTERACTIVE_TEXT, colors::BRIGHT_WHITE),
                (roles::ACTIVE, colors::LIGHT_BLUE),
                (roles::FOCUS, colors::CYAN),
                (roles::INPUT, colors::GRAY),
                (roles::INPUT_TEXT, colors::BRIGHT_WHITE),
                (roles::PROGRESS, colors::GREEN),
                (roles::ERROR, colors::RED),
                (roles::WARNING, colors::YELLOW),
                (roles::SUCCESS, colors::GREEN),
            ],
        )
    }
}

/// Registered themes plus the name of the active one.
#[derive(Debug, Default)]
pub struct ThemeRegistry {
    themes: FxHashMap<String, Theme>,
    active: Option<String>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `Theme::default_theme()`, already active.
    pub fn with_default() -> Self {
        let theme = Theme::default_theme();
        let name = theme.name.clone();
        let mut themes = FxHashMap::default();
        themes.insert(name.clone(), theme);
        Self {
            themes,
            active: Some(name),
        }
    }

    pub fn register(&mut self, name: &str, mut theme: Theme) -> Result<()> {
        if let Some(palette) = &theme.palette {
            if let Some(bad) = palette.keys().find(|i| usize::from(**i) >= colors::COUNT) {
                return Err(UiError::InvalidTheme {
                    theme: name.to_string(),
                    reason: format!("palette key {bad} is not an index"),
                });
            }
        }
        theme.name = name.to_string();
        self.themes.insert(name.to_string(), theme);
        Ok(())
    }

    pub fn register_json(&mut self, name: &str, value: &Value) -> Result<()> {
        let theme = Theme::from_json(name, value)?;
        self.register(name, theme)
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Theme> {
        self.themes.get(self.active.as_deref()?)
    }

    pub(crate) fn set_active(&mut self, name: &str) -> Result<&Theme> {
        if !self.themes.contains_key(name) {
            return Err(UiError::UnknownTheme(name.to_string()));
        }
        self.active = Some(name.to_string());
        self.themes
            .get(name)
            .ok_or_else(|| UiError::UnknownTheme(name.to_string()))
    }

    /// The active theme's value for `role`, or `fallback`.
    pub fn resolve_color(&self, role: &str, fallback: u8) -> u8 {
        self.active()
            .and_then(|theme| theme.role(role))
            .unwrap_or(fallback)
    }

    /// Literal indices bypass theming; roles and dotted paths resolve against
    /// the active theme; `Default` uses `default_role`; anything unresolved is `fallback`.
    pub fn resolve_opt_color(&self, spec: &ColorSpec, default_role: &str, fallback: u8) -> u8 {
        match spec {
            ColorSpec::Literal(index) => *index,
            ColorSpec::Default => self.resolve_color(default_role, fallback),
            ColorSpec::Role(name) if name.contains('.') => self
                .resolve_theme_path(name)
                .and_then(Value::as_u64)
                .filter(|i| *i < colors::COUNT as u64)
                .map(|i| i as u8)
                .unwrap_or(fallback),
            ColorSpec::Role(name) => self.resolve_color(name, fallback),
        }
    }

    pub fn resolve_theme_path(&self, path: &str) -> Option<&Value> {
        self.active()?.path(path)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/theme.rs"]
mod tests;
