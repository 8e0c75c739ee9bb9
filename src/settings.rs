//! User settings, read from a JSON file. Loading never fails: a missing or
//! malformed file yields the defaults.

use crate::runtime::DEFAULT_FRAME_RATE;
use crate::ui::core::runtime::Ui;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SETTINGS_ENV: &str = "ZUI_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub frame_rate: u32,
    pub theme: String,
    /// Extra theme definitions keyed by theme name.
    pub themes: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            theme: "default".to_string(),
            themes: BTreeMap::new(),
            log_filter: None,
        }
    }
}

impl Settings {
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn_fallback(path, &err);
                Self::default()
            }
        }
    }

    /// Read and parse without falling back. A malformed file is reported as
    /// `InvalidData`.
    pub fn try_load_from(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    /// Register the configured themes, then activate `theme`. Invalid entries
    /// are skipped with a warning.
    pub fn apply(&self, ui: &mut Ui) {
        for (name, def) in &self.themes {
            if let Err(err) = ui.register_theme_json(name, def) {
                tracing::warn!(theme = %name, %err, "skipping theme");
            }
        }
        if let Err(err) = ui.set_theme(&self.theme) {
            tracing::warn!(theme = %self.theme, %err, "keeping current theme");
        }
    }
}

/// Log why `path` could not be used. A missing file is expected and stays quiet.
pub fn warn_fallback(path: &Path, err: &std::io::Error) {
    match err.kind() {
        std::io::ErrorKind::NotFound => {}
        std::io::ErrorKind::InvalidData => {
            tracing::warn!(path = %path.display(), %err, "settings malformed; using defaults")
        }
        _ => tracing::warn!(path = %path.display(), %err, "settings unreadable; using defaults"),
    }
}

/// `$ZUI_SETTINGS`, else `<cache dir>/.zui/settings.json`.
pub fn settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    get_cache_dir().map(|dir| dir.join(".zui").join("settings.json"))
}

pub fn log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(".zui").join("logs"))
}

/// Create the settings file with defaults if it does not exist yet.
pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

pub fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&Settings::default())
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    std::fs::write(path, content)
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[allow(unreachable_code)]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
