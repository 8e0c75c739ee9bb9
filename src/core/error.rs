use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, UiError>;

#[derive(Debug)]
pub enum UiError {
    UnknownScene(String),
    UnknownTheme(String),
    InvalidTheme { theme: String, reason: String },
    UnknownElement,
    /// Attaching an element under itself or one of its descendants.
    InvalidParent,
    Io(io::Error),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::UnknownScene(name) => write!(f, "scene not found: {}", name),
            UiError::UnknownTheme(name) => write!(f, "theme not registered: {}", name),
            UiError::InvalidTheme { theme, reason } => {
                write!(f, "invalid theme {}: {}", theme, reason)
            }
            UiError::UnknownElement => write!(f, "element does not exist"),
            UiError::InvalidParent => write!(f, "element cannot be attached inside its own subtree"),
            UiError::Io(err) => write!(f, "surface i/o failed: {}", err),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for UiError {
    fn from(err: io::Error) -> Self {
        UiError::Io(err)
    }
}

/// Failure reported by an element's destroy hook. Always swallowed by teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError(String);

impl HookError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook failed: {}", self.0)
    }
}

impl std::error::Error for HookError {}

#[cfg(test)]
#[path = "../../tests/unit/core/error.rs"]
mod tests;
