//! Error types.
//!
//! Only [`ConfigError`] ever reaches the caller. Storage failures are
//! absorbed by the controller; unresolved or unknown themes are not errors.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// One problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The configuration overrides were not a JSON object.
    #[error("configuration must be an object")]
    NotAnObject,

    /// A field held a value of the wrong JSON type (or was missing).
    #[error("`{field}` must be {expected}")]
    WrongType { field: String, expected: &'static str },

    /// `themes` was an empty list.
    #[error("`themes` must contain at least one theme")]
    EmptyThemes,

    /// `themes` named the same identifier more than once.
    #[error("`themes` contains duplicate theme \"{0}\"")]
    DuplicateTheme(String),

    /// A string field that must name something was blank.
    #[error("`{0}` must not be empty")]
    Blank(String),

    /// A theme identifier or class name contained whitespace, which a class
    /// list token cannot hold.
    #[error("`{0}` must not contain whitespace")]
    Whitespace(String),

    /// `colorSchemeThemes` mapped a scheme to a theme outside `themes`.
    #[error("`colorSchemeThemes.{scheme}` names unknown theme \"{theme}\"")]
    UnknownSchemeTheme { scheme: &'static str, theme: String },

    /// A binding named an action outside the supported set.
    #[error("`{field}` names unknown action \"{name}\"")]
    UnknownAction { field: String, name: String },
}

/// A configuration failed validation.
///
/// Carries every violation found, never just the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("configuration validation failed:{}", list(.violations))]
pub struct ConfigError {
    pub violations: Vec<Violation>,
}

impl ConfigError {
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

fn list(violations: &[Violation]) -> String {
    violations.iter().map(|v| format!("\n{v}")).collect()
}

/// Failure writing the persisted preference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No persistence surface exists (e.g. storage disabled by the browser).
    #[error("preference storage unavailable")]
    Unavailable,

    /// The store rejected the write (e.g. quota exceeded).
    #[error("preference write failed: {0}")]
    Write(String),
}
