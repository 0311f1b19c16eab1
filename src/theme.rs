//! Theme identifiers and the active-theme index model.
//!
//! A [`ThemeSet`] is the ordered list of class names the controller may place
//! on the root element. Order defines cyclic next/previous adjacency, so the
//! set is never empty and never holds the same identifier twice.

use crate::config::ThemeConfig;
use crate::error::ConfigError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Ordered, non-empty, duplicate-free list of theme identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeSet {
    themes: Vec<String>,
}

/// Only a configuration that passes [`ThemeConfig::validate`] yields a set.
impl TryFrom<&ThemeConfig> for ThemeSet {
    type Error = ConfigError;

    fn try_from(config: &ThemeConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { themes: config.themes.clone() })
    }
}

impl ThemeSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Never true for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.themes.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(String::as_str)
    }

    /// Index after `active`, wrapping to the front. `Unset` starts at 0.
    #[must_use]
    pub fn next_index(&self, active: ActiveTheme) -> usize {
        match active {
            ActiveTheme::Unset => 0,
            ActiveTheme::Active(index) => (index + 1) % self.len(),
        }
    }

    /// Index before `active`, wrapping to the back. `Unset` starts at the last theme.
    #[must_use]
    pub fn previous_index(&self, active: ActiveTheme) -> usize {
        match active {
            ActiveTheme::Unset => self.len() - 1,
            ActiveTheme::Active(index) => (index + self.len() - 1) % self.len(),
        }
    }
}

/// Which theme currently sits on the root element.
///
/// `Unset` is distinct from every valid index: it means no theme class from
/// the set has been applied yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActiveTheme {
    #[default]
    Unset,
    Active(usize),
}

impl ActiveTheme {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Unset => None,
            Self::Active(index) => Some(index),
        }
    }

    #[must_use]
    pub fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }
}
