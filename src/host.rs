//! Host contracts consumed by the controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller never touches a browser API directly. [`Document`] covers
//! the DOM operations it needs and [`PreferenceStore`] the single persisted
//! string. `web` implements both over web-sys; `memory` implements them
//! in-process for tests and non-browser hosts.

use crate::error::StorageError;

/// Attribute carrying a theme button's identifier.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// OS/browser color-scheme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    /// Media query that matches when the user prefers this scheme.
    #[must_use]
    pub fn media_query(self) -> &'static str {
        match self {
            Self::Dark => "(prefers-color-scheme: dark)",
            Self::Light => "(prefers-color-scheme: light)",
        }
    }

    /// Naming token conventionally used by themes of this scheme.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// DOM operations used by the controller.
///
/// Methods take `&self`: like the browser DOM, implementations mutate through
/// shared handles. Failures inside a host call degrade to "nothing happened"
/// rather than surfacing errors.
pub trait Document {
    type Element: Clone + PartialEq;

    /// Element carrying the theme class.
    fn root(&self) -> Option<Self::Element>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// All descendants of `scope` matching `selector`, in document order.
    fn query_all_within(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    fn classes(&self, element: &Self::Element) -> Vec<String>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool {
        self.classes(element).iter().any(|c| c == class)
    }

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Replace `old` with `new`; returns `false` when `old` was not present.
    fn replace_class(&self, element: &Self::Element, old: &str, new: &str) -> bool;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Nearest inclusive ancestor of `element` matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Whether `element` is `scope` or one of its descendants.
    fn contains(&self, scope: &Self::Element, element: &Self::Element) -> bool;

    /// Evaluate a media query such as `(prefers-color-scheme: dark)`.
    fn matches_media(&self, query: &str) -> bool;
}

/// Key-value persistence surface holding the last chosen theme.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Best-effort write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
