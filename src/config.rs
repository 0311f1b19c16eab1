//! Theme manager configuration: defaults, JSON overrides, validation.
//!
//! DESIGN
//! ======
//! Callers pass a loosely typed overrides object (usually straight from
//! JavaScript). It is merged shallowly over [`ThemeConfig::defaults_json`]:
//! every top-level key the caller supplies replaces the default wholesale.
//! The merged object is then walked field by field so that every violation is
//! reported at once, instead of stopping at the first type mismatch the way a
//! derived deserializer would.
//!
//! The flat key names of the older widget (`activeThemeClass`,
//! `defaultThemeFallback`) are still accepted for their one-to-one
//! counterparts. Any other unrecognized key is dropped with a warning.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::action::Action;
use crate::error::{ConfigError, Violation};
use crate::host::ColorScheme;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_THEMES: [&str; 2] = ["dark-theme", "light-theme"];
pub const DEFAULT_THEME: &str = "dark-theme";
pub const DEFAULT_ACTIVE_CLASS_NAME: &str = "active-theme";
pub const DEFAULT_WRAPPER_SELECTOR: &str = ".main-theme-switches";
pub const DEFAULT_THEME_BUTTON_SELECTOR: &str = ".theme-buttons";
pub const DEFAULT_PREVIOUS_BUTTON_SELECTOR: &str = "#previous-theme-button";
pub const DEFAULT_RANDOM_BUTTON_SELECTOR: &str = "#random-theme-button";
pub const DEFAULT_NEXT_BUTTON_SELECTOR: &str = "#next-theme-button";

const KEYS: [&str; 6] = ["themes", "defaultTheme", "activeClassName", "buttonWrappers", "buttons", "colorSchemeThemes"];
const LEGACY_KEYS: [(&str, &str); 2] = [("activeThemeClass", "activeClassName"), ("defaultThemeFallback", "defaultTheme")];

/// Delegated click handling: one listener on the wrapper fires `action` when
/// the click lands on (or inside) an element matching `button_selector`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapperBinding {
    pub wrapper_selector: String,
    pub button_selector: String,
    pub action: Action,
}

/// Direct click handling on the first element matching `selector`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBinding {
    pub selector: String,
    pub action: Action,
}

/// Explicit color-scheme to theme mapping. A mapped theme must be one of
/// the configured `themes`.
///
/// A scheme left as `None` falls back to the first theme whose identifier
/// contains the scheme's token (`dark`, `light`) as a `-`/`_` separated word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorSchemeThemes {
    pub dark: Option<String>,
    pub light: Option<String>,
}

impl ColorSchemeThemes {
    #[must_use]
    pub fn get(&self, scheme: ColorScheme) -> Option<&str> {
        match scheme {
            ColorScheme::Dark => self.dark.as_deref(),
            ColorScheme::Light => self.light.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub themes: Vec<String>,
    pub default_theme: String,
    pub active_class_name: String,
    pub button_wrappers: Vec<WrapperBinding>,
    pub buttons: Vec<ButtonBinding>,
    pub color_scheme_themes: ColorSchemeThemes,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            themes: DEFAULT_THEMES.iter().map(|t| (*t).to_owned()).collect(),
            default_theme: DEFAULT_THEME.to_owned(),
            active_class_name: DEFAULT_ACTIVE_CLASS_NAME.to_owned(),
            button_wrappers: vec![WrapperBinding {
                wrapper_selector: DEFAULT_WRAPPER_SELECTOR.to_owned(),
                button_selector: DEFAULT_THEME_BUTTON_SELECTOR.to_owned(),
                action: Action::SelectById,
            }],
            buttons: vec![
                ButtonBinding { selector: DEFAULT_PREVIOUS_BUTTON_SELECTOR.to_owned(), action: Action::Previous },
                ButtonBinding { selector: DEFAULT_RANDOM_BUTTON_SELECTOR.to_owned(), action: Action::Random },
                ButtonBinding { selector: DEFAULT_NEXT_BUTTON_SELECTOR.to_owned(), action: Action::Next },
            ],
            color_scheme_themes: ColorSchemeThemes::default(),
        }
    }
}

impl ThemeConfig {
    /// Built-in defaults in the same JSON shape callers override.
    #[must_use]
    pub fn defaults_json() -> Value {
        json!({
            "themes": DEFAULT_THEMES,
            "defaultTheme": DEFAULT_THEME,
            "activeClassName": DEFAULT_ACTIVE_CLASS_NAME,
            "buttonWrappers": [
                {
                    "wrapperSelector": DEFAULT_WRAPPER_SELECTOR,
                    "buttonSelector": DEFAULT_THEME_BUTTON_SELECTOR,
                    "action": Action::SelectById.name(),
                },
            ],
            "buttons": [
                { "selector": DEFAULT_PREVIOUS_BUTTON_SELECTOR, "action": Action::Previous.name() },
                { "selector": DEFAULT_RANDOM_BUTTON_SELECTOR, "action": Action::Random.name() },
                { "selector": DEFAULT_NEXT_BUTTON_SELECTOR, "action": Action::Next.name() },
            ],
        })
    }

    /// Merge `overrides` over the defaults and validate the result.
    ///
    /// `null` means "no overrides".
    pub fn from_overrides(overrides: &Value) -> Result<Self, ConfigError> {
        let mut merged = match Self::defaults_json() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        match overrides {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    let Some(target) = canonical_key(key) else {
                        log::warn!("ignoring unknown configuration key {key:?}");
                        continue;
                    };
                    if target != key && map.contains_key(target) {
                        log::warn!("ignoring {key:?} because {target:?} is also set");
                        continue;
                    }
                    merged.insert(target.to_owned(), value.clone());
                }
            }
            _ => return Err(ConfigError::new(vec![Violation::NotAnObject])),
        }
        Self::from_json(&merged)
    }

    /// Parse a complete configuration object, collecting every violation.
    pub fn from_json(raw: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();

        let themes = parse_themes(raw.get("themes"), &mut violations);
        let default_theme = parse_string(raw.get("defaultTheme"), "defaultTheme", &mut violations);
        let active_class_name = parse_string(raw.get("activeClassName"), "activeClassName", &mut violations);
        let button_wrappers = parse_array(raw.get("buttonWrappers"), "buttonWrappers", &mut violations)
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| parse_wrapper(entry, i, &mut violations))
            .collect();
        let buttons = parse_array(raw.get("buttons"), "buttons", &mut violations)
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| parse_button(entry, i, &mut violations))
            .collect();
        let color_scheme_themes = parse_color_scheme_themes(raw.get("colorSchemeThemes"), &mut violations);

        let config = Self {
            themes,
            default_theme: default_theme.unwrap_or_default(),
            active_class_name: active_class_name.unwrap_or_default(),
            button_wrappers,
            buttons,
            color_scheme_themes,
        };
        config.collect_semantic_violations(&mut violations);

        if violations.is_empty() { Ok(config) } else { Err(ConfigError::new(violations)) }
    }

    /// Check a configuration built directly in Rust.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut violations = Vec::new();
        self.collect_semantic_violations(&mut violations);
        if violations.is_empty() { Ok(()) } else { Err(ConfigError::new(violations)) }
    }

    fn collect_semantic_violations(&self, violations: &mut Vec<Violation>) {
        if self.themes.is_empty() && !mistyped(violations, "themes") {
            push_once(violations, Violation::EmptyThemes);
        }
        for (i, theme) in self.themes.iter().enumerate() {
            if theme.trim().is_empty() {
                push_once(violations, Violation::Blank(format!("themes[{i}]")));
            } else if theme.chars().any(char::is_whitespace) {
                push_once(violations, Violation::Whitespace(format!("themes[{i}]")));
            } else if self.themes[..i].contains(theme) {
                push_once(violations, Violation::DuplicateTheme(theme.clone()));
            }
        }
        if !mistyped(violations, "activeClassName") {
            if self.active_class_name.trim().is_empty() {
                push_once(violations, Violation::Blank("activeClassName".into()));
            } else if self.active_class_name.chars().any(char::is_whitespace) {
                push_once(violations, Violation::Whitespace("activeClassName".into()));
            }
        }
        if !mistyped(violations, "themes") {
            for scheme in ColorScheme::ALL {
                if let Some(theme) = self.color_scheme_themes.get(scheme)
                    && !self.themes.iter().any(|t| t == theme)
                {
                    push_once(violations, Violation::UnknownSchemeTheme { scheme: scheme.token(), theme: theme.to_owned() });
                }
            }
        }
        for (i, wrapper) in self.button_wrappers.iter().enumerate() {
            if wrapper.wrapper_selector.trim().is_empty() {
                push_once(violations, Violation::Blank(format!("buttonWrappers[{i}].wrapperSelector")));
            }
            if wrapper.button_selector.trim().is_empty() {
                push_once(violations, Violation::Blank(format!("buttonWrappers[{i}].buttonSelector")));
            }
        }
        for (i, button) in self.buttons.iter().enumerate() {
            if button.selector.trim().is_empty() {
                push_once(violations, Violation::Blank(format!("buttons[{i}].selector")));
            }
        }
    }
}

/// Current name for a top-level key, translating legacy names.
fn canonical_key(key: &str) -> Option<&'static str> {
    KEYS.into_iter()
        .find(|known| *known == key)
        .or_else(|| LEGACY_KEYS.into_iter().find(|(legacy, _)| *legacy == key).map(|(_, current)| current))
}

/// Whether a type error was already reported for `field` or one of its elements.
fn mistyped(violations: &[Violation], field: &str) -> bool {
    violations.iter().any(|v| matches!(v, Violation::WrongType { field: f, .. } if f.starts_with(field)))
}

fn push_once(violations: &mut Vec<Violation>, violation: Violation) {
    if !violations.contains(&violation) {
        violations.push(violation);
    }
}

fn wrong_type(field: impl Into<String>, expected: &'static str) -> Violation {
    Violation::WrongType { field: field.into(), expected }
}

fn parse_string(value: Option<&Value>, field: &str, violations: &mut Vec<Violation>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => {
            violations.push(wrong_type(field, "a string"));
            None
        }
    }
}

fn parse_array<'a>(value: Option<&'a Value>, field: &str, violations: &mut Vec<Violation>) -> &'a [Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => {
            violations.push(wrong_type(field, "an array"));
            &[]
        }
    }
}

fn parse_themes(value: Option<&Value>, violations: &mut Vec<Violation>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        violations.push(wrong_type("themes", "an array of strings"));
        return Vec::new();
    };
    let mut themes = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => themes.push(s.clone()),
            _ => violations.push(wrong_type(format!("themes[{i}]"), "a string")),
        }
    }
    themes
}

fn parse_action(value: Option<&Value>, field: String, violations: &mut Vec<Violation>) -> Option<Action> {
    match value {
        Some(Value::String(name)) => match name.parse::<Action>() {
            Ok(action) => Some(action),
            Err(_) => {
                violations.push(Violation::UnknownAction { field, name: name.clone() });
                None
            }
        },
        _ => {
            violations.push(wrong_type(field, "a string"));
            None
        }
    }
}

fn parse_wrapper(entry: &Value, index: usize, violations: &mut Vec<Violation>) -> Option<WrapperBinding> {
    let Value::Object(map) = entry else {
        violations.push(wrong_type(format!("buttonWrappers[{index}]"), "an object"));
        return None;
    };
    let prefix = format!("buttonWrappers[{index}]");
    let wrapper_selector = parse_string(map.get("wrapperSelector"), &format!("{prefix}.wrapperSelector"), violations);
    let button_selector = parse_string(map.get("buttonSelector"), &format!("{prefix}.buttonSelector"), violations);
    let action = parse_action(map.get("action"), format!("{prefix}.action"), violations);
    Some(WrapperBinding { wrapper_selector: wrapper_selector?, button_selector: button_selector?, action: action? })
}

fn parse_button(entry: &Value, index: usize, violations: &mut Vec<Violation>) -> Option<ButtonBinding> {
    let Value::Object(map) = entry else {
        violations.push(wrong_type(format!("buttons[{index}]"), "an object"));
        return None;
    };
    let prefix = format!("buttons[{index}]");
    let selector = parse_string(map.get("selector"), &format!("{prefix}.selector"), violations);
    let action = parse_action(map.get("action"), format!("{prefix}.action"), violations);
    Some(ButtonBinding { selector: selector?, action: action? })
}

fn parse_color_scheme_themes(value: Option<&Value>, violations: &mut Vec<Violation>) -> ColorSchemeThemes {
    let map = match value {
        None | Some(Value::Null) => return ColorSchemeThemes::default(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            violations.push(wrong_type("colorSchemeThemes", "an object"));
            return ColorSchemeThemes::default();
        }
    };
    let mut entry = |scheme: ColorScheme| match map.get(scheme.token()) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(wrong_type(format!("colorSchemeThemes.{}", scheme.token()), "a string"));
            None
        }
    };
    let dark = entry(ColorScheme::Dark);
    let light = entry(ColorScheme::Light);
    ColorSchemeThemes { dark, light }
}
