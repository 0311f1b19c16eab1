use std::collections::HashSet;

use super::*;
use crate::error::Violation;

fn config(names: &[&str]) -> ThemeConfig {
    ThemeConfig { themes: names.iter().map(|n| (*n).to_owned()).collect(), ..ThemeConfig::default() }
}

fn set(names: &[&str]) -> ThemeSet {
    ThemeSet::try_from(&config(names)).unwrap()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn empty_list_is_rejected() {
    let err = ThemeSet::try_from(&config(&[])).unwrap_err();
    assert_eq!(err.violations, [Violation::EmptyThemes]);
}

#[test]
fn each_duplicate_is_reported_once() {
    let err = ThemeSet::try_from(&config(&["a", "b", "a", "c", "b", "a"])).unwrap_err();
    assert_eq!(err.violations, [Violation::DuplicateTheme("a".into()), Violation::DuplicateTheme("b".into())]);
}

#[test]
fn construction_preserves_order() {
    let themes = set(&["pink-theme", "dark-theme", "light-theme"]);
    assert_eq!(themes.iter().collect::<Vec<_>>(), ["pink-theme", "dark-theme", "light-theme"]);
    assert_eq!(themes.len(), 3);
    assert!(!themes.is_empty());
}

// =============================================================
// Lookup
// =============================================================

#[test]
fn position_and_contains() {
    let themes = set(&["dark-theme", "light-theme"]);
    assert_eq!(themes.position("light-theme"), Some(1));
    assert_eq!(themes.position("blue-theme"), None);
    assert!(themes.contains("dark-theme"));
    assert!(!themes.contains("Dark-Theme"));
    assert_eq!(themes.get(0), Some("dark-theme"));
    assert_eq!(themes.get(2), None);
}

// =============================================================
// Cyclic navigation
// =============================================================

#[test]
fn next_wraps_at_the_end() {
    let themes = set(&["a", "b", "c", "d"]);
    assert_eq!(themes.next_index(ActiveTheme::Active(1)), 2);
    assert_eq!(themes.next_index(ActiveTheme::Active(3)), 0);
}

#[test]
fn previous_wraps_at_the_start() {
    let themes = set(&["a", "b", "c", "d"]);
    assert_eq!(themes.previous_index(ActiveTheme::Active(2)), 1);
    assert_eq!(themes.previous_index(ActiveTheme::Active(0)), 3);
}

#[test]
fn unset_starts_at_either_end() {
    let themes = set(&["a", "b", "c"]);
    assert_eq!(themes.next_index(ActiveTheme::Unset), 0);
    assert_eq!(themes.previous_index(ActiveTheme::Unset), 2);
}

#[test]
fn single_theme_cycles_onto_itself() {
    let themes = set(&["only"]);
    assert_eq!(themes.next_index(ActiveTheme::Active(0)), 0);
    assert_eq!(themes.previous_index(ActiveTheme::Active(0)), 0);
}

#[test]
fn next_then_previous_round_trips_for_every_length() {
    for len in 1..=6 {
        let names: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
        let themes = ThemeSet::try_from(&ThemeConfig { themes: names, ..ThemeConfig::default() }).unwrap();
        for start in 0..len {
            let next = themes.next_index(ActiveTheme::Active(start));
            assert_eq!(themes.previous_index(ActiveTheme::Active(next)), start, "len {len} start {start}");
        }
    }
}

// =============================================================
// ActiveTheme
// =============================================================

#[test]
fn active_theme_default_is_unset() {
    assert_eq!(ActiveTheme::default(), ActiveTheme::Unset);
    assert!(ActiveTheme::Unset.is_unset());
    assert_eq!(ActiveTheme::Unset.index(), None);
    assert_eq!(ActiveTheme::Active(0).index(), Some(0));
    assert!(!ActiveTheme::Active(0).is_unset());
}

#[test]
fn active_theme_distinguishes_unset_in_sets() {
    let seen: HashSet<ActiveTheme> =
        [ActiveTheme::Unset, ActiveTheme::Active(0), ActiveTheme::Active(0), ActiveTheme::Active(1)].into();
    assert_eq!(seen.len(), 3);
    assert!(seen.contains(&ActiveTheme::Unset));
}
