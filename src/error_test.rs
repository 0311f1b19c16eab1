use super::*;

#[test]
fn config_error_lists_every_violation() {
    let err = ConfigError::new(vec![
        Violation::EmptyThemes,
        Violation::WrongType { field: "activeClassName".into(), expected: "a string" },
    ]);
    assert_eq!(
        err.to_string(),
        "configuration validation failed:\n\
         `themes` must contain at least one theme\n\
         `activeClassName` must be a string"
    );
}

#[test]
fn violation_messages_name_the_field() {
    let unknown = Violation::UnknownAction { field: "buttons[2].action".into(), name: "explode".into() };
    assert_eq!(unknown.to_string(), "`buttons[2].action` names unknown action \"explode\"");
    assert_eq!(Violation::DuplicateTheme("dark".into()).to_string(), "`themes` contains duplicate theme \"dark\"");
    assert_eq!(Violation::Blank("themes[0]".into()).to_string(), "`themes[0]` must not be empty");
    assert_eq!(Violation::Whitespace("themes[1]".into()).to_string(), "`themes[1]` must not contain whitespace");
    assert_eq!(
        Violation::UnknownSchemeTheme { scheme: "dark", theme: "midnight".into() }.to_string(),
        "`colorSchemeThemes.dark` names unknown theme \"midnight\""
    );
}

#[test]
fn storage_error_messages() {
    assert_eq!(StorageError::Unavailable.to_string(), "preference storage unavailable");
    assert_eq!(StorageError::Write("quota".into()).to_string(), "preference write failed: quota");
}
