use super::*;

#[test]
fn parses_canonical_names() {
    assert_eq!("selectNextTheme".parse::<Action>(), Ok(Action::Next));
    assert_eq!("selectPreviousTheme".parse::<Action>(), Ok(Action::Previous));
    assert_eq!("selectRandomTheme".parse::<Action>(), Ok(Action::Random));
    assert_eq!("selectButtonTheme".parse::<Action>(), Ok(Action::SelectById));
}

#[test]
fn parses_short_names() {
    assert_eq!("next".parse::<Action>(), Ok(Action::Next));
    assert_eq!("previous".parse::<Action>(), Ok(Action::Previous));
    assert_eq!("random".parse::<Action>(), Ok(Action::Random));
    assert_eq!("select".parse::<Action>(), Ok(Action::SelectById));
}

#[test]
fn rejects_unknown_names() {
    let err = "toggleTheme".parse::<Action>().unwrap_err();
    assert_eq!(err, UnknownAction("toggleTheme".into()));
    assert_eq!(err.to_string(), "unknown action \"toggleTheme\"");
    assert!("SelectNextTheme".parse::<Action>().is_err());
}

#[test]
fn display_uses_canonical_name() {
    for action in Action::ALL {
        assert_eq!(action.to_string(), action.name());
        assert_eq!(action.name().parse::<Action>(), Ok(action));
    }
}

#[test]
fn serializes_as_canonical_name() {
    for action in Action::ALL {
        assert_eq!(serde_json::to_value(action).unwrap(), serde_json::Value::from(action.name()));
    }
    let short: Action = "random".parse().unwrap();
    assert_eq!(serde_json::to_string(&short).unwrap(), "\"selectRandomTheme\"");
}
