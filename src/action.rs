//! Actions a configured button can trigger.
//!
//! Configuration names an action by string; parsing maps it onto this closed
//! set once, at validation time, so click handling never looks anything up
//! by name.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[cfg(test)]
#[path = "action_test.rs"]
mod action_test;

/// Theme-changing operation bound to a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    Random,
    /// Select the theme named by the clicked button's `data-theme` attribute.
    SelectById,
}

impl Action {
    pub const ALL: [Self; 4] = [Self::Next, Self::Previous, Self::Random, Self::SelectById];

    /// Canonical configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Next => "selectNextTheme",
            Self::Previous => "selectPreviousTheme",
            Self::Random => "selectRandomTheme",
            Self::SelectById => "selectButtonTheme",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Random => "random",
            Self::SelectById => "select",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Error returned by [`Action::from_str`] for names outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action \"{0}\"")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == raw || action.short_name() == raw)
            .ok_or_else(|| UnknownAction(raw.to_owned()))
    }
}
