#![forbid(unsafe_code)]

//! Choice modes.

use std::fmt;

/// Selection cardinality policy of a [`SelectionStore`](crate::SelectionStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ChoiceMode {
    /// Items cannot be checked.
    #[default]
    None,
    /// At most one item is checked at a time.
    Single,
    /// Any number of items may be checked.
    Multiple,
}

impl ChoiceMode {
    /// Whether this mode tracks checked state at all.
    #[inline]
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

impl fmt::Display for ChoiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
