#![forbid(unsafe_code)]

//! Errors raised when validating a persisted selection record.

use std::fmt;

use crate::choice::ChoiceMode;
use crate::source::ItemId;

/// A persisted selection record that this crate could not have produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// The recorded count disagrees with the number of checked positions.
    CountMismatch { recorded: usize, actual: usize },
    /// A position appears more than once.
    DuplicatePosition(usize),
    /// An identity appears more than once.
    DuplicateIdentity(ItemId),
    /// More items are checked than the mode allows.
    TooManyChecked { mode: ChoiceMode, count: usize },
    /// An identity points at a position that is not checked.
    IdentityWithoutPosition { id: ItemId, position: usize },
    /// Identities were recorded for a store that did not track them.
    UntrackedIdentities(usize),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { recorded, actual } => write!(
                f,
                "checked count {recorded} does not match {actual} checked positions"
            ),
            Self::DuplicatePosition(position) => write!(f, "duplicate position {position}"),
            Self::DuplicateIdentity(id) => write!(f, "duplicate identity {id}"),
            Self::TooManyChecked { mode, count } => {
                write!(f, "{count} items checked in {mode} mode")
            }
            Self::IdentityWithoutPosition { id, position } => {
                write!(f, "identity {id} points at unchecked position {position}")
            }
            Self::UntrackedIdentities(count) => {
                write!(f, "{count} identities recorded without identity tracking")
            }
        }
    }
}

impl std::error::Error for PersistError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let err = PersistError::TooManyChecked {
            mode: ChoiceMode::Single,
            count: 2,
        };
        assert_eq!(err.to_string(), "2 items checked in single mode");
        let err = PersistError::CountMismatch {
            recorded: 3,
            actual: 1,
        };
        assert!(err.to_string().contains("3"));
    }
}
