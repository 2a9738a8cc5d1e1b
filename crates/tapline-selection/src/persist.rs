#![forbid(unsafe_code)]

//! Persisted selection records.

use std::collections::{BTreeMap, BTreeSet};

use crate::choice::ChoiceMode;
use crate::error::PersistError;
use crate::source::ItemId;
use crate::stateful::{StateKey, Stateful};
use crate::store::SelectionStore;

/// Persistable state for a [`SelectionStore`].
///
/// Plain ordered pairs; the host picks the serialization format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SelectionPersistState {
    pub choice_mode: ChoiceMode,
    /// Raw position map entries, ascending, including unchecked leftovers.
    pub checked_positions: Vec<(usize, bool)>,
    /// Identity → position pairs, ascending by identity.
    pub checked_ids: Vec<(ItemId, usize)>,
    pub checked_count: usize,
    /// Whether the store followed item identities, even with nothing checked.
    #[cfg_attr(feature = "state-persistence", serde(default))]
    pub tracks_ids: bool,
}

impl SelectionPersistState {
    /// Check the record is one a [`SelectionStore`] could have saved.
    pub fn validate(&self) -> Result<(), PersistError> {
        let mut checked = BTreeSet::new();
        let mut seen = BTreeSet::new();
        for &(position, is_checked) in &self.checked_positions {
            if !seen.insert(position) {
                return Err(PersistError::DuplicatePosition(position));
            }
            if is_checked {
                checked.insert(position);
            }
        }

        if checked.len() != self.checked_count {
            return Err(PersistError::CountMismatch {
                recorded: self.checked_count,
                actual: checked.len(),
            });
        }

        let limit = match self.choice_mode {
            ChoiceMode::None => 0,
            ChoiceMode::Single => 1,
            ChoiceMode::Multiple => usize::MAX,
        };
        if self.checked_count > limit {
            return Err(PersistError::TooManyChecked {
                mode: self.choice_mode,
                count: self.checked_count,
            });
        }

        if !self.tracks_ids && !self.checked_ids.is_empty() {
            return Err(PersistError::UntrackedIdentities(self.checked_ids.len()));
        }
        let mut ids = BTreeSet::new();
        for &(id, position) in &self.checked_ids {
            if !ids.insert(id) {
                return Err(PersistError::DuplicateIdentity(id));
            }
            if !checked.contains(&position) {
                return Err(PersistError::IdentityWithoutPosition { id, position });
            }
        }
        Ok(())
    }
}

impl Stateful for SelectionStore {
    type State = SelectionPersistState;

    fn state_key(&self) -> StateKey {
        StateKey::new(
            "Selection",
            self.persistence_id.as_deref().unwrap_or("default"),
        )
    }

    fn save_state(&self) -> SelectionPersistState {
        SelectionPersistState {
            choice_mode: self.mode,
            checked_positions: self.checked_position_states().collect(),
            checked_ids: self.checked_id_positions().collect(),
            checked_count: self.checked_count,
            tracks_ids: self.ids.is_some(),
        }
    }

    /// Trusts the record; see [`SelectionStore::try_restore_state`] for the
    /// validating variant.
    fn restore_state(&mut self, state: SelectionPersistState) {
        self.mode = state.choice_mode;
        self.checked_count = state.checked_count;
        self.all_selected = false;
        if state.choice_mode.is_enabled() {
            self.positions = Some(state.checked_positions.into_iter().collect());
            self.ids = state
                .tracks_ids
                .then(|| state.checked_ids.into_iter().collect::<BTreeMap<_, _>>());
        } else {
            self.positions = None;
            self.ids = None;
        }
    }
}

impl SelectionStore {
    /// Validate `state`, then restore it. The store is untouched on error.
    pub fn try_restore_state(&mut self, state: SelectionPersistState) -> Result<(), PersistError> {
        state.validate()?;
        self.restore_state(state);
        Ok(())
    }
}
