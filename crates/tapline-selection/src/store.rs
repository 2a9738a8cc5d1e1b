#![forbid(unsafe_code)]

//! Checked-item state for a list.
//!
//! [`SelectionStore`] keeps two maps:
//!
//! - **positions**: position → checked flag. Sparse; `false` entries may
//!   linger after an uncheck so toggling back is a plain overwrite.
//! - **ids**: identity → position last known to hold it. Only allocated when
//!   the item source reports stable identities, and kept in bijection with
//!   the `true` subset of `positions`.
//!
//! # Invariants
//!
//! 1. In `Single` mode `positions` holds at most one `true` entry and
//!    `checked_count() <= 1`.
//! 2. In `Multiple` mode `checked_count()` equals the number of `true` entries.
//! 3. When present, `ids` has one entry per `true` position, pointing at it.
//! 4. Changing the choice mode always clears checked state first.
//!
//! The "all selected" state (Multiple mode, at least one item, every item
//! checked) is edge-triggered: a mutation reports it through
//! [`CheckOutcome::all_selected_changed`] only when it flips.

use std::collections::BTreeMap;

use crate::choice::ChoiceMode;
use crate::config::SelectionConfig;
use crate::source::{ItemId, ItemSource};

/// What a selection mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct CheckOutcome {
    /// Whether the set of checked positions changed.
    pub changed: bool,
    /// `Some(all)` when the "all selected" state flipped to `all`.
    pub all_selected_changed: Option<bool>,
}

impl CheckOutcome {
    const UNCHANGED: Self = Self {
        changed: false,
        all_selected_changed: None,
    };
}

/// Choice mode plus per-position and per-identity checked state.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    pub(crate) mode: ChoiceMode,
    pub(crate) positions: Option<BTreeMap<usize, bool>>,
    pub(crate) ids: Option<BTreeMap<ItemId, usize>>,
    pub(crate) checked_count: usize,
    pub(crate) all_selected: bool,
    pub(crate) config: SelectionConfig,
    pub(crate) persistence_id: Option<String>,
}

impl SelectionStore {
    /// An empty store in `ChoiceMode::None`.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a new store with a persistence ID for state saving.
    #[must_use]
    pub fn with_persistence_id(mut self, id: impl Into<String>) -> Self {
        self.persistence_id = Some(id.into());
        self
    }

    /// Get the persistence ID, if set.
    #[inline]
    #[must_use = "use the persistence id (if any)"]
    pub fn persistence_id(&self) -> Option<&str> {
        self.persistence_id.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Replace the tuning. Takes effect on the next mutation.
    pub fn set_config(&mut self, config: SelectionConfig) {
        self.config = config;
    }

    #[inline]
    #[must_use]
    pub fn choice_mode(&self) -> ChoiceMode {
        self.mode
    }

    /// Switch the choice mode.
    ///
    /// Any actual change clears all checked state first, so there is no
    /// direct Single↔Multiple transition that keeps a selection. Entering an
    /// enabled mode allocates the position map, and the identity map when
    /// `source` has stable identities.
    pub fn set_choice_mode<S>(&mut self, mode: ChoiceMode, source: &S) -> CheckOutcome
    where
        S: ItemSource + ?Sized,
    {
        if mode == self.mode {
            return CheckOutcome::UNCHANGED;
        }
        let outcome = self.clear_choices();
        self.mode = mode;
        if mode.is_enabled() {
            self.ensure_maps(source);
        } else {
            self.positions = None;
            self.ids = None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "selection.mode", mode = mode.as_str());
        outcome
    }

    /// Check or uncheck the item at `position`.
    ///
    /// A no-op in `ChoiceMode::None` and for positions outside
    /// `0..source.item_count()`.
    pub fn set_item_checked<S>(&mut self, position: usize, checked: bool, source: &S) -> CheckOutcome
    where
        S: ItemSource + ?Sized,
    {
        if !self.mode.is_enabled() || position >= source.item_count() {
            return CheckOutcome::UNCHANGED;
        }
        self.ensure_maps(source);
        let changed = match self.mode {
            ChoiceMode::None => false,
            ChoiceMode::Multiple => self.set_multiple(position, checked, source),
            ChoiceMode::Single => self.set_single(position, checked, source),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "selection.change",
            action = if checked { "check" } else { "uncheck" },
            position,
            changed,
            checked_count = self.checked_count
        );

        CheckOutcome {
            changed,
            all_selected_changed: self.update_all_selected(source.item_count()),
        }
    }

    fn set_multiple<S>(&mut self, position: usize, checked: bool, source: &S) -> bool
    where
        S: ItemSource + ?Sized,
    {
        let Some(positions) = self.positions.as_mut() else {
            return false;
        };
        let old = positions.insert(position, checked).unwrap_or(false);
        if let Some(ids) = self.ids.as_mut()
            && source.has_stable_ids()
            && let Some(id) = source.item_id(position)
        {
            if checked {
                ids.insert(id, position);
            } else {
                ids.remove(&id);
            }
        }
        if old == checked {
            return false;
        }
        if checked {
            self.checked_count += 1;
        } else {
            self.checked_count = self.checked_count.saturating_sub(1);
        }
        true
    }

    fn set_single<S>(&mut self, position: usize, checked: bool, source: &S) -> bool
    where
        S: ItemSource + ?Sized,
    {
        let before = self.checked_item_position();
        let update_ids = source.has_stable_ids();
        let Some(positions) = self.positions.as_mut() else {
            return false;
        };

        // Clear when checking anything, or when unchecking the checked item.
        if checked || positions.get(&position).copied().unwrap_or(false) {
            positions.clear();
            if update_ids && let Some(ids) = self.ids.as_mut() {
                ids.clear();
            }
        }

        if checked {
            positions.insert(position, true);
            if update_ids
                && let Some(ids) = self.ids.as_mut()
                && let Some(id) = source.item_id(position)
            {
                ids.insert(id, position);
            }
            self.checked_count = 1;
        } else if !positions.values().any(|&v| v) {
            self.checked_count = 0;
        }

        before != self.checked_item_position()
    }

    /// Whether `position` is checked.
    ///
    /// Positions that were never checked, including any beyond the item
    /// range, report `false`.
    #[must_use]
    pub fn is_item_checked(&self, position: usize) -> bool {
        if !self.mode.is_enabled() {
            return false;
        }
        self.positions
            .as_ref()
            .and_then(|p| p.get(&position).copied())
            .unwrap_or(false)
    }

    /// Uncheck everything, regardless of mode.
    pub fn clear_choices(&mut self) -> CheckOutcome {
        let changed = self.checked_count > 0 || self.checked_positions().next().is_some();
        if let Some(positions) = self.positions.as_mut() {
            positions.clear();
        }
        if let Some(ids) = self.ids.as_mut() {
            ids.clear();
        }
        self.checked_count = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "selection.change", action = "clear", changed);

        let all_selected_changed = if self.all_selected {
            self.all_selected = false;
            self.config.notify_all_selected.then_some(false)
        } else {
            None
        };
        CheckOutcome {
            changed,
            all_selected_changed,
        }
    }

    /// Checked positions in ascending order. Lingering `false` entries are skipped.
    pub fn checked_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .flat_map(|p| p.iter())
            .filter(|&(_, &checked)| checked)
            .map(|(&position, _)| position)
    }

    /// Raw position map entries, including lingering `false` entries.
    pub fn checked_position_states(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.positions
            .iter()
            .flat_map(|p| p.iter())
            .map(|(&position, &checked)| (position, checked))
    }

    /// Identities of the checked items, in ascending identity order.
    ///
    /// Empty unless the store tracks identities.
    #[must_use]
    pub fn checked_ids(&self) -> Vec<ItemId> {
        self.ids
            .as_ref()
            .map(|ids| ids.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Identity → position pairs, in ascending identity order.
    pub fn checked_id_positions(&self) -> impl Iterator<Item = (ItemId, usize)> + '_ {
        self.ids
            .iter()
            .flat_map(|ids| ids.iter())
            .map(|(&id, &position)| (id, position))
    }

    #[inline]
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.checked_count
    }

    /// The single checked position.
    ///
    /// Only defined in `Single` mode with exactly one entry in the position map.
    #[must_use]
    pub fn checked_item_position(&self) -> Option<usize> {
        if self.mode != ChoiceMode::Single {
            return None;
        }
        let positions = self.positions.as_ref()?;
        if positions.len() != 1 {
            return None;
        }
        positions
            .iter()
            .next()
            .and_then(|(&position, &checked)| checked.then_some(position))
    }

    /// Whether the store is tracking identities.
    #[inline]
    #[must_use]
    pub fn tracks_ids(&self) -> bool {
        self.ids.is_some()
    }

    /// Last reported "all selected" state.
    #[inline]
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    /// Recompute the "all selected" state against `source`, reporting a flip.
    ///
    /// Used after a restore, which cannot know the current item count.
    pub fn refresh_all_selected<S>(&mut self, source: &S) -> Option<bool>
    where
        S: ItemSource + ?Sized,
    {
        self.update_all_selected(source.item_count())
    }

    /// Allocate missing maps for an enabled mode.
    pub(crate) fn ensure_maps<S>(&mut self, source: &S)
    where
        S: ItemSource + ?Sized,
    {
        if !self.mode.is_enabled() {
            return;
        }
        if self.positions.is_none() {
            self.positions = Some(BTreeMap::new());
        }
        if self.ids.is_none() && source.has_stable_ids() {
            self.ids = Some(BTreeMap::new());
        }
    }

    /// Edge detection for the "all selected" state.
    pub(crate) fn update_all_selected(&mut self, item_count: usize) -> Option<bool> {
        let now = self.mode == ChoiceMode::Multiple
            && item_count > 0
            && self.checked_count == item_count;
        if now == self.all_selected {
            return None;
        }
        self.all_selected = now;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "selection.all_selected", all_selected = now);
        self.config.notify_all_selected.then_some(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PositionalItems;

    fn items(n: u64) -> Vec<ItemId> {
        (0..n).map(|i| 100 + i).collect()
    }

    fn store(mode: ChoiceMode, source: &[ItemId]) -> SelectionStore {
        let mut s = SelectionStore::default();
        let _ = s.set_choice_mode(mode, source);
        s
    }

    // --- Mode ---

    #[test]
    fn none_mode_ignores_checks() {
        let src = items(3);
        let mut s = SelectionStore::default();
        let outcome = s.set_item_checked(1, true, src.as_slice());
        assert_eq!(outcome, CheckOutcome::default());
        assert!(!s.is_item_checked(1));
        assert_eq!(s.checked_count(), 0);
    }

    #[test]
    fn entering_mode_allocates_id_map_only_for_stable_sources() {
        let stable = store(ChoiceMode::Multiple, &items(3));
        assert!(stable.tracks_ids());

        let mut positional = SelectionStore::default();
        let _ = positional.set_choice_mode(ChoiceMode::Multiple, &PositionalItems::new(3));
        assert!(!positional.tracks_ids());
    }

    #[test]
    fn mode_change_clears_selection() {
        let src = items(4);
        let mut s = store(ChoiceMode::Multiple, &src);
        let _ = s.set_item_checked(0, true, src.as_slice());
        let _ = s.set_item_checked(2, true, src.as_slice());
        let outcome = s.set_choice_mode(ChoiceMode::Single, src.as_slice());
        assert!(outcome.changed);
        assert_eq!(s.checked_count(), 0);
        assert!(s.checked_ids().is_empty());
        assert_eq!(s.choice_mode(), ChoiceMode::Single);
    }

    #[test]
    fn setting_none_drops_maps() {
        let src = items(2);
        let mut s = store(ChoiceMode::Single, &src);
        let _ = s.set_item_checked(0, true, src.as_slice());
        let _ = s.set_choice_mode(ChoiceMode::None, src.as_slice());
        assert_eq!(s.checked_count(), 0);
        assert!(!s.tracks_ids());
        assert_eq!(s.checked_positions().count(), 0);
    }

    // --- Multiple ---

    #[test]
    fn multiple_toggles_and_counts() {
        let src = items(5);
        let mut s = store(ChoiceMode::Multiple, &src);
        assert!(s.set_item_checked(1, true, src.as_slice()).changed);
        assert!(s.set_item_checked(3, true, src.as_slice()).changed);
        assert!(!s.set_item_checked(3, true, src.as_slice()).changed);
        assert_eq!(s.checked_count(), 2);
        assert_eq!(s.checked_positions().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(s.checked_ids(), [101, 103]);

        assert!(s.set_item_checked(1, false, src.as_slice()).changed);
        assert_eq!(s.checked_count(), 1);
        assert_eq!(s.checked_ids(), [103]);
        // The false entry lingers in the raw map.
        assert!(s.checked_position_states().any(|e| e == (1, false)));
    }

    #[test]
    fn all_selected_is_edge_triggered() {
        let src = items(3);
        let mut s = store(ChoiceMode::Multiple, &src);
        assert_eq!(s.set_item_checked(0, true, src.as_slice()).all_selected_changed, None);
        assert_eq!(s.set_item_checked(1, true, src.as_slice()).all_selected_changed, None);
        assert_eq!(
            s.set_item_checked(2, true, src.as_slice()).all_selected_changed,
            Some(true)
        );
        // Re-checking while full does not fire again.
        assert_eq!(s.set_item_checked(2, true, src.as_slice()).all_selected_changed, None);
        assert_eq!(
            s.set_item_checked(0, false, src.as_slice()).all_selected_changed,
            Some(false)
        );
        assert_eq!(s.set_item_checked(1, false, src.as_slice()).all_selected_changed, None);
    }

    #[test]
    fn all_selected_notification_can_be_disabled() {
        let src = items(1);
        let mut s = SelectionStore::new(SelectionConfig {
            notify_all_selected: false,
            ..SelectionConfig::default()
        });
        let _ = s.set_choice_mode(ChoiceMode::Multiple, src.as_slice());
        let outcome = s.set_item_checked(0, true, src.as_slice());
        assert_eq!(outcome.all_selected_changed, None);
        assert!(s.is_all_selected());
    }

    #[test]
    fn clear_reports_leaving_all_selected() {
        let src = items(2);
        let mut s = store(ChoiceMode::Multiple, &src);
        let _ = s.set_item_checked(0, true, src.as_slice());
        let _ = s.set_item_checked(1, true, src.as_slice());
        let outcome = s.clear_choices();
        assert_eq!(outcome.all_selected_changed, Some(false));
        assert_eq!(s.checked_count(), 0);
        assert!(s.checked_ids().is_empty());
    }

    // --- Single ---

    #[test]
    fn single_keeps_one_checked() {
        let src = items(5);
        let mut s = store(ChoiceMode::Single, &src);
        let _ = s.set_item_checked(1, true, src.as_slice());
        let _ = s.set_item_checked(3, true, src.as_slice());
        assert!(!s.is_item_checked(1));
        assert!(s.is_item_checked(3));
        assert_eq!(s.checked_count(), 1);
        assert_eq!(s.checked_item_position(), Some(3));
        assert_eq!(s.checked_ids(), [103]);
    }

    #[test]
    fn single_check_twice_is_idempotent() {
        let src = items(3);
        let mut s = store(ChoiceMode::Single, &src);
        assert!(s.set_item_checked(2, true, src.as_slice()).changed);
        assert!(!s.set_item_checked(2, true, src.as_slice()).changed);
        assert_eq!(s.checked_item_position(), Some(2));
    }

    #[test]
    fn single_uncheck_other_item_keeps_selection() {
        let src = items(3);
        let mut s = store(ChoiceMode::Single, &src);
        let _ = s.set_item_checked(0, true, src.as_slice());
        assert!(!s.set_item_checked(2, false, src.as_slice()).changed);
        assert_eq!(s.checked_count(), 1);
        assert!(s.is_item_checked(0));
    }

    #[test]
    fn single_uncheck_checked_item_clears() {
        let src = items(3);
        let mut s = store(ChoiceMode::Single, &src);
        let _ = s.set_item_checked(0, true, src.as_slice());
        assert!(s.set_item_checked(0, false, src.as_slice()).changed);
        assert_eq!(s.checked_count(), 0);
        assert_eq!(s.checked_item_position(), None);
        assert!(s.checked_ids().is_empty());
    }

    #[test]
    fn single_never_reports_all_selected() {
        let src = items(1);
        let mut s = store(ChoiceMode::Single, &src);
        let outcome = s.set_item_checked(0, true, src.as_slice());
        assert_eq!(outcome.all_selected_changed, None);
    }

    // --- Bounds ---

    #[test]
    fn out_of_range_is_noop() {
        let src = items(2);
        let mut s = store(ChoiceMode::Multiple, &src);
        assert!(!s.set_item_checked(2, true, src.as_slice()).changed);
        assert!(!s.is_item_checked(2));
        assert_eq!(s.checked_count(), 0);
    }

    #[test]
    fn checked_item_position_requires_single_mode() {
        let src = items(2);
        let mut s = store(ChoiceMode::Multiple, &src);
        let _ = s.set_item_checked(0, true, src.as_slice());
        assert_eq!(s.checked_item_position(), None);
    }
}
