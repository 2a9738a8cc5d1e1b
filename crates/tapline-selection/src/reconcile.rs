#![forbid(unsafe_code)]

//! Repairing checked state after the item collection changes.
//!
//! Positions shift when items are inserted, removed or moved; identities do
//! not. [`SelectionStore::on_data_set_changed`] rebuilds the position map
//! from the identity map:
//!
//! 1. An identity still found at its recorded position is kept there.
//! 2. Otherwise the positions `[old - W, old + W)` (clamped to the item
//!    range) are searched in ascending order and the first match wins.
//! 3. An identity not found in the window is dropped and the checked count
//!    shrinks by one.
//!
//! Identities that drifted further than `W` are treated as removed. `W` is
//! [`SelectionConfig::search_window`](crate::SelectionConfig::search_window).

use std::collections::BTreeMap;

use crate::source::{ItemId, ItemSource};
use crate::store::SelectionStore;

/// Identity that moved to a new position during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovedItem {
    pub id: ItemId,
    pub from: usize,
    pub to: usize,
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ReconcileReport {
    /// Whether the pass ran at all (enabled mode and stable identities).
    pub performed: bool,
    /// Identities found at their recorded position.
    pub kept: usize,
    /// Identities relocated within the search window.
    pub moved: Vec<MovedItem>,
    /// Identities not found and removed from the selection.
    pub dropped: Vec<ItemId>,
    /// `Some(all)` when the "all selected" state flipped to `all`.
    pub all_selected_changed: Option<bool>,
}

impl ReconcileReport {
    /// Whether any checked position changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.moved.is_empty() || !self.dropped.is_empty()
    }
}

impl SelectionStore {
    /// Re-anchor checked state after the host's items changed.
    ///
    /// A no-op unless the mode is enabled, the store tracks identities and
    /// `source` reports stable identities.
    pub fn on_data_set_changed<S>(&mut self, source: &S) -> ReconcileReport
    where
        S: ItemSource + ?Sized,
    {
        if !self.mode.is_enabled() || !source.has_stable_ids() {
            return ReconcileReport::default();
        }
        let Some(ids) = self.ids.take() else {
            return ReconcileReport::default();
        };

        let item_count = source.item_count();
        let window = self.config.search_window;
        let mut positions = BTreeMap::new();
        let mut rebuilt = BTreeMap::new();
        let mut report = ReconcileReport {
            performed: true,
            ..ReconcileReport::default()
        };

        for (id, last_pos) in ids {
            if source.item_id(last_pos) == Some(id) {
                positions.insert(last_pos, true);
                rebuilt.insert(id, last_pos);
                report.kept += 1;
                continue;
            }

            let start = last_pos.saturating_sub(window);
            let end = last_pos.saturating_add(window).min(item_count);
            let found = (start..end).find(|&pos| source.item_id(pos) == Some(id));
            match found {
                Some(pos) => {
                    positions.insert(pos, true);
                    rebuilt.insert(id, pos);
                    report.moved.push(MovedItem {
                        id,
                        from: last_pos,
                        to: pos,
                    });
                }
                None => {
                    self.checked_count = self.checked_count.saturating_sub(1);
                    report.dropped.push(id);
                }
            }
        }

        self.positions = Some(positions);
        self.ids = Some(rebuilt);
        report.all_selected_changed = self.update_all_selected(item_count);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "selection.reconcile",
            kept = report.kept,
            moved = report.moved.len(),
            dropped = report.dropped.len(),
            checked_count = self.checked_count,
            item_count
        );

        report
    }
}
