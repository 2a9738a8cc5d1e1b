#![forbid(unsafe_code)]

//! Selection tuning.

/// Default reconciliation search window.
pub const DEFAULT_SEARCH_WINDOW: usize = 20;

/// Tuning for a [`SelectionStore`](crate::SelectionStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    /// How far (in positions, each direction) reconciliation searches for an
    /// identity that is no longer at its recorded position (default: 20).
    pub search_window: usize,
    /// Whether "all selected" edges are reported to the caller (default: true).
    pub notify_all_selected: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            search_window: DEFAULT_SEARCH_WINDOW,
            notify_all_selected: true,
        }
    }
}
