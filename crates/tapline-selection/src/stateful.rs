#![forbid(unsafe_code)]

//! Save/restore of component state across host lifecycle boundaries.

use std::fmt;

/// Identifies one persisted component: its type plus an instance id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    pub widget_type: &'static str,
    pub instance_id: String,
}

impl StateKey {
    #[must_use]
    pub fn new(widget_type: &'static str, instance_id: impl Into<String>) -> Self {
        Self {
            widget_type,
            instance_id: instance_id.into(),
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.widget_type, self.instance_id)
    }
}

/// A component whose state can be captured into a plain record and restored.
pub trait Stateful {
    /// The persisted record.
    type State;

    /// Key under which the host stores the record.
    fn state_key(&self) -> StateKey;

    /// Capture the current state.
    fn save_state(&self) -> Self::State;

    /// Replace the current state with a previously saved record.
    fn restore_state(&mut self, state: Self::State);
}
