#![forbid(unsafe_code)]

//! Tapline public facade crate.
//!
//! Touch gesture recognition and list selection for hosts that own their
//! own rendering. This crate re-exports the common types from the internal
//! crates, adds a unified [`Error`], file-based [`InteractionConfig`], and a
//! lightweight prelude for day-to-day usage.
//!
//! ```rust,ignore
//! use tapline::prelude::*;
//!
//! let mut list = ListInteraction::default();
//! list.set_choice_mode(ChoiceMode::Multiple, &mut host);
//! for frame in frames {
//!     let gestures = list.on_touch(&frame, &mut host);
//!     host.scroll_by(&gestures);
//! }
//! ```

pub mod config;
pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use tapline_core::{
    DoubleTapPhase, GestureConfig, GestureEvent, GestureRecognizer, GestureState, Point,
    PointerId, PointerSample, TimerTag, TouchAction, TouchFrame, Velocity,
};
pub use web_time::Instant;

#[cfg(feature = "tracing-json")]
pub use tapline_core::logging::init_json_logging;

// --- Selection re-exports --------------------------------------------------

pub use tapline_selection::{
    ChoiceMode, ItemId, ItemSource, PersistError, ReconcileReport, SelectionConfig,
    SelectionPersistState, SelectionStore, StateKey, Stateful,
};

// --- List re-exports -------------------------------------------------------

pub use tapline_list::{ItemClickListener, ItemTarget, ListHost, ListInteraction};

// --- Errors and config -----------------------------------------------------

pub use config::{ConfigError, InteractionConfig};
pub use error::{Error, Result};

impl InteractionConfig {
    /// Build a [`ListInteraction`] tuned by this configuration.
    #[must_use]
    pub fn build_interaction(&self) -> ListInteraction {
        ListInteraction::new(self.to_gesture_config(), self.to_selection_config())
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChoiceMode, Error, GestureEvent, InteractionConfig, ItemClickListener, ItemId,
        Instant, ItemSource, ListHost, ListInteraction, Point, Result, SelectionStore, TouchFrame,
    };

    pub use crate::{core, list, selection};
}

pub use tapline_core as core;
pub use tapline_list as list;
pub use tapline_selection as selection;
