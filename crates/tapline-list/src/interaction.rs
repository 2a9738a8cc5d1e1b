#![forbid(unsafe_code)]

//! Touch-driven selection for a list surface.
//!
//! [`ListInteraction`] wires the pieces together:
//!
//! ```text
//! TouchFrame ─▶ GestureRecognizer ─▶ ClickDispatcher ─▶ SelectionStore
//!                                          │                  │
//!                                          ▼                  ▼
//!                                   host click hooks   host checked visuals
//! ```
//!
//! Clicks toggle selection: in `Multiple` mode the item flips, in `Single`
//! mode an unchecked item becomes the checked one and clicking the checked
//! item keeps it. The host's click callback runs before the toggle and its
//! return value does not change it.

use tapline_core::{GestureConfig, GestureEvent, GestureRecognizer, TimerTag, TouchAction, TouchFrame};
use tapline_selection::{
    CheckOutcome, ChoiceMode, PersistError, ReconcileReport, SelectionConfig,
    SelectionPersistState, SelectionStore, Stateful,
};
use web_time::Instant;

use crate::click::{ClickDispatcher, Dispatch};
use crate::hit_test::ItemHitTester;
use crate::host::ListHost;

/// Gesture recognition, click dispatch and selection for one list surface.
#[derive(Debug)]
pub struct ListInteraction {
    recognizer: GestureRecognizer,
    dispatcher: ClickDispatcher,
    selection: SelectionStore,
    touch_enabled: bool,
}

impl Default for ListInteraction {
    fn default() -> Self {
        Self::new(GestureConfig::default(), SelectionConfig::default())
    }
}

impl ListInteraction {
    #[must_use]
    pub fn new(gesture: GestureConfig, selection: SelectionConfig) -> Self {
        Self {
            recognizer: GestureRecognizer::new(gesture),
            dispatcher: ClickDispatcher::new(ItemHitTester::new()),
            selection: SelectionStore::new(selection),
            touch_enabled: true,
        }
    }

    /// Use `store` (for example one carrying a persistence id) for selection.
    #[must_use]
    pub fn with_selection(mut self, store: SelectionStore) -> Self {
        self.selection = store;
        self
    }

    #[inline]
    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    #[inline]
    #[must_use]
    pub fn dispatcher(&self) -> &ClickDispatcher {
        &self.dispatcher
    }

    #[inline]
    #[must_use]
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    // --- Touch -------------------------------------------------------------

    /// Whether touch frames are being handled.
    #[inline]
    #[must_use]
    pub fn touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    /// Start or stop handling touch frames. Disabling aborts the gesture in flight.
    pub fn set_touch_enabled<H>(&mut self, enabled: bool, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        if self.touch_enabled && !enabled {
            self.disallow_intercept(host);
        }
        self.touch_enabled = enabled;
    }

    /// Feed one touch frame.
    ///
    /// Returns the recognized gestures so the host can drive its own
    /// scrolling and flinging. Frames are ignored while touch is disabled or
    /// the host is detached.
    pub fn on_touch<H>(&mut self, frame: &TouchFrame, host: &mut H) -> Vec<GestureEvent>
    where
        H: ListHost + ?Sized,
    {
        if !self.touch_enabled || !host.is_attached() {
            return Vec::new();
        }
        let events = self.recognizer.process(frame);
        self.route(&events, host);
        match frame.action() {
            TouchAction::Up => {
                if let Some(dispatch) = self.dispatcher.on_release(host) {
                    self.apply(dispatch, host);
                }
            }
            TouchAction::Cancel => self.dispatcher.abandon(host),
            _ => {}
        }
        events
    }

    /// Fire timers due at `now`.
    pub fn poll<H>(&mut self, now: Instant, host: &mut H) -> Vec<GestureEvent>
    where
        H: ListHost + ?Sized,
    {
        if !self.touch_enabled || !host.is_attached() {
            return Vec::new();
        }
        let events = self.recognizer.poll(now);
        self.route(&events, host);
        events
    }

    /// Deliver a timer expiry scheduled by the host.
    pub fn on_timer_fired<H>(&mut self, tag: TimerTag, host: &mut H) -> Vec<GestureEvent>
    where
        H: ListHost + ?Sized,
    {
        if !self.touch_enabled || !host.is_attached() {
            return Vec::new();
        }
        let events = self.recognizer.on_timer_fired(tag);
        self.route(&events, host);
        events
    }

    /// Earliest pending gesture timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.recognizer.next_deadline()
    }

    /// A parent took over the touch stream: abort the gesture silently.
    pub fn disallow_intercept<H>(&mut self, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        self.recognizer.cancel();
        self.dispatcher.abandon(host);
    }

    fn route<H>(&mut self, events: &[GestureEvent], host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        for event in events {
            if let Some(dispatch) = self.dispatcher.on_gesture(event, host) {
                self.apply(dispatch, host);
            }
        }
    }

    fn apply<H>(&mut self, dispatch: Dispatch, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        let Dispatch::Click { target, .. } = dispatch else {
            return;
        };
        let position = target.position;
        let outcome = match self.selection.choice_mode() {
            ChoiceMode::None => return,
            ChoiceMode::Multiple => {
                let checked = !self.selection.is_item_checked(position);
                self.selection.set_item_checked(position, checked, &*host)
            }
            ChoiceMode::Single => {
                if self.selection.is_item_checked(position) {
                    return;
                }
                self.selection.set_item_checked(position, true, &*host)
            }
        };
        self.publish(outcome, host);
    }

    // --- Selection ---------------------------------------------------------

    pub fn set_choice_mode<H>(&mut self, mode: ChoiceMode, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        let outcome = self.selection.set_choice_mode(mode, &*host);
        self.publish(outcome, host);
    }

    pub fn set_item_checked<H>(&mut self, position: usize, checked: bool, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        let outcome = self.selection.set_item_checked(position, checked, &*host);
        self.publish(outcome, host);
    }

    /// Whether `position` is checked. Positions outside the host's current
    /// item range are never checked.
    #[must_use]
    pub fn is_item_checked<H>(&self, position: usize, host: &H) -> bool
    where
        H: ListHost + ?Sized,
    {
        position < host.item_count() && self.selection.is_item_checked(position)
    }

    pub fn clear_choices<H>(&mut self, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        let outcome = self.selection.clear_choices();
        self.publish(outcome, host);
    }

    /// The host's items changed; re-anchor the selection.
    pub fn on_data_set_changed<H>(&mut self, host: &mut H) -> ReconcileReport
    where
        H: ListHost + ?Sized,
    {
        let report = self.selection.on_data_set_changed(&*host);
        if let Some(all) = report.all_selected_changed {
            host.on_all_selected_changed(all);
        }
        if report.performed {
            self.refresh_checked_visuals(host);
        }
        report
    }

    /// Capture the selection for persistence.
    #[must_use]
    pub fn save_selection(&self) -> SelectionPersistState {
        self.selection.save_state()
    }

    /// Validate and restore a saved selection, then resync the host.
    pub fn restore_selection<H>(
        &mut self,
        state: SelectionPersistState,
        host: &mut H,
    ) -> Result<(), PersistError>
    where
        H: ListHost + ?Sized,
    {
        self.selection.try_restore_state(state)?;
        if let Some(all) = self.selection.refresh_all_selected(&*host) {
            host.on_all_selected_changed(all);
        }
        self.refresh_checked_visuals(host);
        Ok(())
    }

    fn publish<H>(&mut self, outcome: CheckOutcome, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        if let Some(all) = outcome.all_selected_changed {
            host.on_all_selected_changed(all);
        }
        if outcome.changed {
            self.refresh_checked_visuals(host);
        }
    }

    fn refresh_checked_visuals<H>(&self, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        let visible = host.visible_positions();
        let end = visible.end.min(host.item_count());
        for position in visible.start..end {
            host.set_checked_visual(position, self.selection.is_item_checked(position));
        }
    }
}
