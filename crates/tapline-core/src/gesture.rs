#![forbid(unsafe_code)]

//! Gesture recognition: classifies raw touch frames into gesture events.
//!
//! [`GestureRecognizer`] is a stateful processor that converts a stream of
//! [`TouchFrame`]s into [`GestureEvent`]s (tap, double tap, long press,
//! scroll, fling).
//!
//! # State Machine
//!
//! ```text
//!            Down                 move > slop
//!   Idle ──────────▶ Down ──▶ TapRegion ──────────▶ Scrolling
//!     ▲               │  \        │                    │
//!     │               │   \  long-press timer          │
//!     │               │    ▶ LongPressed               │
//!     │  second Down within double-tap window          │
//!     │──────────────▶ DoubleTapArmed ─▶ LongPressed   │
//!     └──────────── Up / Cancel (from every state) ◀───┘
//! ```
//!
//! Three timers drive the time-based transitions, all keyed by [`TimerTag`]:
//! show-press at `down + tap_timeout`, long press at
//! `down + tap_timeout + long_press_timeout`, and the tap confirmation window
//! at `down + double_tap_timeout`.
//!
//! # Invariants
//!
//! 1. The state is exactly one [`GestureState`] and only changes while
//!    handling one frame or one timer firing.
//! 2. Entering `Scrolling` cancels the show-press, long-press and tap timers.
//! 3. After `LongPress`, moves are ignored. The Up emits nothing, except the
//!    `DoubleTapEvent` Up that closes a held second tap.
//! 4. A completed double tap never produces `SingleTapConfirmed` for its first tap.
//! 5. After `Up` or `Cancel` the state is `Idle` and the velocity history is empty.
//!
//! # Failure Modes
//!
//! - Frames without pointers (other than `Cancel`) violate the input contract;
//!   they are dropped with a warning and do not change state.
//! - Timer firings for tags that are no longer pending are stale and ignored.

use std::time::Duration;

use web_time::Instant;

use crate::event::{TouchAction, TouchFrame};
use crate::gesture_event::{DoubleTapPhase, GestureEvent};
use crate::geometry::Point;
use crate::timer::{TimerQueue, TimerTag};
use crate::velocity::VelocityTracker;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and timeouts for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Distance (pixels) a pointer may wander before a tap becomes a scroll (default: 8).
    pub touch_slop: f32,
    /// Maximum distance (pixels) between the two downs of a double tap (default: 100).
    pub double_tap_slop: f32,
    /// Delay before pressed feedback is shown (default: 100ms).
    pub tap_timeout: Duration,
    /// Additional hold time after `tap_timeout` before a long press (default: 500ms).
    pub long_press_timeout: Duration,
    /// Window in which a second tap counts as a double tap (default: 300ms).
    pub double_tap_timeout: Duration,
    /// Minimum speed on either axis (pixels/sec) to report a fling (default: 50).
    pub min_fling_velocity: f32,
    /// Fling velocities are clamped to this magnitude (default: 8000).
    pub max_fling_velocity: f32,
    /// Whether holding still produces a long press (default: true).
    pub long_press_enabled: bool,
    /// Whether double taps are recognized (default: true). When disabled,
    /// single taps are never confirmed and only `SingleTapUp` is reported.
    pub double_tap_enabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            tap_timeout: Duration::from_millis(100),
            long_press_timeout: Duration::from_millis(500),
            double_tap_timeout: Duration::from_millis(300),
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            long_press_enabled: true,
            double_tap_enabled: true,
        }
    }
}

impl GestureConfig {
    /// Check every threshold is usable.
    ///
    /// Returns a list of problems; an empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.touch_slop.is_finite() && self.touch_slop >= 0.0) {
            errors.push(format!("touch_slop must be >= 0, got {}", self.touch_slop));
        }
        if !(self.double_tap_slop.is_finite() && self.double_tap_slop >= 0.0) {
            errors.push(format!(
                "double_tap_slop must be >= 0, got {}",
                self.double_tap_slop
            ));
        }
        if !(self.min_fling_velocity.is_finite() && self.min_fling_velocity >= 0.0) {
            errors.push(format!(
                "min_fling_velocity must be >= 0, got {}",
                self.min_fling_velocity
            ));
        }
        if !(self.max_fling_velocity.is_finite() && self.max_fling_velocity > 0.0) {
            errors.push(format!(
                "max_fling_velocity must be > 0, got {}",
                self.max_fling_velocity
            ));
        } else if self.max_fling_velocity < self.min_fling_velocity {
            errors.push(format!(
                "max_fling_velocity ({}) must be >= min_fling_velocity ({})",
                self.max_fling_velocity, self.min_fling_velocity
            ));
        }
        if self.double_tap_timeout.is_zero() && self.double_tap_enabled {
            errors.push("double_tap_timeout must be > 0 when double taps are enabled".into());
        }
        errors
    }
}

/// Slop thresholds squared once so the input path never takes a square root.
#[derive(Debug, Clone, Copy)]
struct SquaredSlop {
    touch: f32,
    double_tap: f32,
}

impl SquaredSlop {
    fn from_config(config: &GestureConfig) -> Self {
        Self {
            touch: config.touch_slop * config.touch_slop,
            double_tap: config.double_tap_slop * config.double_tap_slop,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// The recognizer's current classification of the gesture stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A pointer is down and has not moved yet.
    Down,
    /// The pointer moved but stayed within the touch slop.
    TapRegion,
    /// The pointer left the touch slop; every further move scrolls.
    Scrolling,
    /// The long-press timer fired; the rest of the stream is suppressed.
    LongPressed,
    /// The pointer is down for the second tap of a double tap.
    DoubleTapArmed,
}

impl GestureState {
    /// Whether a pointer is currently on the surface.
    #[inline]
    #[must_use]
    pub const fn is_pointer_down(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// States in which the long-press timer may still fire.
    const fn can_long_press(self) -> bool {
        matches!(self, Self::Down | Self::TapRegion | Self::DoubleTapArmed)
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Down => "down",
            Self::TapRegion => "tap_region",
            Self::Scrolling => "scrolling",
            Self::LongPressed => "long_pressed",
            Self::DoubleTapArmed => "double_tap_armed",
        }
    }
}

/// A retained down or up frame, reduced to what double-tap detection needs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingEvent {
    pos: Point,
    time: Instant,
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Stateful touch gesture recognizer.
///
/// Call [`process`](GestureRecognizer::process) for each incoming
/// [`TouchFrame`]. Timers that come due between frames are delivered by
/// [`poll`](GestureRecognizer::poll) (call it from a tick or at
/// [`next_deadline`](GestureRecognizer::next_deadline)), or by handing an
/// expired tag to [`on_timer_fired`](GestureRecognizer::on_timer_fired) when
/// the host runs its own scheduler.
pub struct GestureRecognizer {
    config: GestureConfig,
    slop: SquaredSlop,
    state: GestureState,
    timers: TimerQueue,
    velocity: VelocityTracker,

    // Double-tap bookkeeping
    current_down: Option<PendingEvent>,
    previous_up: Option<PendingEvent>,
    always_in_bigger_tap_region: bool,
    defer_confirm_single_tap: bool,
    /// The stream is the second tap of a double tap. Survives `LongPressed`.
    double_tapping: bool,

    // Focal point tracking
    last_focus: Point,
    down_focus: Point,
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("state", &self.state)
            .field("pending_timers", &self.timers.len())
            .field("defer_confirm", &self.defer_confirm_single_tap)
            .field("double_tapping", &self.double_tapping)
            .finish()
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// Create a new gesture recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        let slop = SquaredSlop::from_config(&config);
        Self {
            config,
            slop,
            state: GestureState::Idle,
            timers: TimerQueue::new(),
            velocity: VelocityTracker::new(),
            current_down: None,
            previous_up: None,
            always_in_bigger_tap_region: false,
            defer_confirm_single_tap: false,
            double_tapping: false,
            last_focus: Point::ZERO,
            down_focus: Point::ZERO,
        }
    }

    /// Process a touch frame, returning the gesture events it produced.
    ///
    /// Timers due at or before the frame's timestamp fire first, so their
    /// events precede the frame's own events in the returned batch.
    pub fn process(&mut self, frame: &TouchFrame) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);
        self.fire_due(frame.time(), &mut out);

        if frame.action() == TouchAction::Cancel {
            self.cancel();
            return out;
        }

        let Some(focus) = frame.focal_point() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                message = "gesture.empty_frame",
                action = ?frame.action()
            );
            return out;
        };

        self.velocity.add_frame(frame);

        match frame.action() {
            TouchAction::Down => self.on_down(frame, focus, &mut out),
            TouchAction::Move => self.on_move(focus, &mut out),
            TouchAction::Up => self.on_up(frame, &mut out),
            TouchAction::PointerDown => self.on_pointer_down(focus),
            TouchAction::PointerUp => self.on_pointer_up(frame, focus),
            TouchAction::Cancel => {}
        }

        out
    }

    /// Fire every timer due at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        self.fire_due(now, &mut out);
        out
    }

    /// Deliver an externally scheduled timer expiry.
    ///
    /// Tags that are not pending (already cancelled, fired, or re-armed
    /// away) are stale and produce nothing.
    pub fn on_timer_fired(&mut self, tag: TimerTag) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        if self.timers.take(tag).is_some() {
            self.handle_timer(tag, &mut out);
        }
        out
    }

    /// Earliest pending timer deadline, for hosts that schedule wake-ups.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Abort the current gesture stream without emitting further events.
    ///
    /// Flushes every pending timer and returns to `Idle`. Used for
    /// host-initiated interception changes as well as `Cancel` frames.
    pub fn cancel(&mut self) {
        self.timers.clear();
        self.velocity.clear();
        self.always_in_bigger_tap_region = false;
        self.defer_confirm_single_tap = false;
        self.double_tapping = false;
        self.transition(GestureState::Idle, "cancel");
    }

    /// Reset all state, including the retained down/up used for double taps.
    pub fn reset(&mut self) {
        self.cancel();
        self.current_down = None;
        self.previous_up = None;
    }

    /// Current state of the gesture stream.
    #[inline]
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a pointer is currently down.
    #[inline]
    #[must_use]
    pub fn is_still_down(&self) -> bool {
        self.state.is_pointer_down()
    }

    /// Pending timers, for inspection.
    #[inline]
    #[must_use]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Takes effect from the next frame.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.slop = SquaredSlop::from_config(&config);
        self.config = config;
    }

    /// Whether long press is enabled.
    #[inline]
    #[must_use]
    pub fn is_long_press_enabled(&self) -> bool {
        self.config.long_press_enabled
    }

    /// Enable or disable long press. When disabled, holding still and then
    /// moving produces scroll events instead.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.config.long_press_enabled = enabled;
        if !enabled {
            self.disarm(TimerTag::LongPress);
        }
    }
}

// ---------------------------------------------------------------------------
// Internal frame handlers
// ---------------------------------------------------------------------------

impl GestureRecognizer {
    fn on_down(&mut self, frame: &TouchFrame, focus: Point, out: &mut Vec<GestureEvent>) {
        let time = frame.time();
        let pos = frame.primary().map_or(focus, |p| p.position());

        let mut second_tap = false;
        if self.config.double_tap_enabled {
            let had_tap_timer = self.disarm(TimerTag::Tap);
            if had_tap_timer
                && let (Some(first_down), Some(first_up)) = (self.current_down, self.previous_up)
                && self.is_considered_double_tap(first_down, first_up, pos, time)
            {
                second_tap = true;
                out.push(GestureEvent::DoubleTap {
                    pos: first_down.pos,
                });
                out.push(GestureEvent::DoubleTapEvent {
                    phase: DoubleTapPhase::Down,
                    pos,
                });
            } else {
                self.arm(TimerTag::Tap, time + self.config.double_tap_timeout);
            }
        }

        self.last_focus = focus;
        self.down_focus = focus;
        self.current_down = Some(PendingEvent { pos, time });
        self.always_in_bigger_tap_region = true;
        self.defer_confirm_single_tap = false;
        self.double_tapping = second_tap;

        if self.config.long_press_enabled {
            self.arm(
                TimerTag::LongPress,
                time + self.config.tap_timeout + self.config.long_press_timeout,
            );
        }
        if second_tap {
            self.transition(GestureState::DoubleTapArmed, "second_tap");
        } else {
            self.transition(GestureState::Down, "down");
        }
        self.arm(TimerTag::ShowPress, time + self.config.tap_timeout);

        out.push(GestureEvent::Down { pos });
    }

    fn on_move(&mut self, focus: Point, out: &mut Vec<GestureEvent>) {
        let scroll_x = self.last_focus.x - focus.x;
        let scroll_y = self.last_focus.y - focus.y;
        let down = self.current_down.map_or(self.down_focus, |d| d.pos);

        match self.state {
            GestureState::Idle | GestureState::LongPressed => {}
            GestureState::DoubleTapArmed => {
                out.push(GestureEvent::DoubleTapEvent {
                    phase: DoubleTapPhase::Move,
                    pos: focus,
                });
            }
            GestureState::Down | GestureState::TapRegion => {
                let distance = focus.distance_squared(self.down_focus);
                if distance > self.slop.touch {
                    out.push(GestureEvent::Scroll {
                        down,
                        current: focus,
                        distance_x: scroll_x,
                        distance_y: scroll_y,
                    });
                    self.last_focus = focus;
                    self.always_in_bigger_tap_region = false;
                    self.disarm(TimerTag::Tap);
                    self.disarm(TimerTag::ShowPress);
                    self.disarm(TimerTag::LongPress);
                    self.transition(GestureState::Scrolling, "left_touch_slop");
                } else if self.state == GestureState::Down {
                    self.transition(GestureState::TapRegion, "move_within_slop");
                }
            }
            GestureState::Scrolling => {
                if scroll_x.abs() >= 1.0 || scroll_y.abs() >= 1.0 {
                    out.push(GestureEvent::Scroll {
                        down,
                        current: focus,
                        distance_x: scroll_x,
                        distance_y: scroll_y,
                    });
                    self.last_focus = focus;
                }
            }
        }
    }

    fn on_up(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        let time = frame.time();
        let Some(primary) = frame.primary().copied() else {
            return;
        };
        let pos = primary.position();

        match self.state {
            GestureState::Idle => return,
            // A held second tap may have long pressed; the double tap still closes.
            _ if self.double_tapping => {
                out.push(GestureEvent::DoubleTapEvent {
                    phase: DoubleTapPhase::Up,
                    pos,
                });
            }
            GestureState::DoubleTapArmed => {}
            GestureState::LongPressed => {
                self.disarm(TimerTag::Tap);
            }
            GestureState::Down | GestureState::TapRegion => {
                out.push(GestureEvent::SingleTapUp { pos });
                if self.defer_confirm_single_tap && self.config.double_tap_enabled {
                    out.push(GestureEvent::SingleTapConfirmed { pos });
                }
            }
            GestureState::Scrolling => {
                let velocity = self
                    .velocity
                    .velocity(primary.id, self.config.max_fling_velocity);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "gesture.fling",
                    velocity_x = velocity.x,
                    velocity_y = velocity.y,
                    min = self.config.min_fling_velocity
                );
                if velocity.exceeds(self.config.min_fling_velocity) {
                    out.push(GestureEvent::Fling {
                        down: self.current_down.map_or(pos, |d| d.pos),
                        up: pos,
                        velocity,
                    });
                }
            }
        }

        self.previous_up = Some(PendingEvent { pos, time });
        self.velocity.clear();
        self.defer_confirm_single_tap = false;
        self.double_tapping = false;
        self.disarm(TimerTag::ShowPress);
        self.disarm(TimerTag::LongPress);
        self.transition(GestureState::Idle, "up");
    }

    fn on_pointer_down(&mut self, focus: Point) {
        self.last_focus = focus;
        self.down_focus = focus;
        self.cancel_taps();
    }

    fn on_pointer_up(&mut self, frame: &TouchFrame, focus: Point) {
        self.last_focus = focus;
        self.down_focus = focus;

        let Some(lifted) = frame.lifted_pointer().copied() else {
            return;
        };
        let max = self.config.max_fling_velocity;
        let lifted_velocity = self.velocity.velocity(lifted.id, max);
        let opposing = frame
            .pointers()
            .iter()
            .filter(|p| p.id != lifted.id)
            .any(|p| lifted_velocity.dot(self.velocity.velocity(p.id, max)) < 0.0);
        if opposing {
            // A finger leaving against the others would read as a fling.
            self.velocity.clear();
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "gesture.velocity_cleared", pointer = lifted.id);
        } else {
            self.velocity.remove_pointer(lifted.id);
        }
    }

    /// A secondary pointer landed: the stream can no longer be a tap.
    fn cancel_taps(&mut self) {
        self.disarm(TimerTag::ShowPress);
        self.disarm(TimerTag::LongPress);
        self.disarm(TimerTag::Tap);
        self.always_in_bigger_tap_region = false;
        self.defer_confirm_single_tap = false;
        self.double_tapping = false;
        if self.state.is_pointer_down() {
            self.transition(GestureState::Scrolling, "pointer_down");
        }
    }

    fn is_considered_double_tap(
        &self,
        first_down: PendingEvent,
        first_up: PendingEvent,
        second_pos: Point,
        second_time: Instant,
    ) -> bool {
        if !self.always_in_bigger_tap_region {
            return false;
        }
        if second_time.duration_since(first_up.time) > self.config.double_tap_timeout {
            return false;
        }
        first_down.pos.distance_squared(second_pos) < self.slop.double_tap
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

impl GestureRecognizer {
    fn arm(&mut self, tag: TimerTag, deadline: Instant) {
        self.timers.schedule(tag, deadline);
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "gesture.timer", action = "arm", tag = tag.as_str());
    }

    fn disarm(&mut self, tag: TimerTag) -> bool {
        let cancelled = self.timers.cancel(tag);
        if cancelled {
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "gesture.timer", action = "cancel", tag = tag.as_str());
        }
        cancelled
    }

    fn fire_due(&mut self, now: Instant, out: &mut Vec<GestureEvent>) {
        while let Some(handle) = self.timers.pop_due(now) {
            self.handle_timer(handle.tag(), out);
        }
    }

    fn handle_timer(&mut self, tag: TimerTag, out: &mut Vec<GestureEvent>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "gesture.timer", action = "fire", tag = tag.as_str());

        let down_pos = self.current_down.map_or(self.down_focus, |d| d.pos);
        match tag {
            TimerTag::ShowPress => {
                if self.state.is_pointer_down() {
                    out.push(GestureEvent::ShowPress { pos: down_pos });
                }
            }
            TimerTag::LongPress => {
                if self.state.can_long_press() {
                    self.disarm(TimerTag::Tap);
                    self.defer_confirm_single_tap = false;
                    self.transition(GestureState::LongPressed, "long_press_timeout");
                    out.push(GestureEvent::LongPress { pos: down_pos });
                }
            }
            TimerTag::Tap => {
                if !self.config.double_tap_enabled {
                    return;
                }
                if self.state.is_pointer_down() {
                    // Finger still down: confirm on Up instead.
                    self.defer_confirm_single_tap = true;
                } else {
                    out.push(GestureEvent::SingleTapConfirmed { pos: down_pos });
                }
            }
        }
    }

    fn transition(&mut self, to: GestureState, cause: &'static str) {
        if self.state == to {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "gesture.transition",
            from = self.state.as_str(),
            to = to.as_str(),
            cause
        );
        #[cfg(not(feature = "tracing"))]
        let _ = cause;
        self.state = to;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
