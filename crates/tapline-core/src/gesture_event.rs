#![forbid(unsafe_code)]

//! Discrete gesture events produced by the recognizer.
//!
//! [`GestureEvent`] mirrors the classic touch listener callbacks: down,
//! show-press, single tap (raw and confirmed), double tap, long press,
//! scroll and fling.
//!
//! # Invariants
//! 1. Every gesture stream starts with exactly one `Down`.
//! 2. `SingleTapUp` and `Scroll` never both occur in the same gesture stream.
//! 3. `DoubleTap` is always followed by `DoubleTapEvent { phase: Down, .. }`
//!    in the same batch, and the stream then ends with a `phase: Up` event.
//! 4. After `LongPress`, the stream produces no tap, scroll or fling events.

use crate::geometry::{Point, Velocity};

/// Which part of the second tap a [`GestureEvent::DoubleTapEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleTapPhase {
    Down,
    Move,
    Up,
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The first pointer touched down.
    Down { pos: Point },

    /// The pointer has been down for the tap timeout without moving or lifting.
    ShowPress { pos: Point },

    /// The pointer lifted inside the tap region.
    SingleTapUp { pos: Point },

    /// A single tap that can no longer become a double tap.
    SingleTapConfirmed { pos: Point },

    /// A second tap landed close to the first within the double-tap timeout.
    /// `pos` is the position of the first tap's down.
    DoubleTap { pos: Point },

    /// Down, move and up of the second tap of a double tap.
    DoubleTapEvent { phase: DoubleTapPhase, pos: Point },

    /// The pointer stayed inside the tap region past the long-press timeout.
    LongPress { pos: Point },

    /// The focal point moved. Distances are `last - current`, so dragging
    /// content to the left yields a positive `distance_x`.
    Scroll {
        down: Point,
        current: Point,
        distance_x: f32,
        distance_y: f32,
    },

    /// The pointer lifted while moving faster than the minimum fling velocity.
    Fling {
        down: Point,
        up: Point,
        velocity: Velocity,
    },
}

impl GestureEvent {
    /// Stable label for logs and tests.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::ShowPress { .. } => "show_press",
            Self::SingleTapUp { .. } => "single_tap_up",
            Self::SingleTapConfirmed { .. } => "single_tap_confirmed",
            Self::DoubleTap { .. } => "double_tap",
            Self::DoubleTapEvent { .. } => "double_tap_event",
            Self::LongPress { .. } => "long_press",
            Self::Scroll { .. } => "scroll",
            Self::Fling { .. } => "fling",
        }
    }

    /// The position most closely associated with this event.
    #[must_use]
    pub const fn position(&self) -> Point {
        match *self {
            Self::Down { pos }
            | Self::ShowPress { pos }
            | Self::SingleTapUp { pos }
            | Self::SingleTapConfirmed { pos }
            | Self::DoubleTap { pos }
            | Self::DoubleTapEvent { pos, .. }
            | Self::LongPress { pos } => pos,
            Self::Scroll { current, .. } => current,
            Self::Fling { up, .. } => up,
        }
    }

    /// Returns true for single-tap classifications (raw or confirmed).
    #[must_use]
    pub const fn is_single_tap(&self) -> bool {
        matches!(self, Self::SingleTapUp { .. } | Self::SingleTapConfirmed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        let p = Point::ZERO;
        let events = [
            GestureEvent::Down { pos: p },
            GestureEvent::ShowPress { pos: p },
            GestureEvent::SingleTapUp { pos: p },
            GestureEvent::SingleTapConfirmed { pos: p },
            GestureEvent::DoubleTap { pos: p },
            GestureEvent::DoubleTapEvent {
                phase: DoubleTapPhase::Up,
                pos: p,
            },
            GestureEvent::LongPress { pos: p },
            GestureEvent::Scroll {
                down: p,
                current: p,
                distance_x: 0.0,
                distance_y: 0.0,
            },
            GestureEvent::Fling {
                down: p,
                up: p,
                velocity: Velocity::ZERO,
            },
        ];
        let mut names: Vec<_> = events.iter().map(GestureEvent::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), events.len());
    }

    #[test]
    fn position_of_scroll_is_current() {
        let e = GestureEvent::Scroll {
            down: Point::new(1.0, 1.0),
            current: Point::new(9.0, 4.0),
            distance_x: -8.0,
            distance_y: -3.0,
        };
        assert_eq!(e.position(), Point::new(9.0, 4.0));
    }

    #[test]
    fn single_tap_classification() {
        assert!(GestureEvent::SingleTapUp { pos: Point::ZERO }.is_single_tap());
        assert!(GestureEvent::SingleTapConfirmed { pos: Point::ZERO }.is_single_tap());
        assert!(!GestureEvent::DoubleTap { pos: Point::ZERO }.is_single_tap());
    }
}
