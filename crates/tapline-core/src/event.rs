#![forbid(unsafe_code)]

//! Raw touch input types.
//!
//! A [`TouchFrame`] is one snapshot of every pointer currently on the surface,
//! tagged with the [`TouchAction`] that produced it. Hosts translate their
//! platform events into frames and feed them to the gesture recognizer.
//!
//! # Design Notes
//!
//! - Frames are ordered: the recognizer assumes timestamps never go backwards
//!   within one gesture stream.
//! - Every frame except [`TouchAction::Cancel`] must carry at least one pointer.
//! - `action_index` names the pointer that went down or up for
//!   [`TouchAction::PointerDown`] / [`TouchAction::PointerUp`]; it is ignored
//!   for the other actions.

use web_time::Instant;

use crate::geometry::Point;

/// Host-assigned pointer identifier, stable for the lifetime of one contact.
pub type PointerId = u32;

/// The position of one pointer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
    pub time: Instant,
}

impl PointerSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(id: PointerId, x: f32, y: f32, time: Instant) -> Self {
        Self { id, x, y, time }
    }

    /// Position as a [`Point`].
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// What happened to produce a [`TouchFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// First pointer touched the surface; starts a gesture stream.
    Down,
    /// One or more pointers moved.
    Move,
    /// Last pointer left the surface; ends the gesture stream.
    Up,
    /// An additional pointer touched the surface.
    PointerDown,
    /// A non-final pointer left the surface.
    PointerUp,
    /// The host aborted the gesture stream.
    Cancel,
}

impl TouchAction {
    /// Whether this action ends the gesture stream.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// All pointers on the surface at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchFrame {
    action: TouchAction,
    action_index: Option<usize>,
    pointers: Vec<PointerSample>,
    time: Instant,
}

impl TouchFrame {
    /// Create a frame from an explicit pointer set.
    ///
    /// Every sample is re-stamped with `time` so the frame is one instant.
    #[must_use]
    pub fn new(action: TouchAction, pointers: Vec<PointerSample>, time: Instant) -> Self {
        let pointers = pointers
            .into_iter()
            .map(|p| PointerSample { time, ..p })
            .collect();
        Self {
            action,
            action_index: None,
            pointers,
            time,
        }
    }

    /// Single-pointer `Down` frame.
    #[must_use]
    pub fn down(id: PointerId, x: f32, y: f32, time: Instant) -> Self {
        Self::single(TouchAction::Down, id, x, y, time)
    }

    /// Single-pointer `Move` frame.
    #[must_use]
    pub fn moved(id: PointerId, x: f32, y: f32, time: Instant) -> Self {
        Self::single(TouchAction::Move, id, x, y, time)
    }

    /// Single-pointer `Up` frame.
    #[must_use]
    pub fn up(id: PointerId, x: f32, y: f32, time: Instant) -> Self {
        Self::single(TouchAction::Up, id, x, y, time)
    }

    /// `Cancel` frame. Carries no pointers.
    #[must_use]
    pub fn cancel(time: Instant) -> Self {
        Self::new(TouchAction::Cancel, Vec::new(), time)
    }

    /// Set the index of the pointer that triggered a pointer-down/-up.
    #[must_use]
    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = Some(index);
        self
    }

    fn single(action: TouchAction, id: PointerId, x: f32, y: f32, time: Instant) -> Self {
        Self {
            action,
            action_index: None,
            pointers: vec![PointerSample::new(id, x, y, time)],
            time,
        }
    }

    /// The action that produced this frame.
    #[inline]
    #[must_use]
    pub const fn action(&self) -> TouchAction {
        self.action
    }

    /// Index of the pointer that went down/up, if any.
    #[inline]
    #[must_use]
    pub const fn action_index(&self) -> Option<usize> {
        self.action_index
    }

    /// Timestamp of the frame.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> Instant {
        self.time
    }

    /// All pointer samples in this frame.
    #[inline]
    #[must_use]
    pub fn pointers(&self) -> &[PointerSample] {
        &self.pointers
    }

    /// The primary pointer (index 0), if any.
    #[inline]
    #[must_use]
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }

    /// The pointer that is leaving the surface in a `PointerUp` frame.
    #[must_use]
    pub fn lifted_pointer(&self) -> Option<&PointerSample> {
        if self.action != TouchAction::PointerUp {
            return None;
        }
        self.action_index.and_then(|i| self.pointers.get(i))
    }

    /// Average position of every pointer, excluding the pointer that is
    /// lifting in a `PointerUp` frame.
    ///
    /// Returns `None` when no pointer contributes.
    #[must_use]
    pub fn focal_point(&self) -> Option<Point> {
        let skip = match self.action {
            TouchAction::PointerUp => self.action_index,
            _ => None,
        };
        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        let mut count = 0u32;
        for (i, p) in self.pointers.iter().enumerate() {
            if skip == Some(i) {
                continue;
            }
            sum_x += p.x;
            sum_y += p.y;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let div = count as f32;
        Some(Point::new(sum_x / div, sum_y / div))
    }
}
