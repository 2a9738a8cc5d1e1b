#![forbid(unsafe_code)]

//! Tag-keyed delayed callbacks.
//!
//! [`TimerQueue`] is the timer service behind the gesture recognizer. Each
//! [`TimerTag`] has at most one pending deadline. Arming a tag that is already
//! pending replaces the old entry, and the old [`TimerHandle`] stops being
//! current, so a stale firing can never reach the state machine after a
//! transition invalidated it.
//!
//! The queue does not own a clock. Hosts either call
//! [`pop_due`](TimerQueue::pop_due) from their tick with the current time, or
//! schedule their own wake-up at [`next_deadline`](TimerQueue::next_deadline)
//! and hand the tag back when it expires.
//!
//! # Thread Safety
//!
//! Not thread-safe; owned by one recognizer on the interaction thread.

use ahash::AHashMap;
use web_time::Instant;

/// Identifies one kind of delayed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerTag {
    /// Pressed-state feedback after the tap timeout.
    ShowPress,
    /// Long press after tap + long-press timeouts.
    LongPress,
    /// Double-tap disambiguation window; confirms a single tap when it expires.
    Tap,
}

impl TimerTag {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowPress => "show_press",
            Self::LongPress => "long_press",
            Self::Tap => "tap",
        }
    }
}

/// Cancellation handle for one armed timer.
///
/// A handle stays current until its tag is cancelled, fired, or re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    tag: TimerTag,
    generation: u64,
}

impl TimerHandle {
    /// The tag this handle was armed under.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> TimerTag {
        self.tag
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    deadline: Instant,
    generation: u64,
}

/// Owned map from tag to pending deadline.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: AHashMap<TimerTag, PendingTimer>,
    next_generation: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `tag` to fire at `deadline`, cancelling any pending timer with the same tag.
    pub fn schedule(&mut self, tag: TimerTag, deadline: Instant) -> TimerHandle {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.pending.insert(
            tag,
            PendingTimer {
                deadline,
                generation,
            },
        );
        TimerHandle { tag, generation }
    }

    /// Cancel the pending timer for `tag`. Returns `true` if one was pending.
    pub fn cancel(&mut self, tag: TimerTag) -> bool {
        self.pending.remove(&tag).is_some()
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Whether `tag` has a pending deadline.
    #[inline]
    #[must_use]
    pub fn is_pending(&self, tag: TimerTag) -> bool {
        self.pending.contains_key(&tag)
    }

    /// Whether `handle` still refers to the armed timer for its tag.
    #[must_use]
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.pending
            .get(&handle.tag)
            .is_some_and(|p| p.generation == handle.generation)
    }

    /// Deadline of the pending timer for `tag`.
    #[must_use]
    pub fn deadline(&self, tag: TimerTag) -> Option<Instant> {
        self.pending.get(&tag).map(|p| p.deadline)
    }

    /// Earliest pending deadline across all tags.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Number of pending timers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Ties are broken by tag order so firing is deterministic. Call in a loop:
    /// handling one firing may cancel another timer that is also due.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerHandle> {
        let (&tag, pending) = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .min_by(|(ta, a), (tb, b)| a.deadline.cmp(&b.deadline).then(ta.cmp(tb)))?;
        let handle = TimerHandle {
            tag,
            generation: pending.generation,
        };
        self.pending.remove(&tag);
        Some(handle)
    }

    /// Remove the pending timer for `tag` regardless of its deadline.
    ///
    /// Used when an external scheduler reports that `tag` expired. Returns
    /// `None` when nothing was pending, which marks the firing as stale.
    pub fn take(&mut self, tag: TimerTag) -> Option<TimerHandle> {
        self.pending
            .remove(&tag)
            .map(|p| TimerHandle {
                tag,
                generation: p.generation,
            })
    }
}
