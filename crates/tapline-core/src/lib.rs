#![forbid(unsafe_code)]

//! Core: touch frames, timers, velocity tracking, and gesture recognition.
//!
//! # Role in Tapline
//! `tapline-core` is the input layer. It turns raw pointer frames into
//! semantic gestures (tap, double tap, long press, scroll, fling) that the
//! list layer (`tapline-list`) maps onto item clicks.
//!
//! # Primary responsibilities
//! - **TouchFrame**: one batch of pointer samples with its action.
//! - **TimerQueue**: tag-keyed one-shot timers driven by the caller's clock.
//! - **VelocityTracker**: impulse-based pointer velocity over a short window.
//! - **GestureRecognizer**: the gesture state machine.
//!
//! # Time
//! Nothing here reads the clock on its own. Every frame carries its
//! timestamp and due timers fire when a frame or [`GestureRecognizer::poll`]
//! reaches their deadline, so tests replay exact timelines.
//!
//! [`GestureRecognizer::poll`]: gesture::GestureRecognizer::poll

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod gesture_event;
pub mod logging;
pub mod timer;
pub mod velocity;

pub use event::{PointerId, PointerSample, TouchAction, TouchFrame};
pub use geometry::{Point, Velocity};
pub use gesture::{GestureConfig, GestureRecognizer, GestureState};
pub use gesture_event::{DoubleTapPhase, GestureEvent};
pub use timer::{TimerHandle, TimerQueue, TimerTag};
pub use velocity::VelocityTracker;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
