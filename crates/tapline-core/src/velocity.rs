#![forbid(unsafe_code)]

//! Per-pointer velocity estimation for fling detection.
//!
//! [`VelocityTracker`] keeps a short history of positions for every pointer
//! and estimates instantaneous velocity with the impulse strategy: each
//! segment between consecutive samples contributes kinetic energy, and the
//! accumulated energy is converted back to a velocity. This weights recent
//! motion naturally and is robust against a single jittery sample.
//!
//! # Invariants
//!
//! 1. Only samples newer than [`HORIZON`] relative to the newest sample count.
//! 2. A gap longer than [`ASSUME_STOPPED`] between consecutive samples ends
//!    the history: the pointer is assumed to have paused there.
//! 3. `Up` and `PointerUp` frames repeat the last known position and carry no
//!    new motion, so they are not recorded.

use std::collections::VecDeque;
use std::time::Duration;

use ahash::AHashMap;
use web_time::Instant;

use crate::event::{PointerId, PointerSample, TouchAction, TouchFrame};
use crate::geometry::{Point, Velocity};

/// Samples retained per pointer.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one are used.
pub const HORIZON: Duration = Duration::from_millis(100);

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Instant,
    position: Point,
}

/// Tracks recent positions of every pointer in one gesture stream.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    histories: AHashMap<PointerId, VecDeque<Sample>>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pointers of `frame` according to its action.
    ///
    /// `Down` starts a fresh history, `Cancel` drops everything, and
    /// `Up`/`PointerUp` are ignored.
    pub fn add_frame(&mut self, frame: &TouchFrame) {
        match frame.action() {
            TouchAction::Down => {
                self.clear();
                self.add_pointers(frame.pointers());
            }
            TouchAction::Move | TouchAction::PointerDown => self.add_pointers(frame.pointers()),
            TouchAction::Up | TouchAction::PointerUp => {}
            TouchAction::Cancel => self.clear(),
        }
    }

    fn add_pointers(&mut self, pointers: &[PointerSample]) {
        for sample in pointers {
            self.add_sample(sample);
        }
    }

    /// Record a single sample.
    pub fn add_sample(&mut self, sample: &PointerSample) {
        let history = self.histories.entry(sample.id).or_default();
        if history.len() == HISTORY_SIZE {
            history.pop_front();
        }
        history.push_back(Sample {
            time: sample.time,
            position: sample.position(),
        });
    }

    /// Estimated velocity of `id` in pixels per second, each axis clamped to
    /// `[-max_velocity, max_velocity]`.
    ///
    /// Unknown pointers and pointers with fewer than two usable samples
    /// report zero.
    #[must_use]
    pub fn velocity(&self, id: PointerId, max_velocity: f32) -> Velocity {
        let Some(history) = self.histories.get(&id) else {
            return Velocity::ZERO;
        };
        let window = usable_window(history);
        if window.len() < 2 {
            return Velocity::ZERO;
        }
        let xs: Vec<(f32, f32)> = window.iter().map(|(t, p)| (*t, p.x)).collect();
        let ys: Vec<(f32, f32)> = window.iter().map(|(t, p)| (*t, p.y)).collect();
        let v = Velocity::new(impulse_velocity(&xs), impulse_velocity(&ys));
        if v.x.is_nan() || v.y.is_nan() {
            return Velocity::ZERO;
        }
        v.clamp(max_velocity)
    }

    /// Forget a single pointer.
    pub fn remove_pointer(&mut self, id: PointerId) {
        self.histories.remove(&id);
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.histories.clear();
    }

    /// Number of pointers with recorded history.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.histories.len()
    }
}

/// Oldest-first `(time_ms, position)` pairs that fall inside the horizon
/// and contain no stop gap. Times are relative to the newest sample (<= 0).
fn usable_window(history: &VecDeque<Sample>) -> Vec<(f32, Point)> {
    let Some(newest) = history.back() else {
        return Vec::new();
    };
    let mut window = Vec::with_capacity(history.len());
    let mut newer = newest;
    for sample in history.iter().rev() {
        let age = newest.time.duration_since(sample.time);
        let gap = newer.time.duration_since(sample.time);
        if age > HORIZON || gap > ASSUME_STOPPED {
            break;
        }
        window.push((-(age.as_secs_f32() * 1000.0), sample.position));
        newer = sample;
    }
    window.reverse();
    window
}

/// Impulse velocity over oldest-first `(time_ms, value)` pairs, in units per second.
fn impulse_velocity(points: &[(f32, f32)]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut work = 0.0f32;
    for i in 1..points.len() {
        let (t0, x0) = points[i - 1];
        let (t1, x1) = points[i];
        if t1 == t0 {
            continue;
        }
        let v_curr = (x1 - x0) / (t1 - t0);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == 1 {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work) * 1000.0
}

/// E = v^2 / 2 with unit mass, preserving sign.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
