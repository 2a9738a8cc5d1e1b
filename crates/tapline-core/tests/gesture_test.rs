//! End-to-end gesture timelines.
//!
//! Each test replays a full touch stream against a recognizer using a fixed
//! base instant plus millisecond offsets, then checks the emitted event
//! sequence and the recognizer's resting state.

use std::time::Duration;

use tapline_core::{
    DoubleTapPhase, GestureConfig, GestureEvent, GestureRecognizer, GestureState, Point,
    PointerSample, TimerTag, TouchAction, TouchFrame,
};
use web_time::Instant;

/// Replays frames at `base + offset_ms` and collects every event.
struct Timeline {
    base: Instant,
    recognizer: GestureRecognizer,
    events: Vec<GestureEvent>,
}

impl Timeline {
    fn new(config: GestureConfig) -> Self {
        Self {
            base: Instant::now(),
            recognizer: GestureRecognizer::new(config),
            events: Vec::new(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.base + Duration::from_millis(ms)
    }

    fn down(&mut self, ms: u64, x: f32, y: f32) -> &mut Self {
        let frame = TouchFrame::down(0, x, y, self.at(ms));
        self.events.extend(self.recognizer.process(&frame));
        self
    }

    fn moved(&mut self, ms: u64, x: f32, y: f32) -> &mut Self {
        let frame = TouchFrame::moved(0, x, y, self.at(ms));
        self.events.extend(self.recognizer.process(&frame));
        self
    }

    fn up(&mut self, ms: u64, x: f32, y: f32) -> &mut Self {
        let frame = TouchFrame::up(0, x, y, self.at(ms));
        self.events.extend(self.recognizer.process(&frame));
        self
    }

    fn cancel(&mut self, ms: u64) -> &mut Self {
        let frame = TouchFrame::cancel(self.at(ms));
        self.events.extend(self.recognizer.process(&frame));
        self
    }

    fn idle_until(&mut self, ms: u64) -> &mut Self {
        let now = self.at(ms);
        self.events.extend(self.recognizer.poll(now));
        self
    }

    fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GestureEvent::name).collect()
    }
}

fn timeline() -> Timeline {
    Timeline::new(GestureConfig::default())
}

#[test]
fn quick_tap_is_confirmed_after_double_tap_window() {
    let mut tl = timeline();
    tl.down(0, 50.0, 50.0).up(80, 50.0, 50.0).idle_until(1000);
    assert_eq!(tl.names(), ["down", "single_tap_up", "single_tap_confirmed"]);
    assert_eq!(tl.recognizer.state(), GestureState::Idle);
    assert!(tl.recognizer.next_deadline().is_none());
}

#[test]
fn double_tap_emits_no_single_confirmation() {
    let mut tl = timeline();
    tl.down(0, 50.0, 50.0)
        .up(60, 50.0, 50.0)
        .down(150, 55.0, 52.0)
        .up(190, 55.0, 52.0)
        .idle_until(2000);
    assert_eq!(
        tl.names(),
        [
            "down",
            "single_tap_up",
            "double_tap",
            "double_tap_event",
            "down",
            "double_tap_event",
        ]
    );
    let phases: Vec<DoubleTapPhase> = tl
        .events
        .iter()
        .filter_map(|e| match e {
            GestureEvent::DoubleTapEvent { phase, .. } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(phases, [DoubleTapPhase::Down, DoubleTapPhase::Up]);
}

#[test]
fn second_tap_held_long_presses_and_still_closes_double_tap() {
    let mut tl = timeline();
    tl.down(0, 50.0, 50.0)
        .up(60, 50.0, 50.0)
        .down(150, 52.0, 50.0)
        .idle_until(1500)
        .moved(1550, 90.0, 90.0)
        .up(1600, 90.0, 90.0)
        .idle_until(3000);
    assert_eq!(
        tl.names(),
        [
            "down",
            "single_tap_up",
            "double_tap",
            "double_tap_event",
            "down",
            "show_press",
            "long_press",
            "double_tap_event",
        ]
    );
    assert!(matches!(
        tl.events[6],
        GestureEvent::LongPress { pos } if pos == Point::new(52.0, 50.0)
    ));
    assert!(matches!(
        tl.events[7],
        GestureEvent::DoubleTapEvent {
            phase: DoubleTapPhase::Up,
            ..
        }
    ));
    assert_eq!(tl.recognizer.state(), GestureState::Idle);
    assert!(tl.recognizer.next_deadline().is_none());
}

#[test]
fn second_tap_arms_long_press_at_its_own_down() {
    let mut tl = timeline();
    tl.down(0, 50.0, 50.0).up(60, 50.0, 50.0).down(150, 50.0, 50.0);
    assert_eq!(tl.recognizer.state(), GestureState::DoubleTapArmed);
    assert_eq!(
        tl.recognizer.timers().deadline(TimerTag::LongPress),
        Some(tl.at(750))
    );
}

#[test]
fn press_and_hold_long_presses_then_swallows_release() {
    let mut tl = timeline();
    tl.down(0, 10.0, 10.0)
        .idle_until(650)
        .moved(700, 90.0, 90.0)
        .up(750, 90.0, 90.0)
        .idle_until(2000);
    assert_eq!(tl.names(), ["down", "show_press", "long_press"]);
    assert!(matches!(
        tl.events[2],
        GestureEvent::LongPress { pos } if pos == Point::new(10.0, 10.0)
    ));
}

#[test]
fn long_press_disabled_hold_then_drag_scrolls() {
    let mut tl = Timeline::new(GestureConfig {
        long_press_enabled: false,
        ..GestureConfig::default()
    });
    tl.down(0, 10.0, 10.0)
        .idle_until(900)
        .moved(950, 40.0, 10.0)
        .up(1200, 40.0, 10.0);
    assert!(!tl.names().contains(&"long_press"));
    assert!(tl.names().contains(&"scroll"));
}

#[test]
fn drag_scrolls_without_tap_or_press() {
    let mut tl = timeline();
    tl.down(0, 100.0, 100.0)
        .moved(16, 100.0, 120.0)
        .moved(32, 100.0, 140.0)
        .moved(48, 100.0, 160.0);
    // Let the pointer rest so the release is not a fling.
    tl.moved(200, 100.0, 160.0).up(210, 100.0, 160.0).idle_until(2000);
    assert_eq!(tl.names(), ["down", "scroll", "scroll", "scroll"]);
    let total_y: f32 = tl
        .events
        .iter()
        .filter_map(|e| match e {
            GestureEvent::Scroll { distance_y, .. } => Some(*distance_y),
            _ => None,
        })
        .sum();
    assert_eq!(total_y, -60.0);
}

#[test]
fn swipe_flings_with_clamped_velocity() {
    let mut tl = Timeline::new(GestureConfig {
        max_fling_velocity: 1500.0,
        ..GestureConfig::default()
    });
    tl.down(0, 0.0, 0.0);
    for i in 1..=5u64 {
        tl.moved(i * 8, 40.0 * i as f32, 0.0);
    }
    tl.up(44, 200.0, 0.0);
    match tl.events.last() {
        Some(GestureEvent::Fling { velocity, down, .. }) => {
            assert_eq!(velocity.x, 1500.0);
            assert_eq!(*down, Point::new(0.0, 0.0));
        }
        other => panic!("expected fling, got {other:?}"),
    }
}

#[test]
fn cancel_mid_press_emits_nothing_more() {
    let mut tl = timeline();
    tl.down(0, 10.0, 10.0).cancel(50).idle_until(3000);
    assert_eq!(tl.names(), ["down"]);
    assert_eq!(tl.recognizer.state(), GestureState::Idle);
}

#[test]
fn second_finger_turns_tap_into_scroll() {
    let mut tl = timeline();
    tl.down(0, 10.0, 10.0);
    let t = tl.at(20);
    let frame = TouchFrame::new(
        TouchAction::PointerDown,
        vec![
            PointerSample::new(0, 10.0, 10.0, t),
            PointerSample::new(1, 30.0, 10.0, t),
        ],
        t,
    )
    .with_action_index(1);
    tl.events.extend(tl.recognizer.process(&frame));
    assert!(!tl.recognizer.timers().is_pending(TimerTag::LongPress));
    tl.idle_until(2000);
    assert_eq!(tl.names(), ["down"]);
}

#[test]
fn host_driven_timers_match_polling() {
    let mut polled = timeline();
    polled.down(0, 5.0, 5.0).idle_until(700);

    let mut hosted = timeline();
    hosted.down(0, 5.0, 5.0);
    while let Some(deadline) = hosted.recognizer.next_deadline() {
        let tag = [TimerTag::ShowPress, TimerTag::LongPress, TimerTag::Tap]
            .into_iter()
            .filter(|tag| hosted.recognizer.timers().deadline(*tag) == Some(deadline))
            .min();
        let Some(tag) = tag else { break };
        let fired = hosted.recognizer.on_timer_fired(tag);
        hosted.events.extend(fired);
    }
    assert_eq!(polled.names(), hosted.names());
}
