#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tapline_core::{
    GestureConfig, GestureEvent, GestureRecognizer, GestureState, PointerSample, TouchAction,
    TouchFrame,
};
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Op {
    Down(i16, i16),
    Move(i16, i16),
    Up(i16, i16),
    SecondPointer(i16, i16),
    LiftSecond,
    Cancel,
    Empty(u8),
    Wait(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    long_press_enabled: bool,
    double_tap_enabled: bool,
    max_fling: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    // Cap length to keep fuzzing fast.
    if input.ops.len() > 512 {
        return;
    }
    let max_fling = f32::from(input.max_fling.max(1));
    let mut gr = GestureRecognizer::new(GestureConfig {
        long_press_enabled: input.long_press_enabled,
        double_tap_enabled: input.double_tap_enabled,
        max_fling_velocity: max_fling,
        min_fling_velocity: 0.0,
        ..GestureConfig::default()
    });

    let mut t = Instant::now();
    let mut last = (0.0f32, 0.0f32);
    for op in &input.ops {
        t += Duration::from_millis(1);
        let frame = match *op {
            Op::Down(x, y) => {
                last = (f32::from(x), f32::from(y));
                TouchFrame::down(0, last.0, last.1, t)
            }
            Op::Move(x, y) => {
                last = (f32::from(x), f32::from(y));
                TouchFrame::moved(0, last.0, last.1, t)
            }
            Op::Up(x, y) => TouchFrame::up(0, f32::from(x), f32::from(y), t),
            Op::SecondPointer(x, y) => TouchFrame::new(
                TouchAction::PointerDown,
                vec![
                    PointerSample::new(0, last.0, last.1, t),
                    PointerSample::new(1, f32::from(x), f32::from(y), t),
                ],
                t,
            )
            .with_action_index(1),
            Op::LiftSecond => TouchFrame::new(
                TouchAction::PointerUp,
                vec![
                    PointerSample::new(0, last.0, last.1, t),
                    PointerSample::new(1, last.0 + 30.0, last.1, t),
                ],
                t,
            )
            .with_action_index(1),
            Op::Cancel => TouchFrame::cancel(t),
            // Malformed frames: no pointers at all.
            Op::Empty(action) => {
                let action = match action % 4 {
                    0 => TouchAction::Down,
                    1 => TouchAction::Move,
                    2 => TouchAction::Up,
                    _ => TouchAction::PointerDown,
                };
                TouchFrame::new(action, Vec::new(), t)
            }
            Op::Wait(ms) => {
                t += Duration::from_millis(u64::from(ms));
                for event in gr.poll(t) {
                    check(&event, max_fling);
                }
                continue;
            }
        };

        for event in gr.process(&frame) {
            check(&event, max_fling);
        }

        if matches!(frame.action(), TouchAction::Cancel) {
            assert_eq!(gr.state(), GestureState::Idle, "cancel must reset");
            assert!(gr.timers().is_empty(), "cancel must clear timers");
        }
        if gr.state() == GestureState::Scrolling {
            assert!(gr.timers().is_empty(), "scrolling with pending timers");
        }
        if let Some(deadline) = gr.next_deadline() {
            assert!(deadline > t, "due timer left unfired");
        }
    }
});

fn check(event: &GestureEvent, max_fling: f32) {
    if let GestureEvent::Fling { velocity, .. } = event {
        assert!(velocity.x.is_finite() && velocity.y.is_finite());
        assert!(velocity.x.abs() <= max_fling + 0.01, "fling x over clamp");
        assert!(velocity.y.abs() <= max_fling + 0.01, "fling y over clamp");
    }
}
