#![forbid(unsafe_code)]

//! Binding gestures to item clicks.
//!
//! [`ClickDispatcher`] follows one gesture stream at a time:
//!
//! | Gesture | With a target |
//! |---------|---------------|
//! | `Down` | drop any held target, resolve a new one through [`ItemHitTester`] |
//! | `ShowPress` | mark the target pressed |
//! | `SingleTapUp` / `SingleTapConfirmed` | unpress, click, forget the target |
//! | `Scroll` | unpress, forget the target |
//! | `LongPress` | long click; unpress and forget only if consumed |
//!
//! A target still held when the pointer lifts (an unconsumed long press, or
//! the second tap of a double tap) is clicked by [`ClickDispatcher::on_release`].

use tapline_core::GestureEvent;

use crate::hit_test::ItemHitTester;
use crate::host::{ItemTarget, ListHost};

/// An item-level callback that was delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Click { target: ItemTarget, consumed: bool },
    LongClick { target: ItemTarget, consumed: bool },
}

impl Dispatch {
    #[must_use]
    pub const fn target(&self) -> ItemTarget {
        match self {
            Self::Click { target, .. } | Self::LongClick { target, .. } => *target,
        }
    }
}

/// Item click state for the current gesture stream.
#[derive(Debug, Clone, Default)]
pub struct ClickDispatcher {
    hit_tester: ItemHitTester,
    target: Option<ItemTarget>,
    pressed: bool,
}

impl ClickDispatcher {
    #[must_use]
    pub fn new(hit_tester: ItemHitTester) -> Self {
        Self {
            hit_tester,
            target: None,
            pressed: false,
        }
    }

    /// The item the current gesture is bound to, if any.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<ItemTarget> {
        self.target
    }

    /// Whether the target is currently shown pressed.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Route one recognized gesture.
    pub fn on_gesture<H>(&mut self, event: &GestureEvent, host: &mut H) -> Option<Dispatch>
    where
        H: ListHost + ?Sized,
    {
        match *event {
            GestureEvent::Down { pos } => {
                self.abandon(host);
                self.target = self.hit_tester.resolve(host, pos);
                None
            }
            GestureEvent::ShowPress { .. } => {
                let target = self.target?;
                host.set_pressed_visual(target.position, true);
                self.pressed = true;
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "list.press", position = target.position);
                None
            }
            GestureEvent::SingleTapUp { .. } | GestureEvent::SingleTapConfirmed { .. } => {
                self.click(host)
            }
            GestureEvent::Scroll { .. } => {
                let target = self.target.take()?;
                self.unpress(target, host);
                None
            }
            GestureEvent::LongPress { .. } => {
                let target = self.target?;
                let consumed = host.on_item_long_click(target.position, target.id);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "list.long_click",
                    position = target.position,
                    id = target.id,
                    consumed
                );
                if consumed {
                    self.unpress(target, host);
                    self.target = None;
                }
                Some(Dispatch::LongClick { target, consumed })
            }
            GestureEvent::DoubleTap { .. }
            | GestureEvent::DoubleTapEvent { .. }
            | GestureEvent::Fling { .. } => None,
        }
    }

    /// The pointer lifted. A target still held becomes a click.
    pub fn on_release<H>(&mut self, host: &mut H) -> Option<Dispatch>
    where
        H: ListHost + ?Sized,
    {
        self.click(host)
    }

    /// Drop the target without clicking, clearing pressed feedback.
    pub fn abandon<H>(&mut self, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        if let Some(target) = self.target.take() {
            self.unpress(target, host);
        }
    }

    fn click<H>(&mut self, host: &mut H) -> Option<Dispatch>
    where
        H: ListHost + ?Sized,
    {
        let target = self.target.take()?;
        self.unpress(target, host);
        let consumed = host.on_item_click(target.position, target.id);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "list.click",
            position = target.position,
            id = target.id,
            consumed
        );
        Some(Dispatch::Click { target, consumed })
    }

    fn unpress<H>(&mut self, target: ItemTarget, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        host.set_pressed_visual(target.position, false);
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ItemClickListener;
    use tapline_core::Point;
    use tapline_selection::{ItemId, ItemSource};

    #[derive(Default)]
    struct Recorder {
        clicks: Vec<usize>,
        long_clicks: Vec<usize>,
        pressed: Vec<(usize, bool)>,
        consume_long: bool,
    }

    impl ItemSource for Recorder {
        fn item_count(&self) -> usize {
            10
        }
        fn item_id(&self, position: usize) -> Option<ItemId> {
            (position < 10).then_some(position as ItemId)
        }
    }

    impl ItemClickListener for Recorder {
        fn on_item_click(&mut self, position: usize, _: ItemId) -> bool {
            self.clicks.push(position);
            true
        }
        fn on_item_long_click(&mut self, position: usize, _: ItemId) -> bool {
            self.long_clicks.push(position);
            self.consume_long
        }
    }

    impl ListHost for Recorder {
        fn hit_test(&self, point: Point) -> Option<usize> {
            (point.x >= 0.0).then(|| (point.y / 10.0) as usize)
        }
        fn set_pressed_visual(&mut self, position: usize, pressed: bool) {
            self.pressed.push((position, pressed));
        }
    }

    fn down(y: f32) -> GestureEvent {
        GestureEvent::Down {
            pos: Point::new(5.0, y),
        }
    }

    const SHOW: GestureEvent = GestureEvent::ShowPress { pos: Point::ZERO };
    const TAP_UP: GestureEvent = GestureEvent::SingleTapUp { pos: Point::ZERO };
    const LONG: GestureEvent = GestureEvent::LongPress { pos: Point::ZERO };

    #[test]
    fn tap_clicks_target() {
        let mut host = Recorder::default();
        let mut d = ClickDispatcher::default();
        assert_eq!(d.on_gesture(&down(35.0), &mut host), None);
        d.on_gesture(&SHOW, &mut host);
        assert!(d.is_pressed());
        let dispatched = d.on_gesture(&TAP_UP, &mut host);
        assert!(matches!(
            dispatched,
            Some(Dispatch::Click { target, consumed: true }) if target.position == 3
        ));
        assert_eq!(host.clicks, [3]);
        assert_eq!(host.pressed, [(3, true), (3, false)]);
        assert_eq!(d.target(), None);
        // Confirmation after the tap finds nothing left to click.
        let confirmed = GestureEvent::SingleTapConfirmed { pos: Point::ZERO };
        assert_eq!(d.on_gesture(&confirmed, &mut host), None);
        assert_eq!(d.on_release(&mut host), None);
    }

    #[test]
    fn miss_ignores_gesture() {
        let mut host = Recorder::default();
        let mut d = ClickDispatcher::default();
        d.on_gesture(
            &GestureEvent::Down {
                pos: Point::new(-1.0, 0.0),
            },
            &mut host,
        );
        d.on_gesture(&SHOW, &mut host);
        assert_eq!(d.on_gesture(&TAP_UP, &mut host), None);
        assert!(host.clicks.is_empty());
        assert!(host.pressed.is_empty());
    }

    #[test]
    fn scroll_abandons_click() {
        let mut host = Recorder::default();
        let mut d = ClickDispatcher::default();
        d.on_gesture(&down(5.0), &mut host);
        d.on_gesture(&SHOW, &mut host);
        let scroll = GestureEvent::Scroll {
            down: Point::ZERO,
            current: Point::ZERO,
            distance_x: 0.0,
            distance_y: 20.0,
        };
        d.on_gesture(&scroll, &mut host);
        assert_eq!(d.on_release(&mut host), None);
        assert!(host.clicks.is_empty());
        assert_eq!(host.pressed, [(0, true), (0, false)]);
    }

    #[test]
    fn consumed_long_press_ends_stream() {
        let mut host = Recorder {
            consume_long: true,
            ..Recorder::default()
        };
        let mut d = ClickDispatcher::default();
        d.on_gesture(&down(15.0), &mut host);
        d.on_gesture(&SHOW, &mut host);
        let dispatched = d.on_gesture(&LONG, &mut host);
        assert!(matches!(dispatched, Some(Dispatch::LongClick { consumed: true, .. })));
        assert_eq!(d.on_release(&mut host), None);
        assert_eq!(host.long_clicks, [1]);
        assert!(host.clicks.is_empty());
    }

    #[test]
    fn unconsumed_long_press_clicks_on_release() {
        let mut host = Recorder::default();
        let mut d = ClickDispatcher::default();
        d.on_gesture(&down(15.0), &mut host);
        d.on_gesture(&SHOW, &mut host);
        d.on_gesture(&LONG, &mut host);
        assert!(d.is_pressed());
        assert_eq!(host.pressed, [(1, true)]);
        let released = d.on_release(&mut host);
        assert!(matches!(released, Some(Dispatch::Click { .. })));
        assert_eq!(host.clicks, [1]);
    }

    #[test]
    fn abandon_clears_press() {
        let mut host = Recorder::default();
        let mut d = ClickDispatcher::default();
        d.on_gesture(&down(15.0), &mut host);
        d.on_gesture(&SHOW, &mut host);
        d.abandon(&mut host);
        assert_eq!(d.target(), None);
        assert!(!d.is_pressed());
        assert_eq!(host.pressed, [(1, true), (1, false)]);
    }

    #[test]
    fn new_down_drops_held_target() {
        let mut host = Recorder::default();
        let mut d = ClickDispatcher::default();
        d.on_gesture(&down(15.0), &mut host);
        d.on_gesture(&SHOW, &mut host);
        d.on_gesture(&down(45.0), &mut host);
        assert_eq!(d.target().map(|t| t.position), Some(4));
        assert!(!d.is_pressed());
        assert_eq!(host.pressed, [(1, true), (1, false)]);
        assert!(host.clicks.is_empty());
    }
}
