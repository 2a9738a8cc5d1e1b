#![forbid(unsafe_code)]

//! The host list surface, as seen from the interaction layer.

use std::ops::Range;

use tapline_core::Point;
use tapline_selection::{ItemId, ItemSource};

/// An item resolved from a touch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemTarget {
    pub position: usize,
    pub id: ItemId,
}

/// Item-level click callbacks.
pub trait ItemClickListener {
    /// The item at `position` was tapped. Returns whether the click was consumed.
    fn on_item_click(&mut self, position: usize, id: ItemId) -> bool;

    /// The item at `position` was long-pressed. Returns whether the long click
    /// was consumed; an unconsumed long click leaves the item pressed and
    /// turns the release into a click.
    fn on_item_long_click(&mut self, position: usize, id: ItemId) -> bool {
        let _ = (position, id);
        true
    }
}

/// Everything the interaction layer needs from the list surface.
///
/// Visual hooks default to no-ops; only hit testing, item access and the
/// click callback are mandatory.
pub trait ListHost: ItemSource + ItemClickListener {
    /// Position of the item under `point`, if any.
    fn hit_test(&self, point: Point) -> Option<usize>;

    /// Positions currently on screen.
    fn visible_positions(&self) -> Range<usize> {
        0..self.item_count()
    }

    /// Whether the surface is attached and has items to interact with.
    /// Touch frames are ignored while this is false.
    fn is_attached(&self) -> bool {
        true
    }

    /// The "all selected" state flipped.
    fn on_all_selected_changed(&mut self, all_selected: bool) {
        let _ = all_selected;
    }

    fn set_pressed_visual(&mut self, position: usize, pressed: bool) {
        let _ = (position, pressed);
    }

    fn set_checked_visual(&mut self, position: usize, checked: bool) {
        let _ = (position, checked);
    }
}
