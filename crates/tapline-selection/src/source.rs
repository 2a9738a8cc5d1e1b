#![forbid(unsafe_code)]

//! The item collection a selection is kept against.

/// Stable, host-assigned item identity.
pub type ItemId = u64;

/// Read access to the host's current item collection.
///
/// Positions are dense indices `0..item_count()`. Identities are opaque and
/// only meaningful when [`has_stable_ids`](ItemSource::has_stable_ids) is true.
pub trait ItemSource {
    /// Total number of addressable items.
    fn item_count(&self) -> usize;

    /// Identity of the item at `position`, or `None` if out of range.
    fn item_id(&self, position: usize) -> Option<ItemId>;

    /// Whether identities survive insertion, removal and reordering.
    fn has_stable_ids(&self) -> bool {
        false
    }
}

/// A slice of identities is a source with stable ids: position `i` holds `self[i]`.
impl ItemSource for [ItemId] {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        self.get(position).copied()
    }

    fn has_stable_ids(&self) -> bool {
        true
    }
}

impl ItemSource for Vec<ItemId> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        self.get(position).copied()
    }

    fn has_stable_ids(&self) -> bool {
        true
    }
}

impl<S: ItemSource + ?Sized> ItemSource for &S {
    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        (**self).item_id(position)
    }

    fn has_stable_ids(&self) -> bool {
        (**self).has_stable_ids()
    }
}

/// A source of `len` items whose identities are their positions and are
/// not stable. Useful for hosts that only need positional selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionalItems {
    /// Number of items.
    pub len: usize,
}

impl PositionalItems {
    /// A positional source of `len` items.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ItemSource for PositionalItems {
    fn item_count(&self) -> usize {
        self.len
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        (position < self.len).then_some(position as ItemId)
    }
}
