// SPDX-License-Identifier: MPL-2.0
//! Circular ordering of the carousel's result images.
//!
//! Slot 0 is always the active item. Rotations never move items in memory:
//! the sequence keeps the results in load order and an `offset` naming the
//! load index that currently occupies slot 0, so every rotation is O(1).

use crate::domain::search::ImageResult;

/// Stable identity of a carousel item: its index in the list as loaded.
///
/// Duplicated results get distinct ids, so they are tracked as distinct slots.
pub type ItemId = usize;

/// A rotation request, expressed in slots relative to the current order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Bring the item currently at `slot` to the front.
    ToFront(usize),
    /// Move the tail item to the front.
    Back,
}

impl Rotation {
    pub const FORWARD: Rotation = Rotation::ToFront(1);
}

/// Ordered, circular list of results.
#[derive(Debug, Clone, Default)]
pub struct CarouselSequence {
    items: Vec<ImageResult>,
    offset: usize,
}

impl CarouselSequence {
    /// Installs `images` rotated so that `images[start_index]` is active.
    ///
    /// An out-of-range `start_index` is clamped to the last item. An empty
    /// list produces an empty sequence.
    #[must_use]
    pub fn load(images: Vec<ImageResult>, start_index: usize) -> Self {
        let offset = start_index.min(images.len().saturating_sub(1));
        Self {
            items: images,
            offset,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item in slot 0.
    #[must_use]
    pub fn active(&self) -> Option<&ImageResult> {
        self.get(0)
    }

    /// The item currently occupying `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ImageResult> {
        self.item_id(slot).map(|id| &self.items[id])
    }

    /// Load index of the item currently occupying `slot`.
    #[must_use]
    pub fn item_id(&self, slot: usize) -> Option<ItemId> {
        if slot >= self.items.len() {
            return None;
        }
        Some((self.offset + slot) % self.items.len())
    }

    /// Current slot of the item with the given id.
    #[must_use]
    pub fn slot_of(&self, id: ItemId) -> Option<usize> {
        let len = self.items.len();
        if id >= len {
            return None;
        }
        Some((id + len - self.offset) % len)
    }

    /// Iterates `(slot, id, item)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ItemId, &ImageResult)> + '_ {
        let len = self.items.len();
        (0..len).map(move |slot| {
            let id = (self.offset + slot) % len;
            (slot, id, &self.items[id])
        })
    }

    /// Makes the item at `index` active by shifting the offset.
    ///
    /// `index` is taken modulo the length; the items at slots `0..index`
    /// end up at the tail in their original order.
    pub fn rotate_to_front(&mut self, index: usize) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.offset = (self.offset + index % len) % len;
    }

    /// Rotates left by one: the active item becomes the tail.
    pub fn next(&mut self) {
        self.rotate_to_front(1);
    }

    /// Rotates right by one: the tail item becomes active.
    pub fn prev(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.offset = (self.offset + len - 1) % len;
    }

    /// Applies a rotation.
    pub fn rotate(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::ToFront(index) => self.rotate_to_front(index),
            Rotation::Back => self.prev(),
        }
    }

    /// Records the pixel size of every item loaded from `path` that has
    /// none yet. Returns whether anything changed.
    pub fn fill_dimensions(&mut self, path: &str, width: u32, height: u32) -> bool {
        let mut changed = false;
        for item in &mut self.items {
            if item.path == path && !item.has_dimensions() {
                item.width = width;
                item.height = height;
                changed = true;
            }
        }
        changed
    }

    /// Ids of the items that wrap around the end of the sequence when
    /// `rotation` is applied to the current order.
    ///
    /// These are the items whose slot changes discontinuously (head to tail
    /// or tail to head); every other item moves by a uniform step.
    #[must_use]
    pub fn relocated_by(&self, rotation: Rotation) -> Vec<ItemId> {
        let len = self.items.len();
        if len == 0 {
            return Vec::new();
        }
        match rotation {
            Rotation::ToFront(index) => (0..index % len)
                .filter_map(|slot| self.item_id(slot))
                .collect(),
            Rotation::Back => self.item_id(len - 1).into_iter().collect(),
        }
    }
}
