// SPDX-License-Identifier: MPL-2.0
//! Slot geometry for the carousel.
//!
//! Everything here is a pure function of the slot index, the item's aspect
//! ratio and the container size. The view step and the transition scheduler
//! only ever consume [`Placement`]s.

use super::sequence::{CarouselSequence, ItemId};
use crate::domain::search::ImageResult;
use iced::{Point, Rectangle, Size};

/// Fraction of the container the active image may occupy in each dimension.
pub const ACTIVE_FRACTION: f32 = 0.9;

/// Preview footprint (logical pixels).
pub const PREVIEW_WIDTH: f32 = 160.0;
pub const PREVIEW_HEIGHT: f32 = 240.0;

/// Horizontal spacing between two previews.
pub const PREVIEW_GAP: f32 = 16.0;

/// Distance from the bottom and trailing edges to the nearest preview.
pub const EDGE_MARGIN: f32 = 32.0;

/// Number of preview slots that are visible (slots `1..=VISIBLE_PREVIEWS`).
pub const VISIBLE_PREVIEWS: usize = 3;

/// What a pointer press on a slot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    None,
    RotateToFront(usize),
}

/// Target geometry and style of one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub bounds: Rectangle,
    pub opacity: f32,
    /// Paint order; higher values are drawn on top.
    pub z_index: usize,
    pub interaction: Interaction,
}

impl Placement {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interaction != Interaction::None
    }
}

/// Placement of one item in the current order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub slot: usize,
    pub item_id: ItemId,
    pub placement: Placement,
}

/// Computes where `item` sits when it occupies `slot`.
#[must_use]
pub fn compute_placement(item: &ImageResult, slot: usize, container: Size) -> Placement {
    if container.width <= 0.0 || container.height <= 0.0 {
        return Placement {
            bounds: Rectangle::new(Point::ORIGIN, Size::ZERO),
            opacity: if slot > VISIBLE_PREVIEWS { 0.0 } else { 1.0 },
            z_index: slot,
            interaction: interaction_for(slot),
        };
    }

    match slot {
        0 => Placement {
            bounds: active_bounds(item.aspect_ratio(), container),
            opacity: 1.0,
            z_index: 0,
            interaction: Interaction::None,
        },
        1..=VISIBLE_PREVIEWS => Placement {
            bounds: preview_bounds(slot, container),
            opacity: 1.0,
            z_index: slot,
            interaction: Interaction::RotateToFront(slot),
        },
        _ => Placement {
            bounds: parked_bounds(container),
            opacity: 0.0,
            z_index: slot,
            interaction: Interaction::None,
        },
    }
}

/// Computes the placement of every item of `sequence`, in slot order.
#[must_use]
pub fn compute_layout(sequence: &CarouselSequence, container: Size) -> Vec<SlotPlacement> {
    sequence
        .iter()
        .map(|(slot, item_id, item)| SlotPlacement {
            slot,
            item_id,
            placement: compute_placement(item, slot, container),
        })
        .collect()
}

fn interaction_for(slot: usize) -> Interaction {
    if (1..=VISIBLE_PREVIEWS).contains(&slot) {
        Interaction::RotateToFront(slot)
    } else {
        Interaction::None
    }
}

/// Largest rectangle of the given aspect ratio fitting in the active area,
/// centered in the container.
fn active_bounds(aspect: f32, container: Size) -> Rectangle {
    let max_width = container.width * ACTIVE_FRACTION;
    let max_height = container.height * ACTIVE_FRACTION;
    let area_aspect = max_width / max_height;

    let size = if aspect > area_aspect {
        // Wider than the area: width binds, letterbox vertically.
        Size::new(max_width, max_width / aspect)
    } else {
        Size::new(max_height * aspect, max_height)
    };

    Rectangle::new(
        Point::new(
            (container.width - size.width) / 2.0,
            (container.height - size.height) / 2.0,
        ),
        size,
    )
}

fn preview_bounds(slot: usize, container: Size) -> Rectangle {
    let trailing_offset =
        EDGE_MARGIN + (VISIBLE_PREVIEWS - slot) as f32 * (PREVIEW_WIDTH + PREVIEW_GAP);

    Rectangle::new(
        Point::new(
            container.width - trailing_offset - PREVIEW_WIDTH,
            container.height - EDGE_MARGIN - PREVIEW_HEIGHT,
        ),
        Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT),
    )
}

/// Hidden slots wait just past the trailing edge so that the next one slides
/// in from there.
fn parked_bounds(container: Size) -> Rectangle {
    Rectangle::new(
        Point::new(
            container.width + PREVIEW_GAP,
            container.height - EDGE_MARGIN - PREVIEW_HEIGHT,
        ),
        Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT),
    )
}
