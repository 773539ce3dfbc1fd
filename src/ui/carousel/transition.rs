// SPDX-License-Identifier: MPL-2.0
//! Frame-sequenced slide transitions.
//!
//! A rotation is applied in two steps. [`Scheduler::commit`] installs the new
//! targets immediately: items that wrapped around the sequence end snap to
//! their new slot with interpolation suppressed, every other item glides from
//! wherever it currently is. [`Scheduler::on_frame`] runs on the next render
//! frame and re-enables interpolation for the snapped items, so the wrap
//! itself is never animated but their following moves are.
//!
//! The caption of the active slot is hidden on every commit and fades back in
//! once a frame has passed and the active image has stopped moving.

use super::layout::{Placement, SlotPlacement};
use super::sequence::ItemId;
use iced::{Point, Rectangle, Size};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Animation of one item towards its target placement.
#[derive(Debug, Clone, Copy)]
struct Track {
    from: Placement,
    to: Placement,
    started_at: Instant,
    /// Whether changes to this item are interpolated. Cleared while the item
    /// is being relocated, restored by the next frame.
    transitions_enabled: bool,
}

impl Track {
    fn settled(placement: Placement, now: Instant) -> Self {
        Self {
            from: placement,
            to: placement,
            started_at: now,
            transitions_enabled: true,
        }
    }

    fn is_moving(&self, now: Instant, duration: Duration) -> bool {
        self.from != self.to && now.saturating_duration_since(self.started_at) < duration
    }

    fn sample(&self, now: Instant, duration: Duration) -> Placement {
        if self.from == self.to || duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= duration {
            return self.to;
        }
        let t = standard_easing(elapsed.as_secs_f32() / duration.as_secs_f32());
        interpolate(&self.from, &self.to, t)
    }
}

/// Visibility of the active slot's caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentReveal {
    /// Hidden since the last commit; `frame_seen` flips on the first frame.
    Hidden { frame_seen: bool },
    Revealing { started_at: Instant },
    Visible,
}

/// Per-item transition bookkeeping for the carousel.
#[derive(Debug, Clone)]
pub struct Scheduler {
    duration: Duration,
    content_fade: Duration,
    tracks: HashMap<ItemId, Track>,
    /// Items waiting for a frame before transitions are re-enabled.
    pending_enable: Vec<ItemId>,
    active: Option<ItemId>,
    content: ContentReveal,
}

impl Scheduler {
    #[must_use]
    pub fn new(duration: Duration, content_fade: Duration) -> Self {
        Self {
            duration,
            content_fade,
            tracks: HashMap::new(),
            pending_enable: Vec::new(),
            active: None,
            content: ContentReveal::Visible,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Forgets every track, e.g. when a new list of images is loaded.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.pending_enable.clear();
        self.active = None;
        self.content = ContentReveal::Visible;
    }

    /// Installs new targets after a structural change.
    ///
    /// `relocated` lists the items whose move must not be animated. Items
    /// seen for the first time snap as well.
    pub fn commit(&mut self, placements: &[SlotPlacement], relocated: &[ItemId], now: Instant) {
        let mut next_tracks = HashMap::with_capacity(placements.len());

        for entry in placements {
            let target = entry.placement;
            let previous = self.tracks.get(&entry.item_id).copied();

            if relocated.contains(&entry.item_id) {
                self.suppress(entry.item_id);
                next_tracks.insert(
                    entry.item_id,
                    Track {
                        transitions_enabled: false,
                        ..Track::settled(target, now)
                    },
                );
                continue;
            }

            let track = match previous {
                Some(previous) if previous.transitions_enabled => Track {
                    from: previous.sample(now, self.duration),
                    to: target,
                    started_at: now,
                    transitions_enabled: true,
                },
                // Still suppressed from an earlier commit: the change applies
                // without interpolation, like the wrap itself.
                Some(_) => Track {
                    transitions_enabled: false,
                    ..Track::settled(target, now)
                },
                None => Track::settled(target, now),
            };
            next_tracks.insert(entry.item_id, track);
        }

        self.tracks = next_tracks;
        self.pending_enable.retain(|id| self.tracks.contains_key(id));
        self.active = placements
            .iter()
            .find(|entry| entry.slot == 0)
            .map(|entry| entry.item_id);
        self.content = ContentReveal::Hidden { frame_seen: false };
    }

    /// Moves every item to its target without animating and without hiding
    /// the caption (used when the container is resized).
    pub fn relayout(&mut self, placements: &[SlotPlacement], now: Instant) {
        for entry in placements {
            let enabled = self
                .tracks
                .get(&entry.item_id)
                .is_none_or(|track| track.transitions_enabled);
            self.tracks.insert(
                entry.item_id,
                Track {
                    transitions_enabled: enabled,
                    ..Track::settled(entry.placement, now)
                },
            );
        }
    }

    /// Render-frame boundary.
    pub fn on_frame(&mut self, now: Instant) {
        for id in self.pending_enable.drain(..) {
            if let Some(track) = self.tracks.get_mut(&id) {
                track.transitions_enabled = true;
            }
        }

        self.content = match self.content {
            ContentReveal::Hidden { .. } => {
                if self.active_is_moving(now) {
                    ContentReveal::Hidden { frame_seen: true }
                } else {
                    ContentReveal::Revealing { started_at: now }
                }
            }
            ContentReveal::Revealing { started_at }
                if now.saturating_duration_since(started_at) >= self.content_fade =>
            {
                ContentReveal::Visible
            }
            other => other,
        };
    }

    /// Interpolated placement of `id` at `now`.
    #[must_use]
    pub fn current(&self, id: ItemId, now: Instant) -> Option<Placement> {
        self.tracks
            .get(&id)
            .map(|track| track.sample(now, self.duration))
    }

    /// Whether interpolation is currently enabled for `id`.
    #[must_use]
    pub fn transitions_enabled(&self, id: ItemId) -> bool {
        self.tracks
            .get(&id)
            .is_some_and(|track| track.transitions_enabled)
    }

    #[must_use]
    pub fn is_animating(&self, id: ItemId, now: Instant) -> bool {
        self.tracks
            .get(&id)
            .is_some_and(|track| track.is_moving(now, self.duration))
    }

    #[must_use]
    pub fn any_animating(&self, now: Instant) -> bool {
        self.tracks
            .values()
            .any(|track| track.is_moving(now, self.duration))
    }

    /// Opacity of the active slot's caption.
    #[must_use]
    pub fn content_opacity(&self, now: Instant) -> f32 {
        match self.content {
            ContentReveal::Hidden { .. } => 0.0,
            ContentReveal::Revealing { started_at } => {
                if self.content_fade.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(started_at);
                (elapsed.as_secs_f32() / self.content_fade.as_secs_f32()).clamp(0.0, 1.0)
            }
            ContentReveal::Visible => 1.0,
        }
    }

    #[must_use]
    pub fn content(&self) -> ContentReveal {
        self.content
    }

    /// True when no frame ticks are needed to make progress.
    #[must_use]
    pub fn is_idle(&self, now: Instant) -> bool {
        self.pending_enable.is_empty()
            && self.content == ContentReveal::Visible
            && !self.any_animating(now)
    }

    fn suppress(&mut self, id: ItemId) {
        if !self.pending_enable.contains(&id) {
            self.pending_enable.push(id);
        }
    }

    fn active_is_moving(&self, now: Instant) -> bool {
        self.active.is_some_and(|id| self.is_animating(id, now))
    }
}

fn interpolate(from: &Placement, to: &Placement, t: f32) -> Placement {
    let lerp = |a: f32, b: f32| a + (b - a) * t;

    Placement {
        bounds: Rectangle::new(
            Point::new(lerp(from.bounds.x, to.bounds.x), lerp(from.bounds.y, to.bounds.y)),
            Size::new(
                lerp(from.bounds.width, to.bounds.width),
                lerp(from.bounds.height, to.bounds.height),
            ),
        ),
        opacity: lerp(from.opacity, to.opacity),
        ..*to
    }
}

/// `cubic-bezier(0.4, 0, 0.2, 1)`, the "standard" easing curve.
///
/// Solves the curve's x polynomial for `progress` by bisection and returns
/// the matching y.
#[must_use]
pub fn standard_easing(progress: f32) -> f32 {
    const X1: f32 = 0.4;
    const Y1: f32 = 0.0;
    const X2: f32 = 0.2;
    const Y2: f32 = 1.0;

    fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    let x = progress.clamp(0.0, 1.0);
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    for _ in 0..24 {
        let mid = (low + high) / 2.0;
        if bezier(mid, X1, X2) < x {
            low = mid;
        } else {
            high = mid;
        }
    }
    bezier((low + high) / 2.0, Y1, Y2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::carousel::layout::Interaction;

    const DURATION: Duration = Duration::from_millis(750);
    const FADE: Duration = Duration::from_millis(300);

    fn placement(x: f32) -> Placement {
        Placement {
            bounds: Rectangle::new(Point::new(x, 0.0), Size::new(100.0, 100.0)),
            opacity: 1.0,
            z_index: 0,
            interaction: Interaction::None,
        }
    }

    fn slots(xs: &[(ItemId, f32)]) -> Vec<SlotPlacement> {
        xs.iter()
            .enumerate()
            .map(|(slot, &(item_id, x))| SlotPlacement {
                slot,
                item_id,
                placement: placement(x),
            })
            .collect()
    }

    fn settled_scheduler(start: Instant) -> Scheduler {
        let mut scheduler = Scheduler::new(DURATION, FADE);
        scheduler.commit(&slots(&[(0, 0.0), (1, 100.0), (2, 200.0)]), &[], start);
        scheduler.on_frame(start);
        scheduler.on_frame(start + FADE);
        scheduler
    }

    #[test]
    fn easing_hits_endpoints_and_is_monotonic() {
        assert!(standard_easing(0.0).abs() < 1e-4);
        assert!((standard_easing(1.0) - 1.0).abs() < 1e-4);

        let mut previous = 0.0;
        for step in 1..=20 {
            let value = standard_easing(step as f32 / 20.0);
            assert!(value >= previous);
            previous = value;
        }
        // Decelerating curve: ahead of linear at the midpoint.
        assert!(standard_easing(0.5) > 0.5);
    }

    #[test]
    fn first_commit_snaps() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(DURATION, FADE);
        scheduler.commit(&slots(&[(0, 10.0)]), &[], now);
        assert_eq!(scheduler.current(0, now), Some(placement(10.0)));
        assert!(!scheduler.is_animating(0, now));
    }

    #[test]
    fn relocated_items_snap_and_others_glide() {
        let start = Instant::now();
        let mut scheduler = settled_scheduler(start);
        let now = start + Duration::from_secs(1);

        // Item 0 wraps to the tail, items 1 and 2 shift left.
        scheduler.commit(&slots(&[(1, 0.0), (2, 100.0), (0, 200.0)]), &[0], now);

        assert_eq!(scheduler.current(0, now), Some(placement(200.0)));
        assert!(!scheduler.transitions_enabled(0));
        assert!(!scheduler.is_animating(0, now));

        assert!(scheduler.is_animating(1, now));
        assert_eq!(scheduler.current(1, now), Some(placement(100.0)));

        let halfway = now + DURATION / 2;
        let x = scheduler.current(1, halfway).map(|p| p.bounds.x).unwrap();
        assert!(x > 0.0 && x < 100.0);

        assert_eq!(scheduler.current(1, now + DURATION), Some(placement(0.0)));
    }

    #[test]
    fn relocated_items_animate_again_only_after_a_frame() {
        let start = Instant::now();
        let mut scheduler = settled_scheduler(start);
        let now = start + Duration::from_secs(1);

        scheduler.commit(&slots(&[(1, 0.0), (2, 100.0), (0, 200.0)]), &[0], now);

        // A second rotation before any frame: item 0 still snaps.
        scheduler.commit(&slots(&[(2, 0.0), (0, 100.0), (1, 200.0)]), &[1], now);
        assert_eq!(scheduler.current(0, now), Some(placement(100.0)));
        assert!(!scheduler.is_animating(0, now));

        scheduler.on_frame(now);
        assert!(scheduler.transitions_enabled(0));
        assert!(scheduler.transitions_enabled(1));

        scheduler.commit(&slots(&[(0, 0.0), (1, 100.0), (2, 200.0)]), &[2], now);
        assert!(scheduler.is_animating(0, now));
    }

    #[test]
    fn re_enabling_is_idempotent() {
        let start = Instant::now();
        let mut scheduler = settled_scheduler(start);
        scheduler.on_frame(start);
        scheduler.on_frame(start);
        assert!(scheduler.transitions_enabled(0));
    }

    #[test]
    fn retarget_starts_from_interpolated_position() {
        let start = Instant::now();
        let mut scheduler = settled_scheduler(start);
        let now = start + Duration::from_secs(1);

        scheduler.commit(&slots(&[(0, 300.0), (1, 100.0), (2, 200.0)]), &[], now);
        let midway = now + DURATION / 3;
        let position = scheduler.current(0, midway).unwrap();

        scheduler.commit(&slots(&[(0, 0.0), (1, 100.0), (2, 200.0)]), &[], midway);
        assert_eq!(scheduler.current(0, midway), Some(position));
    }

    #[test]
    fn content_hidden_until_settled_then_fades_in() {
        let start = Instant::now();
        let mut scheduler = settled_scheduler(start);
        assert_eq!(scheduler.content_opacity(start + FADE), 1.0);

        let now = start + Duration::from_secs(1);
        // Active item (1) glides in from slot 1.
        scheduler.commit(&slots(&[(1, 0.0), (2, 100.0), (0, 200.0)]), &[0], now);
        assert_eq!(scheduler.content_opacity(now), 0.0);

        scheduler.on_frame(now);
        assert_eq!(
            scheduler.content(),
            ContentReveal::Hidden { frame_seen: true }
        );

        let settled = now + DURATION;
        scheduler.on_frame(settled);
        assert_eq!(
            scheduler.content(),
            ContentReveal::Revealing { started_at: settled }
        );
        let partial = scheduler.content_opacity(settled + FADE / 2);
        assert!(partial > 0.0 && partial < 1.0);

        scheduler.on_frame(settled + FADE);
        assert_eq!(scheduler.content(), ContentReveal::Visible);
        assert!(scheduler.is_idle(settled + FADE));
    }

    #[test]
    fn content_waits_for_a_frame_even_without_motion() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(DURATION, FADE);
        scheduler.commit(&slots(&[(0, 0.0)]), &[], now);
        assert_eq!(scheduler.content_opacity(now), 0.0);
        assert!(!scheduler.is_idle(now));

        scheduler.on_frame(now);
        assert!(matches!(scheduler.content(), ContentReveal::Revealing { .. }));
    }

    #[test]
    fn relayout_snaps_without_hiding_content() {
        let start = Instant::now();
        let mut scheduler = settled_scheduler(start);
        let now = start + Duration::from_secs(1);

        scheduler.relayout(&slots(&[(0, 50.0), (1, 150.0), (2, 250.0)]), now);
        assert_eq!(scheduler.current(0, now), Some(placement(50.0)));
        assert!(scheduler.is_idle(now));
    }

    #[test]
    fn zero_duration_never_animates() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(Duration::ZERO, Duration::ZERO);
        scheduler.commit(&slots(&[(0, 0.0)]), &[], now);
        scheduler.on_frame(now);
        scheduler.commit(&slots(&[(0, 500.0)]), &[], now);
        assert_eq!(scheduler.current(0, now), Some(placement(500.0)));
        assert!(!scheduler.any_animating(now));
        scheduler.on_frame(now);
        assert_eq!(scheduler.content_opacity(now), 1.0);
    }
}
