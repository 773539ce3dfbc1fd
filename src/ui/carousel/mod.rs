// SPDX-License-Identifier: MPL-2.0
//! Full-screen result carousel.
//!
//! One active slide, up to three clickable previews stacked along the bottom
//! edge, and any remaining results parked off-screen. The component owns its
//! sub-components and is driven through [`State::handle`]:
//!
//! - [`sequence`]: circular order of the results
//! - [`layout`]: slot geometry
//! - [`transition`]: frame-sequenced animation of rotations
//! - [`events`]: open/closed input routing
//! - [`overlay`]: surface visibility and the gallery scroll lock

pub mod events;
pub mod layout;
pub mod overlay;
pub mod sequence;
pub mod transition;
mod view;

pub use layout::{Interaction, Placement, SlotPlacement};
pub use sequence::{CarouselSequence, ItemId, Rotation};
pub use view::ViewContext;

use crate::config::{CarouselConfig, CAROUSEL_PREFETCH_SLOTS};
use crate::domain::search::ImageResult;
use events::{Command, Input, Router};
use iced::{event, keyboard, window, Size, Subscription};
use std::time::Instant;
use transition::Scheduler;

/// Window size assumed until the first resize event arrives.
pub const INITIAL_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Carousel component state.
#[derive(Debug, Clone)]
pub struct State {
    sequence: CarouselSequence,
    router: Router,
    overlay: overlay::State,
    scheduler: Scheduler,
    viewport: Size,
    serialize_rotations: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    Open {
        images: Vec<ImageResult>,
        start: usize,
    },
    Close,
    Next,
    Prev,
    /// Pointer press on the slide in the given slot.
    SlotPressed(usize),
    BackdropPressed,
    KeyPressed(keyboard::Key),
    Resized(Size),
    Frame(Instant),
}

/// Effects reported to the application after handling a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The carousel became visible; the listed image paths should be loaded.
    Opened { prefetch: Vec<String> },
    Closed,
    /// The order changed; the listed image paths should be loaded.
    Rotated { prefetch: Vec<String> },
}

impl Default for State {
    fn default() -> Self {
        Self::new(&CarouselConfig::default())
    }
}

impl State {
    #[must_use]
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            sequence: CarouselSequence::default(),
            router: Router::default(),
            overlay: overlay::State::default(),
            scheduler: Scheduler::new(config.transition(), config.content_fade()),
            viewport: INITIAL_VIEWPORT,
            serialize_rotations: config.serialize_rotations(),
        }
    }

    /// Handles a carousel message at the current instant.
    pub fn handle(&mut self, msg: Message) -> Effect {
        self.handle_at(msg, Instant::now())
    }

    /// Handles a carousel message as if it arrived at `now`.
    pub fn handle_at(&mut self, msg: Message, now: Instant) -> Effect {
        let input = match msg {
            Message::Open { images, start } => {
                self.load_images_at(images, start, now);
                Input::Open
            }
            Message::Close => Input::CloseButton,
            Message::Next => Input::NextButton,
            Message::Prev => Input::PrevButton,
            Message::SlotPressed(slot) => Input::SlotPressed(slot),
            Message::BackdropPressed => Input::BackdropPressed,
            Message::KeyPressed(key) => match events::key_input(&key) {
                Some(input) => input,
                None => return Effect::None,
            },
            Message::Resized(size) => {
                self.resize(size, now);
                return Effect::None;
            }
            Message::Frame(instant) => {
                self.scheduler.on_frame(instant);
                return Effect::None;
            }
        };

        match self.router.route(input) {
            Command::Ignore => Effect::None,
            Command::Open => {
                self.overlay.show();
                log::debug!("carousel opened with {} images", self.sequence.len());
                Effect::Opened {
                    prefetch: self.prefetch_paths(),
                }
            }
            Command::Close => {
                self.overlay.hide();
                log::debug!("carousel closed");
                Effect::Closed
            }
            Command::Next => self.rotate(Rotation::FORWARD, now),
            Command::Prev => self.rotate(Rotation::Back, now),
            Command::RotateToFront(slot) => self.rotate(Rotation::ToFront(slot), now),
        }
    }

    /// Replaces the displayed results without changing visibility.
    pub fn load_images(&mut self, images: Vec<ImageResult>, start: usize) {
        self.load_images_at(images, start, Instant::now());
    }

    /// Shows the surface with the previously loaded results.
    pub fn show(&mut self) -> Effect {
        self.router.route(Input::Open);
        self.overlay.show();
        Effect::Opened {
            prefetch: self.prefetch_paths(),
        }
    }

    /// Loads `images` with `images[start]` active and shows the surface.
    pub fn open(&mut self, images: Vec<ImageResult>, start: usize) -> Effect {
        self.handle(Message::Open { images, start })
    }

    pub fn close(&mut self) -> Effect {
        self.handle(Message::Close)
    }

    pub fn next(&mut self) -> Effect {
        self.handle(Message::Next)
    }

    pub fn prev(&mut self) -> Effect {
        self.handle(Message::Prev)
    }

    /// Brings the item in `slot` to the front.
    ///
    /// Unlike a preview click, any slot is accepted; it is taken modulo the
    /// number of results.
    pub fn rotate_to_front(&mut self, slot: usize) -> Effect {
        if !self.router.is_open() {
            return Effect::None;
        }
        self.rotate(Rotation::ToFront(slot), Instant::now())
    }

    /// Records the decoded size of the image at `path` for results loaded
    /// without one, re-deriving the layout when it changes.
    pub fn set_dimensions(&mut self, path: &str, width: u32, height: u32) {
        if self.sequence.fill_dimensions(path, width, height) {
            self.scheduler.relayout(&self.target_layout(), Instant::now());
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.router.is_open()
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.overlay.scroll_locked()
    }

    #[must_use]
    pub fn sequence(&self) -> &CarouselSequence {
        &self.sequence
    }

    #[must_use]
    pub fn active(&self) -> Option<&ImageResult> {
        self.sequence.active()
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Placements the slides are moving towards.
    #[must_use]
    pub fn target_layout(&self) -> Vec<SlotPlacement> {
        layout::compute_layout(&self.sequence, self.viewport)
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Keyboard input while open, plus frame ticks while anything animates.
    pub fn subscription(&self) -> Subscription<Message> {
        if !self.router.is_open() {
            return Subscription::none();
        }

        let keys = event::listen_with(|event, status, _window| match (event, status) {
            (
                iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }),
                event::Status::Ignored,
            ) => events::key_input(&key).map(|_| Message::KeyPressed(key)),
            _ => None,
        });

        let frames = if self.scheduler.is_idle(Instant::now()) {
            Subscription::none()
        } else {
            window::frames().map(Message::Frame)
        };

        Subscription::batch([keys, frames])
    }

    fn load_images_at(&mut self, images: Vec<ImageResult>, start: usize, now: Instant) {
        self.sequence = CarouselSequence::load(images, start);
        self.scheduler.reset();
        self.scheduler.commit(&self.target_layout(), &[], now);
    }

    fn rotate(&mut self, rotation: Rotation, now: Instant) -> Effect {
        if self.sequence.len() < 2 {
            return Effect::None;
        }
        if self.serialize_rotations && self.scheduler.any_animating(now) {
            log::debug!("rotation dropped while animating");
            return Effect::None;
        }

        let relocated = self.sequence.relocated_by(rotation);
        self.sequence.rotate(rotation);
        self.scheduler.commit(&self.target_layout(), &relocated, now);

        Effect::Rotated {
            prefetch: self.prefetch_paths(),
        }
    }

    fn resize(&mut self, size: Size, now: Instant) {
        if self.viewport == size {
            return;
        }
        self.viewport = size;
        self.scheduler.relayout(&self.target_layout(), now);
    }

    /// Paths of the front slots plus the tail, which `prev` makes active.
    fn prefetch_paths(&self) -> Vec<String> {
        let len = self.sequence.len();
        let tail = (len > CAROUSEL_PREFETCH_SLOTS).then(|| len - 1);

        (0..CAROUSEL_PREFETCH_SLOTS.min(len))
            .chain(tail)
            .filter_map(|slot| self.sequence.get(slot))
            .map(|item| item.path.clone())
            .collect()
    }
}
