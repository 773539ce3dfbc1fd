// SPDX-License-Identifier: MPL-2.0
//! Input routing for the carousel.
//!
//! The router is a two-state machine. While closed it ignores everything but
//! an open request; while open it turns clicks and keys into sequence
//! operations.

use super::layout::VISIBLE_PREVIEWS;
use iced::keyboard::{self, key::Named};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

/// User input the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Open,
    CloseButton,
    NextButton,
    PrevButton,
    /// Pointer press on the slide currently in `slot`.
    SlotPressed(usize),
    /// Pointer press on the backdrop around the slides.
    BackdropPressed,
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Operation to apply to the carousel in response to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ignore,
    Open,
    Close,
    Next,
    Prev,
    RotateToFront(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    phase: Phase,
}

impl Router {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Maps `input` to a command and advances the phase.
    ///
    /// Opening while already open is allowed and replaces the content.
    pub fn route(&mut self, input: Input) -> Command {
        match (self.phase, input) {
            (_, Input::Open) => {
                self.phase = Phase::Open;
                Command::Open
            }
            (Phase::Closed, _) => Command::Ignore,
            (Phase::Open, Input::CloseButton | Input::Escape | Input::BackdropPressed) => {
                self.phase = Phase::Closed;
                Command::Close
            }
            (Phase::Open, Input::NextButton | Input::ArrowRight) => Command::Next,
            (Phase::Open, Input::PrevButton | Input::ArrowLeft) => Command::Prev,
            (Phase::Open, Input::SlotPressed(slot)) if (1..=VISIBLE_PREVIEWS).contains(&slot) => {
                Command::RotateToFront(slot)
            }
            (Phase::Open, Input::SlotPressed(_)) => Command::Ignore,
        }
    }
}

/// Translates a pressed key into carousel input, if it is one of ours.
#[must_use]
pub fn key_input(key: &keyboard::Key) -> Option<Input> {
    match key {
        keyboard::Key::Named(Named::Escape) => Some(Input::Escape),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Input::ArrowLeft),
        keyboard::Key::Named(Named::ArrowRight) => Some(Input::ArrowRight),
        _ => None,
    }
}
