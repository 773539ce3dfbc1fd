// SPDX-License-Identifier: MPL-2.0
//! Visibility sub-component for the full-screen carousel surface.

/// Overlay visibility state.
#[derive(Debug, Clone, Default)]
pub struct State {
    visible: bool,
}

/// Messages for the overlay sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Show,
    Hide,
}

/// Effects produced by overlay visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        let visible = matches!(msg, Message::Show);
        if self.visible == visible {
            return Effect::None;
        }
        self.visible = visible;
        Effect::VisibilityChanged(visible)
    }

    pub fn show(&mut self) -> Effect {
        self.handle(Message::Show)
    }

    pub fn hide(&mut self) -> Effect {
        self.handle(Message::Hide)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the page behind the overlay must ignore wheel scrolling.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.visible
    }
}
