// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval between spinner redraws while a search runs.
const SPINNER_TICK: Duration = Duration::from_millis(50);

/// Forwards window sizes so the carousel can re-derive its layout, and
/// dropped files for the search form.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match event {
        event::Event::Window(event) => window_message(event),
        _ => None,
    })
}

fn window_message(event: window::Event) -> Option<Message> {
    match event {
        // The OS may open the window at a size other than the requested one.
        window::Event::Opened { size, .. } | window::Event::Resized(size) => {
            Some(Message::WindowResized(size))
        }
        window::Event::FileDropped(path) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

/// Periodic tick that keeps the search spinner moving.
pub fn create_tick_subscription(searching: bool) -> Subscription<Message> {
    if searching {
        time::every(SPINNER_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
