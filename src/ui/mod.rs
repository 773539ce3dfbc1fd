// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one owns its state, handles its own messages and reports what the
//! application should do next.
//!
//! # Components
//!
//! - [`search_panel`] - Query image, folder and score form
//! - [`gallery`] - Grid of ranked results
//! - [`carousel`] - Full-screen result carousel
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (scroll lock, spinner)
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod carousel;
pub mod design_tokens;
pub mod gallery;
pub mod search_panel;
pub mod styles;
pub mod theming;
pub mod widgets;
