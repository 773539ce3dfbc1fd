// SPDX-License-Identifier: MPL-2.0
//! `search_lens` is a desktop client for a reverse image search backend,
//! built with the Iced GUI framework.
//!
//! The user picks a query image and a folder, the backend returns ranked
//! matches, and the results are shown in a gallery and a full-screen
//! carousel with animated rotations.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
