// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains the adapters that talk to the outside world. The UI
//! never calls them directly; it wraps their `async` methods in Iced tasks.
//!
//! - [`search_backend`]: HTTP client for the search backend (`reqwest`)

pub mod search_backend;

pub use search_backend::SearchClient;
