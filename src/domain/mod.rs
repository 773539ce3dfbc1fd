// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with no dependency on the GUI or the network.
//!
//! # Modules
//!
//! - [`search`]: Search result value objects ([`ImageResult`](search::ImageResult),
//!   [`Score`](search::Score)) and query parameters ([`SearchQuery`](search::SearchQuery))

pub mod search;
