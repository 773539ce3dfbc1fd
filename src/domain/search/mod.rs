// SPDX-License-Identifier: MPL-2.0
//! Search domain types.

pub mod types;

pub use types::{filename_from_path, BatchSize, ImageResult, Score, SearchQuery};
