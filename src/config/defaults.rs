// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Search**: Backend address, score threshold, batch size
//! - **Carousel**: Slide and content fade durations
//! - **Image Cache**: Number of fetched images kept in memory

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Address of the search backend when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Default minimum similarity score (0.0 keeps every match).
pub const DEFAULT_MIN_SCORE: f32 = 0.0;

/// Lowest accepted similarity threshold.
pub const MIN_MIN_SCORE: f32 = 0.0;

/// Highest accepted similarity threshold.
pub const MAX_MIN_SCORE: f32 = 1.0;

/// Step of the minimum score slider.
pub const MIN_SCORE_STEP: f32 = 0.01;

/// Default number of images embedded per backend batch.
pub const DEFAULT_BATCH_SIZE: u32 = 32;

/// Minimum batch size.
pub const MIN_BATCH_SIZE: u32 = 1;

/// Maximum batch size.
pub const MAX_BATCH_SIZE: u32 = 256;

/// Timeout applied to every backend request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Carousel Defaults
// ==========================================================================

/// Default duration of a slide animation (in milliseconds).
pub const DEFAULT_TRANSITION_MS: u32 = 750;

/// Maximum slide animation duration (in milliseconds).
pub const MAX_TRANSITION_MS: u32 = 5_000;

/// Default fade-in duration of the active slide caption (in milliseconds).
pub const DEFAULT_CONTENT_FADE_MS: u32 = 300;

/// Maximum caption fade duration (in milliseconds).
pub const MAX_CONTENT_FADE_MS: u32 = 2_000;

// ==========================================================================
// Image Cache Defaults
// ==========================================================================

/// Number of fetched result images kept in the LRU cache.
pub const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 64;

/// Number of gallery thumbnails kept in the LRU cache.
pub const DEFAULT_THUMBNAIL_CACHE_CAPACITY: usize = 256;

/// Number of front carousel slots whose images are requested after a
/// rotation (active, three previews and the next hidden slot). The tail item
/// is requested on top of these.
pub const CAROUSEL_PREFETCH_SLOTS: usize = 5;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_MIN_SCORE < MAX_MIN_SCORE);
    assert!(DEFAULT_MIN_SCORE >= MIN_MIN_SCORE);
    assert!(DEFAULT_MIN_SCORE <= MAX_MIN_SCORE);
    assert!(MIN_SCORE_STEP > 0.0);

    assert!(MIN_BATCH_SIZE > 0);
    assert!(MAX_BATCH_SIZE >= MIN_BATCH_SIZE);
    assert!(DEFAULT_BATCH_SIZE >= MIN_BATCH_SIZE);
    assert!(DEFAULT_BATCH_SIZE <= MAX_BATCH_SIZE);

    assert!(DEFAULT_TRANSITION_MS <= MAX_TRANSITION_MS);
    assert!(DEFAULT_CONTENT_FADE_MS <= MAX_CONTENT_FADE_MS);

    assert!(DEFAULT_IMAGE_CACHE_CAPACITY >= CAROUSEL_PREFETCH_SLOTS);
    assert!(DEFAULT_THUMBNAIL_CACHE_CAPACITY > 0);
};
