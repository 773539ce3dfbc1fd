// SPDX-License-Identifier: MPL-2.0
//! Search result value objects.
//!
//! These types describe what the search backend returns and what the search
//! form sends. Range invariants are enforced at construction so the UI never
//! has to re-validate them.

use crate::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_MIN_SCORE, MAX_BATCH_SIZE, MAX_MIN_SCORE, MIN_BATCH_SIZE,
    MIN_MIN_SCORE,
};
use std::path::PathBuf;

// =============================================================================
// Score
// =============================================================================

/// Similarity score, guaranteed to be within `0.0..=1.0`.
///
/// Non-finite input collapses to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f32);

impl Score {
    /// Creates a new score, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_MIN_SCORE, MAX_MIN_SCORE))
        } else {
            Self(0.0)
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the score as a percentage (e.g., 0.875 → 87.5).
    #[must_use]
    pub fn as_percent(self) -> f32 {
        self.0 * 100.0
    }

    /// Formats the score the way result badges display it (`87.5%`).
    #[must_use]
    pub fn label(self) -> String {
        format!("{:.1}%", self.as_percent())
    }
}

// =============================================================================
// BatchSize
// =============================================================================

/// Number of images the backend embeds per batch (1–256).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(u32);

impl BatchSize {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_BATCH_SIZE)
    }
}

// =============================================================================
// ImageResult
// =============================================================================

/// One ranked match returned by the search backend.
///
/// `width` and `height` are the source pixel dimensions and only drive
/// aspect-ratio layout; either may be zero when the backend did not report it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResult {
    /// Opaque identifier used to fetch the image bytes from the backend.
    pub path: String,
    pub filename: String,
    pub description: Option<String>,
    /// Server-relative URL of a downscaled copy, when the backend made one.
    pub thumbnail: Option<String>,
    pub score: Score,
    pub width: u32,
    pub height: u32,
}

impl ImageResult {
    /// Creates a result whose filename is derived from the last path segment.
    #[must_use]
    pub fn new(path: impl Into<String>, score: Score, width: u32, height: u32) -> Self {
        let path = path.into();
        let filename = filename_from_path(&path);
        Self {
            path,
            filename,
            description: None,
            thumbnail: None,
            score,
            width,
            height,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Whether both pixel dimensions are known.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width divided by height, or `1.0` when either dimension is zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Returns the last segment of a `/` or `\` separated path.
#[must_use]
pub fn filename_from_path(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

// =============================================================================
// SearchQuery
// =============================================================================

/// Parameters of one reverse image search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Local file holding the query image.
    pub image_path: PathBuf,
    /// Folder (on the backend host) whose images are compared against the query.
    pub folder: String,
    pub min_score: Score,
    pub batch_size: BatchSize,
}

impl SearchQuery {
    #[must_use]
    pub fn new(image_path: PathBuf, folder: impl Into<String>) -> Self {
        Self {
            image_path,
            folder: folder.into(),
            min_score: Score::new(DEFAULT_MIN_SCORE),
            batch_size: BatchSize::default(),
        }
    }
}
