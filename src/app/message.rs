// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::search::ImageResult;
use crate::error::Error;
use crate::ui::{carousel, gallery, search_panel};
use iced::Size;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// component messages and carry the results of background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    Search(search_panel::Message),
    Gallery(gallery::Message),
    Carousel(carousel::Message),
    /// Result of the query image file dialog.
    QueryImagePicked(Option<PathBuf>),
    /// Result of the local folder dialog.
    FolderPicked(Option<PathBuf>),
    /// Result of the backend's folder dialog.
    ServerFolderPicked(Result<Option<String>, Error>),
    SearchCompleted(Result<Vec<ImageResult>, Error>),
    /// Full-size image bytes for the carousel.
    ImageFetched {
        path: String,
        result: Result<Vec<u8>, Error>,
    },
    /// Thumbnail bytes for a gallery card.
    ThumbnailFetched {
        path: String,
        result: Result<Vec<u8>, Error>,
    },
    /// File or folder dropped onto the window.
    FileDropped(PathBuf),
    /// Window size, from the window opening or a resize.
    WindowResized(Size),
    /// Redraw tick while a search is in flight.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional search backend URL, takes precedence over `settings.toml`.
    pub server: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SEARCH_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional query image preselected in the search form.
    pub query_path: Option<String>,
}
