// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Component messages are forwarded to their owner; the events and effects
//! they report are turned into background tasks (file dialogs, HTTP requests)
//! here, and the task results come back as top-level messages.

use super::{Message, StatusLine};
use crate::config::{self, Config};
use crate::domain::search::{ImageResult, SearchQuery};
use crate::error::Error;
use crate::infrastructure::SearchClient;
use crate::media::{self, ImageCache};
use crate::ui::carousel::{self, Effect as CarouselEffect};
use crate::ui::gallery::{self, Event as GalleryEvent};
use crate::ui::search_panel::{self, Event as SearchEvent};
use iced::Task;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extensions offered by the query image dialog.
const QUERY_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub config: &'a mut Config,
    pub config_dir: Option<&'a PathBuf>,
    pub client: Option<&'a SearchClient>,
    pub search: &'a mut search_panel::State,
    pub gallery: &'a mut gallery::State,
    pub carousel: &'a mut carousel::State,
    pub images: &'a mut ImageCache,
    pub thumbnails: &'a mut ImageCache,
    pub status: &'a mut Option<StatusLine>,
}

pub fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Search(msg) => {
            let event = ctx.search.update(msg, Instant::now());
            handle_search_event(ctx, event)
        }
        Message::Gallery(msg) => match ctx.gallery.update(msg) {
            GalleryEvent::OpenCarousel { index } => {
                let results = ctx.gallery.results().to_vec();
                let effect = ctx.carousel.open(results, index);
                handle_carousel_effect(ctx, effect)
            }
            GalleryEvent::None => Task::none(),
        },
        Message::Carousel(msg) => {
            let effect = ctx.carousel.handle(msg);
            handle_carousel_effect(ctx, effect)
        }
        Message::QueryImagePicked(path) => {
            if let Some(path) = path {
                log::debug!("query image {}", path.display());
                ctx.search.set_query_image(path);
                *ctx.status = None;
            }
            Task::none()
        }
        Message::FolderPicked(path) => {
            match path.map(folder_from_path).transpose() {
                Ok(Some(folder)) => ctx.search.set_folder(folder),
                Ok(None) => {}
                Err(err) => *ctx.status = Some(StatusLine::from_error(&err)),
            }
            Task::none()
        }
        Message::ServerFolderPicked(result) => {
            match result {
                Ok(Some(folder)) => ctx.search.set_folder(folder),
                Ok(None) => {}
                Err(err) => {
                    log::warn!("backend folder picker failed: {err}");
                    *ctx.status = Some(StatusLine::from_error(&err));
                }
            }
            Task::none()
        }
        Message::SearchCompleted(result) => handle_search_completed(ctx, result),
        Message::ImageFetched { path, result } => {
            if let Ok(bytes) = &result {
                record_dimensions(ctx, &path, bytes);
            }
            store_fetched(ctx.images, path, result);
            Task::none()
        }
        Message::ThumbnailFetched { path, result } => {
            store_fetched(ctx.thumbnails, path, result);
            Task::none()
        }
        Message::FileDropped(path) => {
            handle_file_dropped(ctx, path);
            Task::none()
        }
        Message::WindowResized(size) => {
            let effect = ctx.carousel.handle(carousel::Message::Resized(size));
            handle_carousel_effect(ctx, effect)
        }
        Message::Tick(_) => Task::none(),
    }
}

fn handle_search_event(ctx: &mut UpdateContext<'_>, event: SearchEvent) -> Task<Message> {
    match event {
        SearchEvent::None => Task::none(),
        SearchEvent::Invalid(key) => {
            *ctx.status = Some(StatusLine::error(key));
            Task::none()
        }
        SearchEvent::PickQueryImage => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .add_filter("Images", &QUERY_IMAGE_EXTENSIONS[..])
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::QueryImagePicked,
        ),
        SearchEvent::PickFolder => {
            let start_dir = Some(PathBuf::from(ctx.search.folder())).filter(|dir| dir.is_dir());
            Task::perform(
                async move {
                    let mut dialog = rfd::AsyncFileDialog::new();
                    if let Some(dir) = start_dir {
                        dialog = dialog.set_directory(&dir);
                    }
                    dialog
                        .pick_folder()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FolderPicked,
            )
        }
        SearchEvent::PickServerFolder => {
            let Some(client) = ctx.client.cloned() else {
                *ctx.status = Some(StatusLine::error("error-search-unreachable"));
                return Task::none();
            };
            Task::perform(
                async move { client.select_folder().await },
                Message::ServerFolderPicked,
            )
        }
        SearchEvent::Search(query) => start_search(ctx, query),
    }
}

fn start_search(ctx: &mut UpdateContext<'_>, query: SearchQuery) -> Task<Message> {
    let Some(client) = ctx.client.cloned() else {
        ctx.search.finish_search();
        *ctx.status = Some(StatusLine::error("error-search-unreachable"));
        return Task::none();
    };

    *ctx.status = Some(StatusLine::info("search-in-progress"));
    remember_folder(ctx, &query.folder);

    Task::perform(
        async move { client.search(query).await },
        Message::SearchCompleted,
    )
}

fn handle_search_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<Vec<ImageResult>, Error>,
) -> Task<Message> {
    ctx.search.finish_search();

    match result {
        Ok(results) => {
            *ctx.status = Some(if results.is_empty() {
                StatusLine::info("gallery-empty")
            } else {
                StatusLine::results(results.len())
            });

            ctx.images.clear();
            ctx.thumbnails.clear();
            let task = fetch_thumbnails(ctx, &results);
            ctx.gallery.set_results(results);
            task
        }
        Err(err) => {
            log::warn!("search failed: {err}");
            *ctx.status = Some(StatusLine::from_error(&err));
            Task::none()
        }
    }
}

fn handle_carousel_effect(ctx: &mut UpdateContext<'_>, effect: CarouselEffect) -> Task<Message> {
    match effect {
        CarouselEffect::Opened { prefetch } | CarouselEffect::Rotated { prefetch } => {
            fetch_images(ctx, prefetch)
        }
        CarouselEffect::Closed | CarouselEffect::None => Task::none(),
    }
}

/// Starts a download for every path that is neither cached nor in flight.
fn fetch_images(ctx: &mut UpdateContext<'_>, paths: Vec<String>) -> Task<Message> {
    let Some(client) = ctx.client else {
        return Task::none();
    };

    let tasks: Vec<_> = ctx
        .images
        .claim_missing(paths)
        .into_iter()
        .map(|path| {
            let client = client.clone();
            Task::perform(
                async move {
                    let result = client.fetch_image(path.clone()).await;
                    (path, result)
                },
                |(path, result)| Message::ImageFetched { path, result },
            )
        })
        .collect();

    Task::batch(tasks)
}

fn fetch_thumbnails(ctx: &mut UpdateContext<'_>, results: &[ImageResult]) -> Task<Message> {
    let Some(client) = ctx.client else {
        return Task::none();
    };

    let missing = ctx
        .thumbnails
        .claim_missing(results.iter().map(|item| item.path.clone()));

    let tasks: Vec<_> = results
        .iter()
        .filter(|item| missing.contains(&item.path))
        .map(|item| {
            let client = client.clone();
            let item = item.clone();
            Task::perform(
                async move {
                    let path = item.path.clone();
                    let result = client.fetch_thumbnail(item).await;
                    (path, result)
                },
                |(path, result)| Message::ThumbnailFetched { path, result },
            )
        })
        .collect();

    Task::batch(tasks)
}

/// A dropped image becomes the query, a dropped folder the search folder.
fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) {
    if ctx.carousel.is_open() {
        log::debug!("ignoring drop of {} over the carousel", path.display());
        return;
    }

    if path.is_dir() {
        match folder_from_path(path) {
            Ok(folder) => {
                ctx.search.set_folder(folder);
                *ctx.status = None;
            }
            Err(err) => *ctx.status = Some(StatusLine::from_error(&err)),
        }
    } else if is_query_image(&path) {
        log::debug!("query image {} dropped", path.display());
        ctx.search.set_query_image(path);
        *ctx.status = None;
    } else {
        *ctx.status = Some(StatusLine::error("status-unsupported-drop"));
    }
}

fn is_query_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            QUERY_IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Sizes results the backend listed without dimensions from the image header.
fn record_dimensions(ctx: &mut UpdateContext<'_>, path: &str, bytes: &[u8]) {
    let missing_size = ctx
        .gallery
        .results()
        .iter()
        .chain(ctx.carousel.sequence().iter().map(|(_, _, item)| item))
        .any(|item| item.path == path && !item.has_dimensions());
    if !missing_size {
        return;
    }

    match media::image_dimensions(bytes) {
        Ok((width, height)) => {
            log::debug!("{path} is {width}x{height}");
            ctx.carousel.set_dimensions(path, width, height);
            ctx.gallery.set_dimensions(path, width, height);
        }
        Err(err) => log::debug!("could not read the size of {path}: {err}"),
    }
}

fn store_fetched(cache: &mut ImageCache, path: String, result: Result<Vec<u8>, Error>) {
    match result {
        Ok(bytes) => {
            cache.insert(path, bytes);
        }
        Err(err) => {
            log::warn!("failed to fetch {path}: {err}");
            cache.release(&path);
        }
    }
}

/// Persists the searched folder so the form is prefilled next launch.
fn remember_folder(ctx: &mut UpdateContext<'_>, folder: &str) {
    if ctx.config.search.last_folder.as_deref() == Some(folder) {
        return;
    }
    ctx.config.search.last_folder = Some(folder.to_string());
    if let Err(err) = config::save_with_override(ctx.config, ctx.config_dir.cloned()) {
        log::warn!("could not save settings: {err}");
    }
}

fn folder_from_path(path: PathBuf) -> Result<String, Error> {
    path.into_os_string()
        .into_string()
        .map_err(|raw| Error::Dialog(format!("folder path is not valid UTF-8: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_from_path_accepts_utf8() {
        assert_eq!(
            folder_from_path(PathBuf::from("/data/photos")).unwrap(),
            "/data/photos"
        );
    }

    #[test]
    fn query_image_extensions_ignore_case() {
        assert!(is_query_image(Path::new("/tmp/cat.JPG")));
        assert!(is_query_image(Path::new("/tmp/cat.webp")));
        assert!(!is_query_image(Path::new("/tmp/notes.txt")));
        assert!(!is_query_image(Path::new("/tmp/no_extension")));
    }

    #[test]
    fn failed_fetch_can_be_retried() {
        let mut cache = ImageCache::new(4);
        cache.claim_missing(vec!["a".to_string()]);
        store_fetched(
            &mut cache,
            "a".into(),
            Err(Error::Http("connection refused".into())),
        );
        assert!(!cache.is_pending("a"));
        assert!(!cache.contains("a"));

        cache.claim_missing(vec!["a".to_string()]);
        store_fetched(&mut cache, "a".into(), Ok(vec![1, 2, 3]));
        assert!(cache.contains("a"));
    }
}
