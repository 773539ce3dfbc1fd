// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the search form, the
//! result gallery and the carousel.
//!
//! The `App` struct owns every component plus the image caches and the
//! backend client, and translates component events into background tasks
//! (file dialogs, HTTP requests) whose results come back as messages.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config, DEFAULT_IMAGE_CACHE_CAPACITY, DEFAULT_THUMBNAIL_CACHE_CAPACITY};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::infrastructure::SearchClient;
use crate::media::ImageCache;
use crate::ui::carousel::{self, INITIAL_VIEWPORT};
use crate::ui::theming::ThemeMode;
use crate::ui::{gallery, search_panel};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    /// Directory holding `settings.toml`; `None` uses the default resolution.
    config_dir: Option<PathBuf>,
    theme_mode: ThemeMode,
    client: Option<SearchClient>,
    search: search_panel::State,
    gallery: gallery::State,
    carousel: carousel::State,
    /// Full-size images shown by the carousel.
    images: ImageCache,
    /// Gallery card thumbnails.
    thumbnails: ImageCache,
    status: Option<StatusLine>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("results", &self.gallery.results().len())
            .field("carousel_open", &self.carousel.is_open())
            .field("searching", &self.search.is_searching())
            .finish_non_exhaustive()
    }
}

pub const MIN_WINDOW_WIDTH: f32 = 900.0;
pub const MIN_WINDOW_HEIGHT: f32 = 600.0;

/// One line of feedback below the main view.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    key: &'static str,
    count: Option<usize>,
    detail: Option<String>,
    is_error: bool,
}

impl StatusLine {
    #[must_use]
    pub fn info(key: &'static str) -> Self {
        Self {
            key,
            count: None,
            detail: None,
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(key: &'static str) -> Self {
        Self {
            is_error: true,
            ..Self::info(key)
        }
    }

    /// Success line announcing how many matches a search returned.
    #[must_use]
    pub fn results(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::info("status-results")
        }
    }

    /// Error line for `err`, with the backend's message appended when there
    /// is one.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let detail = match err {
            Error::Search { message, .. } if !message.is_empty() => Some(message.clone()),
            _ => None,
        };
        Self {
            detail,
            ..Self::error(err.i18n_key())
        }
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn render(&self, i18n: &I18n) -> String {
        let text = match self.count {
            Some(count) => i18n.tr_with_count(self.key, count),
            None => i18n.tr(self.key),
        };
        match &self.detail {
            Some(detail) => format!("{text}: {detail}"),
            None => text,
        }
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: INITIAL_VIEWPORT,
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced calls the boot closure through `Fn`; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::from_config(Config::default(), None, None)
    }
}

impl App {
    fn from_config(config: Config, lang: Option<String>, server: Option<String>) -> Self {
        let i18n = I18n::new(lang, &config);
        let server_url = server.unwrap_or_else(|| config.search.server_url());

        let mut status = None;
        let client = match SearchClient::new(server_url) {
            Ok(client) => {
                log::info!("search backend at {}", client.base_url());
                Some(client)
            }
            Err(err) => {
                log::error!("could not create the HTTP client: {err}");
                status = Some(StatusLine::from_error(&err));
                None
            }
        };

        Self {
            i18n,
            config_dir: None,
            theme_mode: config.general.theme_mode,
            client,
            search: search_panel::State::new(&config.search),
            gallery: gallery::State::default(),
            carousel: carousel::State::new(&config.carousel),
            images: ImageCache::new(DEFAULT_IMAGE_CACHE_CAPACITY),
            thumbnails: ImageCache::new(DEFAULT_THUMBNAIL_CACHE_CAPACITY),
            status,
            config,
        }
    }

    /// Initializes application state from the settings file and CLI flags.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let mut app = Self::from_config(config, flags.lang, flags.server);
        app.config_dir = config_dir;

        if let Some(path) = flags.query_path {
            app.search.set_query_image(PathBuf::from(path));
        }
        if config_warning.is_some() {
            app.status = Some(StatusLine::error("notification-config-load-error"));
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        match self.carousel.active() {
            Some(item) if self.carousel.is_open() => format!("{} - {app_name}", item.filename),
            _ => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(self.search.is_searching());
        let carousel_sub = self.carousel.subscription().map(Message::Carousel);

        Subscription::batch([event_sub, tick_sub, carousel_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            config: &mut self.config,
            config_dir: self.config_dir.as_ref(),
            client: self.client.as_ref(),
            search: &mut self.search,
            gallery: &mut self.gallery,
            carousel: &mut self.carousel,
            images: &mut self.images,
            thumbnails: &mut self.thumbnails,
            status: &mut self.status,
        };
        update::update(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            search: &self.search,
            gallery: &self.gallery,
            carousel: &self.carousel,
            images: &self.images,
            thumbnails: &self.thumbnails,
            status: self.status.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{ImageResult, Score};
    use crate::ui::carousel::Message as CarouselMessage;
    use std::path::Path;
    use tempfile::tempdir;

    fn results(count: usize) -> Vec<ImageResult> {
        (0..count)
            .map(|i| ImageResult::new(format!("/photos/{i}.jpg"), Score::new(0.9), 640, 480))
            .collect()
    }

    fn app_with_results(count: usize) -> App {
        let mut app = App::default();
        let _ = app.update(Message::SearchCompleted(Ok(results(count))));
        app
    }

    #[test]
    fn new_app_starts_without_results() {
        let app = App::default();
        assert!(app.gallery.results().is_empty());
        assert!(!app.carousel.is_open());
        assert!(app.client.is_some());
        assert_eq!(app.title(), app.i18n.tr("window-title"));
    }

    #[test]
    fn search_results_fill_gallery_and_claim_thumbnails() {
        let app = app_with_results(3);
        assert_eq!(app.gallery.results().len(), 3);
        assert!(app.thumbnails.is_pending("/photos/0.jpg"));
        assert_eq!(app.status, Some(StatusLine::results(3)));
        assert!(!app.search.is_searching());
    }

    #[test]
    fn failed_search_reports_error() {
        let mut app = App::default();
        let _ = app.update(Message::SearchCompleted(Err(Error::Search {
            status: 404,
            message: "folder not found".into(),
        })));

        let status = app.status.clone().unwrap();
        assert!(status.is_error());
        assert_eq!(status.key(), "error-search-failed");
        assert!(status.render(&app.i18n).ends_with("folder not found"));
    }

    #[test]
    fn card_press_opens_carousel_and_prefetches() {
        let mut app = app_with_results(8);
        let _ = app.update(Message::Gallery(gallery::Message::CardPressed(2)));

        assert!(app.carousel.is_open());
        assert!(app.carousel.scroll_locked());
        assert_eq!(app.carousel.active().unwrap().path, "/photos/2.jpg");
        assert!(app.images.is_pending("/photos/2.jpg"));
        assert!(app.images.is_pending("/photos/6.jpg"));
        // Tail slot, shown first by a Left arrow.
        assert!(app.images.is_pending("/photos/1.jpg"));
        assert!(!app.images.is_pending("/photos/7.jpg"));
        assert!(!app.images.is_pending("/photos/0.jpg"));
        assert_eq!(app.title(), format!("2.jpg - {}", app.i18n.tr("window-title")));
    }

    #[test]
    fn fetched_image_is_cached() {
        let mut app = app_with_results(2);
        let _ = app.update(Message::Gallery(gallery::Message::CardPressed(0)));
        let _ = app.update(Message::ImageFetched {
            path: "/photos/0.jpg".into(),
            result: Ok(vec![0, 1, 2]),
        });
        assert!(app.images.contains("/photos/0.jpg"));
        assert!(!app.images.is_pending("/photos/0.jpg"));
    }

    #[test]
    fn escape_closes_carousel() {
        let mut app = app_with_results(4);
        let _ = app.update(Message::Gallery(gallery::Message::CardPressed(1)));
        let _ = app.update(Message::Carousel(CarouselMessage::KeyPressed(
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
        )));
        assert!(!app.carousel.is_open());
        assert!(!app.carousel.scroll_locked());
    }

    #[test]
    fn missing_query_image_sets_status() {
        let mut app = App::default();
        app.search.set_folder("/photos".into());
        let _ = app.update(Message::Search(search_panel::Message::Submit));
        assert_eq!(app.status, Some(StatusLine::error("status-missing-query")));
    }

    #[test]
    fn submitting_search_remembers_folder() {
        let dir = tempdir().unwrap();
        let mut app = App::default();
        app.config_dir = Some(dir.path().to_path_buf());
        app.search.set_query_image(PathBuf::from("/tmp/query.jpg"));
        app.search.set_folder("/photos/cats".into());

        let _ = app.update(Message::Search(search_panel::Message::Submit));

        assert!(app.search.is_searching());
        assert_eq!(app.status, Some(StatusLine::info("search-in-progress")));
        let (saved, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(saved.search.last_folder.as_deref(), Some("/photos/cats"));
    }

    #[test]
    fn dropped_image_becomes_the_query() {
        let mut app = App::default();
        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/cat.PNG")));
        assert_eq!(app.search.query_image(), Some(Path::new("/tmp/cat.PNG")));
        assert_eq!(app.status, None);
    }

    #[test]
    fn dropped_folder_becomes_the_search_folder() {
        let dir = tempdir().unwrap();
        let mut app = App::default();
        let _ = app.update(Message::FileDropped(dir.path().to_path_buf()));
        assert_eq!(app.search.folder(), dir.path().to_str().unwrap());
    }

    #[test]
    fn unsupported_drop_sets_status() {
        let mut app = App::default();
        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/notes.txt")));
        assert_eq!(app.search.query_image(), None);
        assert_eq!(app.status, Some(StatusLine::error("status-unsupported-drop")));
    }

    #[test]
    fn drop_over_open_carousel_is_ignored() {
        let mut app = app_with_results(3);
        let _ = app.update(Message::Gallery(gallery::Message::CardPressed(0)));
        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/cat.jpg")));
        assert_eq!(app.search.query_image(), None);
    }

    #[test]
    fn fetched_image_header_sizes_unsized_results() {
        let mut app = App::default();
        let unsized_results = vec![ImageResult::new("/data/wide.jpg", Score::new(0.9), 0, 0)];
        let _ = app.update(Message::SearchCompleted(Ok(unsized_results)));
        let _ = app.update(Message::Gallery(gallery::Message::CardPressed(0)));

        let _ = app.update(Message::ImageFetched {
            path: "/data/wide.jpg".into(),
            result: Ok(crate::media::encode_png(32, 18)),
        });

        let bounds = app.carousel.target_layout()[0].placement.bounds;
        assert!((bounds.width / bounds.height - 32.0 / 18.0).abs() < 0.01);
        assert_eq!(app.gallery.results()[0].width, 32);
        assert!(app.images.contains("/data/wide.jpg"));
    }

    #[test]
    fn window_resize_reaches_carousel() {
        let mut app = App::default();
        let size = iced::Size::new(1920.0, 1080.0);
        let _ = app.update(Message::WindowResized(size));
        assert_eq!(app.carousel.viewport(), size);
    }

    #[test]
    fn status_line_renders_count() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        let text = StatusLine::results(7).render(&i18n);
        assert!(text.contains('7'), "{text}");
    }
}
