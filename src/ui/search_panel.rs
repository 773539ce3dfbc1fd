// SPDX-License-Identifier: MPL-2.0
//! Search form: query image, folder, minimum score and batch size.
//!
//! The panel only validates and assembles a [`SearchQuery`]; file dialogs and
//! the HTTP request are started by the application from the emitted
//! [`Event`]s.

use crate::config::{SearchConfig, MAX_MIN_SCORE, MIN_MIN_SCORE, MIN_SCORE_STEP};
use crate::domain::search::{BatchSize, Score, SearchQuery};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::Spinner;
use iced::widget::{button, column, container, image, row, slider, text, text_input, Space};
use iced::{alignment, ContentFit, Element, Length};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct State {
    query_path: Option<PathBuf>,
    folder: String,
    min_score: f32,
    batch_input: String,
    searching_since: Option<Instant>,
}

#[derive(Debug, Clone)]
pub enum Message {
    PickQueryImage,
    FolderChanged(String),
    BrowseFolder,
    BrowseServerFolder,
    MinScoreChanged(f32),
    BatchSizeChanged(String),
    Submit,
}

/// Requests emitted by the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    PickQueryImage,
    /// Pick a folder with the local file dialog.
    PickFolder,
    /// Ask the backend host to pick a folder.
    PickServerFolder,
    Search(SearchQuery),
    /// The form is incomplete; carries the i18n key of the status message.
    Invalid(&'static str),
}

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

impl Default for State {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl State {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            query_path: None,
            folder: config.last_folder.clone().unwrap_or_default(),
            min_score: config.min_score(),
            batch_input: config.batch_size().to_string(),
            searching_since: None,
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::PickQueryImage => Event::PickQueryImage,
            Message::FolderChanged(folder) => {
                self.folder = folder;
                Event::None
            }
            Message::BrowseFolder => Event::PickFolder,
            Message::BrowseServerFolder => Event::PickServerFolder,
            Message::MinScoreChanged(value) => {
                self.min_score = value.clamp(MIN_MIN_SCORE, MAX_MIN_SCORE);
                Event::None
            }
            Message::BatchSizeChanged(value) => {
                if value.chars().all(|c| c.is_ascii_digit()) {
                    self.batch_input = value;
                }
                Event::None
            }
            Message::Submit => self.submit(now),
        }
    }

    fn submit(&mut self, now: Instant) -> Event {
        if self.is_searching() {
            return Event::None;
        }
        match self.query() {
            Ok(query) => {
                self.searching_since = Some(now);
                Event::Search(query)
            }
            Err(key) => Event::Invalid(key),
        }
    }

    /// Builds the query from the current form values.
    pub fn query(&self) -> Result<SearchQuery, &'static str> {
        let Some(image_path) = self.query_path.clone() else {
            return Err("status-missing-query");
        };
        let folder = self.folder.trim();
        if folder.is_empty() {
            return Err("status-missing-folder");
        }

        let batch_size = self
            .batch_input
            .parse::<u32>()
            .map(BatchSize::new)
            .unwrap_or_default();

        let mut query = SearchQuery::new(image_path, folder);
        query.min_score = Score::new(self.min_score);
        query.batch_size = batch_size;
        Ok(query)
    }

    pub fn set_query_image(&mut self, path: PathBuf) {
        self.query_path = Some(path);
    }

    pub fn set_folder(&mut self, folder: String) {
        self.folder = folder;
    }

    /// Marks the in-flight search as finished.
    pub fn finish_search(&mut self) {
        self.searching_since = None;
    }

    #[must_use]
    pub fn query_image(&self) -> Option<&Path> {
        self.query_path.as_deref()
    }

    #[must_use]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    #[must_use]
    pub fn min_score(&self) -> f32 {
        self.min_score
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching_since.is_some()
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let title = text(i18n.tr("search-panel-title")).size(typography::TITLE_MD);

        let preview: Element<'a, Message> = match &self.query_path {
            Some(path) => image(image::Handle::from_path(path))
                .width(Length::Fill)
                .height(Length::Fixed(sizing::QUERY_PREVIEW_HEIGHT))
                .content_fit(ContentFit::Contain)
                .into(),
            None => container(text(i18n.tr("search-query-placeholder")).size(typography::CAPTION))
                .width(Length::Fill)
                .height(Length::Fixed(sizing::QUERY_PREVIEW_HEIGHT))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(styles::container::placeholder)
                .into(),
        };

        let pick_query = button(text(i18n.tr("search-query-button")))
            .on_press_maybe((!self.is_searching()).then_some(Message::PickQueryImage))
            .width(Length::Fill)
            .style(styles::button::secondary);

        let folder_label = i18n.tr("search-folder-label");
        let folder_input = text_input(&folder_label, &self.folder)
            .on_input(Message::FolderChanged)
            .on_submit(Message::Submit)
            .padding(spacing::XS)
            .size(typography::BODY)
            .width(Length::Fill);
        let browse = row![
            button(text(i18n.tr("search-browse-local")).size(typography::BODY))
                .on_press(Message::BrowseFolder)
                .style(styles::button::secondary),
            button(text(i18n.tr("search-browse-server")).size(typography::BODY))
                .on_press(Message::BrowseServerFolder)
                .style(styles::button::secondary),
        ]
        .spacing(spacing::XS);

        let score_section = column![
            row![
                text(i18n.tr("search-min-score-label")).size(typography::BODY),
                Space::new().width(Length::Fill),
                text(format_min_score(self.min_score)).size(typography::BODY),
            ],
            slider(
                MIN_MIN_SCORE..=MAX_MIN_SCORE,
                self.min_score,
                Message::MinScoreChanged
            )
            .step(MIN_SCORE_STEP),
        ]
        .spacing(spacing::XXS);

        let batch_label = i18n.tr("search-batch-size-label");
        let batch_section = column![
            text(batch_label.clone()).size(typography::BODY),
            text_input(&batch_label, &self.batch_input)
                .on_input(Message::BatchSizeChanged)
                .padding(spacing::XS)
                .size(typography::BODY)
                .width(Length::Fill),
        ]
        .spacing(spacing::XXS);

        let submit_label = if self.is_searching() {
            i18n.tr("search-in-progress")
        } else {
            i18n.tr("search-button")
        };
        let mut submit_row = row![button(text(submit_label))
            .on_press_maybe((!self.is_searching()).then_some(Message::Submit))
            .width(Length::Fill)
            .style(styles::button::primary)]
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center);
        if let Some(started) = self.searching_since {
            submit_row = submit_row
                .push(Spinner::new(palette::PRIMARY_500, started.elapsed()).into_element());
        }

        container(
            column![
                title,
                preview,
                pick_query,
                text(folder_label.clone()).size(typography::BODY),
                folder_input,
                browse,
                score_section,
                batch_section,
                submit_row,
            ]
            .spacing(spacing::SM),
        )
        .padding(spacing::MD)
        .width(Length::Fixed(sizing::SEARCH_PANEL_WIDTH))
        .style(styles::container::panel)
        .into()
    }
}

/// Slider value as shown next to the label, e.g. `0.35`.
#[must_use]
pub fn format_min_score(value: f32) -> String {
    format!("{value:.2}")
}
