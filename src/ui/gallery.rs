// SPDX-License-Identifier: MPL-2.0
//! Result gallery: a fixed-column grid of ranked matches.
//!
//! Clicking a card asks the application to open the carousel on that result.
//! The grid sits in a [`ScrollLock`] so it stays put while the carousel is
//! open above it.

use crate::domain::search::ImageResult;
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::ScrollLock;
use iced::widget::{button, column, container, image, scrollable, text, Column, Row, Space, Stack};
use iced::{alignment, ContentFit, Element, Length};

#[derive(Debug, Clone, Default)]
pub struct State {
    results: Vec<ImageResult>,
    searched: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    CardPressed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Open the carousel with the result at `index` active.
    OpenCarousel { index: usize },
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub thumbnails: &'a ImageCache,
    pub scroll_locked: bool,
}

impl State {
    /// Replaces the results with those of a finished search.
    pub fn set_results(&mut self, results: Vec<ImageResult>) {
        self.results = results;
        self.searched = true;
    }

    /// Fills in the size of results the backend sent without one, so a
    /// later carousel opened from the gallery starts with the right layout.
    pub fn set_dimensions(&mut self, path: &str, width: u32, height: u32) {
        for item in &mut self.results {
            if item.path == path && !item.has_dimensions() {
                item.width = width;
                item.height = height;
            }
        }
    }

    #[must_use]
    pub fn results(&self) -> &[ImageResult] {
        &self.results
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::CardPressed(index) if index < self.results.len() => {
                Event::OpenCarousel { index }
            }
            Message::CardPressed(_) => Event::None,
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        if self.results.is_empty() {
            let key = if self.searched {
                "gallery-empty"
            } else {
                "gallery-hint"
            };
            return container(text(ctx.i18n.tr(key)).size(typography::BODY))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into();
        }

        let header = text(
            ctx.i18n
                .tr_with_count("gallery-result-count", self.results.len()),
        )
        .size(typography::TITLE_SM);

        let mut grid = Column::new().spacing(spacing::MD).push(header);
        for (row_index, chunk) in self.results.chunks(sizing::GALLERY_COLUMNS).enumerate() {
            let mut cards = Row::new().spacing(spacing::MD);
            for (offset, item) in chunk.iter().enumerate() {
                let index = row_index * sizing::GALLERY_COLUMNS + offset;
                cards = cards.push(card(&ctx, item, index));
            }
            // Keep the last row's cards the same width as the others.
            for _ in chunk.len()..sizing::GALLERY_COLUMNS {
                cards = cards.push(Space::new().width(Length::FillPortion(1)));
            }
            grid = grid.push(cards);
        }

        ScrollLock::new(scrollable(grid.padding(spacing::MD)).height(Length::Fill))
            .locked(ctx.scroll_locked)
            .into()
    }
}

fn card<'a>(ctx: &ViewContext<'a>, item: &'a ImageResult, index: usize) -> Element<'a, Message> {
    let height = Length::Fixed(sizing::GALLERY_THUMBNAIL_HEIGHT);

    let thumbnail: Element<'a, Message> = match ctx.thumbnails.peek(&item.path) {
        Some(handle) => image(handle)
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(ctx.i18n.tr("carousel-loading")).size(typography::CAPTION))
            .width(Length::Fill)
            .height(height)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::placeholder)
            .into(),
    };

    let badge = container(
        container(text(item.score.label()).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::overlay::indicator(radius::FULL)),
    )
    .padding(spacing::XS)
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Right);

    let body = column![
        Stack::with_children([thumbnail, badge.into()]),
        text(item.filename.as_str()).size(typography::BODY),
    ]
    .spacing(spacing::XS);

    button(body)
        .on_press(Message::CardPressed(index))
        .padding(spacing::XS)
        .width(Length::FillPortion(1))
        .style(styles::button::card)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::Score;

    fn results(count: usize) -> Vec<ImageResult> {
        (0..count)
            .map(|i| ImageResult::new(format!("/photos/{i}.jpg"), Score::new(0.5), 100, 100))
            .collect()
    }

    #[test]
    fn pressing_a_card_opens_the_carousel() {
        let mut state = State::default();
        state.set_results(results(5));
        assert_eq!(
            state.update(Message::CardPressed(3)),
            Event::OpenCarousel { index: 3 }
        );
    }

    #[test]
    fn out_of_range_card_is_ignored() {
        let mut state = State::default();
        state.set_results(results(2));
        assert_eq!(state.update(Message::CardPressed(2)), Event::None);
    }

    #[test]
    fn set_results_replaces_previous() {
        let mut state = State::default();
        state.set_results(results(6));
        state.set_results(results(1));
        assert_eq!(state.results().len(), 1);
    }

    #[test]
    fn set_dimensions_keeps_reported_sizes() {
        let mut state = State::default();
        let mut items = results(2);
        items[1].width = 0;
        items[1].height = 0;
        state.set_results(items);

        state.set_dimensions("/photos/0.jpg", 1, 2);
        state.set_dimensions("/photos/1.jpg", 1920, 1080);

        assert_eq!(state.results()[0].width, 100);
        assert_eq!(
            (state.results()[1].width, state.results()[1].height),
            (1920, 1080)
        );
    }
}
