// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The search form and the gallery share the window; the carousel, when
//! open, is layered on top of both and swallows every pointer event.

use super::{Message, StatusLine};
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::ui::carousel::{self, ViewContext as CarouselViewContext};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::gallery::{self, ViewContext as GalleryViewContext};
use crate::ui::search_panel::{self, ViewContext as SearchViewContext};
use crate::ui::styles;
use iced::widget::{column, container, opaque, row, stack, text};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub search: &'a search_panel::State,
    pub gallery: &'a gallery::State,
    pub carousel: &'a carousel::State,
    pub images: &'a ImageCache,
    pub thumbnails: &'a ImageCache,
    pub status: Option<&'a StatusLine>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let panel = ctx
        .search
        .view(SearchViewContext { i18n: ctx.i18n })
        .map(Message::Search);

    let results = ctx
        .gallery
        .view(GalleryViewContext {
            i18n: ctx.i18n,
            thumbnails: ctx.thumbnails,
            scroll_locked: ctx.carousel.scroll_locked(),
        })
        .map(Message::Gallery);

    let mut main = column![row![panel, results]
        .spacing(spacing::MD)
        .height(Length::Fill)]
    .padding(spacing::MD)
    .spacing(spacing::XS)
    .width(Length::Fill)
    .height(Length::Fill);

    if let Some(status) = ctx.status {
        main = main.push(status_bar(ctx.i18n, status));
    }

    if !ctx.carousel.is_open() {
        return main.into();
    }

    let overlay = ctx
        .carousel
        .view(CarouselViewContext {
            i18n: ctx.i18n,
            images: ctx.images,
        })
        .map(Message::Carousel);

    stack![main, opaque(overlay)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn status_bar<'a>(i18n: &I18n, status: &StatusLine) -> Element<'a, Message> {
    container(text(status.render(i18n)).size(typography::BODY))
        .width(Length::Fill)
        .style(styles::container::status(status.is_error()))
        .into()
}
