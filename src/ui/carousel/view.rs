// SPDX-License-Identifier: MPL-2.0
//! Rendering of the carousel surface.
//!
//! Each slide is a fixed-size image pushed to its interpolated position by
//! the padding of a full-size container, and the slides are layered in a
//! `Stack` by paint order over a click-to-close backdrop.

use super::{Message, Placement, State};
use crate::domain::search::ImageResult;
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::ui::design_tokens::{opacity, palette, radius, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, container, image, mouse_area, row, text, Space, Stack};
use iced::{alignment, Background, Border, Color, ContentFit, Element, Length, Padding, Theme};
use std::time::Instant;

/// Borrowed data the carousel needs to render.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub images: &'a ImageCache,
}

impl State {
    /// Renders the full-screen surface.
    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let now = Instant::now();

        let backdrop = mouse_area(
            container(Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(backdrop_style),
        )
        .on_press(Message::BackdropPressed);

        let mut slides: Vec<(Placement, usize, &ImageResult)> = self
            .sequence
            .iter()
            .filter_map(|(slot, id, item)| {
                let placement = self.scheduler.current(id, now)?;
                placement.is_visible().then_some((placement, slot, item))
            })
            .collect();
        slides.sort_by_key(|(placement, _, _)| placement.z_index);

        let mut layers: Vec<Element<'a, Message>> = Vec::with_capacity(slides.len() + 3);
        layers.push(backdrop.into());

        for (placement, slot, item) in slides {
            layers.push(positioned(slide(ctx, item, slot, &placement), &placement));

            if slot == 0 {
                let content_opacity = self.scheduler.content_opacity(now);
                if content_opacity > 0.0 {
                    layers.push(positioned(
                        caption(ctx.i18n, item, &placement, content_opacity),
                        &placement,
                    ));
                }
            }
        }

        layers.push(controls(ctx.i18n, self.sequence.len()));

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn slide<'a>(
    ctx: ViewContext<'a>,
    item: &'a ImageResult,
    slot: usize,
    placement: &Placement,
) -> Element<'a, Message> {
    let width = Length::Fixed(placement.bounds.width);
    let height = Length::Fixed(placement.bounds.height);

    let content: Element<'a, Message> = match ctx.images.peek(&item.path) {
        Some(handle) => image(handle)
            .width(width)
            .height(height)
            .content_fit(if slot == 0 {
                ContentFit::Contain
            } else {
                ContentFit::Cover
            })
            .opacity(placement.opacity)
            .into(),
        None => container(text(ctx.i18n.tr("carousel-loading")).size(typography::CAPTION))
            .width(width)
            .height(height)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(placeholder_style(placement.opacity))
            .into(),
    };

    // Every slide captures its own presses so they never reach the backdrop;
    // the router ignores the active and hidden slots.
    mouse_area(content)
        .on_press(Message::SlotPressed(slot))
        .interaction(if placement.is_interactive() {
            iced::mouse::Interaction::Pointer
        } else {
            iced::mouse::Interaction::Idle
        })
        .into()
}

fn caption<'a>(
    i18n: &I18n,
    item: &'a ImageResult,
    placement: &Placement,
    alpha: f32,
) -> Element<'a, Message> {
    let color = Color { a: alpha, ..palette::WHITE };

    let score = i18n.tr_with_args("carousel-score", &[("score", item.score.label().as_str())]);

    let mut details = column![
        text(item.filename.as_str())
            .size(typography::TITLE_SM)
            .color(color),
        text(score).size(typography::BODY).color(color),
    ]
    .spacing(spacing::XXS);

    if let Some(description) = &item.description {
        details = details.push(text(description.as_str()).size(typography::BODY).color(color));
    }

    container(
        container(details)
            .padding(spacing::SM)
            .width(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(Color {
                    a: opacity::OVERLAY_MEDIUM * alpha,
                    ..palette::BLACK
                })),
                ..Default::default()
            }),
    )
    .width(Length::Fixed(placement.bounds.width))
    .height(Length::Fixed(placement.bounds.height))
    .align_y(alignment::Vertical::Bottom)
    .into()
}

fn controls<'a>(i18n: &I18n, len: usize) -> Element<'a, Message> {
    let close = button(text(i18n.tr("carousel-close-button")))
        .on_press(Message::Close)
        .padding([spacing::XS, spacing::SM])
        .style(control_style());

    let top = row![Space::new().width(Length::Fill), close].padding(spacing::MD);

    let mut layout = column![top].width(Length::Fill).height(Length::Fill);

    if len > 1 {
        let prev = button(text(i18n.tr("carousel-prev-button")).size(typography::TITLE_MD))
            .on_press(Message::Prev)
            .padding([spacing::SM, spacing::MD])
            .style(control_style());
        let next = button(text(i18n.tr("carousel-next-button")).size(typography::TITLE_MD))
            .on_press(Message::Next)
            .padding([spacing::SM, spacing::MD])
            .style(control_style());

        layout = layout.push(
            container(row![prev, Space::new().width(Length::Fill), next])
                .padding([0.0, spacing::MD])
                .height(Length::Fill)
                .align_y(alignment::Vertical::Center),
        );
    }

    layout.into()
}

fn control_style() -> impl Fn(&Theme, button::Status) -> button::Style {
    styles::button::overlay(palette::WHITE, opacity::OVERLAY_MEDIUM, opacity::OVERLAY_HOVER)
}

/// Places `content` at the top-left corner of `placement.bounds`.
fn positioned<'a>(content: Element<'a, Message>, placement: &Placement) -> Element<'a, Message> {
    container(content)
        .padding(Padding {
            top: placement.bounds.y.max(0.0),
            right: 0.0,
            bottom: 0.0,
            left: placement.bounds.x.max(0.0),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..palette::GRAY_900
        })),
        ..Default::default()
    }
}

fn placeholder_style(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..palette::GRAY_700
        })),
        text_color: Some(Color { a: alpha, ..palette::WHITE }),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
