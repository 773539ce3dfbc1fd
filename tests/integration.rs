// SPDX-License-Identifier: MPL-2.0
use iced::Size;
use search_lens::config::{self, Config};
use search_lens::domain::search::{ImageResult, Score};
use search_lens::i18n::fluent::I18n;
use search_lens::ui::carousel::{
    self, layout, CarouselSequence, Effect, Interaction, Message, INITIAL_VIEWPORT,
};
use search_lens::ui::theming::ThemeMode;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn image(name: &str, width: u32, height: u32) -> ImageResult {
    ImageResult::new(format!("/photos/{name}.jpg"), Score::new(0.8), width, height)
}

fn images(count: usize) -> Vec<ImageResult> {
    (0..count).map(|i| image(&i.to_string(), 800, 600)).collect()
}

fn active_path(state: &carousel::State) -> String {
    state.active().map(|item| item.path.clone()).unwrap_or_default()
}

#[test]
fn three_mixed_images_start_from_the_middle() {
    let results = vec![image("a", 500, 300), image("b", 300, 500), image("c", 400, 400)];
    let sequence = CarouselSequence::load(results, 1);

    let order: Vec<_> = sequence.iter().map(|(_, _, item)| item.filename.clone()).collect();
    assert_eq!(order, ["b.jpg", "c.jpg", "a.jpg"]);

    let placements = layout::compute_layout(&sequence, Size::new(1200.0, 800.0));
    assert!(placements.iter().all(|slot| slot.placement.is_visible()));

    let active = &placements[0].placement;
    assert!(active.bounds.width <= 1200.0 * layout::ACTIVE_FRACTION);
    assert!(active.bounds.height <= 800.0 * layout::ACTIVE_FRACTION);
    let ratio = active.bounds.width / active.bounds.height;
    assert!((ratio - 0.6).abs() < 0.01, "{ratio}");
    assert_eq!(placements[1].placement.interaction, Interaction::RotateToFront(1));
}

#[test]
fn long_sequences_hide_everything_past_the_previews() {
    let sequence = CarouselSequence::load(images(7), 0);
    let placements = layout::compute_layout(&sequence, INITIAL_VIEWPORT);

    for slot in &placements {
        let expect_visible = slot.slot <= layout::VISIBLE_PREVIEWS;
        assert_eq!(slot.placement.is_visible(), expect_visible, "slot {}", slot.slot);
    }
}

#[test]
fn carousel_session_through_public_api() {
    let mut state = carousel::State::default();
    let results = images(6);

    let effect = state.open(results.clone(), 0);
    assert!(matches!(effect, Effect::Opened { ref prefetch } if prefetch.len() == 6));
    assert!(state.is_open());
    assert!(state.scroll_locked());

    state.next();
    state.next();
    assert_eq!(active_path(&state), results[2].path);
    state.prev();
    state.prev();
    assert_eq!(active_path(&state), results[0].path);

    // Preview in slot 3 becomes active.
    state.handle(Message::SlotPressed(3));
    assert_eq!(active_path(&state), results[3].path);

    // Hidden slots and the active slide do not react.
    state.handle(Message::SlotPressed(5));
    state.handle(Message::SlotPressed(0));
    assert_eq!(active_path(&state), results[3].path);

    let mut paths: Vec<_> = state.sequence().iter().map(|(_, _, item)| item.path.clone()).collect();
    paths.sort();
    let mut expected: Vec<_> = results.iter().map(|item| item.path.clone()).collect();
    expected.sort();
    assert_eq!(paths, expected);

    assert_eq!(state.handle(Message::BackdropPressed), Effect::Closed);
    assert!(!state.is_open());
    assert!(!state.scroll_locked());
    assert_eq!(state.next(), Effect::None);
}

#[test]
fn show_reopens_previously_loaded_results() {
    let mut state = carousel::State::default();
    state.load_images(images(3), 2);
    assert!(!state.is_open());

    state.show();
    assert!(state.is_open());
    assert_eq!(active_path(&state), "/photos/2.jpg");
}

#[test]
fn animation_settles_after_frames() {
    let mut state = carousel::State::default();
    let start = Instant::now();
    state.handle_at(
        Message::Open {
            images: images(5),
            start: 0,
        },
        start,
    );
    state.handle_at(Message::Next, start);
    assert!(!state.scheduler().is_idle(start));

    // First frame re-enables transitions and starts the caption fade, the
    // second one lands after the fade.
    let settled = start + Duration::from_secs(10);
    state.handle_at(Message::Frame(settled), settled);
    assert!(!state.scheduler().is_idle(settled));

    let faded = settled + Duration::from_secs(1);
    state.handle_at(Message::Frame(faded), faded);
    assert!(state.scheduler().is_idle(faded));
    assert_eq!(state.scheduler().content_opacity(faded), 1.0);
}

#[test]
fn config_round_trip_drives_components() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut settings = Config::default();
    settings.general.language = Some("fr".to_string());
    settings.general.theme_mode = ThemeMode::Dark;
    settings.search.server_url = Some("http://search.local:9000/".to_string());
    settings.search.last_folder = Some("/data/cats".to_string());
    settings.carousel.transition_ms = Some(200);
    settings.carousel.serialize_rotations = Some(true);
    config::save_to_path(&settings, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.search.server_url(), "http://search.local:9000");
    assert_eq!(loaded.carousel.transition(), Duration::from_millis(200));
    assert!(loaded.carousel.serialize_rotations());

    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("search-button"), "Rechercher");
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[search\nmin_score = ")
        .expect("Failed to write config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(loaded, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}
