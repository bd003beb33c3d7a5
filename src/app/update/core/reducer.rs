use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use tracing::debug;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Scrolled {
                scroll_top,
                viewport_width,
                viewport_height,
            } => self.handle_scrolled(scroll_top, viewport_width, viewport_height, &mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::LoadMoreRequested => self.handle_load_more_requested(&mut effects),
            Message::BatchLoaded { dispatch, result } => {
                self.handle_batch_loaded(dispatch, result, &mut effects);
            }
            Message::DismissError => {
                debug!("Error banner dismissed");
                self.error = None;
            }
            Message::Tick(now) => self.handle_tick(now),
            Message::Quit => effects.push(Effect::Quit),
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorBanner;
    use crate::config::AppConfig;
    use gallery_core::GalleryError;
    use gallery_core::cat_api::{CatApiClient, CatImage, ImageOrder};
    use gallery_core::load_more::{Dispatch, LoadKind, LoadPolicy, Ticket};
    use gallery_core::slots::SequencePhase;
    use iced::keyboard::{Key, Modifiers};
    use std::time::{Duration, Instant};

    fn build_test_app(config: AppConfig) -> App {
        let client = CatApiClient::new("http://localhost:9", Some("test-key".to_string()))
            .expect("client");
        App::new(config, client).expect("app")
    }

    fn images(range: std::ops::Range<u32>) -> Vec<CatImage> {
        range
            .map(|i| CatImage {
                id: format!("cat{i}"),
                url: format!("https://cdn2.thecatapi.com/images/cat{i}.jpg"),
                width: Some(640),
                height: Some(480),
                breeds: Vec::new(),
                categories: Vec::new(),
            })
            .collect()
    }

    fn fetches(effects: &[Effect]) -> Vec<(Dispatch, u32, Option<u32>)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::FetchBatch { dispatch, options } => {
                    Some((*dispatch, options.limit, options.page))
                }
                Effect::Quit => None,
            })
            .collect()
    }

    fn scroll(app: &mut App, scroll_top: f32) -> Vec<Effect> {
        app.reduce(Message::Scrolled {
            scroll_top,
            viewport_width: 1232.0,
            viewport_height: 600.0,
        })
    }

    /// Mounted, initial page resolved, viewport at the top with 4 columns.
    fn loaded_app(config: AppConfig) -> App {
        let mut app = build_test_app(config);
        let initial = fetches(&app.start_initial_load());
        let (dispatch, _, _) = initial[0];
        let effects = app.reduce(Message::BatchLoaded {
            dispatch,
            result: Ok(images(0..24)),
        });
        assert!(fetches(&effects).is_empty());
        assert!(scroll(&mut app, 0.0).is_empty());
        app
    }

    #[test]
    fn mount_shows_initial_placeholders_and_fetches_first_page() {
        let mut app = build_test_app(AppConfig::default());
        assert_eq!(app.gallery.slots.len(), 24);
        assert_eq!(app.gallery.slots.placeholder_len(), 24);

        let initial = fetches(&app.start_initial_load());
        assert_eq!(initial.len(), 1);
        let (dispatch, limit, page) = initial[0];
        assert_eq!(dispatch.kind, LoadKind::Initial);
        assert_eq!(limit, 24);
        assert_eq!(page, None, "random order is not paged");

        app.reduce(Message::BatchLoaded {
            dispatch,
            result: Ok(images(0..24)),
        });
        assert_eq!(app.gallery.slots.loaded_len(), 24);
        assert_eq!(app.gallery.slots.phase(), SequencePhase::Stable);
        assert!(!app.gallery.controller.is_busy());
    }

    #[test]
    fn scrolling_near_the_sentinel_appends_a_batch() {
        let mut app = loaded_app(AppConfig::default());
        // Six rows put the sentinel at 16 + 6 * 312 = 1888.
        assert!(scroll(&mut app, 500.0).is_empty());

        let started = fetches(&scroll(&mut app, 1000.0));
        assert_eq!(started.len(), 1);
        let (dispatch, limit, _) = started[0];
        assert_eq!(dispatch.kind, LoadKind::More);
        assert_eq!(limit, 12);
        assert_eq!(app.gallery.slots.len(), 36);
        assert_eq!(app.gallery.slots.placeholder_len(), 12);

        app.reduce(Message::BatchLoaded {
            dispatch,
            result: Ok(images(24..36)),
        });
        assert_eq!(app.gallery.slots.loaded_len(), 36);
        let last = app.gallery.slots.get(35).and_then(|slot| slot.item());
        assert_eq!(last.map(|image| image.id.as_str()), Some("cat35"));
    }

    #[test]
    fn triggers_while_loading_collapse_into_one_follow_up() {
        let mut app = loaded_app(AppConfig::default());
        let (first, _, _) = fetches(&scroll(&mut app, 1000.0))[0];

        // Leave and re-enter further down while the first batch is in flight.
        assert!(scroll(&mut app, 0.0).is_empty());
        assert!(scroll(&mut app, 2700.0).is_empty());
        assert!(app.gallery.controller.has_deferred());
        assert!(fetches(&app.reduce(Message::LoadMoreRequested)).is_empty());
        assert_eq!(app.gallery.slots.len(), 36, "deferred triggers append nothing yet");

        let follow_up = fetches(&app.reduce(Message::BatchLoaded {
            dispatch: first,
            result: Ok(images(24..36)),
        }));
        assert_eq!(follow_up.len(), 1);
        assert_eq!(follow_up[0].0.kind, LoadKind::More);
        assert_eq!(follow_up[0].0.ticket, Ticket(first.ticket.0 + 1));
        assert_eq!(app.gallery.slots.len(), 48);
        assert_eq!(app.gallery.controller.in_flight(), 1);
    }

    #[test]
    fn unserialized_policy_starts_every_trigger() {
        let config = AppConfig {
            load_policy: LoadPolicy::Unserialized,
            ..AppConfig::default()
        };
        let mut app = loaded_app(config);
        assert_eq!(fetches(&scroll(&mut app, 1000.0)).len(), 1);
        assert_eq!(fetches(&app.reduce(Message::LoadMoreRequested)).len(), 1);
        assert_eq!(app.gallery.controller.in_flight(), 2);
        assert_eq!(app.gallery.slots.len(), 48);
    }

    #[test]
    fn failed_batch_keeps_placeholders_and_shows_banner() {
        let mut app = loaded_app(AppConfig::default());
        let (dispatch, _, _) = fetches(&scroll(&mut app, 1000.0))[0];

        app.reduce(Message::BatchLoaded {
            dispatch,
            result: Err(GalleryError::Network("The Cat API responded with 500".into())),
        });
        assert_eq!(app.gallery.slots.len(), 36);
        assert_eq!(app.gallery.slots.placeholder_len(), 12);
        assert!(!app.gallery.controller.is_busy());
        let banner = app.error.as_ref().expect("banner");
        assert_eq!(banner.message, "The Cat API responded with 500");

        let shown_at = banner.shown_at;
        app.reduce(Message::Tick(shown_at + Duration::from_secs(1)));
        assert!(app.error.is_some());
        app.reduce(Message::Tick(shown_at + Duration::from_secs(6)));
        assert!(app.error.is_none());
    }

    #[test]
    fn short_batch_leaves_orphaned_placeholders() {
        let mut app = loaded_app(AppConfig::default());
        let (dispatch, _, _) = fetches(&scroll(&mut app, 1000.0))[0];
        app.reduce(Message::BatchLoaded {
            dispatch,
            result: Ok(images(24..32)),
        });
        assert_eq!(app.gallery.slots.len(), 36);
        assert_eq!(app.gallery.slots.loaded_len(), 32);
        assert_eq!(app.gallery.slots.placeholder_len(), 4);
    }

    #[test]
    fn dismiss_clears_banner() {
        let mut app = loaded_app(AppConfig::default());
        app.error = Some(ErrorBanner::new("offline"));
        app.reduce(Message::Tick(Instant::now()));
        assert!(app.error.is_some());
        app.reduce(Message::DismissError);
        assert!(app.error.is_none());
    }

    #[test]
    fn paged_orders_request_the_next_page() {
        let config = AppConfig {
            image_order: ImageOrder::Asc,
            ..AppConfig::default()
        };
        let mut app = build_test_app(config);
        let initial = fetches(&app.start_initial_load());
        assert_eq!(initial[0].2, Some(0));
        app.reduce(Message::BatchLoaded {
            dispatch: initial[0].0,
            result: Ok(images(0..24)),
        });
        let more = fetches(&app.reduce(Message::LoadMoreRequested));
        assert_eq!(more[0].2, Some(2), "24 items already requested in pages of 12");
    }

    #[test]
    fn uneven_page_sizes_never_overlap_or_skip() {
        let config = AppConfig {
            image_order: ImageOrder::Asc,
            initial_page_size: 24,
            load_more_size: 10,
            ..AppConfig::default()
        };
        let mut app = build_test_app(config);
        assert_eq!(app.gallery.slots.len(), 30, "first load rounded to whole pages");

        let initial = fetches(&app.start_initial_load());
        let (dispatch, limit, page) = initial[0];
        assert_eq!((limit, page), (30, Some(0)));
        app.reduce(Message::BatchLoaded {
            dispatch,
            result: Ok(images(0..30)),
        });

        let more = fetches(&app.reduce(Message::LoadMoreRequested));
        let (_, limit, page) = more[0];
        assert_eq!(limit, 10);
        assert_eq!(page.map(|page| page * limit), Some(30), "starts right after item 29");
    }

    #[test]
    fn failed_page_is_requested_again() {
        let config = AppConfig {
            image_order: ImageOrder::Desc,
            ..AppConfig::default()
        };
        let mut app = build_test_app(config);
        let initial = fetches(&app.start_initial_load());
        app.reduce(Message::BatchLoaded {
            dispatch: initial[0].0,
            result: Ok(images(0..24)),
        });

        let (failed, _, page) = fetches(&app.reduce(Message::LoadMoreRequested))[0];
        assert_eq!(page, Some(2));
        app.reduce(Message::BatchLoaded {
            dispatch: failed,
            result: Err(GalleryError::Network("timed out".into())),
        });
        assert_eq!(app.gallery.slots.placeholder_len(), 12);

        let (retry, _, page) = fetches(&app.reduce(Message::LoadMoreRequested))[0];
        assert_eq!(page, Some(2), "the failed page comes back first");
        app.reduce(Message::BatchLoaded {
            dispatch: retry,
            result: Ok(images(24..36)),
        });
        let filled = app.gallery.slots.get(24).and_then(|slot| slot.item());
        assert_eq!(filled.map(|image| image.id.as_str()), Some("cat24"));

        let (_, _, page) = fetches(&app.reduce(Message::LoadMoreRequested))[0];
        assert_eq!(page, Some(3));
    }

    #[test]
    fn keyboard_shortcuts_map_to_actions() {
        let mut app = loaded_app(AppConfig::default());
        let effects = app.reduce(Message::KeyPressed {
            key: Key::Character("Q".into()),
            modifiers: Modifiers::empty(),
        });
        assert!(matches!(effects.as_slice(), [Effect::Quit]));

        let effects = app.reduce(Message::KeyPressed {
            key: Key::Character("r".into()),
            modifiers: Modifiers::empty(),
        });
        assert_eq!(fetches(&effects).len(), 1);

        let effects = app.reduce(Message::KeyPressed {
            key: Key::Character("x".into()),
            modifiers: Modifiers::empty(),
        });
        assert!(effects.is_empty());
    }
}
