mod constants;
mod layout;
mod paging;
mod ui;

use crate::config::AppConfig;
use gallery_core::Result;
use gallery_core::cat_api::{CatApiClient, CatImage};
use gallery_core::intersection::ViewportObserver;
use gallery_core::load_more::{LoadKind, LoadMoreController};
use gallery_core::slots::SlotSequence;
use iced::Task;
use tracing::info;

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use layout::GridLayout;
pub(in crate::app) use paging::PageCursor;
pub(in crate::app) use ui::{ErrorBanner, ViewportMetrics};

/// Slots on screen plus the controller deciding when to grow them.
pub(in crate::app) struct GalleryState {
    pub(in crate::app) slots: SlotSequence<CatImage>,
    pub(in crate::app) controller: LoadMoreController<ViewportObserver>,
    /// Page offsets of started fetches, for ordered listings.
    pub(in crate::app) pages: PageCursor,
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) client: CatApiClient,
    pub(super) gallery: GalleryState,
    pub(super) viewport: ViewportMetrics,
    pub(super) error: Option<ErrorBanner>,
}

impl App {
    /// Mounts the gallery: placeholders for the first page and a bound sentinel.
    pub(crate) fn new(config: AppConfig, client: CatApiClient) -> Result<App> {
        let config = config.normalized();
        let slots = SlotSequence::with_placeholders(i64::from(config.initial_page_size))?;
        let controller = LoadMoreController::bind(
            ViewportObserver::new(),
            Some(SENTINEL_KEY),
            config.load_more_offset_px,
            config.load_policy,
        )?;
        info!(
            initial = config.initial_page_size,
            batch = config.load_more_size,
            offset_px = config.load_more_offset_px,
            policy = %config.load_policy,
            "Mounted gallery"
        );
        Ok(App {
            viewport: ViewportMetrics {
                scroll_top: 0.0,
                width: config.window_width,
                height: (config.window_height - HEADER_HEIGHT_PX).max(0.0),
            },
            gallery: GalleryState {
                slots,
                controller,
                pages: PageCursor::new(config.load_more_size),
            },
            error: None,
            client,
            config,
        })
    }

    /// Starts the initial fetch and returns the app with its first task.
    pub(crate) fn bootstrap(mut self) -> (App, Task<Message>) {
        let effects = self.start_initial_load();
        let task = Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)));
        (self, task)
    }

    pub(super) fn start_initial_load(&mut self) -> Vec<super::update::Effect> {
        let mut effects = Vec::new();
        if let Some(dispatch) = self.gallery.controller.request(LoadKind::Initial) {
            self.begin_load(dispatch, &mut effects);
        }
        effects
    }

    pub(super) fn grid_layout(&self) -> GridLayout {
        GridLayout::measure(
            self.gallery.slots.len(),
            self.viewport.width,
            self.config.tile_min_width,
            self.config.tile_height,
        )
    }
}
