use super::super::state::{App, ErrorBanner};
use super::Effect;
use gallery_core::GalleryError;
use gallery_core::cat_api::{CatImage, FetchOptions};
use gallery_core::load_more::{Dispatch, LoadKind};
use gallery_core::slots::SequencePhase;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

impl App {
    /// Prepares the slots for `dispatch` and queues its fetch.
    pub(in crate::app) fn begin_load(&mut self, dispatch: Dispatch, effects: &mut Vec<Effect>) {
        let limit = match dispatch.kind {
            LoadKind::Initial => self.config.initial_page_size,
            LoadKind::More => self.config.load_more_size,
        };

        let offset = self.gallery.pages.claim(dispatch.ticket, limit);
        let request = FetchOptions::new(self.config.image_size, self.config.image_order, limit)
            .after(offset);
        let options = match request {
            Ok(options) => options,
            Err(err) => {
                warn!(ticket = %dispatch.ticket, offset, "Could not build batch request: {err}");
                self.gallery.pages.complete(dispatch.ticket);
                self.finish_load(dispatch, effects);
                return;
            }
        };

        if dispatch.kind == LoadKind::More {
            match self.gallery.slots.append_placeholders(i64::from(limit)) {
                Ok(slots) => self.gallery.slots = slots,
                Err(err) => {
                    warn!(ticket = %dispatch.ticket, "Could not append placeholders: {err}");
                    self.gallery.pages.fail(dispatch.ticket);
                    self.finish_load(dispatch, effects);
                    return;
                }
            }
        }

        info!(
            ticket = %dispatch.ticket,
            kind = %dispatch.kind,
            limit,
            page = ?options.page,
            requested = self.gallery.pages.requested(),
            slots = self.gallery.slots.len(),
            "Requesting batch"
        );
        effects.push(Effect::FetchBatch { dispatch, options });
    }

    pub(super) fn handle_batch_loaded(
        &mut self,
        dispatch: Dispatch,
        result: Result<Vec<CatImage>, GalleryError>,
        effects: &mut Vec<Effect>,
    ) {
        match result {
            Ok(images) => {
                self.gallery.pages.complete(dispatch.ticket);
                let received = images.len();
                let outcome = self.gallery.slots.reconcile_with_report(images);
                let phase = outcome.phase();
                info!(
                    ticket = %dispatch.ticket,
                    kind = %dispatch.kind,
                    received,
                    filled = outcome.filled,
                    surplus = outcome.surplus,
                    orphaned = outcome.orphaned,
                    "Batch reconciled"
                );
                if phase == SequencePhase::PartiallyResolved {
                    debug!(
                        orphaned = outcome.orphaned,
                        "Short batch left placeholders unresolved"
                    );
                }
                self.gallery.slots = outcome.sequence;
            }
            Err(err) => {
                if self.config.image_order.is_paged() {
                    self.gallery.pages.fail(dispatch.ticket);
                } else {
                    self.gallery.pages.complete(dispatch.ticket);
                }
                warn!(
                    ticket = %dispatch.ticket,
                    kind = %dispatch.kind,
                    retry_pages = self.gallery.pages.missed_len(),
                    "Batch failed: {err}"
                );
                self.error = Some(ErrorBanner::new(err.display_message()));
            }
        }

        self.finish_load(dispatch, effects);
        self.sample_sentinel(effects);
    }

    pub(super) fn handle_load_more_requested(&mut self, effects: &mut Vec<Effect>) {
        if let Some(dispatch) = self.gallery.controller.request(LoadKind::More) {
            self.begin_load(dispatch, effects);
        }
    }

    pub(super) fn handle_tick(&mut self, now: Instant) {
        let display_for = Duration::from_secs_f32(self.config.error_display_secs);
        if self
            .error
            .as_ref()
            .is_some_and(|banner| banner.expired(now, display_for))
        {
            debug!("Error banner expired");
            self.error = None;
        }
    }

    fn finish_load(&mut self, dispatch: Dispatch, effects: &mut Vec<Effect>) {
        if let Some(next) = self.gallery.controller.settle(dispatch.ticket) {
            self.begin_load(next, effects);
        }
    }
}
