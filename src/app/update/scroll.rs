use super::super::state::{App, HEADER_HEIGHT_PX};
use super::Effect;
use tracing::trace;

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        scroll_top: f32,
        viewport_width: f32,
        viewport_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.viewport.scroll_top = sanitize(scroll_top);
        self.viewport.width = sanitize(viewport_width);
        self.viewport.height = sanitize(viewport_height);
        self.sample_sentinel(effects);
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.viewport.width = sanitize(width);
        self.viewport.height = sanitize(height - HEADER_HEIGHT_PX);
        self.sample_sentinel(effects);
    }

    /// Feeds the current geometry to the controller and starts any load it asks for.
    pub(super) fn sample_sentinel(&mut self, effects: &mut Vec<Effect>) {
        let rect = self.grid_layout().sentinel_rect();
        trace!(
            sentinel_top = rect.top,
            scroll_top = self.viewport.scroll_top,
            viewport_height = self.viewport.height,
            "Sampling sentinel"
        );
        if let Some(dispatch) = self.gallery.controller.on_viewport(
            rect,
            self.viewport.scroll_top,
            self.viewport.height,
        ) {
            self.begin_load(dispatch, effects);
        }
    }
}
