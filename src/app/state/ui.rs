use std::time::{Duration, Instant};

/// Last known scroll metrics of the gallery scrollable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(in crate::app) struct ViewportMetrics {
    pub(in crate::app) scroll_top: f32,
    pub(in crate::app) width: f32,
    pub(in crate::app) height: f32,
}

/// Transient message shown above the grid after a failed load.
#[derive(Debug, Clone)]
pub(in crate::app) struct ErrorBanner {
    pub(in crate::app) message: String,
    pub(in crate::app) shown_at: Instant,
}

impl ErrorBanner {
    pub(in crate::app) fn new(message: impl Into<String>) -> Self {
        ErrorBanner {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub(in crate::app) fn expired(&self, now: Instant, display_for: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= display_for
    }
}
