//! Single-target intersection watching.
//!
//! A visibility primitive (`ObserverBackend`) delivers raw `Observation`s for
//! the one subscription the watcher holds. The watcher drops stale and
//! non-intersecting samples, then runs the direction/offset reducer so only
//! forward progress in the configured direction surfaces to consumers.

mod margin;
mod viewport;

pub use margin::{MarginLength, RootMargin};
pub use viewport::{ElementKey, TargetRect, ViewportObserver, ViewportSample};

use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// One visibility sample of the observed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRecord {
    pub is_intersecting: bool,
    /// Top edge of the target relative to the root's top edge.
    pub bounding_top: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatchDirection {
    Up,
    #[default]
    Down,
    Both,
}

impl fmt::Display for WatchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WatchDirection::Up => "up",
            WatchDirection::Down => "down",
            WatchDirection::Both => "both",
        };
        write!(f, "{label}")
    }
}

/// Reducer state for the direction/offset filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchState {
    direction: WatchDirection,
    last_offset: f32,
    last_record: Option<IntersectionRecord>,
}

impl WatchState {
    /// Seeds `last_offset` so the first sample in the watched direction counts.
    pub fn initial(direction: WatchDirection) -> Self {
        let last_offset = match direction {
            WatchDirection::Up => f32::INFINITY,
            WatchDirection::Down => f32::NEG_INFINITY,
            WatchDirection::Both => 0.0,
        };
        WatchState {
            direction,
            last_offset,
            last_record: None,
        }
    }

    pub fn direction(&self) -> WatchDirection {
        self.direction
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }

    pub fn last_record(&self) -> Option<IntersectionRecord> {
        self.last_record
    }

    /// Next state for `record`, or `None` when the sample is rejected.
    ///
    /// The absolute offset is `scroll_top + record.bounding_top`. Rejected
    /// samples leave the state untouched.
    pub fn advance(&self, record: IntersectionRecord, scroll_top: f32) -> Option<WatchState> {
        if !record.is_intersecting {
            return None;
        }
        let offset = scroll_top + record.bounding_top;
        if !offset.is_finite() {
            return None;
        }
        let progressed = match self.direction {
            WatchDirection::Up => offset < self.last_offset,
            WatchDirection::Down => offset > self.last_offset,
            WatchDirection::Both => true,
        };
        progressed.then_some(WatchState {
            direction: self.direction,
            last_offset: offset,
            last_record: Some(record),
        })
    }
}

/// Options for the visibility primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverConfig {
    root: Option<String>,
    root_margin: RootMargin,
    threshold: f32,
    direction: WatchDirection,
}

impl ObserverConfig {
    pub fn new(
        root: Option<String>,
        root_margin: RootMargin,
        threshold: f32,
        direction: WatchDirection,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(GalleryError::InvalidArgument(format!(
                "threshold must be within [0, 1], got {threshold}"
            )));
        }
        Ok(ObserverConfig {
            root,
            root_margin,
            threshold,
            direction,
        })
    }

    /// `None` means the top-level viewport.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn root_margin(&self) -> RootMargin {
        self.root_margin
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn direction(&self) -> WatchDirection {
        self.direction
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw sample delivered by a visibility primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub subscription: SubscriptionId,
    pub record: IntersectionRecord,
    /// Scroll position of the root when the sample was taken.
    pub scroll_top: f32,
}

/// The platform visibility primitive.
pub trait ObserverBackend {
    /// Identity of an observable element.
    type Target: Clone + PartialEq + fmt::Debug;

    fn observe(&mut self, id: SubscriptionId, target: &Self::Target, config: &ObserverConfig);

    fn disconnect(&mut self, id: SubscriptionId);
}

#[derive(Debug)]
struct ActiveSubscription<T> {
    id: SubscriptionId,
    target: T,
}

/// Watches at most one target and surfaces qualifying intersection events.
pub struct IntersectionWatcher<B: ObserverBackend> {
    backend: B,
    config: ObserverConfig,
    active: Option<ActiveSubscription<B::Target>>,
    state: WatchState,
    next_id: u64,
}

impl<B: ObserverBackend> IntersectionWatcher<B> {
    pub fn new(backend: B, config: ObserverConfig) -> Self {
        let state = WatchState::initial(config.direction());
        IntersectionWatcher {
            backend,
            config,
            active: None,
            state,
            next_id: 1,
        }
    }

    /// Switches observation to `target`.
    ///
    /// The previous subscription is disconnected before the new one is
    /// created. Passing the already observed target does nothing; `None`
    /// clears observation.
    pub fn set_target(&mut self, target: Option<B::Target>) {
        if self.active.as_ref().map(|active| &active.target) == target.as_ref() {
            return;
        }
        if let Some(previous) = self.active.take() {
            debug!(
                subscription = %previous.id,
                target = ?previous.target,
                "Disconnecting intersection subscription"
            );
            self.backend.disconnect(previous.id);
        }
        if let Some(target) = target {
            let id = SubscriptionId(self.next_id);
            self.next_id += 1;
            self.backend.observe(id, &target, &self.config);
            debug!(subscription = %id, target = ?target, "Observing intersection target");
            self.active = Some(ActiveSubscription { id, target });
        }
    }

    pub fn target(&self) -> Option<&B::Target> {
        self.active.as_ref().map(|active| &active.target)
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Feeds a raw sample through the filter; returns it when accepted.
    pub fn accept(&mut self, observation: Observation) -> Option<IntersectionRecord> {
        let active = self.active.as_ref()?;
        if observation.subscription != active.id {
            trace!(
                stale = %observation.subscription,
                active = %active.id,
                "Dropping observation from a disconnected subscription"
            );
            return None;
        }
        let next = self
            .state
            .advance(observation.record, observation.scroll_top)?;
        trace!(
            offset = next.last_offset(),
            direction = %next.direction(),
            "Accepted intersection"
        );
        self.state = next;
        Some(observation.record)
    }

    /// Most recent accepted record.
    pub fn current_entry(&self) -> Option<IntersectionRecord> {
        self.state.last_record()
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Mutable backend alongside the options it was subscribed with.
    pub fn backend_with_config(&mut self) -> (&mut B, &ObserverConfig) {
        (&mut self.backend, &self.config)
    }
}

impl<B: ObserverBackend> Drop for IntersectionWatcher<B> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            self.backend.disconnect(active.id);
        }
    }
}
