//! Scroll-triggered "load more" control.
//!
//! `LoadMoreController` watches the sentinel with a downward-only
//! `IntersectionWatcher` and turns qualifying events into `Dispatch`es. A
//! `LoadGate` decides whether a dispatch may start now. Under the serialized
//! policy at most one load runs at a time and any triggers that arrive while
//! busy collapse into one follow-up that starts when the running load settles.

use crate::error::{GalleryError, Result};
use crate::intersection::{
    IntersectionRecord, IntersectionWatcher, Observation, ObserverBackend, ObserverConfig,
    RootMargin, TargetRect, ViewportObserver, ViewportSample, WatchDirection,
};
use futures::StreamExt;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How overlapping load requests are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// One load in flight; triggers while busy become a single follow-up.
    #[default]
    Serialized,
    /// Every trigger starts its own load.
    Unserialized,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadPolicy::Serialized => "serialized",
            LoadPolicy::Unserialized => "unserialized",
        };
        write!(f, "{label}")
    }
}

/// Request id handed out for every started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Start(Ticket),
    Deferred,
}

/// In-flight bookkeeping for load requests.
#[derive(Debug)]
pub struct LoadGate {
    policy: LoadPolicy,
    next_ticket: u64,
    in_flight: Vec<Ticket>,
    pending: bool,
}

impl LoadGate {
    pub fn new(policy: LoadPolicy) -> Self {
        LoadGate {
            policy,
            next_ticket: 1,
            in_flight: Vec::new(),
            pending: false,
        }
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    fn issue(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight.push(ticket);
        ticket
    }

    pub fn trigger(&mut self) -> GateDecision {
        match self.policy {
            LoadPolicy::Serialized if !self.in_flight.is_empty() => {
                self.pending = true;
                GateDecision::Deferred
            }
            _ => GateDecision::Start(self.issue()),
        }
    }

    /// Marks `ticket` finished; returns the deferred follow-up to start, if any.
    pub fn settle(&mut self, ticket: Ticket) -> Option<Ticket> {
        let Some(position) = self.in_flight.iter().position(|t| *t == ticket) else {
            warn!(%ticket, "Settled a load that was not in flight");
            return None;
        };
        self.in_flight.remove(position);
        if self.pending && self.in_flight.is_empty() {
            self.pending = false;
            return Some(self.issue());
        }
        None
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }
}

/// What a started load should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Resolve the placeholders created at mount.
    Initial,
    /// Append a batch of placeholders and resolve them.
    More,
}

impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadKind::Initial => "initial",
            LoadKind::More => "more",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub kind: LoadKind,
}

pub struct LoadMoreController<B: ObserverBackend> {
    watcher: IntersectionWatcher<B>,
    gate: LoadGate,
    offset_px: f32,
    deferred_kind: Option<LoadKind>,
}

impl<B: ObserverBackend> LoadMoreController<B> {
    /// Watches `target` downward with a look-ahead of `offset_px` pixels.
    pub fn bind(
        backend: B,
        target: Option<B::Target>,
        offset_px: f32,
        policy: LoadPolicy,
    ) -> Result<Self> {
        if !offset_px.is_finite() {
            return Err(GalleryError::InvalidArgument(format!(
                "load-more offset must be finite, got {offset_px}"
            )));
        }
        let config = ObserverConfig::new(
            None,
            RootMargin::px(offset_px),
            0.0,
            WatchDirection::Down,
        )?;
        let mut watcher = IntersectionWatcher::new(backend, config);
        watcher.set_target(target);
        info!(offset_px, %policy, "Bound load-more controller");
        Ok(LoadMoreController {
            watcher,
            gate: LoadGate::new(policy),
            offset_px,
            deferred_kind: None,
        })
    }

    /// Re-subscribes when `target` differs from the observed one.
    pub fn rebind(&mut self, target: Option<B::Target>) {
        self.watcher.set_target(target);
    }

    pub fn observe(&mut self, observation: Observation) -> Option<Dispatch> {
        self.watcher.accept(observation)?;
        self.trigger(LoadKind::More)
    }

    /// Asks for a load outside of a scroll event, under the same policy.
    pub fn request(&mut self, kind: LoadKind) -> Option<Dispatch> {
        self.trigger(kind)
    }

    fn trigger(&mut self, kind: LoadKind) -> Option<Dispatch> {
        match self.gate.trigger() {
            GateDecision::Start(ticket) => {
                debug!(%ticket, %kind, in_flight = self.gate.in_flight(), "Starting load");
                Some(Dispatch { ticket, kind })
            }
            GateDecision::Deferred => {
                self.deferred_kind.get_or_insert(kind);
                debug!(%kind, "Load in flight; deferring request");
                None
            }
        }
    }

    /// Records completion of `ticket`, returning a deferred follow-up if one is due.
    pub fn settle(&mut self, ticket: Ticket) -> Option<Dispatch> {
        let next = self.gate.settle(ticket)?;
        let kind = self.deferred_kind.take().unwrap_or(LoadKind::More);
        debug!(settled = %ticket, ticket = %next, %kind, "Starting deferred load");
        Some(Dispatch { ticket: next, kind })
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn in_flight(&self) -> usize {
        self.gate.in_flight()
    }

    pub fn has_deferred(&self) -> bool {
        self.gate.has_pending()
    }

    pub fn policy(&self) -> LoadPolicy {
        self.gate.policy()
    }

    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    pub fn current_entry(&self) -> Option<IntersectionRecord> {
        self.watcher.current_entry()
    }

    pub fn watcher(&self) -> &IntersectionWatcher<B> {
        &self.watcher
    }
}

impl LoadMoreController<ViewportObserver> {
    /// Feeds fresh scroll geometry for the observed sentinel.
    pub fn on_viewport(
        &mut self,
        rect: TargetRect,
        scroll_top: f32,
        viewport_height: f32,
    ) -> Option<Dispatch> {
        let target = *self.watcher.target()?;
        let (backend, config) = self.watcher.backend_with_config();
        let observation = backend.sample(ViewportSample {
            root: config.root(),
            target,
            rect,
            scroll_top,
            viewport_height,
        })?;
        self.observe(observation)
    }
}

enum DriverEvent {
    Observed(Option<Observation>),
    Settled(Dispatch, Result<()>),
}

type Settled = (Dispatch, Result<()>);

fn launch<Fut>(dispatch: Dispatch, load: Fut) -> LocalBoxFuture<'static, Settled>
where
    Fut: Future<Output = Result<()>> + 'static,
{
    async move { (dispatch, load.await) }.boxed_local()
}

/// Drives `controller` from a stream of raw observations on the current task.
///
/// This is the driver for hosts without an update loop of their own. The
/// GUI settles loads through its messages and never calls it.
///
/// Observations keep being accepted while loads run. Returns once the
/// channel is closed and every started load has settled.
pub async fn run<B, F, Fut>(
    mut controller: LoadMoreController<B>,
    mut observations: mpsc::UnboundedReceiver<Observation>,
    mut load: F,
) -> LoadMoreController<B>
where
    B: ObserverBackend,
    F: FnMut(Dispatch) -> Fut,
    Fut: Future<Output = Result<()>> + 'static,
{
    let mut in_flight: FuturesUnordered<LocalBoxFuture<'static, Settled>> =
        FuturesUnordered::new();
    let mut open = true;

    loop {
        let event = tokio::select! {
            observation = observations.recv(), if open => DriverEvent::Observed(observation),
            Some((dispatch, result)) = in_flight.next(), if !in_flight.is_empty() => {
                DriverEvent::Settled(dispatch, result)
            }
            else => break,
        };

        match event {
            DriverEvent::Observed(Some(observation)) => {
                if let Some(dispatch) = controller.observe(observation) {
                    in_flight.push(launch(dispatch, load(dispatch)));
                }
            }
            DriverEvent::Observed(None) => open = false,
            DriverEvent::Settled(dispatch, result) => {
                if let Err(err) = result {
                    warn!(ticket = %dispatch.ticket, kind = %dispatch.kind, "Load failed: {err}");
                }
                if let Some(next) = controller.settle(dispatch.ticket) {
                    in_flight.push(launch(next, load(next)));
                }
            }
        }
    }

    controller
}
