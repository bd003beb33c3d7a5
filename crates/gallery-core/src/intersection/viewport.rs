use super::{IntersectionRecord, Observation, ObserverBackend, ObserverConfig, RootMargin, SubscriptionId};
use tracing::{trace, warn};

/// Identity of an element laid out inside a scroll root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey(pub u64);

/// Vertical placement of the target in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRect {
    pub top: f32,
    pub height: f32,
}

/// Scroll metrics of a root together with the laid-out target.
#[derive(Debug, Clone, Copy)]
pub struct ViewportSample<'a> {
    /// Root the metrics belong to; `None` is the top-level viewport.
    pub root: Option<&'a str>,
    pub target: ElementKey,
    pub rect: TargetRect,
    pub scroll_top: f32,
    pub viewport_height: f32,
}

#[derive(Debug)]
struct Observed {
    id: SubscriptionId,
    target: ElementKey,
    root: Option<String>,
    margin: RootMargin,
    threshold: f32,
    last_visible: Option<bool>,
}

/// Visibility primitive computed from scroll geometry.
///
/// Reports the first sample after `observe`, then only samples whose
/// intersecting state differs from the previous one.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    observed: Option<Observed>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observing(&self) -> bool {
        self.observed.is_some()
    }

    pub fn sample(&mut self, sample: ViewportSample<'_>) -> Option<Observation> {
        let observed = self.observed.as_mut()?;
        if observed.target != sample.target || observed.root.as_deref() != sample.root {
            return None;
        }
        if !(sample.scroll_top.is_finite() && sample.viewport_height.is_finite()) {
            return None;
        }

        let viewport_height = sample.viewport_height.max(0.0);
        let root_top = -observed.margin.top.resolve(viewport_height);
        let root_bottom = viewport_height + observed.margin.bottom.resolve(viewport_height);

        let height = sample.rect.height.max(0.0);
        let target_top = sample.rect.top - sample.scroll_top;
        let target_bottom = target_top + height;

        let overlap = target_bottom.min(root_bottom) - target_top.max(root_top);
        let touches = overlap >= 0.0;
        let ratio = if !touches {
            0.0
        } else if height > 0.0 {
            (overlap / height).min(1.0)
        } else {
            1.0
        };
        let visible = touches && ratio >= observed.threshold;

        if observed.last_visible == Some(visible) {
            return None;
        }
        observed.last_visible = Some(visible);
        trace!(
            subscription = %observed.id,
            visible,
            ratio,
            bounding_top = target_top,
            "Viewport intersection changed"
        );
        Some(Observation {
            subscription: observed.id,
            record: IntersectionRecord {
                is_intersecting: visible,
                bounding_top: target_top,
            },
            scroll_top: sample.scroll_top,
        })
    }
}

impl ObserverBackend for ViewportObserver {
    type Target = ElementKey;

    fn observe(&mut self, id: SubscriptionId, target: &ElementKey, config: &ObserverConfig) {
        if let Some(previous) = &self.observed {
            warn!(
                previous = %previous.id,
                next = %id,
                "Observing a new target while a subscription is still connected"
            );
        }
        self.observed = Some(Observed {
            id,
            target: *target,
            root: config.root().map(str::to_owned),
            margin: config.root_margin(),
            threshold: config.threshold(),
            last_visible: None,
        });
    }

    fn disconnect(&mut self, id: SubscriptionId) {
        if self.observed.as_ref().is_some_and(|observed| observed.id == id) {
            self.observed = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::{IntersectionWatcher, WatchDirection};

    const SENTINEL: ElementKey = ElementKey(7);

    fn observer(margin_px: f32, threshold: f32) -> ViewportObserver {
        let config = ObserverConfig::new(
            None,
            RootMargin::px(margin_px),
            threshold,
            WatchDirection::Down,
        )
        .unwrap();
        let mut observer = ViewportObserver::new();
        observer.observe(SubscriptionId(1), &SENTINEL, &config);
        observer
    }

    fn at(top: f32, height: f32, scroll_top: f32) -> ViewportSample<'static> {
        ViewportSample {
            root: None,
            target: SENTINEL,
            rect: TargetRect { top, height },
            scroll_top,
            viewport_height: 600.0,
        }
    }

    #[test]
    fn first_sample_is_always_reported() {
        let mut observer = observer(0.0, 0.0);
        let observation = observer.sample(at(2000.0, 0.0, 0.0)).expect("initial report");
        assert!(!observation.record.is_intersecting);
        assert_eq!(observation.record.bounding_top, 2000.0);
    }

    #[test]
    fn only_state_changes_are_reported_afterwards() {
        let mut observer = observer(0.0, 0.0);
        assert!(observer.sample(at(2000.0, 0.0, 0.0)).is_some());
        assert!(observer.sample(at(2000.0, 0.0, 100.0)).is_none());
        let entered = observer.sample(at(2000.0, 0.0, 1400.0)).expect("entered view");
        assert!(entered.record.is_intersecting);
        assert_eq!(entered.record.bounding_top, 600.0);
        assert!(observer.sample(at(2000.0, 0.0, 1500.0)).is_none());
        let left = observer.sample(at(2000.0, 0.0, 0.0)).expect("left view");
        assert!(!left.record.is_intersecting);
    }

    #[test]
    fn root_margin_triggers_before_target_is_on_screen() {
        let mut observer = observer(300.0, 0.0);
        let observation = observer.sample(at(850.0, 0.0, 0.0)).unwrap();
        assert!(observation.record.is_intersecting, "850 is within 600 + 300");

        let mut observer = self::observer(300.0, 0.0);
        assert!(!observer.sample(at(950.0, 0.0, 0.0)).unwrap().record.is_intersecting);
    }

    #[test]
    fn threshold_requires_visible_ratio() {
        let mut observer = observer(0.0, 0.5);
        // 100px tall target with 40px inside the viewport.
        assert!(!observer.sample(at(560.0, 100.0, 0.0)).unwrap().record.is_intersecting);
        // 60px inside.
        assert!(observer.sample(at(540.0, 100.0, 0.0)).unwrap().record.is_intersecting);
    }

    #[test]
    fn ignores_other_targets_roots_and_disconnected_state() {
        let mut observer = observer(0.0, 0.0);
        let mut other = at(10.0, 0.0, 0.0);
        other.target = ElementKey(99);
        assert!(observer.sample(other).is_none());

        let mut nested = at(10.0, 0.0, 0.0);
        nested.root = Some("sidebar");
        assert!(observer.sample(nested).is_none());

        observer.disconnect(SubscriptionId(2));
        assert!(observer.is_observing(), "unknown id leaves subscription alone");
        observer.disconnect(SubscriptionId(1));
        assert!(!observer.is_observing());
        assert!(observer.sample(at(10.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn samples_through_the_watcher_use_its_root() {
        let config = ObserverConfig::new(
            Some("gallery".to_string()),
            RootMargin::ZERO,
            0.0,
            WatchDirection::Down,
        )
        .unwrap();
        let mut watcher = IntersectionWatcher::new(ViewportObserver::new(), config);
        watcher.set_target(Some(SENTINEL));

        let (backend, config) = watcher.backend_with_config();
        let observation = backend
            .sample(ViewportSample {
                root: config.root(),
                ..at(100.0, 0.0, 0.0)
            })
            .expect("same root as the subscription");
        assert!(observation.record.is_intersecting);
        assert_eq!(watcher.accept(observation), Some(observation.record));
    }
}
