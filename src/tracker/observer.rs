use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::{
    foundation::core::SectionId,
    foundation::error::{FolioError, FolioResult},
    tracker::geometry::{SectionBounds, Viewport},
};

/// A section crossing the visibility threshold.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntersectionEvent {
    /// Visible fraction rose to at least the threshold.
    Entered {
        /// Section id.
        id: SectionId,
        /// Visible fraction at the crossing.
        ratio: f64,
    },
    /// Visible fraction fell below the threshold.
    Left {
        /// Section id.
        id: SectionId,
        /// Visible fraction at the crossing.
        ratio: f64,
    },
}

impl IntersectionEvent {
    /// Section the event is about.
    pub fn id(&self) -> &SectionId {
        match self {
            Self::Entered { id, .. } | Self::Left { id, .. } => id,
        }
    }

    /// Visible fraction carried by the event.
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Entered { ratio, .. } | Self::Left { ratio, .. } => *ratio,
        }
    }
}

type Callback = Box<dyn FnMut(&IntersectionEvent)>;

struct Target {
    bounds: SectionBounds,
    intersecting: bool,
    // `None` while the callback is running.
    callback: Option<Callback>,
}

struct ObserverInner {
    threshold: f64,
    next_id: u64,
    targets: BTreeMap<u64, Target>,
}

/// Geometry-driven stand-in for the platform's viewport intersection observer.
///
/// Each observed section gets its own callback. Crossings are detected on [`Self::update`]
/// and dispatched in document order (by section top).
#[derive(Clone)]
pub struct IntersectionObserver {
    inner: Rc<RefCell<ObserverInner>>,
}

impl IntersectionObserver {
    /// Observer with a visibility threshold in `(0, 1]`.
    pub fn new(threshold: f64) -> FolioResult<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(FolioError::config(format!(
                "intersection threshold must be in (0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            inner: Rc::new(RefCell::new(ObserverInner {
                threshold,
                next_id: 0,
                targets: BTreeMap::new(),
            })),
        })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.inner.borrow().threshold
    }

    /// Number of live observations.
    pub fn observed(&self) -> usize {
        self.inner.borrow().targets.len()
    }

    /// Start observing `bounds`. Dropping the returned handle stops the observation.
    pub fn observe(
        &self,
        bounds: SectionBounds,
        callback: impl FnMut(&IntersectionEvent) + 'static,
    ) -> Observation {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.targets.insert(
            id,
            Target {
                bounds,
                intersecting: false,
                callback: Some(Box::new(callback)),
            },
        );
        Observation {
            id,
            owner: Rc::downgrade(&self.inner),
        }
    }

    /// Recompute visibility for `viewport` and dispatch crossings. Returns the number of
    /// events delivered.
    pub fn update(&self, viewport: Viewport) -> usize {
        let mut pending: Vec<(u64, f64, IntersectionEvent)> = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            let threshold = inner.threshold;
            for (id, target) in inner.targets.iter_mut() {
                let ratio = target.bounds.visible_fraction(&viewport);
                let now_in = ratio >= threshold;
                if now_in == target.intersecting {
                    continue;
                }
                target.intersecting = now_in;
                let section = target.bounds.id.clone();
                let event = if now_in {
                    IntersectionEvent::Entered { id: section, ratio }
                } else {
                    IntersectionEvent::Left { id: section, ratio }
                };
                pending.push((*id, target.bounds.top, event));
            }
        }
        pending.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut delivered = 0;
        for (id, _, event) in pending {
            let callback = self
                .inner
                .borrow_mut()
                .targets
                .get_mut(&id)
                .and_then(|t| t.callback.take());
            // Unobserved by an earlier callback in this batch.
            let Some(mut callback) = callback else {
                continue;
            };
            callback(&event);
            delivered += 1;
            if let Some(target) = self.inner.borrow_mut().targets.get_mut(&id) {
                target.callback = Some(callback);
            }
        }
        delivered
    }
}

/// One observed section. Dropping it unsubscribes the callback.
#[must_use = "dropping an Observation stops observing"]
pub struct Observation {
    id: u64,
    owner: Weak<RefCell<ObserverInner>>,
}

impl Observation {
    /// Replace the observed geometry (after a relayout). The intersecting flag is kept, so the
    /// next update only reports real crossings.
    pub fn relayout(&self, bounds: SectionBounds) {
        if let Some(inner) = self.owner.upgrade()
            && let Some(target) = inner.borrow_mut().targets.get_mut(&self.id)
        {
            target.bounds = bounds;
        }
    }

    /// Whether the observer still delivers to this observation.
    pub fn is_active(&self) -> bool {
        self.owner
            .upgrade()
            .is_some_and(|inner| inner.borrow().targets.contains_key(&self.id))
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        let Some(inner) = self.owner.upgrade() else {
            return;
        };
        let removed = inner
            .try_borrow_mut()
            .ok()
            .and_then(|mut inner| inner.targets.remove(&self.id));
        drop(removed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/observer.rs"]
mod tests;
