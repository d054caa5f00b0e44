use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::foundation::core::Millis;

/// Default animation-frame cadence (~60 fps).
pub const FRAME_INTERVAL: Millis = Millis(16);

type Callback = Box<dyn FnMut(Millis)>;

struct Timer {
    due: Millis,
    period: Option<Millis>,
    // `None` while the callback is running.
    callback: Option<Callback>,
}

#[derive(Default)]
struct LoopInner {
    now: Millis,
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
}

impl LoopInner {
    fn next_due(&self, limit: Millis) -> Option<(u64, Millis)> {
        self.timers
            .iter()
            .filter(|(_, t)| t.callback.is_some() && t.due <= limit)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, t.due))
    }
}

/// Single-threaded cooperative scheduler on a virtual clock.
///
/// Stands in for the page's own event loop: timers and frame callbacks only run while the
/// owner advances the clock, in `(due time, registration order)` order. Cloning yields
/// another handle to the same loop.
#[derive(Clone, Default)]
pub struct EventLoop {
    inner: Rc<RefCell<LoopInner>>,
}

impl EventLoop {
    /// Fresh loop at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.inner.borrow().now
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Run `callback` every `period` (a zero period is bumped to 1ms), first at `now + period`.
    pub fn set_interval(
        &self,
        period: Millis,
        callback: impl FnMut(Millis) + 'static,
    ) -> TimerHandle {
        let period = Millis(period.0.max(1));
        self.register(period, Some(period), Box::new(callback))
    }

    /// Run `callback` once at `now + delay`.
    pub fn set_timeout(&self, delay: Millis, callback: impl FnMut(Millis) + 'static) -> TimerHandle {
        self.register(delay, None, Box::new(callback))
    }

    /// Run `callback` on every animation frame.
    pub fn on_frame(&self, callback: impl FnMut(Millis) + 'static) -> TimerHandle {
        self.set_interval(FRAME_INTERVAL, callback)
    }

    fn register(&self, delay: Millis, period: Option<Millis>, callback: Callback) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now.after(delay);
        inner.timers.insert(
            id,
            Timer {
                due,
                period,
                callback: Some(callback),
            },
        );
        TimerHandle {
            id,
            owner: Rc::downgrade(&self.inner),
        }
    }

    /// Advance the clock by `delta`, firing everything that comes due.
    pub fn advance_by(&self, delta: Millis) -> usize {
        let target = self.now().after(delta);
        self.advance_to(target)
    }

    /// Advance the clock to `target` (never backwards), firing due timers. Returns the number
    /// of callbacks run.
    pub fn advance_to(&self, target: Millis) -> usize {
        let mut fired = 0;
        loop {
            let (id, due, mut callback) = {
                let mut inner = self.inner.borrow_mut();
                let Some((id, due)) = inner.next_due(target) else {
                    break;
                };
                inner.now = inner.now.max(due);
                let Some(callback) = inner.timers.get_mut(&id).and_then(|t| t.callback.take())
                else {
                    break;
                };
                (id, due, callback)
            };

            // No borrow is held here, so the callback may register or cancel timers.
            callback(due);
            fired += 1;

            let mut inner = self.inner.borrow_mut();
            let Some(timer) = inner.timers.get_mut(&id) else {
                // Cancelled from inside its own callback.
                continue;
            };
            match timer.period {
                Some(period) => {
                    timer.due = due.after(period);
                    timer.callback = Some(callback);
                }
                None => {
                    inner.timers.remove(&id);
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(target);
        fired
    }
}

/// Registration of a timer. Dropping the handle cancels the timer.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    id: u64,
    owner: Weak<RefCell<LoopInner>>,
}

impl TimerHandle {
    /// Whether the timer is still scheduled.
    pub fn is_active(&self) -> bool {
        self.owner
            .upgrade()
            .is_some_and(|inner| inner.borrow().timers.contains_key(&self.id))
    }

    /// Cancel explicitly; same as dropping.
    pub fn cancel(self) {}
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        let Some(inner) = self.owner.upgrade() else {
            return;
        };
        // The removed timer is dropped after the borrow ends: its callback may own other handles.
        let removed = inner
            .try_borrow_mut()
            .ok()
            .and_then(|mut inner| inner.timers.remove(&self.id));
        drop(removed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/event_loop.rs"]
mod tests;
