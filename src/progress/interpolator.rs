use std::{cell::RefCell, rc::Rc};

use crate::{
    animation::ease::Ease,
    animation::tween::Tween,
    foundation::core::Millis,
    foundation::error::{FolioError, FolioResult},
    runtime::event_loop::{EventLoop, TimerHandle},
    state::field::FieldWriter,
};

/// Value at which loading is complete.
pub const PROGRESS_MAX: f64 = 100.0;

/// Loading-screen timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoadProgressConfig {
    /// Time for the bar to go from 0 to 100.
    pub duration_ms: u64,
    /// Ticker period.
    pub tick_ms: u64,
    /// How long 100% stays on screen before the page is revealed.
    pub display_delay_ms: u64,
    /// Curve of the ramp. Must stay within `[0, 1]`.
    pub ease: Ease,
}

impl Default for LoadProgressConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2500,
            tick_ms: 30,
            display_delay_ms: 500,
            ease: Ease::Linear,
        }
    }
}

impl LoadProgressConfig {
    /// Reject timings the ramp cannot honour.
    pub fn validate(&self) -> FolioResult<()> {
        if self.duration_ms == 0 {
            return Err(FolioError::animation("load duration must be > 0"));
        }
        if self.tick_ms == 0 {
            return Err(FolioError::animation("load tick must be > 0"));
        }
        if !self.ease.is_bounded() {
            return Err(FolioError::animation(format!(
                "load ramp ease {:?} overshoots and would break monotonic progress",
                self.ease
            )));
        }
        Ok(())
    }
}

/// Fixed-duration 0 → 100 curve. Not tied to any real work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressRamp {
    tween: Tween<f64>,
}

impl ProgressRamp {
    /// Ramp over `duration` with a bounded `ease`.
    pub fn new(duration: Millis, ease: Ease) -> FolioResult<Self> {
        LoadProgressConfig {
            duration_ms: duration.0,
            ease,
            ..LoadProgressConfig::default()
        }
        .validate()?;
        Ok(Self {
            tween: Tween::new(0.0, PROGRESS_MAX, duration, ease),
        })
    }

    /// Ramp duration.
    pub fn duration(&self) -> Millis {
        self.tween.duration
    }

    /// Progress after `elapsed`, in `[0, 100]`; exactly 100 from `duration` on.
    pub fn value_at(&self, elapsed: Millis) -> f64 {
        self.tween.sample(elapsed).clamp(0.0, PROGRESS_MAX)
    }
}

/// Where the loading screen is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Bar still filling.
    Loading,
    /// Bar at 100, waiting out the display delay.
    Complete,
    /// Page revealed. Terminal.
    Ready,
}

/// Field writers the interpolator takes ownership of.
#[derive(Debug)]
pub struct ProgressWriters {
    /// Bar value.
    pub progress: FieldWriter<f64>,
    /// One-way ready flag.
    pub ready: FieldWriter<bool>,
}

struct LoaderInner {
    ramp: ProgressRamp,
    display_delay: Millis,
    started_at: Millis,
    completed_at: Option<Millis>,
    last: f64,
    phase: LoadPhase,
    writers: ProgressWriters,
    ticker: Option<TimerHandle>,
}

impl LoaderInner {
    fn tick(&mut self, now: Millis) {
        match self.phase {
            LoadPhase::Loading => {
                let value = self.ramp.value_at(now.since(self.started_at)).max(self.last);
                if value > self.last {
                    self.last = value;
                    self.writers.progress.set(value);
                }
                if value >= PROGRESS_MAX {
                    tracing::debug!(at = %now, "load progress complete");
                    self.phase = LoadPhase::Complete;
                    self.completed_at = Some(now);
                    self.maybe_reveal(now);
                }
            }
            LoadPhase::Complete => self.maybe_reveal(now),
            LoadPhase::Ready => {}
        }
    }

    fn maybe_reveal(&mut self, now: Millis) {
        let Some(done) = self.completed_at else {
            return;
        };
        if now.since(done) < self.display_delay {
            return;
        }
        tracing::debug!(at = %now, "page ready");
        self.phase = LoadPhase::Ready;
        self.writers.ready.set(true);
        // Nothing left to do; release the ticker.
        self.ticker = None;
    }
}

/// Drives the loading bar on an [`EventLoop`] ticker.
///
/// Dropping (or [`cancel`](Self::cancel)ling) the interpolator releases the ticker, after which
/// neither field is written again, whatever the loop does.
pub struct LoadProgress {
    inner: Rc<RefCell<LoaderInner>>,
}

impl LoadProgress {
    /// Start ramping from the loop's current time.
    #[tracing::instrument(skip(event_loop, writers))]
    pub fn start(
        event_loop: &EventLoop,
        config: LoadProgressConfig,
        writers: ProgressWriters,
    ) -> FolioResult<Self> {
        config.validate()?;
        let ramp = ProgressRamp::new(Millis(config.duration_ms), config.ease)?;
        let inner = Rc::new(RefCell::new(LoaderInner {
            ramp,
            display_delay: Millis(config.display_delay_ms),
            started_at: event_loop.now(),
            completed_at: None,
            last: 0.0,
            phase: LoadPhase::Loading,
            writers,
            ticker: None,
        }));

        let weak = Rc::downgrade(&inner);
        let ticker = event_loop.set_interval(Millis(config.tick_ms), move |now| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().tick(now);
            }
        });
        inner.borrow_mut().ticker = Some(ticker);
        Ok(Self { inner })
    }

    /// Current phase.
    pub fn phase(&self) -> LoadPhase {
        self.inner.borrow().phase
    }

    /// Last value written.
    pub fn value(&self) -> f64 {
        self.inner.borrow().last
    }

    /// Whether the ticker is still registered.
    pub fn is_ticking(&self) -> bool {
        self.inner
            .borrow()
            .ticker
            .as_ref()
            .is_some_and(TimerHandle::is_active)
    }

    /// Tear down early (e.g. unmount mid-animation).
    pub fn cancel(self) {}
}

impl Drop for LoadProgress {
    fn drop(&mut self) {
        // Take the handle out first so the timer is cancelled outside the borrow.
        let ticker = self.inner.borrow_mut().ticker.take();
        drop(ticker);
    }
}

/// Width of a linear bar, in percent of its track.
pub fn bar_width_percent(progress: f64) -> f64 {
    progress.clamp(0.0, PROGRESS_MAX)
}

/// Stroke dash offset for a circular indicator of `radius`: full circumference at 0, zero at 100.
pub fn stroke_dash_offset(progress: f64, radius: f64) -> f64 {
    let circumference = std::f64::consts::TAU * radius.max(0.0);
    circumference * (1.0 - bar_width_percent(progress) / PROGRESS_MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/progress/interpolator.rs"]
mod tests;
