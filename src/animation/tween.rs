use crate::{
    animation::ease::Ease,
    foundation::core::Millis,
    foundation::math::{lerp_f64, unit_progress},
};

/// Interpolation contract for tweened value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` (usually in `[0, 1]`, may overshoot).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp_f64(*a, *b, t)
    }
}


/// A single "from A to B over D" animation, sampled against elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    /// Value at the start.
    pub from: T,
    /// Value at and after the end.
    pub to: T,
    /// Run time.
    pub duration: Millis,
    /// Easing curve.
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Build a tween.
    pub fn new(from: T, to: T, duration: Millis, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
        }
    }

    /// Eased progress at `elapsed`: `[0, 1]`, or beyond for overshooting curves.
    pub fn progress(&self, elapsed: Millis) -> f64 {
        self.ease.apply(unit_progress(elapsed.0, self.duration.0))
    }

    /// Sample the tween. At or after the end it is exactly `to`.
    pub fn sample(&self, elapsed: Millis) -> T {
        if elapsed >= self.duration {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.progress(elapsed))
    }
}

/// Evenly spaced start delays for `count` items, `step` apart, beginning at `base`.
pub fn stagger(count: usize, base: Millis, step: Millis) -> Vec<Millis> {
    (0..count as u64)
        .map(|i| base.after(Millis(step.0.saturating_mul(i))))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
