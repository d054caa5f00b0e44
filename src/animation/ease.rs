/// Easing curves shared by tweens, the load ramp and smooth scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic acceleration.
    InQuad,
    /// Quadratic deceleration.
    OutQuad,
    /// Quadratic in, then out.
    InOutQuad,
    /// Cubic deceleration; the default feel for entrances.
    OutCubic,
    /// Cubic in, then out; used for smooth scrolling.
    InOutCubic,
    /// Overshoots slightly before settling (scale-in pops).
    OutBack,
}

impl Ease {
    /// Map normalized time `t` (clamped to `[0, 1]`) through the curve.
    ///
    /// Every curve maps `0 -> 0` and `1 -> 1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBack => {
                const C1: f64 = 1.701_58;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }

    /// Whether the curve stays inside `[0, 1]` for every input.
    pub fn is_bounded(self) -> bool {
        !matches!(self, Self::OutBack)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
