use crate::{animation::ease::Ease, foundation::core::Millis};

/// Reference to a rendered element, handed out when the element is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ElementHandle(pub u64);

/// Animatable visual property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionProperty {
    /// `0..1` alpha.
    Opacity,
    /// Horizontal offset in pixels.
    TranslateX,
    /// Vertical offset in pixels.
    TranslateY,
    /// Uniform scale factor.
    Scale,
    /// Width as a percentage of the container (progress bars).
    WidthPercent,
    /// SVG stroke dash offset (circular progress).
    StrokeDashOffset,
}

/// "Run this property from A to B over D" request for the animation framework.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TweenSpec {
    /// Animated property.
    pub property: MotionProperty,
    /// Start value.
    pub from: f64,
    /// End value.
    pub to: f64,
    /// Run time.
    pub duration: Millis,
    /// Start delay.
    pub delay: Millis,
    /// Easing curve.
    pub ease: Ease,
}

/// The rendering/animation framework, as seen from the motion core.
///
/// The core never depends on the framework's own scheduling; it only issues requests.
pub trait MotionDriver {
    /// Tween one property of `element`.
    fn animate(&mut self, element: ElementHandle, spec: &TweenSpec);

    /// Smoothly scroll the viewport so its top lands on document offset `y`.
    fn smooth_scroll_to(&mut self, y: f64, duration: Millis, ease: Ease);
}

/// Everything a [`RecordingDriver`] was asked to do.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriverCommand {
    /// A property tween.
    Animate {
        /// Target element.
        element: ElementHandle,
        /// Tween request.
        spec: TweenSpec,
    },
    /// A smooth scroll.
    Scroll {
        /// Target document offset.
        y: f64,
        /// Scroll duration.
        duration: Millis,
        /// Scroll curve.
        ease: Ease,
    },
}

/// Driver that only records requests; used headless (tests, CLI simulation).
#[derive(Clone, Debug, Default)]
pub struct RecordingDriver {
    /// Requests in arrival order.
    pub commands: Vec<DriverCommand>,
}

impl RecordingDriver {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets of all recorded scrolls.
    pub fn scroll_targets(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DriverCommand::Scroll { y, .. } => Some(*y),
                DriverCommand::Animate { .. } => None,
            })
            .collect()
    }

    /// Tweens recorded for `element`.
    pub fn tweens_for(&self, element: ElementHandle) -> Vec<&TweenSpec> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DriverCommand::Animate { element: e, spec } if *e == element => Some(spec),
                _ => None,
            })
            .collect()
    }

    /// Drain recorded requests.
    pub fn take(&mut self) -> Vec<DriverCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl MotionDriver for RecordingDriver {
    fn animate(&mut self, element: ElementHandle, spec: &TweenSpec) {
        self.commands.push(DriverCommand::Animate {
            element,
            spec: spec.clone(),
        });
    }

    fn smooth_scroll_to(&mut self, y: f64, duration: Millis, ease: Ease) {
        self.commands.push(DriverCommand::Scroll { y, duration, ease });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/driver.rs"]
mod tests;
