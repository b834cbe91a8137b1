use serde::{Deserialize, Serialize};

use crate::core::ZoomTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// A pan/zoom gesture is in progress.
    Gesturing,
    /// An animated transform transition is running.
    Animating,
}

/// Deterministic animated transition between two zoom transforms.
///
/// `k` is interpolated geometrically and `x` linearly, both through a
/// cubic in-out easing curve. Time is advanced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomAnimation {
    pub from: ZoomTransform,
    pub to: ZoomTransform,
    pub duration_ms: f64,
    elapsed_ms: f64,
}

impl ZoomAnimation {
    #[must_use]
    pub fn new(from: ZoomTransform, to: ZoomTransform, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 },
            elapsed_ms: 0.0,
        }
    }

    #[must_use]
    pub fn progress(self) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self.progress() >= 1.0
    }

    #[must_use]
    pub fn current(self) -> ZoomTransform {
        ZoomTransform::interpolate(self.from, self.to, ease_cubic_in_out(self.progress()))
    }

    /// Advances by `delta_ms` and returns the transform at the new time.
    pub fn step(&mut self, delta_ms: f64) -> ZoomTransform {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        self.current()
    }
}

#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    animation: Option<ZoomAnimation>,
    gesture_start: Option<ZoomTransform>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            animation: None,
            gesture_start: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn animation(self) -> Option<ZoomAnimation> {
        self.animation
    }

    #[must_use]
    pub fn gesture_start(self) -> Option<ZoomTransform> {
        self.gesture_start
    }

    /// Enters `Gesturing`, cancelling any running animation.
    ///
    /// Returns `true` when an animation was cancelled.
    pub fn begin_gesture(&mut self, current: ZoomTransform) -> bool {
        let cancelled = self.animation.take().is_some();
        self.mode = InteractionMode::Gesturing;
        self.gesture_start = Some(current);
        cancelled
    }

    pub fn end_gesture(&mut self) {
        if self.mode == InteractionMode::Gesturing {
            self.mode = InteractionMode::Idle;
        }
        self.gesture_start = None;
    }

    pub fn start_animation(&mut self, animation: ZoomAnimation) {
        self.gesture_start = None;
        self.animation = Some(animation);
        self.mode = InteractionMode::Animating;
    }

    pub fn cancel_animation(&mut self) -> bool {
        let cancelled = self.animation.take().is_some();
        if cancelled {
            self.mode = InteractionMode::Idle;
        }
        cancelled
    }

    /// Advances the running animation.
    ///
    /// Returns the interpolated transform, or `None` when idle. The mode
    /// returns to `Idle` on the step that reaches the target.
    pub fn step_animation(&mut self, delta_ms: f64) -> Option<ZoomTransform> {
        let animation = self.animation.as_mut()?;
        let transform = animation.step(delta_ms);
        if animation.is_finished() {
            self.animation = None;
            self.mode = InteractionMode::Idle;
        }
        Some(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState, ZoomAnimation, ease_cubic_in_out};
    use crate::core::ZoomTransform;

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75) - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn gesture_cancels_running_animation() {
        let mut state = InteractionState::default();
        let target = ZoomTransform::new(4.0, -10.0).expect("transform");
        state.start_animation(ZoomAnimation::new(ZoomTransform::IDENTITY, target, 500.0));
        assert_eq!(state.mode(), InteractionMode::Animating);
        assert!(state.begin_gesture(ZoomTransform::IDENTITY));
        assert_eq!(state.mode(), InteractionMode::Gesturing);
        assert_eq!(state.step_animation(16.0), None);
    }

    #[test]
    fn animation_finishes_on_target() {
        let mut state = InteractionState::default();
        let target = ZoomTransform::new(4.0, -10.0).expect("transform");
        state.start_animation(ZoomAnimation::new(ZoomTransform::IDENTITY, target, 500.0));
        let mid = state.step_animation(250.0).expect("running");
        assert!(mid.k > 1.0 && mid.k < 4.0);
        assert_eq!(state.step_animation(250.0), Some(target));
        assert_eq!(state.mode(), InteractionMode::Idle);
    }
}
