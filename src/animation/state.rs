use std::time::Instant;

use super::{Animatable, Transition};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    NoChange,
    Changed(T),
}

impl<T> AdvanceResult<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// Time-driven interpolation of a single value.
///
/// Every entry point has an `_at` variant taking the clock reading so that the
/// event loop (and tests) decide what "now" is.
pub struct AnimationState<T: Animatable> {
    current: T,
    target: T,
    start: T,
    /// 0.0 at start, 1.0 once the target has been reached
    progress: f32,
    start_time: Instant,
    transition: Transition,
}

impl<T: Animatable> AnimationState<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            progress: 1.0,
            start_time: Instant::now(),
            transition,
        }
    }

    pub fn animate_to(&mut self, new_target: T) {
        self.animate_to_at(new_target, Instant::now());
    }

    /// Start animating from the current value toward `new_target`.
    ///
    /// Retargeting an in-flight animation restarts the clock from wherever the
    /// value currently is, which is how a reversal is expressed.
    pub fn animate_to_at(&mut self, new_target: T, now: Instant) {
        if new_target == self.target {
            return;
        }

        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = now;
    }

    pub fn advance(&mut self) -> AdvanceResult<T> {
        self.advance_at(Instant::now())
    }

    pub fn advance_at(&mut self, now: Instant) -> AdvanceResult<T> {
        if !self.is_animating() {
            return AdvanceResult::NoChange;
        }

        let elapsed = now.saturating_duration_since(self.start_time).as_secs_f32() * 1000.0;
        let adjusted = elapsed - self.transition.delay_ms;
        if adjusted < 0.0 {
            return AdvanceResult::NoChange;
        }

        let t = if self.transition.duration_ms <= 0.0 {
            1.0
        } else {
            (adjusted / self.transition.duration_ms).min(1.0)
        };
        self.progress = t;

        let new_value = if t >= 1.0 {
            self.target.clone()
        } else {
            T::lerp(&self.start, &self.target, self.transition.timing.evaluate(t))
        };

        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.progress = 1.0;
    }
}
