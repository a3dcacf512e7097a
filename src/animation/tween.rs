use crate::{
    animation::{ease::Ease, lerp::Lerp},
    foundation::error::{MotionError, MotionResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenPhase {
    Pending,
    Running,
    Finished,
}

/// A one-shot interpolation between two values over wall-clock seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: f64,    // absolute seconds, delay already folded in
    pub duration: f64, // seconds, >= 0
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, duration: f64) -> Self {
        Self {
            from,
            to,
            start: 0.0,
            duration,
            ease: Ease::Linear,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn starting_at(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(MotionError::animation(
                "Tween duration must be finite and >= 0",
            ));
        }
        if !self.start.is_finite() {
            return Err(MotionError::animation("Tween start must be finite"));
        }
        Ok(())
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn phase(&self, now: f64) -> TweenPhase {
        if now < self.start {
            TweenPhase::Pending
        } else if now >= self.end() {
            TweenPhase::Finished
        } else {
            TweenPhase::Running
        }
    }

    /// Linear time progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return if now >= self.start { 1.0 } else { 0.0 };
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f64) -> T {
        match self.phase(now) {
            TweenPhase::Pending => self.from.clone(),
            TweenPhase::Finished => self.to.clone(),
            TweenPhase::Running => {
                T::lerp(&self.from, &self.to, self.ease.apply(self.progress(now)))
            }
        }
    }

    /// Restart from `current` toward `to`, keeping duration and easing. Used when a running
    /// animation is superseded and must continue from wherever it visually is.
    pub fn retarget(&self, current: T, to: T, start: f64, duration: f64) -> Self {
        Self {
            from: current,
            to,
            start,
            duration,
            ease: self.ease,
        }
    }
}

/// Start offsets for `count` items staggered by `each` seconds after `base`.
pub fn stagger(count: usize, base: f64, each: f64) -> impl Iterator<Item = f64> {
    (0..count).map(move |i| base + each * i as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
