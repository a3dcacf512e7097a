use crate::{
    animation::{ease::Ease, lerp::Lerp},
    foundation::error::{MotionError, MotionResult},
};

/// Multi-stop animation over normalized time, e.g. `scale: [0, 1.2, 1]` at `times: [0, 0.4, 1]`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by `at`
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub at: f64, // normalized time in [0, 1]
    pub value: T,
    pub ease: Ease, // ease applied toward next key
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Build from parallel value/time lists sharing one ease, the way the site declares them.
    pub fn from_stops(values: &[T], times: &[f64], ease: Ease) -> MotionResult<Self> {
        if values.len() != times.len() {
            return Err(MotionError::animation(
                "Keyframes values and times must have equal length",
            ));
        }
        let kf = Self {
            keys: values
                .iter()
                .zip(times)
                .map(|(value, &at)| Keyframe {
                    at,
                    value: value.clone(),
                    ease,
                })
                .collect(),
        };
        kf.validate()?;
        Ok(kf)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.keys.is_empty() {
            return Err(MotionError::animation(
                "Keyframes must have at least one key",
            ));
        }
        if !self.keys.iter().all(|k| (0.0..=1.0).contains(&k.at)) {
            return Err(MotionError::animation(
                "Keyframes times must lie within [0, 1]",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(MotionError::animation("Keyframes keys must be sorted"));
        }
        Ok(())
    }

    pub fn sample(&self, t: f64) -> MotionResult<T> {
        let Some(first) = self.keys.first() else {
            return Err(MotionError::animation("Keyframes has no keys"));
        };
        let t = t.clamp(0.0, 1.0);
        let idx = self.keys.partition_point(|k| k.at <= t);

        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return Ok(a.value.clone());
        }
        let local = (t - a.at) / span;
        Ok(T::lerp(&a.value, &b.value, a.ease.apply(local)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
