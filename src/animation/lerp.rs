use crate::foundation::core::{Length, Point, Vec2};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Length {
    // Mixed units snap to the destination unit; callers keep one unit per binding.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let v = f64::lerp(&a.value(), &b.value(), t);
        match b {
            Length::Px(_) => Length::Px(v),
            Length::Percent(_) => Length::Percent(v),
        }
    }
}

/// One frame of exponential approach: `current += (target - current) * factor`.
pub fn approach<T: Lerp>(current: &T, target: &T, factor: f64) -> T {
    T::lerp(current, target, factor.clamp(0.0, 1.0))
}

/// Frame-rate independent smoothing toward `target`.
///
/// `time_constant` is the number of seconds after which roughly 63% of the remaining distance has
/// been covered. A non-positive constant snaps.
pub fn damp(current: f64, target: f64, time_constant: f64, dt: f64) -> f64 {
    if time_constant <= 0.0 {
        return target;
    }
    if dt <= 0.0 {
        return current;
    }
    let k = 1.0 - (-dt / time_constant).exp();
    current + (target - current) * k
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
