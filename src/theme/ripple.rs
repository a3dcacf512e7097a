use crate::{
    animation::{ease::Ease, keyframes::Keyframes, tween::Tween},
    foundation::{
        core::{Point, Viewport},
        error::MotionResult,
    },
    theme::theme::Theme,
};

/// Radius that covers the whole viewport from any origin, with headroom.
pub fn cover_radius(viewport: Viewport, factor: f64) -> f64 {
    viewport.diagonal() * factor
}

/// Where a toggle without pointer coordinates starts its ripple: near the top-right corner.
pub fn default_origin(viewport: Viewport) -> Point {
    Point::new(viewport.width - 80.0, 40.0)
}

/// Everything the ripple overlay draws at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RippleFrame {
    pub circle_diameter: f64,
    pub ring_diameter: f64,
    pub ring_opacity: f64,
    pub icon_scale: f64,
    pub icon_opacity: f64,
    pub label_opacity: f64,
    pub label_y: f64,
}

/// An expanding-circle theme reveal in flight.
#[derive(Clone, Debug)]
pub struct Ripple {
    pub id: u64,
    pub origin: Point,
    pub to: Theme,
    pub started: f64,
    pub radius: f64,
    circle: Tween<f64>,
    ring: Tween<f64>,
    ring_fade: Tween<f64>,
    icon_scale: Keyframes<f64>,
    icon_opacity: Keyframes<f64>,
    label_opacity: Keyframes<f64>,
    label_y: Keyframes<f64>,
}

const ICON_DURATION: f64 = 0.5;
const LABEL_DURATION: f64 = 0.7;

impl Ripple {
    pub fn new(id: u64, origin: Point, to: Theme, started: f64, radius: f64) -> MotionResult<Self> {
        let circle = Tween::new(0.0, radius * 2.0, 0.6)
            .with_ease(Ease::RIPPLE)
            .starting_at(started);
        let ring = Tween::new(0.0, radius * 0.6, 0.8)
            .with_ease(Ease::RIPPLE)
            .starting_at(started);
        let ring_fade = Tween::new(0.8, 0.0, 0.8)
            .with_ease(Ease::RIPPLE)
            .starting_at(started);
        Ok(Self {
            id,
            origin,
            to,
            started,
            radius,
            circle,
            ring,
            ring_fade,
            icon_scale: Keyframes::from_stops(&[0.0, 1.2, 1.0], &[0.0, 0.4, 1.0], Ease::SETTLE)?,
            icon_opacity: Keyframes::from_stops(&[1.0, 1.0, 0.0], &[0.0, 0.4, 1.0], Ease::SETTLE)?,
            label_opacity: Keyframes::from_stops(&[0.0, 1.0, 0.0], &[0.0, 0.3, 1.0], Ease::SETTLE)?,
            label_y: Keyframes::from_stops(&[10.0, 0.0, -5.0], &[0.0, 0.3, 1.0], Ease::SETTLE)?,
        })
    }

    /// Seconds since the ripple started.
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started).max(0.0)
    }

    pub fn frame(&self, now: f64) -> MotionResult<RippleFrame> {
        let t = self.elapsed(now);
        let icon = t / ICON_DURATION;
        let label = t / LABEL_DURATION;
        Ok(RippleFrame {
            circle_diameter: self.circle.sample(now),
            ring_diameter: self.ring.sample(now),
            ring_opacity: self.ring_fade.sample(now),
            icon_scale: self.icon_scale.sample(icon)?,
            icon_opacity: self.icon_opacity.sample(icon)?,
            label_opacity: self.label_opacity.sample(label)?,
            label_y: self.label_y.sample(label)?,
        })
    }

    /// The circle's edge has passed every viewport corner.
    pub fn covers(&self, viewport: Viewport, now: f64) -> bool {
        let r = self.circle.sample(now) / 2.0;
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(viewport.width, 0.0),
            Point::new(0.0, viewport.height),
            Point::new(viewport.width, viewport.height),
        ];
        corners.iter().all(|c| c.distance(self.origin) <= r)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/ripple.rs"]
mod tests;
