use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{ElementId, Length, Point, Vec2},
        error::MotionResult,
    },
    motion::context::{MotionCtx, SavedStyle},
};

/// Distance in pixels at which the navigation trigger stops growing.
pub const NAV_PROXIMITY_RANGE: f64 = 300.0;
/// Extra scale at zero distance.
pub const NAV_PROXIMITY_GAIN: f64 = 0.15;

/// Scale of the floating navigation trigger for a pointer `distance` pixels from its centre.
pub fn nav_proximity_scale(distance: f64) -> f64 {
    1.0 + (1.0 - distance / NAV_PROXIMITY_RANGE).max(0.0) * NAV_PROXIMITY_GAIN
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    pub strength: f64,
    /// Spring-back after the pointer leaves.
    pub release_duration: f64,
    pub release_ease: Ease,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            release_duration: 0.6,
            release_ease: Ease::SETTLE,
        }
    }
}

impl MagneticConfig {
    pub fn validate(&self) -> MotionResult<()> {
        Tween::new(Vec2::ZERO, Vec2::ZERO, self.release_duration).validate()
    }
}

#[derive(Clone, Debug)]
enum Pull {
    Rest,
    Held(Vec2),
    Releasing(Tween<Vec2>),
}

/// Element drawn toward the pointer while hovered.
#[derive(Clone, Debug)]
pub struct Magnetic {
    element: ElementId,
    config: MagneticConfig,
    saved: SavedStyle,
    pull: Pull,
    disposed: bool,
}

impl Magnetic {
    pub fn mount(cx: &mut MotionCtx<'_>, element: ElementId, config: MagneticConfig) -> Option<Self> {
        let saved = SavedStyle::capture(cx.doc, element)?;
        Some(Self {
            element,
            config,
            saved,
            pull: Pull::Rest,
            disposed: false,
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn is_active(&self) -> bool {
        !self.disposed
    }

    /// Current translation.
    pub fn offset(&self, now: f64) -> Vec2 {
        match &self.pull {
            Pull::Rest => Vec2::ZERO,
            Pull::Held(v) => *v,
            Pull::Releasing(t) => t.sample(now),
        }
    }

    /// `pointer` is in viewport coordinates, `None` when there is no (fine) pointer.
    pub fn update(&mut self, cx: &mut MotionCtx<'_>, pointer: Option<Point>) {
        if self.disposed {
            return;
        }
        let Some(rect) = cx.doc.rect(self.element) else {
            self.disposed = true;
            return;
        };
        let client = rect - Vec2::new(0.0, cx.offset);
        let inside = pointer.filter(|p| client.contains(*p));

        self.pull = match (inside, &self.pull) {
            (Some(p), _) => Pull::Held((p - client.center()) * self.config.strength),
            (None, Pull::Held(v)) => Pull::Releasing(
                Tween::new(*v, Vec2::ZERO, self.config.release_duration)
                    .with_ease(self.config.release_ease)
                    .starting_at(cx.now),
            ),
            (None, Pull::Releasing(t)) if cx.now >= t.end() => Pull::Rest,
            (None, other) => other.clone(),
        };

        let v = self.offset(cx.now);
        cx.doc.update_style(self.element, |s| {
            s.x = Length::Px(v.x);
            s.y = Length::Px(v.y);
        });
    }

    /// Idempotent.
    pub fn dispose(&mut self, cx: &mut MotionCtx<'_>) {
        if self.disposed {
            return;
        }
        self.saved.restore(cx.doc);
        self.disposed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/magnetic.rs"]
mod tests;
