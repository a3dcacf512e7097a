use std::{cell::Cell, rc::Rc};

use crate::{
    animation::{ease::Ease, lerp::Lerp, tween::Tween},
    foundation::{
        core::{ElementId, Vec2},
        error::MotionResult,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Smooth-scroll engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Seconds an eased wheel scroll takes to reach its target.
    pub duration: f64,
    pub ease: Ease,
    pub orientation: Orientation,
    /// When off, wheel input scrolls natively (immediately).
    pub smooth_wheel: bool,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            ease: Ease::OutExpo,
            orientation: Orientation::Vertical,
            smooth_wheel: true,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> MotionResult<()> {
        Tween::new(0.0, 1.0, self.duration).validate()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum ScrollDirection {
    Forward,
    Backward,
    #[default]
    Still,
}

/// What the clock publishes once per animation frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollFrame {
    pub now: f64,
    pub offset: f64,
    pub velocity: f64, // pixels moved since the previous frame
    pub direction: ScrollDirection,
    pub limit: f64,
}

impl ScrollFrame {
    /// Whole-document progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.limit <= 0.0 {
            return 0.0;
        }
        (self.offset / self.limit).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollTarget {
    Offset(f64),
    Top,
    Bottom,
    Element(ElementId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollToOptions {
    /// Added to the resolved target, e.g. to clear a fixed header.
    pub offset: f64,
    /// Overrides the configured duration.
    pub duration: Option<f64>,
    pub immediate: bool,
}

#[derive(Clone, Copy, Debug)]
struct ActiveScroll {
    from: f64,
    to: f64,
    start: Option<f64>, // pinned on the first tick after the request
    duration: f64,
    ease: Ease,
}

type Listener = Box<dyn FnMut(&ScrollFrame)>;

/// Handle returned by [`ScrollClock::subscribe`]. Disposal is idempotent.
#[must_use = "dropping a Subscription without disposing keeps the listener registered"]
#[derive(Clone, Debug)]
pub struct Subscription {
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn dispose(&self) {
        self.alive.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.alive.get()
    }
}

/// The one authoritative scroll position for a page lifetime.
///
/// Raw wheel/touch input only moves the *target*; the published offset advances toward it on
/// [`ScrollClock::tick`], so every consumer reading a frame sees the same value.
pub struct ScrollClock {
    config: ScrollConfig,
    current: f64,
    target: f64,
    limit: f64,
    last_offset: f64,
    direction: ScrollDirection,
    animation: Option<ActiveScroll>,
    listeners: Vec<(Rc<Cell<bool>>, Listener)>,
    last_frame: Option<ScrollFrame>,
}

impl std::fmt::Debug for ScrollClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollClock")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("limit", &self.limit)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ScrollClock {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            current: 0.0,
            target: 0.0,
            limit: 0.0,
            last_offset: 0.0,
            direction: ScrollDirection::Still,
            animation: None,
            listeners: Vec::new(),
            last_frame: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn last_frame(&self) -> Option<ScrollFrame> {
        self.last_frame
    }

    /// Maximum scroll offset (document extent minus viewport extent).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
        if let Some(anim) = &mut self.animation {
            anim.to = anim.to.clamp(0.0, self.limit);
        }
    }

    fn clamp(&self, v: f64) -> f64 {
        v.clamp(0.0, self.limit)
    }

    fn axis(&self, delta: Vec2) -> f64 {
        match self.config.orientation {
            Orientation::Vertical => delta.y,
            Orientation::Horizontal => delta.x,
        }
    }

    fn animate_to(&mut self, to: f64, duration: f64) {
        self.target = to;
        if duration <= 0.0 || to == self.current {
            self.jump(to);
            return;
        }
        self.animation = Some(ActiveScroll {
            from: self.current,
            to,
            start: None,
            duration,
            ease: self.config.ease,
        });
    }

    fn jump(&mut self, to: f64) {
        self.target = to;
        self.current = to;
        self.animation = None;
    }

    /// Wheel input. Deltas accumulate on the target so rapid notches chain smoothly.
    pub fn on_wheel(&mut self, delta: Vec2) {
        let d = self.axis(delta) * self.config.wheel_multiplier;
        let to = self.clamp(self.target + d);
        if self.config.smooth_wheel {
            self.animate_to(to, self.config.duration);
        } else {
            self.jump(to);
        }
    }

    /// Touch drag. Follows the finger directly, scaled by the touch multiplier.
    pub fn on_touch(&mut self, delta: Vec2) {
        let d = self.axis(delta) * self.config.touch_multiplier;
        let to = self.clamp(self.current + d);
        self.jump(to);
    }

    /// Scroll position changed by something the engine does not drive (scrollbar, keyboard).
    pub fn on_native_scroll(&mut self, offset: f64) {
        let to = self.clamp(offset);
        self.jump(to);
    }

    /// Programmatic scroll to an already-resolved document offset.
    #[tracing::instrument(skip(self))]
    pub fn scroll_to(&mut self, offset: f64, opts: ScrollToOptions) {
        let to = self.clamp(offset + opts.offset);
        if opts.immediate {
            self.jump(to);
        } else {
            self.animate_to(to, opts.duration.unwrap_or(self.config.duration));
        }
    }

    pub fn stop(&mut self) {
        self.target = self.current;
        self.animation = None;
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ScrollFrame) + 'static) -> Subscription {
        let alive = Rc::new(Cell::new(true));
        self.listeners.push((Rc::clone(&alive), Box::new(listener)));
        Subscription { alive }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.iter().filter(|(a, _)| a.get()).count()
    }

    /// Advance one animation frame and republish the offset to every subscriber.
    pub fn tick(&mut self, now: f64) -> ScrollFrame {
        if let Some(anim) = &mut self.animation {
            let start = *anim.start.get_or_insert(now);
            let t = if anim.duration > 0.0 {
                ((now - start) / anim.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            if t >= 1.0 {
                self.current = anim.to;
                self.animation = None;
            } else {
                self.current = f64::lerp(&anim.from, &anim.to, anim.ease.apply(t));
            }
        }

        let velocity = self.current - self.last_offset;
        self.direction = if velocity > 0.0 {
            ScrollDirection::Forward
        } else if velocity < 0.0 {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Still
        };
        self.last_offset = self.current;

        let frame = ScrollFrame {
            now,
            offset: self.current,
            velocity,
            direction: self.direction,
            limit: self.limit,
        };

        self.listeners.retain(|(alive, _)| alive.get());
        for (alive, listener) in &mut self.listeners {
            if alive.get() {
                listener(&frame);
            }
        }
        tracing::trace!(offset = frame.offset, velocity = frame.velocity, "scroll frame");

        self.last_frame = Some(frame);
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/clock.rs"]
mod tests;
