use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{ElementId, Length},
        error::{MotionError, MotionResult},
    },
    platform::document::Document,
};

/// Overlay offset, in percent of its height, when it is parked above the viewport.
const PARKED: f64 = -100.0;
/// Overlay offset when it covers the viewport.
const COVERING: f64 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub ease: Ease,
    pub exit_content: f64,
    pub exit_overlay: f64,
    pub exit_depth: f64,
    pub enter_overlay: f64,
    pub enter_overlay_delay: f64,
    pub enter_depth: f64,
    pub enter_content: f64,
    pub enter_content_delay: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            ease: Ease::WIPE,
            exit_content: 0.2,
            exit_overlay: 0.4,
            exit_depth: 0.5,
            enter_overlay: 0.6,
            enter_overlay_delay: 0.05,
            enter_depth: 0.7,
            enter_content: 0.4,
            enter_content_delay: 0.3,
        }
    }
}

impl TransitionConfig {
    pub fn validate(&self) -> MotionResult<()> {
        let timings = [
            (self.exit_content, 0.0),
            (self.exit_overlay, 0.0),
            (self.exit_depth, 0.0),
            (self.enter_overlay, self.enter_overlay_delay),
            (self.enter_depth, 0.0),
            (self.enter_content, self.enter_content_delay),
        ];
        for (duration, delay) in timings {
            Tween::new(0.0, 1.0, duration).starting_at(delay).validate()?;
        }
        if timings.iter().any(|&(_, delay)| delay < 0.0) {
            return Err(MotionError::animation("transition delays must be >= 0"));
        }
        Ok(())
    }
}

/// The three elements a transition drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionLayers {
    /// Opaque wipe.
    pub overlay: ElementId,
    /// Translucent layer trailing the wipe.
    pub depth: ElementId,
    /// Wrapper around the routed page.
    pub content: ElementId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Exiting,
    Entering,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The old page is fully covered and the routed content has been replaced.
    Swapped { from: String, to: String },
    /// The overlay has cleared.
    Settled(String),
}

#[derive(Clone, Debug)]
struct Tracks {
    overlay: Tween<f64>,
    depth: Tween<f64>,
    content: Tween<f64>,
}

impl Tracks {
    fn at_rest(overlay: f64, depth: f64, content: f64, ease: Ease) -> Self {
        let still = |v: f64| Tween::new(v, v, 0.0).with_ease(ease);
        Self {
            overlay: still(overlay),
            depth: still(depth),
            content: still(content),
        }
    }

    fn end(&self) -> f64 {
        self.overlay
            .end()
            .max(self.depth.end())
            .max(self.content.end())
    }

    fn sample(&self, now: f64) -> (f64, f64, f64) {
        (
            self.overlay.sample(now),
            self.depth.sample(now),
            self.content.sample(now),
        )
    }
}

/// Cover, swap, reveal. Keyed by route; a navigation arriving mid-flight supersedes the one in
/// progress instead of queueing behind it.
#[derive(Clone, Debug)]
pub struct PageTransition {
    config: TransitionConfig,
    layers: TransitionLayers,
    route: String,
    pending: Option<String>,
    phase: TransitionPhase,
    tracks: Tracks,
}

impl PageTransition {
    /// The initial page is shown without animating.
    pub fn mount(
        doc: &mut Document,
        layers: TransitionLayers,
        route: impl Into<String>,
        config: TransitionConfig,
    ) -> Self {
        let t = Self {
            config,
            layers,
            route: route.into(),
            pending: None,
            phase: TransitionPhase::Idle,
            tracks: Tracks::at_rest(PARKED, PARKED, 1.0, config.ease),
        };
        t.write(doc, 0.0);
        t
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TransitionPhase::Idle
    }

    /// `(overlay y %, depth y %, content opacity)` at `now`.
    pub fn sample(&self, now: f64) -> (f64, f64, f64) {
        self.tracks.sample(now)
    }

    fn track(&self, from: f64, to: f64, start: f64, duration: f64) -> Tween<f64> {
        Tween::new(from, to, duration)
            .with_ease(self.config.ease)
            .starting_at(start)
    }

    // Picks up from wherever the enter wipe currently is.
    fn begin_exit(&mut self, now: f64) {
        let c = self.config;
        let t = &self.tracks;
        self.tracks = Tracks {
            overlay: t.overlay.retarget(t.overlay.sample(now), COVERING, now, c.exit_overlay),
            depth: t.depth.retarget(t.depth.sample(now), COVERING, now, c.exit_depth),
            content: t.content.retarget(t.content.sample(now), 0.0, now, c.exit_content),
        };
        self.phase = TransitionPhase::Exiting;
    }

    fn begin_enter(&mut self, now: f64) {
        let c = self.config;
        self.tracks = Tracks {
            overlay: self.track(COVERING, PARKED, now + c.enter_overlay_delay, c.enter_overlay),
            depth: self.track(COVERING, PARKED, now, c.enter_depth),
            content: self.track(0.0, 1.0, now + c.enter_content_delay, c.enter_content),
        };
        self.phase = TransitionPhase::Entering;
    }

    /// Route key changed. Returns `false` when nothing needs to animate.
    pub fn navigate(&mut self, to: impl Into<String>, now: f64) -> bool {
        let to = to.into();
        match self.phase {
            TransitionPhase::Idle | TransitionPhase::Entering if to == self.route => return false,
            // Already covering; only the destination changes.
            TransitionPhase::Exiting => {}
            TransitionPhase::Idle | TransitionPhase::Entering => self.begin_exit(now),
        }
        tracing::debug!(from = %self.route, %to, phase = ?self.phase, "page transition");
        self.pending = Some(to);
        true
    }

    fn write(&self, doc: &mut Document, now: f64) {
        let (overlay, depth, content) = self.tracks.sample(now);
        doc.update_style(self.layers.overlay, |s| s.y = Length::Percent(overlay));
        doc.update_style(self.layers.depth, |s| s.y = Length::Percent(depth));
        doc.update_style(self.layers.content, |s| s.opacity = content);
    }

    pub fn update(&mut self, doc: &mut Document, now: f64) -> Option<TransitionEvent> {
        let finished = now >= self.tracks.end();
        let event = match self.phase {
            TransitionPhase::Exiting if finished => {
                let to = self.pending.take().unwrap_or_else(|| self.route.clone());
                let from = std::mem::replace(&mut self.route, to.clone());
                self.begin_enter(now);
                Some(TransitionEvent::Swapped { from, to })
            }
            TransitionPhase::Entering if finished => {
                self.phase = TransitionPhase::Idle;
                Some(TransitionEvent::Settled(self.route.clone()))
            }
            _ => None,
        };
        self.write(doc, now);
        event
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/page.rs"]
mod tests;
