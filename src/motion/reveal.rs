use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{ElementId, Length},
        error::MotionResult,
    },
    motion::context::{MotionCtx, SavedStyle},
    scroll::{
        trigger::{TriggerId, TriggerPosition, TriggerSpec},
        visibility::{InitialVisibility, REVEAL_THRESHOLD, initial_visibility},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Caller stagger, seconds.
    pub delay: f64,
    /// Initial downward offset in pixels.
    pub y: f64,
    pub duration: f64,
    pub ease: Ease,
    /// Layout-settling pause before an already-visible element animates.
    pub settle: f64,
    /// Fraction of the viewport height the element top must cross.
    pub threshold: f64,
    /// Animate straight away when the element is already above the threshold at mount.
    pub reveal_if_visible: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            delay: 0.0,
            y: 40.0,
            duration: 0.8,
            ease: Ease::POWER3_OUT,
            settle: 0.1,
            threshold: REVEAL_THRESHOLD,
            reveal_if_visible: true,
        }
    }
}

impl RevealConfig {
    /// Hook flavour: longer, deeper, later trigger, and always scroll-driven.
    pub fn lazy() -> Self {
        Self {
            y: 60.0,
            duration: 1.2,
            threshold: 0.85,
            reveal_if_visible: false,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        Tween::new(self.y, 0.0, self.duration)
            .starting_at(self.settle + self.delay)
            .validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RevealPhase {
    /// Below the fold; a one-shot trigger is armed.
    Waiting,
    /// Reveal scheduled or in flight.
    Playing,
    Revealed,
    Disposed,
}

#[derive(Clone, Debug)]
enum State {
    Waiting(TriggerId),
    Playing(Tween<f64>),
    Revealed,
    Disposed,
}

/// Fade-and-rise an element exactly once.
///
/// One state machine covers both entry paths: an element already in view starts `Playing` with
/// the settle delay folded into the tween start, one below the fold waits on a trigger first.
#[derive(Clone, Debug)]
pub struct Reveal {
    element: ElementId,
    config: RevealConfig,
    saved: SavedStyle,
    state: State,
}

impl Reveal {
    /// Returns `None` if the element is not attached.
    pub fn mount(cx: &mut MotionCtx<'_>, element: ElementId, config: RevealConfig) -> Option<Self> {
        let saved = SavedStyle::capture(cx.doc, element)?;

        // Hidden state goes in before anything else can observe the element.
        cx.doc.update_style(element, |s| {
            s.opacity = 0.0;
            s.y = Length::Px(config.y);
        });

        let state = match arm(cx, element, config.threshold, config.reveal_if_visible) {
            Some(Armed::Now) => {
                State::Playing(Self::tween(&config, cx.now + config.settle + config.delay))
            }
            Some(Armed::Trigger(id)) => State::Waiting(id),
            None => State::Disposed,
        };

        Some(Self {
            element,
            config,
            saved,
            state,
        })
    }

    fn tween(config: &RevealConfig, start: f64) -> Tween<f64> {
        Tween::new(0.0, 1.0, config.duration)
            .with_ease(config.ease)
            .starting_at(start)
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn phase(&self) -> RevealPhase {
        match self.state {
            State::Waiting(_) => RevealPhase::Waiting,
            State::Playing(_) => RevealPhase::Playing,
            State::Revealed => RevealPhase::Revealed,
            State::Disposed => RevealPhase::Disposed,
        }
    }

    pub fn trigger(&self) -> Option<TriggerId> {
        match self.state {
            State::Waiting(id) => Some(id),
            _ => None,
        }
    }

    /// Tween start, once the reveal has been scheduled.
    pub fn starts_at(&self) -> Option<f64> {
        match &self.state {
            State::Playing(t) => Some(t.start),
            _ => None,
        }
    }

    pub fn update(&mut self, cx: &mut MotionCtx<'_>) {
        if let State::Waiting(id) = self.state {
            if !consume(cx, id) {
                return;
            }
            self.state = State::Playing(Self::tween(&self.config, cx.now + self.config.delay));
        }

        if let State::Playing(tween) = &self.state {
            let p = tween.sample(cx.now);
            let y = self.config.y * (1.0 - p);
            let done = cx.now >= tween.end();
            let attached = cx.doc.update_style(self.element, |s| {
                s.opacity = p;
                s.y = Length::Px(y);
            });
            if !attached {
                self.state = State::Disposed;
            } else if done {
                self.state = State::Revealed;
            }
        }
    }

    /// Release the trigger and restore the pre-mount style. Idempotent.
    pub fn dispose(&mut self, cx: &mut MotionCtx<'_>) {
        if matches!(self.state, State::Disposed) {
            return;
        }
        if let State::Waiting(id) = self.state {
            cx.triggers.remove(id);
        }
        self.saved.restore(cx.doc);
        self.state = State::Disposed;
    }
}

/// How a reveal-style primitive was armed at mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Armed {
    /// Already above the threshold: play after the settle pause.
    Now,
    Trigger(TriggerId),
}

/// Shared initial-visibility policy for [`Reveal`] and the text reveal. `None` means the trigger
/// element could not be measured.
pub(crate) fn arm(
    cx: &mut MotionCtx<'_>,
    element: ElementId,
    threshold: f64,
    reveal_if_visible: bool,
) -> Option<Armed> {
    let rect = cx.doc.rect(element)?;
    let visibility = if reveal_if_visible {
        initial_visibility(rect, cx.offset, cx.viewport, threshold)
    } else {
        InitialVisibility::BelowFold
    };
    tracing::debug!(?element, ?visibility, "reveal armed");
    match visibility {
        InitialVisibility::InView => Some(Armed::Now),
        InitialVisibility::BelowFold => {
            let spec = TriggerSpec::once(element, TriggerPosition::top_at(threshold));
            cx.triggers
                .register(spec, cx.doc, cx.viewport, cx.offset)
                .map(Armed::Trigger)
        }
    }
}

/// True once the one-shot trigger has fired. The registration is dropped on the spot so it can
/// never re-arm.
pub(crate) fn consume(cx: &mut MotionCtx<'_>, id: TriggerId) -> bool {
    if !cx.triggers.has_fired(id) {
        return false;
    }
    cx.triggers.remove(id);
    true
}

#[cfg(test)]
#[path = "../../tests/unit/motion/reveal.rs"]
mod tests;
