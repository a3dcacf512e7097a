use crate::{
    animation::{
        ease::Ease,
        tween::{Tween, stagger},
    },
    foundation::{
        core::{ElementId, Length},
        error::{MotionError, MotionResult},
    },
    motion::{
        context::MotionCtx,
        reveal::{Armed, arm, consume},
    },
    scroll::{trigger::TriggerId, visibility::REVEAL_THRESHOLD},
};

/// One word of split text, rendered as its own clipped inline block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordNode {
    pub index: usize,
    pub text: String,
    /// Vertical offset relative to the word's own height.
    pub y: Length,
}

/// Text decomposed into typed word nodes. Building one never touches the document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct WordTree {
    pub words: Vec<WordNode>,
}

impl WordTree {
    /// Split on whitespace. Every word starts fully offset below its clip box.
    pub fn split(text: &str) -> Self {
        let words = text
            .split_whitespace()
            .enumerate()
            .map(|(index, w)| WordNode {
                index,
                text: w.to_string(),
                y: Length::Percent(100.0),
            })
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words joined back with single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn settle_all(&mut self, y: Length) {
        for w in &mut self.words {
            w.y = y;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextRevealConfig {
    pub delay: f64,
    /// Seconds between consecutive words.
    pub stagger: f64,
    pub duration: f64,
    pub ease: Ease,
    pub settle: f64,
    pub threshold: f64,
    pub reveal_if_visible: bool,
}

impl Default for TextRevealConfig {
    fn default() -> Self {
        Self {
            delay: 0.0,
            stagger: 0.04,
            duration: 0.8,
            ease: Ease::POWER3_OUT,
            settle: 0.1,
            threshold: REVEAL_THRESHOLD,
            reveal_if_visible: true,
        }
    }
}

impl TextRevealConfig {
    /// Heading-split flavour used by section titles.
    pub fn split() -> Self {
        Self {
            stagger: 0.08,
            duration: 1.2,
            threshold: 0.85,
            reveal_if_visible: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.stagger.is_finite() || self.stagger < 0.0 {
            return Err(MotionError::animation("word stagger must be finite and >= 0"));
        }
        Tween::new(0.0, 1.0, self.duration)
            .starting_at(self.settle + self.delay)
            .validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Waiting(TriggerId),
    Playing { start: f64 },
    Revealed,
    Disposed,
}

/// Word-by-word rise of an element's text.
#[derive(Clone, Debug)]
pub struct TextReveal {
    element: ElementId,
    config: TextRevealConfig,
    tree: WordTree,
    state: State,
}

impl TextReveal {
    /// Splits the element's text content. Returns `None` if the element is not attached.
    pub fn mount(
        cx: &mut MotionCtx<'_>,
        element: ElementId,
        config: TextRevealConfig,
    ) -> Option<Self> {
        let text = cx.doc.get(element)?.text.clone().unwrap_or_default();
        let tree = WordTree::split(&text);
        let state = match arm(cx, element, config.threshold, config.reveal_if_visible) {
            Some(Armed::Now) => State::Playing {
                start: cx.now + config.settle + config.delay,
            },
            Some(Armed::Trigger(id)) => State::Waiting(id),
            None => State::Disposed,
        };
        Some(Self {
            element,
            config,
            tree,
            state,
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn words(&self) -> &WordTree {
        &self.tree
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, State::Revealed)
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, State::Waiting(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self.state, State::Disposed)
    }

    fn word_tween(config: &TextRevealConfig, at: f64) -> Tween<Length> {
        Tween::new(Length::Percent(100.0), Length::Percent(0.0), config.duration)
            .with_ease(config.ease)
            .starting_at(at)
    }

    pub fn update(&mut self, cx: &mut MotionCtx<'_>) {
        if let State::Waiting(id) = self.state {
            if !consume(cx, id) {
                return;
            }
            self.state = State::Playing {
                start: cx.now + self.config.delay,
            };
        }
        let State::Playing { start } = self.state else {
            return;
        };
        if !cx.doc.contains(self.element) {
            self.state = State::Disposed;
            return;
        }

        let mut done = true;
        let starts = stagger(self.tree.words.len(), start, self.config.stagger);
        for (word, at) in self.tree.words.iter_mut().zip(starts) {
            let tween = Self::word_tween(&self.config, at);
            done &= cx.now >= tween.end();
            word.y = tween.sample(cx.now);
        }
        if done {
            self.state = State::Revealed;
        }
    }

    /// Words return to their natural position. Idempotent.
    pub fn dispose(&mut self, cx: &mut MotionCtx<'_>) {
        if let State::Disposed = self.state {
            return;
        }
        if let State::Waiting(id) = self.state {
            cx.triggers.remove(id);
        }
        self.tree.settle_all(Length::Percent(0.0));
        self.state = State::Disposed;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/text.rs"]
mod tests;
