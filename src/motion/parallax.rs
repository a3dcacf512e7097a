use crate::{
    animation::lerp::Lerp,
    foundation::core::{ElementId, Length},
    motion::context::{MotionCtx, SavedStyle},
    scroll::trigger::{Scrub, TriggerId, TriggerMode, TriggerPosition, TriggerSpec},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// `(start, end)` signs: down and right travel from negative to positive.
    fn signs(self) -> (f64, f64) {
        match self {
            Self::Down | Self::Right => (-1.0, 1.0),
            Self::Up | Self::Left => (1.0, -1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
}

/// Which element's box defines the scroll span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    #[default]
    Own,
    Parent,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub axis: Axis,
    pub from: Length,
    pub to: Length,
    pub scrub: Scrub,
    pub source: TriggerSource,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self::column(Direction::Down, 100.0)
    }
}

impl ParallaxConfig {
    fn signed(direction: Direction, magnitude: f64, unit: fn(f64) -> Length) -> (Length, Length) {
        let (a, b) = direction.signs();
        (unit(a * magnitude), unit(b * magnitude))
    }

    /// A column drifting against its section while the section passes through the viewport.
    pub fn column(direction: Direction, speed: f64) -> Self {
        let (from, to) = Self::signed(direction, speed, Length::Px);
        Self {
            axis: direction.axis(),
            from,
            to,
            scrub: Scrub::Smooth(0.5),
            source: TriggerSource::Parent,
            start: TriggerPosition::TOP_BOTTOM,
            end: TriggerPosition::BOTTOM_TOP,
        }
    }

    /// Horizontal drift of the element across its own pass.
    pub fn drift(direction: Direction, amount: f64) -> Self {
        let (from, to) = Self::signed(direction, amount, Length::Px);
        Self {
            axis: direction.axis(),
            from,
            to,
            source: TriggerSource::Own,
            ..Self::column(direction, amount)
        }
    }

    /// An oversized image shifting inside its clipping container by `intensity` of its height.
    pub fn image(intensity: f64) -> Self {
        let (from, to) = Self::signed(Direction::Down, intensity * 100.0, Length::Percent);
        Self {
            axis: Axis::Y,
            from,
            to,
            ..Self::column(Direction::Down, 0.0)
        }
    }

    /// General-purpose binding: `100 * speed` pixels either way, tracking scroll exactly.
    pub fn hook(speed: f64, axis: Axis, start: TriggerPosition, end: TriggerPosition) -> Self {
        let distance = 100.0 * speed;
        Self {
            axis,
            from: Length::Px(-distance),
            to: Length::Px(distance),
            scrub: Scrub::Instant,
            source: TriggerSource::Own,
            start,
            end,
        }
    }

    /// Translation at scrub progress `p`.
    pub fn at(&self, p: f64) -> Length {
        Length::lerp(&self.from, &self.to, p.clamp(0.0, 1.0))
    }
}

/// Continuous scroll-to-translation binding. Writes transforms only.
#[derive(Clone, Debug)]
pub struct Parallax {
    element: ElementId,
    config: ParallaxConfig,
    saved: SavedStyle,
    trigger: Option<TriggerId>,
}

impl Parallax {
    /// Returns `None` when the element, or the parent it is meant to track, is missing.
    pub fn mount(
        cx: &mut MotionCtx<'_>,
        element: ElementId,
        config: ParallaxConfig,
    ) -> Option<Self> {
        let saved = SavedStyle::capture(cx.doc, element)?;
        let source = match config.source {
            TriggerSource::Own => element,
            TriggerSource::Parent => cx.doc.parent(element)?,
        };
        let spec = TriggerSpec {
            trigger: source,
            start: config.start,
            end: config.end,
            mode: TriggerMode::Scrub(config.scrub),
        };
        let trigger = cx.triggers.register(spec, cx.doc, cx.viewport, cx.offset)?;
        let mut parallax = Self {
            element,
            config,
            saved,
            trigger: Some(trigger),
        };
        parallax.write(cx);
        Some(parallax)
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    pub fn trigger(&self) -> Option<TriggerId> {
        self.trigger
    }

    pub fn is_active(&self) -> bool {
        self.trigger.is_some()
    }

    fn write(&mut self, cx: &mut MotionCtx<'_>) {
        let Some(id) = self.trigger else {
            return;
        };
        let Some(p) = cx.triggers.progress(id) else {
            // Registry dropped the trigger on refresh: its element is gone.
            self.trigger = None;
            return;
        };
        let value = self.config.at(p);
        let axis = self.config.axis;
        let attached = cx.doc.update_style(self.element, |s| match axis {
            Axis::X => s.x = value,
            Axis::Y => s.y = value,
        });
        if !attached {
            cx.triggers.remove(id);
            self.trigger = None;
        }
    }

    pub fn update(&mut self, cx: &mut MotionCtx<'_>) {
        self.write(cx);
    }

    /// Idempotent.
    pub fn dispose(&mut self, cx: &mut MotionCtx<'_>) {
        if let Some(id) = self.trigger.take() {
            cx.triggers.remove(id);
            self.saved.restore(cx.doc);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/parallax.rs"]
mod tests;
