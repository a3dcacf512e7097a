use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{ElementId, Style},
        error::MotionResult,
    },
    platform::document::{Document, SelectorList},
    pointer::follower::{FollowerId, FollowerSpec, PointerService},
};

pub const LINK_SELECTOR: &str = r#"a, button, [data-cursor="pointer"]"#;
pub const TEXT_SELECTOR: &str = "[data-cursor-text]";
pub const EXPAND_SELECTOR: &str = r#"[data-cursor="expand"]"#;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub ring_lerp: f64,
    pub ring_size: f64,
    pub link_size: f64,
    pub expand_size: f64,
    pub dot_lerp: f64,
    pub dot_size: f64,
    /// Ring size transition on hover changes.
    pub resize_duration: f64,
    pub resize_ease: Ease,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            ring_lerp: 0.15,
            ring_size: 40.0,
            link_size: 56.0,
            expand_size: 80.0,
            dot_lerp: 0.35,
            dot_size: 4.0,
            resize_duration: 0.3,
            resize_ease: Ease::SETTLE,
        }
    }
}

impl CursorConfig {
    pub fn validate(&self) -> MotionResult<()> {
        Tween::new(self.ring_size, self.expand_size, self.resize_duration).validate()
    }
}

/// What the element under the pointer asks the cursor to look like.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct HoverState {
    pub link: bool,
    pub expanded: bool,
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
struct Selectors {
    link: SelectorList,
    text: SelectorList,
    expand: SelectorList,
}

impl Selectors {
    fn parse() -> MotionResult<Self> {
        Ok(Self {
            link: LINK_SELECTOR.parse()?,
            text: TEXT_SELECTOR.parse()?,
            expand: EXPAND_SELECTOR.parse()?,
        })
    }

    /// Resolved from the hovered element upward, so nested matches behave like one delegated
    /// listener on the document root.
    fn resolve(&self, doc: &Document, target: ElementId) -> HoverState {
        let link = doc.closest(target, &self.link).is_some();
        let text = doc.closest(target, &self.text);
        let label = text
            .and_then(|id| doc.get(id))
            .and_then(|e| e.attrs.get("data-cursor-text").cloned());
        let expanded = text.is_some() || doc.closest(target, &self.expand).is_some();
        HoverState {
            link,
            expanded,
            label,
        }
    }
}

/// Custom two-part cursor: a lagging outer ring and a snappier inner dot.
#[derive(Clone, Debug)]
pub struct Cursor {
    config: CursorConfig,
    selectors: Selectors,
    ring: ElementId,
    dot: ElementId,
    ring_follower: FollowerId,
    dot_follower: FollowerId,
    hover: HoverState,
    size: Tween<f64>,
    enabled: bool,
    disposed: bool,
}

impl Cursor {
    /// Attaches followers for both parts and hides the native cursor unless `coarse` holds.
    pub fn mount(
        doc: &mut Document,
        pointer: &mut PointerService,
        ring: ElementId,
        dot: ElementId,
        config: CursorConfig,
        coarse: bool,
    ) -> MotionResult<Self> {
        let selectors = Selectors::parse()?;
        let ring_follower = pointer.follow(
            FollowerSpec::centred(config.ring_lerp, config.ring_size),
            Some(ring),
        );
        let dot_follower = pointer.follow(
            FollowerSpec::centred(config.dot_lerp, config.dot_size),
            Some(dot),
        );
        let mut cursor = Self {
            config,
            selectors,
            ring,
            dot,
            ring_follower,
            dot_follower,
            hover: HoverState::default(),
            size: Tween::new(config.ring_size, config.ring_size, 0.0),
            enabled: true,
            disposed: false,
        };
        cursor.set_input_mode(doc, pointer, coarse);
        Ok(cursor)
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.disposed
    }

    pub fn ring_follower(&self) -> FollowerId {
        self.ring_follower
    }

    pub fn dot_follower(&self) -> FollowerId {
        self.dot_follower
    }

    fn target_size(&self) -> f64 {
        if self.hover.expanded {
            self.config.expand_size
        } else if self.hover.link {
            self.config.link_size
        } else {
            self.config.ring_size
        }
    }

    pub fn ring_size(&self, now: f64) -> f64 {
        self.size.sample(now)
    }

    pub fn ring_opacity(&self) -> f64 {
        if self.hover.expanded { 1.0 } else { 0.4 }
    }

    /// Re-evaluated whenever the input mode may have changed (hybrid devices).
    pub fn set_input_mode(&mut self, doc: &mut Document, pointer: &mut PointerService, coarse: bool) {
        if self.disposed {
            return;
        }
        let enabled = !coarse;
        self.enabled = enabled;
        pointer.set_paused(self.ring_follower, !enabled);
        pointer.set_paused(self.dot_follower, !enabled);
        doc.set_native_cursor(!enabled);
        let opacity = if enabled { 1.0 } else { 0.0 };
        for part in [self.ring, self.dot] {
            doc.update_style(part, |s| s.opacity = opacity);
        }
        if !enabled {
            self.hover = HoverState::default();
        }
    }

    /// Pointer entered `target` (or left everything, for `None`).
    pub fn pointer_over(&mut self, doc: &Document, target: Option<ElementId>, now: f64) {
        if !self.is_enabled() {
            return;
        }
        let next = match target {
            Some(id) => self.selectors.resolve(doc, id),
            None => HoverState::default(),
        };
        if next == self.hover {
            return;
        }
        self.hover = next;
        let current = self.size.sample(now);
        self.size = Tween::new(current, self.target_size(), self.config.resize_duration)
            .with_ease(self.config.resize_ease)
            .starting_at(now);
    }

    pub fn update(&mut self, doc: &mut Document, now: f64) {
        if !self.is_enabled() {
            return;
        }
        let scale = self.ring_size(now) / self.config.ring_size;
        let opacity = self.ring_opacity();
        doc.update_style(self.ring, |s| {
            s.scale = scale;
            s.opacity = opacity;
        });
    }

    /// Releases both followers and hands the pointer back to the native cursor. Idempotent.
    pub fn dispose(&mut self, doc: &mut Document, pointer: &mut PointerService) {
        if self.disposed {
            return;
        }
        pointer.release(self.ring_follower);
        pointer.release(self.dot_follower);
        doc.set_native_cursor(true);
        for part in [self.ring, self.dot] {
            doc.set_style(part, Style::default());
        }
        self.disposed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/cursor.rs"]
mod tests;
