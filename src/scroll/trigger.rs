use std::{collections::BTreeMap, str::FromStr};

use crate::{
    animation::lerp::damp,
    foundation::{
        core::{ElementId, Viewport},
        error::MotionError,
    },
    platform::document::Document,
    scroll::clock::ScrollFrame,
};

/// A point along one axis: a fraction of an extent plus a pixel offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub fraction: f64,
    pub px: f64,
}

impl Anchor {
    pub const TOP: Self = Self::fraction(0.0);
    pub const CENTER: Self = Self::fraction(0.5);
    pub const BOTTOM: Self = Self::fraction(1.0);

    pub const fn fraction(fraction: f64) -> Self {
        Self { fraction, px: 0.0 }
    }

    pub fn resolve(self, extent: f64) -> f64 {
        self.fraction * extent + self.px
    }
}

impl FromStr for Anchor {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let parse = |num: &str| {
            num.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MotionError::validation(format!("bad trigger anchor '{s}'")))
        };
        match s.as_str() {
            "top" | "left" => Ok(Self::TOP),
            "center" => Ok(Self::CENTER),
            "bottom" | "right" => Ok(Self::BOTTOM),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    Ok(Self::fraction(parse(pct)? / 100.0))
                } else if let Some(px) = s.strip_suffix("px") {
                    Ok(Self {
                        fraction: 0.0,
                        px: parse(px)?,
                    })
                } else {
                    Err(MotionError::validation(format!(
                        "unknown trigger anchor '{s}'"
                    )))
                }
            }
        }
    }
}

/// `"<element anchor> <viewport anchor>"`: the trigger point is reached when the element anchor
/// meets the viewport anchor. `"top 90%"` fires when the element top crosses 90% of the viewport
/// height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerPosition {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPosition {
    pub const TOP_BOTTOM: Self = Self {
        element: Anchor::TOP,
        viewport: Anchor::BOTTOM,
    };
    pub const BOTTOM_TOP: Self = Self {
        element: Anchor::BOTTOM,
        viewport: Anchor::TOP,
    };

    /// Element top at `fraction` of the viewport height.
    pub const fn top_at(fraction: f64) -> Self {
        Self {
            element: Anchor::TOP,
            viewport: Anchor::fraction(fraction),
        }
    }

    /// Scroll offset at which this position is met for an element spanning `[top, top + height]`.
    pub fn scroll_offset(self, top: f64, height: f64, viewport_height: f64) -> f64 {
        top + self.element.resolve(height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for TriggerPosition {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(MotionError::validation(format!(
                "trigger position '{s}' must have exactly two anchors"
            )));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scrub {
    /// Output equals raw progress every frame.
    Instant,
    /// Output lags raw progress with this time constant in seconds.
    Smooth(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Fire once when the start position is reached; never re-arm.
    Once,
    /// Continuously bind progress across `[start, end]`.
    Scrub(Scrub),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    pub trigger: ElementId,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
    pub mode: TriggerMode,
}

impl TriggerSpec {
    pub fn once(trigger: ElementId, start: TriggerPosition) -> Self {
        Self {
            trigger,
            start,
            end: TriggerPosition::BOTTOM_TOP,
            mode: TriggerMode::Once,
        }
    }

    /// Spans the whole pass of the element through the viewport.
    pub fn scrub(trigger: ElementId, scrub: Scrub) -> Self {
        Self {
            trigger,
            start: TriggerPosition::TOP_BOTTOM,
            end: TriggerPosition::BOTTOM_TOP,
            mode: TriggerMode::Scrub(scrub),
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TriggerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Fired(TriggerId),
}

#[derive(Clone, Debug)]
struct Entry {
    spec: TriggerSpec,
    start_px: f64,
    end_px: f64,
    raw: f64,
    output: f64,
    fired: bool,
    last_now: Option<f64>,
}

impl Entry {
    fn raw_progress(&self, offset: f64) -> f64 {
        let span = self.end_px - self.start_px;
        if span <= 0.0 {
            return if offset >= self.start_px { 1.0 } else { 0.0 };
        }
        ((offset - self.start_px) / span).clamp(0.0, 1.0)
    }
}

/// Every live scroll trigger of a page. Fed exclusively from [`ScrollFrame`]s.
#[derive(Clone, Debug, Default)]
pub struct ScrollTriggerRegistry {
    entries: BTreeMap<TriggerId, Entry>,
    next: u64,
}

impl ScrollTriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn measure(spec: &TriggerSpec, doc: &Document, viewport: Viewport) -> Option<(f64, f64)> {
        let rect = doc.rect(spec.trigger)?;
        let start = spec
            .start
            .scroll_offset(rect.y0, rect.height(), viewport.height);
        let end = spec.end.scroll_offset(rect.y0, rect.height(), viewport.height);
        Some((start, end))
    }

    /// Register a trigger against the element's current layout. Returns `None` when the trigger
    /// element is not attached.
    pub fn register(
        &mut self,
        spec: TriggerSpec,
        doc: &Document,
        viewport: Viewport,
        offset: f64,
    ) -> Option<TriggerId> {
        let Some((start_px, end_px)) = Self::measure(&spec, doc, viewport) else {
            tracing::debug!(element = ?spec.trigger, "trigger element missing; not registered");
            return None;
        };
        self.next += 1;
        let id = TriggerId(self.next);
        let mut entry = Entry {
            spec,
            start_px,
            end_px,
            raw: 0.0,
            output: 0.0,
            fired: false,
            last_now: None,
        };
        entry.raw = entry.raw_progress(offset);
        entry.output = entry.raw;
        self.entries.insert(id, entry);
        Some(id)
    }

    /// Idempotent.
    pub fn remove(&mut self, id: TriggerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Re-measure after layout or viewport changes. Triggers whose element vanished are dropped.
    pub fn refresh(&mut self, doc: &Document, viewport: Viewport) {
        self.entries
            .retain(|_, e| match Self::measure(&e.spec, doc, viewport) {
                Some((start, end)) => {
                    e.start_px = start;
                    e.end_px = end;
                    true
                }
                None => false,
            });
    }

    pub fn bounds(&self, id: TriggerId) -> Option<(f64, f64)> {
        self.entries.get(&id).map(|e| (e.start_px, e.end_px))
    }

    /// Progress as seen by the bound property (smoothed for scrubbed triggers).
    pub fn progress(&self, id: TriggerId) -> Option<f64> {
        self.entries.get(&id).map(|e| e.output)
    }

    pub fn raw_progress(&self, id: TriggerId) -> Option<f64> {
        self.entries.get(&id).map(|e| e.raw)
    }

    pub fn has_fired(&self, id: TriggerId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.fired)
    }

    pub fn update(&mut self, frame: &ScrollFrame) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        for (id, e) in &mut self.entries {
            e.raw = e.raw_progress(frame.offset);
            let dt = e.last_now.map_or(0.0, |last| (frame.now - last).max(0.0));
            e.last_now = Some(frame.now);
            match e.spec.mode {
                TriggerMode::Once => {
                    e.output = e.raw;
                    if !e.fired && frame.offset >= e.start_px {
                        e.fired = true;
                        events.push(TriggerEvent::Fired(*id));
                    }
                }
                TriggerMode::Scrub(Scrub::Instant) => e.output = e.raw,
                TriggerMode::Scrub(Scrub::Smooth(tc)) => {
                    e.output = damp(e.output, e.raw, tc, dt);
                    if (e.output - e.raw).abs() < 1e-4 {
                        e.output = e.raw;
                    }
                }
            }
        }
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
