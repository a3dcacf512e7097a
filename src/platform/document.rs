use std::collections::BTreeMap;

use crate::foundation::{
    core::{ElementId, Rect, Style},
    error::{MotionError, MotionResult},
};

/// Layout box in document coordinates, as declared by scenes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Declarative element description used to populate a [`Document`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub bounds: Option<Bounds>,
    pub parent: Option<ElementId>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            tag: tag.into(),
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Element {
    pub tag: String,
    pub rect: Rect, // layout box, transforms excluded
    pub parent: Option<ElementId>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub style: Style,
}

/// The element tree the motion primitives read geometry from and write inline styles to.
///
/// Layout boxes are immutable once inserted; primitives only ever touch [`Style`].
#[derive(Clone, Debug)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
    native_cursor: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            next_id: 1,
            native_cursor: true,
        }
    }

    pub fn insert(&mut self, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        let rect = spec.bounds.map(Bounds::to_rect).unwrap_or(Rect::ZERO);
        self.elements.insert(
            id,
            Element {
                tag: spec.tag.to_ascii_lowercase(),
                rect,
                parent: spec.parent,
                attrs: spec.attrs,
                text: spec.text,
                style: Style::default(),
            },
        );
        id
    }

    /// Detach an element and all of its descendants.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if self.elements.remove(&id).is_none() {
            return false;
        }
        let children: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, e)| e.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.remove(child);
        }
        true
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(&id).map(|e| e.rect)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    pub fn style(&self, id: ElementId) -> Option<Style> {
        self.elements.get(&id).map(|e| e.style)
    }

    /// Write an inline style. Returns `false` (and writes nothing) for detached elements.
    pub fn set_style(&mut self, id: ElementId, style: Style) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.style = style;
                true
            }
            None => false,
        }
    }

    pub fn update_style(&mut self, id: ElementId, f: impl FnOnce(&mut Style)) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                f(&mut e.style);
                true
            }
            None => false,
        }
    }

    /// Bottom edge of the lowest element, i.e. the scrollable document height.
    pub fn content_height(&self) -> f64 {
        self.elements
            .values()
            .map(|e| e.rect.y1)
            .fold(0.0, f64::max)
    }

    /// Walk from `id` up through its ancestors, returning the first that matches.
    pub fn closest(&self, id: ElementId, selector: &SelectorList) -> Option<ElementId> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let e = self.elements.get(&c)?;
            if selector.matches(e) {
                return Some(c);
            }
            cur = e.parent;
        }
        None
    }

    pub fn matches(&self, id: ElementId, selector: &SelectorList) -> bool {
        self.elements.get(&id).is_some_and(|e| selector.matches(e))
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys().copied()
    }

    pub fn native_cursor(&self) -> bool {
        self.native_cursor
    }

    pub fn set_native_cursor(&mut self, visible: bool) {
        self.native_cursor = visible;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Selector {
    Tag(String),
    Attr(String),
    AttrEq(String, String),
}

impl Selector {
    fn matches(&self, e: &Element) -> bool {
        match self {
            Self::Tag(t) => e.tag == *t,
            Self::Attr(name) => e.attrs.contains_key(name),
            Self::AttrEq(name, value) => e.attrs.get(name) == Some(value),
        }
    }
}

/// Comma-separated tag and attribute selectors: `a, button, [data-cursor="pointer"]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(Vec<Selector>);

impl SelectorList {
    pub fn parse(input: &str) -> MotionResult<Self> {
        let mut out = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(MotionError::validation(format!(
                    "empty selector in '{input}'"
                )));
            }
            let sel = if let Some(inner) = part.strip_prefix('[').and_then(|p| p.strip_suffix(']'))
            {
                match inner.split_once('=') {
                    None => Selector::Attr(inner.trim().to_string()),
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        Selector::AttrEq(name.trim().to_string(), value.to_string())
                    }
                }
            } else if part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                Selector::Tag(part.to_ascii_lowercase())
            } else {
                return Err(MotionError::validation(format!(
                    "unsupported selector '{part}'"
                )));
            };
            out.push(sel);
        }
        Ok(Self(out))
    }

    pub fn matches(&self, e: &Element) -> bool {
        self.0.iter().any(|s| s.matches(e))
    }
}

impl std::str::FromStr for SelectorList {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/document.rs"]
mod tests;
