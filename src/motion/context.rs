use crate::{
    foundation::core::{ElementId, Style, Viewport},
    platform::document::Document,
    scroll::trigger::ScrollTriggerRegistry,
};

/// Everything a primitive may read or write while mounting, updating or disposing.
///
/// The scroll offset comes from the page's single scroll clock; primitives never see raw input.
pub struct MotionCtx<'a> {
    pub doc: &'a mut Document,
    pub triggers: &'a mut ScrollTriggerRegistry,
    pub viewport: Viewport,
    pub offset: f64,
    pub now: f64,
}

/// Inline style an element had before a primitive took it over, restored on disposal.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SavedStyle {
    element: ElementId,
    style: Style,
}

impl SavedStyle {
    pub(crate) fn capture(doc: &Document, element: ElementId) -> Option<Self> {
        doc.style(element).map(|style| Self { element, style })
    }

    /// No-op when the element has already been detached.
    pub(crate) fn restore(&self, doc: &mut Document) {
        doc.set_style(self.element, self.style);
    }
}
