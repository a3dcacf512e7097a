use crate::foundation::core::{Rect, Viewport};

/// Default fraction of the viewport height an element's top must be above to count as visible.
pub const REVEAL_THRESHOLD: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum InitialVisibility {
    InView,
    BelowFold,
}

/// Classify an element at mount time from its layout box and the current scroll offset.
///
/// Zero-height elements are classified by their top edge like any other.
pub fn initial_visibility(
    rect: Rect,
    scroll_offset: f64,
    viewport: Viewport,
    threshold: f64,
) -> InitialVisibility {
    let top_in_viewport = rect.y0 - scroll_offset;
    if top_in_viewport < viewport.height * threshold {
        InitialVisibility::InView
    } else {
        InitialVisibility::BelowFold
    }
}
