use crate::{
    pointer::magnetic::nav_proximity_scale,
    site::routes::{NAV_ITEMS, NavItem, Route},
};

/// Scroll offset past which the header switches to its compact look.
pub const SCROLLED_AFTER: f64 = 100.0;

/// Full-screen navigation overlay and header state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavState {
    open: bool,
    scrolled: bool,
    hovered: Option<usize>,
    active: Option<usize>,
    trigger_scale: f64,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            open: false,
            scrolled: false,
            hovered: None,
            active: Some(0),
            trigger_scale: 1.0,
        }
    }
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &'static [NavItem] {
        NAV_ITEMS
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn trigger_scale(&self) -> f64 {
        self.trigger_scale
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        if !self.open {
            self.hovered = None;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.hovered = None;
    }

    pub fn hover(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|i| *i < NAV_ITEMS.len());
    }

    /// Every route change closes the overlay.
    pub fn on_route(&mut self, route: &Route) {
        self.active = route.nav_index();
        self.close();
    }

    pub fn on_scroll(&mut self, offset: f64) {
        self.scrolled = offset > SCROLLED_AFTER;
    }

    /// Pointer distance from the floating trigger's centre.
    pub fn on_pointer_distance(&mut self, distance: f64) {
        self.trigger_scale = nav_proximity_scale(distance);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/nav.rs"]
mod tests;
