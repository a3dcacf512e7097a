//! Dark/light theme with an expanding-circle reveal.

/// Ripple geometry and visuals.
pub mod ripple;
/// Theme state, persistence and toggling.
#[allow(clippy::module_inception)]
pub mod theme;
