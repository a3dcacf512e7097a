//! The page's single scroll clock and everything driven from it.

/// Smoothed scroll position and frame broadcast.
pub mod clock;
/// Scroll-trigger registry.
pub mod trigger;
/// Mount-time visibility check.
pub mod visibility;
