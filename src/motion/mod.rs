//! Scroll-bound motion primitives.
//!
//! Each primitive mounts against one element, is updated once per frame from the page's scroll
//! frame, and reverts its inline style on disposal.

/// Per-frame context handed to primitives.
pub mod context;
/// Scrubbed translation bound to an element's pass through the viewport.
pub mod parallax;
/// Read-only scroll progress of an element.
pub mod progress;
/// One-shot fade-and-rise.
pub mod reveal;
/// Word-split text reveal.
pub mod text;
