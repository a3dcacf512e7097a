//! Composition root: one stage per page lifetime.

/// Scoped mounting with disposal on every exit path.
pub mod scope;
/// JSON scene files and the frame-stepping runner behind the CLI.
pub mod scene;
/// The [`stage::Stage`] that owns the clock, triggers and every mounted primitive.
#[allow(clippy::module_inception)]
pub mod stage;
