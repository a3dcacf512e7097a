//! Pointer-driven effects. Every follower reads the one raw position held by the service.

/// Custom cursor with hover states.
pub mod cursor;
/// Raw pointer position and lerp followers.
pub mod follower;
/// Magnetic pull and proximity scaling.
pub mod magnetic;
