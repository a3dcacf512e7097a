//! Time-based interpolation.

pub mod ease;
pub mod keyframes;
pub mod lerp;
pub mod tween;
