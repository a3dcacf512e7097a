//! Aarohan motion is the headless motion engine behind the Aarohan studio site.
//!
//! Every scroll-linked effect on a page reads one authoritative offset from a single
//! [`ScrollClock`]. A [`Stage`] owns that clock together with the trigger registry and every
//! mounted primitive, and advances them in a fixed order on each tick:
//!
//! - Populate a [`Document`] with layout boxes
//! - Mount primitives ([`BindingSpec`]) directly or through a scope that cleans up on failure
//! - Feed input and call [`Stage::tick`] once per animation frame
//!
//! Nothing here draws. Primitives write inline [`Style`]s (transform and opacity only) which a
//! host applies to its own element tree.
#![forbid(unsafe_code)]

/// Easing curves, interpolation and time-based tweens.
pub mod animation;
mod foundation;
/// Scroll-bound reveal, text and parallax primitives.
pub mod motion;
/// Host capabilities, the element document and durable storage.
pub mod platform;
/// Pointer followers, the custom cursor and magnetic elements.
pub mod pointer;
/// The scroll clock and the trigger registry it feeds.
pub mod scroll;
/// Routes, navigation state, the contact form and the error boundary.
pub mod site;
/// Per-page composition root and JSON scenes.
pub mod stage;
/// Dark/light theme and its ripple.
pub mod theme;
/// Cover-swap-reveal page transitions.
pub mod transition;

pub use crate::foundation::core::{
    ElementId, Fps, FrameIndex, Length, Point, Rect, Style, Vec2, Viewport,
};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::Tween;
pub use crate::platform::capability::{Headless, Platform, Window};
pub use crate::platform::document::{Bounds, Document, ElementSpec};
pub use crate::platform::storage::{JsonFileStorage, MemoryStorage, Storage};
pub use crate::scroll::clock::{ScrollClock, ScrollConfig, ScrollFrame, ScrollTarget, ScrollToOptions};
pub use crate::site::routes::Route;
pub use crate::stage::scene::{Scene, SceneRun};
pub use crate::stage::stage::{BindingId, BindingSpec, Stage, StageConfig, StageEvent, StageSnapshot};
pub use crate::theme::theme::Theme;
