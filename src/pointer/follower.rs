use std::collections::BTreeMap;

use crate::{
    animation::lerp::approach,
    foundation::core::{ElementId, Length, Point, Rect, Vec2, Viewport},
    platform::document::Document,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FollowerId(pub u64);

/// How one follower chases the pointer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FollowerSpec {
    /// Fraction of the remaining distance covered per frame.
    pub lerp: f64,
    /// Subtracted before writing, so the element is centred on the pointer.
    pub anchor: Vec2,
}

impl FollowerSpec {
    pub fn new(lerp: f64) -> Self {
        Self {
            lerp,
            anchor: Vec2::ZERO,
        }
    }

    pub fn centred(lerp: f64, size: f64) -> Self {
        Self {
            lerp,
            anchor: Vec2::new(size / 2.0, size / 2.0),
        }
    }
}

#[derive(Clone, Debug)]
struct Follower {
    spec: FollowerSpec,
    host: Option<ElementId>,
    position: Point,
    paused: bool,
}

/// Raw pointer position plus every smoothed follower of a page.
///
/// Input handlers only write the raw position; followers move exclusively in [`PointerService::tick`].
#[derive(Clone, Debug, Default)]
pub struct PointerService {
    raw: Option<Point>,
    followers: BTreeMap<FollowerId, Follower>,
    next: u64,
}

impl PointerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coalesced pointer-move, in viewport coordinates.
    pub fn on_move(&mut self, p: Point) {
        self.raw = Some(p);
    }

    /// `None` until the first move.
    pub fn position(&self) -> Option<Point> {
        self.raw
    }

    /// Pointer position as a fraction of the viewport; the centre before any movement.
    pub fn normalized(&self, viewport: Viewport) -> Vec2 {
        match self.raw {
            Some(p) => Vec2::new(p.x / viewport.width, p.y / viewport.height),
            None => Vec2::new(0.5, 0.5),
        }
    }

    /// Register a follower. With a host element, its inline translation is written every tick and
    /// the follower stops for good once the host is detached.
    pub fn follow(&mut self, spec: FollowerSpec, host: Option<ElementId>) -> FollowerId {
        self.next += 1;
        let id = FollowerId(self.next);
        self.followers.insert(
            id,
            Follower {
                spec,
                host,
                position: Point::ZERO,
                paused: false,
            },
        );
        id
    }

    /// Idempotent.
    pub fn release(&mut self, id: FollowerId) -> bool {
        self.followers.remove(&id).is_some()
    }

    pub fn contains(&self, id: FollowerId) -> bool {
        self.followers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }

    pub fn set_paused(&mut self, id: FollowerId, paused: bool) {
        if let Some(f) = self.followers.get_mut(&id) {
            f.paused = paused;
        }
    }

    pub fn follower_position(&self, id: FollowerId) -> Option<Point> {
        self.followers.get(&id).map(|f| f.position)
    }

    /// One frame: every live follower closes `lerp` of its gap to the raw pointer.
    pub fn tick(&mut self, doc: &mut Document) {
        let Some(target) = self.raw else {
            return;
        };
        self.followers.retain(|id, f| {
            if f.paused {
                return true;
            }
            f.position = approach(&f.position, &target, f.spec.lerp);
            let Some(host) = f.host else {
                return true;
            };
            let (x, y) = (f.position.x - f.spec.anchor.x, f.position.y - f.spec.anchor.y);
            let attached = doc.update_style(host, |s| {
                s.x = Length::Px(x);
                s.y = Length::Px(y);
            });
            if !attached {
                tracing::debug!(follower = ?id, ?host, "follower host detached; stopping");
            }
            attached
        });
    }
}

/// Closeness of `pointer` to the centre of `rect`: 1 at the centre, 0 at `threshold` and beyond.
pub fn proximity(pointer: Point, rect: Rect, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    let d = pointer.distance(rect.center());
    (1.0 - d / threshold).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/follower.rs"]
mod tests;
