use super::*;
use crate::platform::document::{Bounds, ElementSpec};

fn host(doc: &mut Document) -> ElementId {
    doc.insert(ElementSpec::new(
        "div",
        Bounds {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 40.0,
        },
    ))
}

#[test]
fn ring_lags_dot_every_frame_until_convergence() {
    let mut doc = Document::new();
    let mut ptr = PointerService::new();
    let ring = ptr.follow(FollowerSpec::new(0.15), None);
    let dot = ptr.follow(FollowerSpec::new(0.35), None);

    ptr.on_move(Point::new(500.0, 300.0));
    let target = Point::new(500.0, 300.0);
    let mut prev_ring = f64::INFINITY;
    let mut prev_dot = f64::INFINITY;
    for _ in 0..120 {
        ptr.tick(&mut doc);
        let r = ptr.follower_position(ring).unwrap().distance(target);
        let d = ptr.follower_position(dot).unwrap().distance(target);
        assert!(r <= prev_ring && d <= prev_dot);
        if d > 1e-9 {
            assert!(r > d, "ring {r} should trail dot {d}");
        }
        prev_ring = r;
        prev_dot = d;
    }
    assert!(prev_ring < 1e-3);
}

#[test]
fn first_frame_covers_lerp_fraction() {
    let mut doc = Document::new();
    let mut ptr = PointerService::new();
    let id = ptr.follow(FollowerSpec::new(0.35), None);
    ptr.on_move(Point::new(100.0, 0.0));
    ptr.tick(&mut doc);
    let p = ptr.follower_position(id).unwrap();
    assert!((p.x - 35.0).abs() < 1e-9);
}

#[test]
fn hosted_follower_writes_centred_translation() {
    let mut doc = Document::new();
    let el = host(&mut doc);
    let mut ptr = PointerService::new();
    ptr.follow(FollowerSpec::centred(1.0, 40.0), Some(el));
    ptr.on_move(Point::new(200.0, 100.0));
    ptr.tick(&mut doc);
    let s = doc.style(el).unwrap();
    assert_eq!(s.x, Length::Px(180.0));
    assert_eq!(s.y, Length::Px(80.0));
}

#[test]
fn detached_host_stops_the_loop() {
    let mut doc = Document::new();
    let el = host(&mut doc);
    let mut ptr = PointerService::new();
    let id = ptr.follow(FollowerSpec::new(0.15), Some(el));
    ptr.on_move(Point::new(10.0, 10.0));
    doc.remove(el);
    ptr.tick(&mut doc);
    assert!(!ptr.contains(id));
    assert!(!ptr.release(id));
}

#[test]
fn no_movement_before_first_pointer_event() {
    let mut doc = Document::new();
    let mut ptr = PointerService::new();
    let id = ptr.follow(FollowerSpec::new(0.5), None);
    ptr.tick(&mut doc);
    assert_eq!(ptr.follower_position(id), Some(Point::ZERO));
    let vp = Viewport::new(1000.0, 500.0).unwrap();
    assert_eq!(ptr.normalized(vp), Vec2::new(0.5, 0.5));
    ptr.on_move(Point::new(250.0, 500.0));
    assert_eq!(ptr.normalized(vp), Vec2::new(0.25, 1.0));
}

#[test]
fn paused_followers_hold_position() {
    let mut doc = Document::new();
    let mut ptr = PointerService::new();
    let id = ptr.follow(FollowerSpec::new(0.5), None);
    ptr.set_paused(id, true);
    ptr.on_move(Point::new(100.0, 100.0));
    ptr.tick(&mut doc);
    assert_eq!(ptr.follower_position(id), Some(Point::ZERO));
}

#[test]
fn proximity_falls_off_linearly() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(proximity(Point::new(50.0, 50.0), rect, 200.0), 1.0);
    assert_eq!(proximity(Point::new(150.0, 50.0), rect, 200.0), 0.5);
    assert_eq!(proximity(Point::new(500.0, 50.0), rect, 200.0), 0.0);
}
