use super::*;
use crate::{
    foundation::core::{Style, Viewport},
    platform::document::{Bounds, Document, ElementSpec},
    scroll::{
        clock::{ScrollDirection, ScrollFrame},
        trigger::ScrollTriggerRegistry,
    },
};

fn frame(now: f64, offset: f64) -> ScrollFrame {
    ScrollFrame {
        now,
        offset,
        velocity: 0.0,
        direction: ScrollDirection::Still,
        limit: 10_000.0,
    }
}

/// Section at 2000..3000 with one child column, viewport 1000 tall.
fn section() -> (Document, ElementId, ElementId) {
    let mut doc = Document::new();
    let bounds = Bounds {
        x: 0.0,
        y: 2000.0,
        width: 1280.0,
        height: 1000.0,
    };
    let parent = doc.insert(ElementSpec::new("section", bounds));
    let child = doc.insert(ElementSpec::new("div", bounds).child_of(parent));
    (doc, parent, child)
}

#[test]
fn direction_sign_convention() {
    let down = ParallaxConfig::column(Direction::Down, 100.0);
    assert_eq!((down.from, down.to), (Length::Px(-100.0), Length::Px(100.0)));
    let up = ParallaxConfig::column(Direction::Up, 100.0);
    assert_eq!((up.from, up.to), (Length::Px(100.0), Length::Px(-100.0)));
    let drift = ParallaxConfig::drift(Direction::Right, 50.0);
    assert_eq!(drift.axis, Axis::X);
    assert_eq!(drift.from, Length::Px(-50.0));
    let img = ParallaxConfig::image(0.15);
    assert_eq!(img.to, Length::Percent(15.0));
    assert_eq!(img.source, TriggerSource::Parent);
    let hook = ParallaxConfig::hook(
        0.5,
        Axis::Y,
        TriggerPosition::TOP_BOTTOM,
        TriggerPosition::BOTTOM_TOP,
    );
    assert_eq!(hook.to, Length::Px(50.0));
    assert_eq!(hook.scrub, Scrub::Instant);
}

#[test]
fn instant_binding_maps_span_linearly() {
    let (mut doc, _parent, child) = section();
    let mut triggers = ScrollTriggerRegistry::new();
    let vp = Viewport::new(1280.0, 1000.0).unwrap();
    let config = ParallaxConfig {
        scrub: Scrub::Instant,
        ..ParallaxConfig::column(Direction::Down, 100.0)
    };
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: vp,
        offset: 0.0,
        now: 0.0,
    };
    let mut p = Parallax::mount(&mut cx, child, config).unwrap();
    assert_eq!(cx.doc.style(child).unwrap().y, Length::Px(-100.0));

    // Span is 1000..3000; halfway lands at zero.
    cx.triggers.update(&frame(1.0, 2000.0));
    p.update(&mut cx);
    assert_eq!(cx.doc.style(child).unwrap().y, Length::Px(0.0));

    cx.triggers.update(&frame(2.0, 9000.0));
    p.update(&mut cx);
    assert_eq!(cx.doc.style(child).unwrap().y, Length::Px(100.0));
    // Only the transform was touched.
    assert_eq!(cx.doc.style(child).unwrap().opacity, 1.0);
    assert_eq!(cx.doc.rect(child).unwrap().y0, 2000.0);
}

#[test]
fn missing_parent_mounts_nothing() {
    let mut doc = Document::new();
    let lone = doc.insert(ElementSpec::new(
        "div",
        Bounds {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        },
    ));
    let mut triggers = ScrollTriggerRegistry::new();
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: Viewport::new(100.0, 100.0).unwrap(),
        offset: 0.0,
        now: 0.0,
    };
    assert!(Parallax::mount(&mut cx, lone, ParallaxConfig::column(Direction::Down, 100.0)).is_none());
    assert!(cx.triggers.is_empty());
}

#[test]
fn dispose_reverts_and_is_idempotent() {
    let (mut doc, _parent, child) = section();
    let mut triggers = ScrollTriggerRegistry::new();
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: Viewport::new(1280.0, 1000.0).unwrap(),
        offset: 0.0,
        now: 0.0,
    };
    let mut p = Parallax::mount(&mut cx, child, ParallaxConfig::default()).unwrap();
    p.dispose(&mut cx);
    p.dispose(&mut cx);
    assert_eq!(cx.doc.style(child), Some(Style::default()));
    assert!(cx.triggers.is_empty());
    assert!(!p.is_active());
}

#[test]
fn detaching_the_element_stops_writes() {
    let (mut doc, parent, child) = section();
    let mut triggers = ScrollTriggerRegistry::new();
    let vp = Viewport::new(1280.0, 1000.0).unwrap();
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: vp,
        offset: 0.0,
        now: 0.0,
    };
    let mut p = Parallax::mount(&mut cx, child, ParallaxConfig::default()).unwrap();
    cx.doc.remove(parent);
    cx.triggers.refresh(cx.doc, vp);
    p.update(&mut cx);
    assert!(!p.is_active());
}
