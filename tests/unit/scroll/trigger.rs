use super::*;
use crate::platform::document::{Bounds, ElementSpec};
use crate::scroll::clock::ScrollDirection;

fn frame(now: f64, offset: f64) -> ScrollFrame {
    ScrollFrame {
        now,
        offset,
        velocity: 0.0,
        direction: ScrollDirection::Forward,
        limit: 10_000.0,
    }
}

fn setup(top: f64, height: f64) -> (Document, ElementId, Viewport) {
    let mut doc = Document::new();
    let id = doc.insert(ElementSpec::new(
        "div",
        Bounds {
            x: 0.0,
            y: top,
            width: 100.0,
            height,
        },
    ));
    (doc, id, Viewport::new(1280.0, 1000.0).unwrap())
}

#[test]
fn parses_position_grammar() {
    let p: TriggerPosition = "top 90%".parse().unwrap();
    assert_eq!(p, TriggerPosition::top_at(0.9));
    assert_eq!(
        "top bottom".parse::<TriggerPosition>().unwrap(),
        TriggerPosition::TOP_BOTTOM
    );
    let px: TriggerPosition = "center 120px".parse().unwrap();
    assert_eq!(px.element, Anchor::CENTER);
    assert_eq!(px.viewport.px, 120.0);
    assert!("top".parse::<TriggerPosition>().is_err());
    assert!("top middle".parse::<TriggerPosition>().is_err());
    assert!("top 90% extra".parse::<TriggerPosition>().is_err());
    assert!("top abc%".parse::<TriggerPosition>().is_err());
}

#[test]
fn scroll_offset_math() {
    // Element top at 2000, viewport 1000: "top 90%" met at 2000 - 900.
    assert_eq!(TriggerPosition::top_at(0.9).scroll_offset(2000.0, 300.0, 1000.0), 1100.0);
    assert_eq!(TriggerPosition::BOTTOM_TOP.scroll_offset(2000.0, 300.0, 1000.0), 2300.0);
}

#[test]
fn once_fires_exactly_once() {
    let (doc, el, vp) = setup(2000.0, 300.0);
    let mut reg = ScrollTriggerRegistry::new();
    let id = reg
        .register(TriggerSpec::once(el, TriggerPosition::top_at(0.9)), &doc, vp, 0.0)
        .unwrap();

    assert!(reg.update(&frame(0.0, 1099.0)).is_empty());
    assert_eq!(reg.update(&frame(0.1, 1100.0)), vec![TriggerEvent::Fired(id)]);
    assert!(reg.update(&frame(0.2, 0.0)).is_empty());
    assert!(reg.update(&frame(0.3, 1500.0)).is_empty());
    assert!(reg.has_fired(id));
}

#[test]
fn scrub_progress_clamps_outside_span() {
    let (doc, el, vp) = setup(2000.0, 1000.0);
    let mut reg = ScrollTriggerRegistry::new();
    let id = reg
        .register(TriggerSpec::scrub(el, Scrub::Instant), &doc, vp, 0.0)
        .unwrap();
    // start = 2000 - 1000 = 1000, end = 3000.
    assert_eq!(reg.bounds(id), Some((1000.0, 3000.0)));
    reg.update(&frame(0.0, 500.0));
    assert_eq!(reg.progress(id), Some(0.0));
    reg.update(&frame(0.1, 2000.0));
    assert_eq!(reg.progress(id), Some(0.5));
    reg.update(&frame(0.2, 9000.0));
    assert_eq!(reg.progress(id), Some(1.0));
}

#[test]
fn smooth_scrub_lags_then_converges() {
    let (doc, el, vp) = setup(2000.0, 1000.0);
    let mut reg = ScrollTriggerRegistry::new();
    let id = reg
        .register(TriggerSpec::scrub(el, Scrub::Smooth(0.5)), &doc, vp, 1000.0)
        .unwrap();
    reg.update(&frame(0.0, 2000.0));
    assert_eq!(reg.progress(id), Some(0.0));
    reg.update(&frame(0.1, 2000.0));
    let p = reg.progress(id).unwrap();
    assert!(p > 0.0 && p < 0.5);
    let mut now = 0.1;
    for _ in 0..600 {
        now += 1.0 / 60.0;
        reg.update(&frame(now, 2000.0));
    }
    assert_eq!(reg.progress(id), Some(0.5));
    assert_eq!(reg.raw_progress(id), Some(0.5));
}

#[test]
fn missing_element_registers_nothing_and_remove_is_idempotent() {
    let (mut doc, el, vp) = setup(0.0, 100.0);
    let mut reg = ScrollTriggerRegistry::new();
    let id = reg
        .register(TriggerSpec::scrub(el, Scrub::Instant), &doc, vp, 0.0)
        .unwrap();
    doc.remove(el);
    assert!(reg
        .register(TriggerSpec::scrub(el, Scrub::Instant), &doc, vp, 0.0)
        .is_none());
    assert!(reg.remove(id));
    assert!(!reg.remove(id));
    assert!(reg.is_empty());
}

#[test]
fn refresh_drops_detached_triggers() {
    let (mut doc, el, vp) = setup(0.0, 100.0);
    let mut reg = ScrollTriggerRegistry::new();
    let id = reg
        .register(TriggerSpec::scrub(el, Scrub::Instant), &doc, vp, 0.0)
        .unwrap();
    reg.refresh(&doc, Viewport::new(800.0, 500.0).unwrap());
    assert_eq!(reg.bounds(id), Some((-500.0, 100.0)));
    doc.remove(el);
    reg.refresh(&doc, vp);
    assert!(!reg.contains(id));
}
