use super::*;
use crate::{
    foundation::core::Viewport,
    platform::document::{Bounds, Document, ElementSpec},
    scroll::{
        clock::{ScrollDirection, ScrollFrame},
        trigger::ScrollTriggerRegistry,
    },
};

fn heading(doc: &mut Document, top: f64, text: &str) -> ElementId {
    doc.insert(
        ElementSpec::new(
            "h2",
            Bounds {
                x: 0.0,
                y: top,
                width: 800.0,
                height: 120.0,
            },
        )
        .text(text),
    )
}

#[test]
fn split_builds_typed_words_without_markup() {
    let tree = WordTree::split("  Brands that\n move   people ");
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.words[2].text, "move");
    assert_eq!(tree.words[2].index, 2);
    assert!(tree.words.iter().all(|w| w.y == Length::Percent(100.0)));
    assert_eq!(tree.text(), "Brands that move people");
    assert!(WordTree::split(" \t ").is_empty());
}

#[test]
fn words_rise_in_stagger_order() {
    let mut doc = Document::new();
    let mut triggers = ScrollTriggerRegistry::new();
    let vp = Viewport::new(1280.0, 1000.0).unwrap();
    let el = heading(&mut doc, 50.0, "one two three");
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: vp,
        offset: 0.0,
        now: 0.0,
    };
    let mut tr = TextReveal::mount(&mut cx, el, TextRevealConfig::default()).unwrap();

    cx.now = 0.3;
    tr.update(&mut cx);
    let ys: Vec<f64> = tr.words().words.iter().map(|w| w.y.value()).collect();
    assert!(ys[0] < ys[1] && ys[1] < ys[2], "{ys:?}");

    cx.now = 2.0;
    tr.update(&mut cx);
    assert!(tr.is_revealed());
    assert!(tr.words().words.iter().all(|w| w.y == Length::Percent(0.0)));
}

#[test]
fn split_preset_waits_for_scroll_and_dispose_releases_trigger() {
    let mut doc = Document::new();
    let mut triggers = ScrollTriggerRegistry::new();
    let vp = Viewport::new(1280.0, 1000.0).unwrap();
    let el = heading(&mut doc, 3000.0, "Selected work");
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: vp,
        offset: 0.0,
        now: 0.0,
    };
    let mut tr = TextReveal::mount(&mut cx, el, TextRevealConfig::split()).unwrap();
    assert!(tr.is_waiting());
    assert_eq!(cx.triggers.len(), 1);

    tr.dispose(&mut cx);
    tr.dispose(&mut cx);
    assert!(cx.triggers.is_empty());
    assert!(tr.words().words.iter().all(|w| w.y == Length::Percent(0.0)));
}

#[test]
fn fires_when_heading_crosses_eighty_five_percent() {
    let mut doc = Document::new();
    let mut triggers = ScrollTriggerRegistry::new();
    let vp = Viewport::new(1280.0, 1000.0).unwrap();
    let el = heading(&mut doc, 3000.0, "Selected work");
    let mut tr = {
        let mut cx = MotionCtx {
            doc: &mut doc,
            triggers: &mut triggers,
            viewport: vp,
            offset: 0.0,
            now: 0.0,
        };
        TextReveal::mount(&mut cx, el, TextRevealConfig::split()).unwrap()
    };
    triggers.update(&ScrollFrame {
        now: 1.0,
        offset: 2150.0,
        velocity: 10.0,
        direction: ScrollDirection::Forward,
        limit: 5000.0,
    });
    let mut cx = MotionCtx {
        doc: &mut doc,
        triggers: &mut triggers,
        viewport: vp,
        offset: 2150.0,
        now: 1.0,
    };
    tr.update(&mut cx);
    assert!(!tr.is_waiting());
    assert!(cx.triggers.is_empty());
}
