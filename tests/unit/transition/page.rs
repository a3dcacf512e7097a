use super::*;
use crate::platform::document::{Bounds, ElementSpec};

fn layers(doc: &mut Document) -> TransitionLayers {
    let b = Bounds {
        x: 0.0,
        y: 0.0,
        width: 1280.0,
        height: 800.0,
    };
    TransitionLayers {
        overlay: doc.insert(ElementSpec::new("div", b)),
        depth: doc.insert(ElementSpec::new("div", b)),
        content: doc.insert(ElementSpec::new("main", b)),
    }
}

fn run_until_idle(t: &mut PageTransition, doc: &mut Document, mut now: f64) -> (f64, Vec<TransitionEvent>) {
    let mut events = Vec::new();
    for _ in 0..600 {
        now += 1.0 / 60.0;
        events.extend(t.update(doc, now));
        if t.is_idle() {
            break;
        }
    }
    (now, events)
}

#[test]
fn first_mount_is_not_animated() {
    let mut doc = Document::new();
    let l = layers(&mut doc);
    let t = PageTransition::mount(&mut doc, l, "/", TransitionConfig::default());
    assert!(t.is_idle());
    assert_eq!(doc.style(l.overlay).unwrap().y, Length::Percent(-100.0));
    assert_eq!(doc.style(l.content).unwrap().opacity, 1.0);
}

#[test]
fn exit_covers_then_enter_reveals() {
    let mut doc = Document::new();
    let l = layers(&mut doc);
    let mut t = PageTransition::mount(&mut doc, l, "/", TransitionConfig::default());
    assert!(t.navigate("/work", 0.0));
    assert_eq!(t.phase(), TransitionPhase::Exiting);

    // Content fades faster than the overlay closes.
    t.update(&mut doc, 0.2);
    assert_eq!(doc.style(l.content).unwrap().opacity, 0.0);
    assert_eq!(t.route(), "/");

    let ev = t.update(&mut doc, 0.5);
    assert_eq!(
        ev,
        Some(TransitionEvent::Swapped {
            from: "/".into(),
            to: "/work".into()
        })
    );
    assert_eq!(t.route(), "/work");
    assert_eq!(doc.style(l.overlay).unwrap().y, Length::Percent(0.0));

    assert_eq!(t.update(&mut doc, 1.3), Some(TransitionEvent::Settled("/work".into())));
    assert_eq!(doc.style(l.overlay).unwrap().y, Length::Percent(-100.0));
    assert_eq!(doc.style(l.depth).unwrap().y, Length::Percent(-100.0));
    assert_eq!(doc.style(l.content).unwrap().opacity, 1.0);
}

#[test]
fn same_route_does_not_animate() {
    let mut doc = Document::new();
    let l = layers(&mut doc);
    let mut t = PageTransition::mount(&mut doc, l, "/about", TransitionConfig::default());
    assert!(!t.navigate("/about", 0.0));
    assert!(t.is_idle());
}

#[test]
fn navigation_during_exit_replaces_destination() {
    let mut doc = Document::new();
    let l = layers(&mut doc);
    let mut t = PageTransition::mount(&mut doc, l, "/", TransitionConfig::default());
    t.navigate("/work", 0.0);
    t.update(&mut doc, 0.1);
    t.navigate("/contact", 0.2);
    let (_, events) = run_until_idle(&mut t, &mut doc, 0.2);
    let swaps: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, TransitionEvent::Swapped { .. }))
        .collect();
    assert_eq!(swaps.len(), 1);
    assert_eq!(t.route(), "/contact");
}

#[test]
fn navigation_during_enter_supersedes_from_current_position() {
    let mut doc = Document::new();
    let l = layers(&mut doc);
    let mut t = PageTransition::mount(&mut doc, l, "/", TransitionConfig::default());
    t.navigate("/work", 0.0);
    t.update(&mut doc, 0.5); // swapped, entering
    t.update(&mut doc, 0.8);
    let (overlay_mid, _, _) = t.sample(0.8);
    assert!(overlay_mid < 0.0 && overlay_mid > -100.0);

    t.navigate("/about", 0.8);
    assert_eq!(t.phase(), TransitionPhase::Exiting);
    // Continues from where the overlay visibly was.
    assert_eq!(t.sample(0.8).0, overlay_mid);

    let (_, events) = run_until_idle(&mut t, &mut doc, 0.8);
    assert!(t.is_idle());
    assert_eq!(t.route(), "/about");
    assert_eq!(events.last(), Some(&TransitionEvent::Settled("/about".into())));
    assert_eq!(doc.style(l.overlay).unwrap().y, Length::Percent(-100.0));
    assert_eq!(doc.style(l.content).unwrap().opacity, 1.0);
}
