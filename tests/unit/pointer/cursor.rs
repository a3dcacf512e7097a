use super::*;
use crate::{
    foundation::core::Point,
    platform::document::{Bounds, ElementSpec},
};

fn bounds() -> Bounds {
    Bounds {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 40.0,
    }
}

struct Page {
    doc: Document,
    pointer: PointerService,
    cursor: Cursor,
    link_child: ElementId,
    card: ElementId,
    plain: ElementId,
    expand: ElementId,
}

fn page(coarse: bool) -> Page {
    let mut doc = Document::new();
    let ring = doc.insert(ElementSpec::new("div", bounds()));
    let dot = doc.insert(ElementSpec::new("div", bounds()));
    let link = doc.insert(ElementSpec::new("a", bounds()).attr("href", "/work"));
    let link_child = doc.insert(ElementSpec::new("span", bounds()).child_of(link));
    let card = doc.insert(ElementSpec::new("article", bounds()).attr("data-cursor-text", "View"));
    let plain = doc.insert(ElementSpec::new("p", bounds()));
    let expand = doc.insert(ElementSpec::new("div", bounds()).attr("data-cursor", "expand"));
    let mut pointer = PointerService::new();
    let cursor = Cursor::mount(
        &mut doc,
        &mut pointer,
        ring,
        dot,
        CursorConfig::default(),
        coarse,
    )
    .unwrap();
    Page {
        doc,
        pointer,
        cursor,
        link_child,
        card,
        plain,
        expand,
    }
}

#[test]
fn nested_link_target_resolves_through_ancestor() {
    let mut p = page(false);
    assert!(!p.doc.native_cursor());
    p.cursor.pointer_over(&p.doc, Some(p.link_child), 0.0);
    assert!(p.cursor.hover().link);
    assert!(!p.cursor.hover().expanded);
    assert_eq!(p.cursor.ring_size(1.0), 56.0);
    assert_eq!(p.cursor.ring_opacity(), 0.4);
}

#[test]
fn cursor_text_expands_with_label() {
    let mut p = page(false);
    p.cursor.pointer_over(&p.doc, Some(p.card), 0.0);
    assert_eq!(p.cursor.hover().label.as_deref(), Some("View"));
    assert_eq!(p.cursor.ring_size(0.3), 80.0);
    assert_eq!(p.cursor.ring_opacity(), 1.0);

    p.cursor.pointer_over(&p.doc, Some(p.expand), 0.5);
    assert!(p.cursor.hover().expanded);
    assert_eq!(p.cursor.hover().label, None);

    p.cursor.pointer_over(&p.doc, Some(p.plain), 1.0);
    assert_eq!(*p.cursor.hover(), HoverState::default());
    let mid = p.cursor.ring_size(1.1);
    assert!(mid < 80.0 && mid > 40.0);
    assert_eq!(p.cursor.ring_size(1.4), 40.0);
}

#[test]
fn touch_input_disables_and_restores_native_cursor() {
    let mut p = page(true);
    assert!(!p.cursor.is_enabled());
    assert!(p.doc.native_cursor());
    p.pointer.on_move(Point::new(100.0, 100.0));
    p.pointer.tick(&mut p.doc);
    assert_eq!(
        p.pointer.follower_position(p.cursor.ring_follower()),
        Some(Point::ZERO)
    );

    // Hybrid device switches to a mouse.
    p.cursor.set_input_mode(&mut p.doc, &mut p.pointer, false);
    assert!(p.cursor.is_enabled());
    assert!(!p.doc.native_cursor());
    p.pointer.tick(&mut p.doc);
    assert_ne!(
        p.pointer.follower_position(p.cursor.ring_follower()),
        Some(Point::ZERO)
    );
}

#[test]
fn dispose_releases_followers_once() {
    let mut p = page(false);
    assert_eq!(p.pointer.len(), 2);
    p.cursor.dispose(&mut p.doc, &mut p.pointer);
    p.cursor.dispose(&mut p.doc, &mut p.pointer);
    assert!(p.pointer.is_empty());
    assert!(p.doc.native_cursor());
    assert!(!p.cursor.is_enabled());
}
