use super::*;

#[test]
fn route_change_closes_overlay_and_moves_highlight() {
    let mut nav = NavState::new();
    nav.toggle();
    nav.hover(Some(3));
    assert!(nav.is_open());
    nav.on_route(&Route::parse("/about"));
    assert!(!nav.is_open());
    assert_eq!(nav.hovered(), None);
    assert_eq!(nav.active(), Some(3));
    assert_eq!(nav.items()[3].label, "About");
}

#[test]
fn scrolled_flag_uses_strict_threshold() {
    let mut nav = NavState::new();
    nav.on_scroll(100.0);
    assert!(!nav.is_scrolled());
    nav.on_scroll(100.5);
    assert!(nav.is_scrolled());
}

#[test]
fn hover_ignores_out_of_range_items() {
    let mut nav = NavState::new();
    nav.hover(Some(9));
    assert_eq!(nav.hovered(), None);
    nav.on_pointer_distance(0.0);
    assert_eq!(nav.trigger_scale(), 1.15);
}
