use super::*;
use crate::{
    foundation::core::Length,
    platform::storage::MemoryStorage,
    site::contact::SubmitState,
    stage::stage::ElementSnapshot,
};
use serde_json::json;

fn scene(value: serde_json::Value) -> Scene {
    Scene::from_json(&value.to_string()).unwrap()
}

fn base() -> serde_json::Value {
    json!({
        "viewport": { "width": 1280.0, "height": 800.0 },
        "elements": [
            { "key": "hero", "tag": "section", "bounds": { "x": 0, "y": 0, "width": 1280, "height": 700 } },
            { "key": "headline", "tag": "h1", "parent": "hero", "text": "Build with intent",
              "bounds": { "x": 80, "y": 200, "width": 900, "height": 120 } },
            { "key": "below", "tag": "section", "bounds": { "x": 0, "y": 1600, "width": 1280, "height": 400 } },
            { "key": "about_intro", "tag": "p", "bounds": { "x": 0, "y": 100, "width": 1280, "height": 200 } },
            { "key": "overlay" }, { "key": "depth" }, { "key": "content", "tag": "main" },
            { "key": "footer", "tag": "footer", "bounds": { "x": 0, "y": 3000, "width": 1280, "height": 200 } }
        ],
        "pages": {
            "/": [
                { "kind": "reveal", "element": "hero" },
                { "kind": "lazy_reveal", "element": "below" },
                { "kind": "text_reveal", "element": "headline" }
            ],
            "/about/": [ { "kind": "reveal", "element": "about_intro" } ]
        },
        "transition": { "overlay": "overlay", "depth": "depth", "content": "content" },
        "duration": 2.5
    })
}

fn named<'a>(snapshot: &'a StageSnapshot, name: &str) -> &'a ElementSnapshot {
    snapshot
        .elements
        .iter()
        .find(|e| e.name.as_deref() == Some(name))
        .unwrap()
}

fn run(scene: &Scene) -> SceneRun {
    scene
        .run(Fps::new(60, 1).unwrap(), None, Box::new(MemoryStorage::new()))
        .unwrap()
}

#[test]
fn scroll_reveals_the_home_page() {
    let mut value = base();
    value["events"] = json!([{ "at": 0.5, "event": { "type": "native_scroll", "offset": 1200 } }]);
    let out = run(&scene(value));

    assert_eq!(out.frames, 151);
    assert_eq!(out.snapshot.route, "/");
    // Finished reveals are released; the text keeps its word tree.
    assert_eq!(out.snapshot.bindings, 1);
    assert_eq!(out.snapshot.triggers, 0);
    assert_eq!(named(&out.snapshot, "hero").style.opacity, 1.0);
    assert_eq!(named(&out.snapshot, "below").style.opacity, 1.0);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e.event, StageEvent::TriggerFired { .. })));

    let words = &out.snapshot.words[0].words;
    assert_eq!(words.text(), "Build with intent");
    assert!(words.words.iter().all(|w| w.y == Length::Percent(0.0)));
}

#[test]
fn navigation_mounts_the_next_page() {
    let mut value = base();
    value["events"] = json!([{ "at": 0.5, "event": { "type": "navigate", "path": "/about" } }]);
    let out = run(&scene(value));

    assert_eq!(out.snapshot.route, "/about");
    assert_eq!(out.snapshot.nav.active(), Some(3));
    let kinds: Vec<_> = out
        .events
        .iter()
        .filter_map(|e| match &e.event {
            StageEvent::PageSwapped { to, .. } => Some(format!("swap {to}")),
            StageEvent::PageSettled { route } => Some(format!("settle {route}")),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec!["swap /about", "settle /about"]);
    assert_eq!(named(&out.snapshot, "hero").style.opacity, 1.0);
    assert_eq!(named(&out.snapshot, "about_intro").style.opacity, 1.0);
}

#[test]
fn unknown_key_shows_the_fallback() {
    let mut value = base();
    value["pages"]["/"] = json!([
        { "kind": "reveal", "element": "hero" },
        { "kind": "magnetic", "element": "ghost" }
    ]);
    let out = run(&scene(value));
    let fallback = out.snapshot.fallback.as_ref().unwrap();
    assert!(fallback.cause.contains("ghost"));
    assert_eq!(out.snapshot.bindings, 0);
    assert_eq!(named(&out.snapshot, "hero").style.opacity, 1.0);
}

#[test]
fn rejected_input_does_not_stop_the_run() {
    let mut value = base();
    value["events"] = json!([
        { "at": 0.1, "event": { "type": "submit", "form": { "name": "Ada" } } },
        { "at": 0.2, "event": { "type": "submit",
          "form": { "name": "Ada", "email": "ada@example.com", "message": "Hi" } } }
    ]);
    let out = run(&scene(value));
    assert_eq!(out.rejected.len(), 1);
    assert_eq!(out.snapshot.contact, SubmitState::Success);
}

#[test]
fn headless_scene_only_routes() {
    let mut value = base();
    value.as_object_mut().unwrap().remove("viewport");
    value["events"] = json!([
        { "at": 0.1, "event": { "type": "navigate", "path": "/work/vantage" } },
        { "at": 0.2, "event": { "type": "toggle_theme" } }
    ]);
    let out = run(&scene(value));
    assert!(!out.snapshot.rendering);
    assert_eq!(out.snapshot.route, "/work/vantage");
    assert_eq!(out.snapshot.bindings, 0);
    assert_eq!(out.snapshot.theme, crate::theme::theme::Theme::Dark);
    let events: Vec<_> = out.events.iter().map(|e| &e.event).collect();
    assert_eq!(
        events,
        vec![&StageEvent::PageSwapped {
            from: "/".into(),
            to: "/work/vantage".into()
        }]
    );
}

#[test]
fn navigation_without_a_transition_mounts_the_next_page() {
    let mut value = base();
    value.as_object_mut().unwrap().remove("transition");
    value["duration"] = json!(1.2);
    value["events"] = json!([{ "at": 1.0, "event": { "type": "navigate", "path": "/about" } }]);
    let fps = Fps::new(60, 1).unwrap();
    let out = scene(value)
        .run(fps, None, Box::new(MemoryStorage::new()))
        .unwrap();

    assert_eq!(out.snapshot.route, "/about");
    assert_eq!(out.snapshot.bindings, 1);
    let swaps: Vec<_> = out
        .events
        .iter()
        .filter(|e| matches!(e.event, StageEvent::PageSwapped { .. }))
        .collect();
    assert_eq!(swaps.len(), 1);
    assert!(swaps[0].at >= 1.0);
    assert_eq!(fps.frames_to_secs(swaps[0].frame.0), swaps[0].at);
    assert!(named(&out.snapshot, "about_intro").style.opacity < 1.0);
    assert_eq!(named(&out.snapshot, "hero").style, crate::foundation::core::Style::default());
}

#[test]
fn malformed_scenes_are_rejected() {
    let mut value = base();
    value["events"] = json!([{ "at": -1.0, "event": { "type": "toggle_nav" } }]);
    assert!(Scene::from_json(&value.to_string()).is_err());

    let mut value = base();
    value["elements"] = json!([{ "key": "a" }, { "key": "a" }]);
    let err = scene(value).build(Box::new(MemoryStorage::new())).unwrap_err();
    assert!(err.to_string().contains("duplicate"));

    let mut value = base();
    value["elements"] = json!([{ "key": "child", "parent": "missing" }]);
    assert!(scene(value).build(Box::new(MemoryStorage::new())).is_err());

    let mut value = base();
    value["viewport"] = json!({ "width": 0.0, "height": 0.0 });
    assert!(Scene::from_json(&value.to_string()).is_err());

    let mut value = base();
    value["config"] = json!({ "transition": { "exit_overlay": -0.4 } });
    assert!(Scene::from_json(&value.to_string()).is_err());

    let mut value = base();
    value["pages"]["/"] = json!([
        { "kind": "reveal", "element": "hero", "config": { "duration": -1.0 } }
    ]);
    let err = Scene::from_json(&value.to_string()).unwrap_err();
    assert!(err.to_string().contains("hero"));
}
