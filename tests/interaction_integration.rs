//! Interaction integration tests: hover, click lifecycle, disable, hit
//! boundaries and pointer input through the feed.

use bevy_ecs::prelude::*;

use nubscene::NodeBuilder;
use nubscene::Scene;
use nubscene::components::geometry::FontSpec;
use nubscene::components::interaction::InteractionPhase;
use nubscene::components::sceneid::NodeId;
use nubscene::events::pointer::{PointerEvent, PointerEventKind, PointerInput};
use nubscene::resources::backend::HeadlessBackend;
use nubscene::resources::pointer::PointerState;

use PointerEvent::*;

#[derive(Resource, Default)]
struct Log(Vec<(Entity, PointerEvent)>);

fn scene() -> Scene {
    let mut scene = Scene::default();
    scene.world_mut().init_resource::<Log>();
    scene
}

fn logged(builder: NodeBuilder) -> NodeBuilder {
    [
        PointerEventKind::Click,
        PointerEventKind::ClickHold,
        PointerEventKind::Release,
        PointerEventKind::Hover,
        PointerEventKind::StopHover,
    ]
    .into_iter()
    .fold(builder, |b, kind| {
        b.on(kind, |world, entity, event| {
            world.resource_mut::<Log>().0.push((entity, event));
        })
    })
}

/// Run one think tick with the pointer at `(x, y)` and return the callbacks
/// it produced.
fn tick(scene: &mut Scene, now: u64, x: f32, y: f32, pressed: bool) -> Vec<PointerEvent> {
    scene.set_pointer(PointerState::from_raw(x, y, pressed));
    scene.think_tick(now);
    drain(scene)
}

fn drain(scene: &mut Scene) -> Vec<PointerEvent> {
    std::mem::take(&mut scene.world_mut().resource_mut::<Log>().0)
        .into_iter()
        .map(|(_, e)| e)
        .collect()
}

fn hovers(scene: &mut Scene, x: f32, y: f32) -> bool {
    tick(scene, 0, x, y, false).contains(&Hover)
}

// ==================== HOVER ====================

#[test]
fn test_hover_is_level_triggered() {
    let mut scene = scene();
    let id = scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 100.0, 50.0))).unwrap();
    for t in 0..5 {
        assert_eq!(tick(&mut scene, t * 20, 10.0, 10.0, false), vec![Hover]);
    }
    assert_eq!(
        scene.interaction(id).map(|i| i.phase()),
        Some(InteractionPhase::Hovered)
    );
    assert_eq!(tick(&mut scene, 100, 200.0, 10.0, false), vec![StopHover]);
    assert!(tick(&mut scene, 120, 200.0, 10.0, false).is_empty());
}

#[test]
fn test_pointer_off_surface_clears_hover() {
    let mut scene = scene();
    scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0))).unwrap();
    tick(&mut scene, 0, 0.0, 0.0, false);
    assert_eq!(tick(&mut scene, 20, -1.0, -1.0, false), vec![StopHover]);
}

// ==================== CLICK LIFECYCLE ====================

#[test]
fn test_press_hold_release_sequence() {
    let mut scene = scene();
    let id = scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 100.0, 50.0))).unwrap();

    assert_eq!(tick(&mut scene, 0, 10.0, 10.0, true), vec![Hover, Click, ClickHold(0)]);
    assert_eq!(tick(&mut scene, 20, 10.0, 10.0, true), vec![Hover, ClickHold(1)]);
    assert_eq!(tick(&mut scene, 40, 10.0, 10.0, true), vec![Hover, ClickHold(2)]);
    assert_eq!(
        scene.interaction(id).map(|i| i.phase()),
        Some(InteractionPhase::HoveredAndClicked)
    );
    assert_eq!(tick(&mut scene, 60, 10.0, 10.0, false), vec![Hover, Release]);
    assert_eq!(
        scene.interaction(id).map(|i| i.phase()),
        Some(InteractionPhase::Hovered)
    );
}

#[test]
fn test_drag_out_while_pressed_releases() {
    let mut scene = scene();
    scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0))).unwrap();
    tick(&mut scene, 0, 5.0, 5.0, true);
    assert_eq!(tick(&mut scene, 20, 50.0, 50.0, true), vec![StopHover, Release]);
    // dragging back in with the button still held is a new click
    assert_eq!(tick(&mut scene, 40, 5.0, 5.0, true), vec![Hover, Click, ClickHold(0)]);
}

#[test]
fn test_overlapping_nodes_all_receive_events() {
    let mut scene = scene();
    let a = scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0))).unwrap();
    let b = scene.spawn_node(logged(NodeBuilder::rect(5.0, 5.0, 10.0, 10.0))).unwrap();
    scene.set_pointer(PointerState::from_raw(7.0, 7.0, true));
    scene.think_tick(0);

    let (ea, eb) = (scene.node(a).unwrap(), scene.node(b).unwrap());
    let log = &scene.world().resource::<Log>().0;
    let clicked: Vec<Entity> = log
        .iter()
        .filter(|(_, e)| *e == Click)
        .map(|(n, _)| *n)
        .collect();
    assert_eq!(clicked, vec![ea, eb]);
}

// ==================== DISABLE ====================

#[test]
fn test_disable_mid_click_is_silent() {
    let mut scene = scene();
    let id = scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0))).unwrap();
    tick(&mut scene, 0, 5.0, 5.0, true);
    tick(&mut scene, 20, 5.0, 5.0, true);

    assert!(scene.set_enabled(id, false));
    assert!(tick(&mut scene, 40, 5.0, 5.0, true).is_empty());
    assert!(tick(&mut scene, 60, 5.0, 5.0, false).is_empty());
    let state = scene.interaction(id).unwrap();
    assert_eq!(state.phase(), InteractionPhase::Idle);
    assert_eq!(state.clicked_ticks(), 0);

    scene.set_enabled(id, true);
    assert_eq!(tick(&mut scene, 80, 5.0, 5.0, false), vec![Hover]);
}

// ==================== HIT BOUNDARIES ====================

#[test]
fn test_rect_bounds_are_inclusive() {
    let mut scene = scene();
    scene.spawn_node(logged(NodeBuilder::rect(10.0, 10.0, 20.0, 20.0))).unwrap();
    assert!(hovers(&mut scene, 10.0, 10.0));
    assert!(hovers(&mut scene, 30.0, 30.0));
    assert!(hovers(&mut scene, 30.0, 10.0));
    assert!(!hovers(&mut scene, 30.5, 30.0));
    assert!(!hovers(&mut scene, 9.5, 20.0));
}

#[test]
fn test_circle_uses_bounding_square() {
    let mut scene = scene();
    scene.spawn_node(logged(NodeBuilder::circle(50.0, 50.0, 10.0))).unwrap();
    assert!(hovers(&mut scene, 50.0, 50.0));
    // corner of the square, outside the disc
    assert!(hovers(&mut scene, 40.0, 40.0));
    assert!(hovers(&mut scene, 60.0, 60.0));
    assert!(!hovers(&mut scene, 61.0, 50.0));
}

#[test]
fn test_text_needs_backend_to_measure() {
    let mut scene = scene();
    // "abcd" at 16px in the headless backend: 32 wide, baseline 16 below the anchor
    let font = FontSpec::new("Arial", 16.0);
    scene.spawn_node(logged(NodeBuilder::text(100.0, 100.0, "abcd", font))).unwrap();
    assert!(!hovers(&mut scene, 110.0, 120.0));

    scene.attach_backend(HeadlessBackend::new(320, 240));
    assert!(hovers(&mut scene, 110.0, 120.0));
    assert!(hovers(&mut scene, 100.0, 116.0));
    assert!(hovers(&mut scene, 132.0, 132.0));
    assert!(!hovers(&mut scene, 110.0, 110.0));
    assert!(!hovers(&mut scene, 133.0, 120.0));

    scene.detach_backend::<HeadlessBackend>();
    assert!(!hovers(&mut scene, 110.0, 120.0));
}

// ==================== POINTER FEED ====================

#[test]
fn test_pointer_inputs_from_another_thread() {
    let mut scene = scene();
    scene.spawn_node(logged(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0))).unwrap();
    let tx = scene.pointer_sender();
    std::thread::spawn(move || {
        tx.send(PointerInput::Moved { x: 3.0, y: 3.0 }).unwrap();
        tx.send(PointerInput::Pressed).unwrap();
    })
    .join()
    .unwrap();

    scene.think_tick(0);
    assert_eq!(scene.pointer(), PointerState::from_raw(3.0, 3.0, true));
    assert_eq!(drain(&mut scene), vec![Hover, Click, ClickHold(0)]);

    scene.pointer_sender().send(PointerInput::Left).unwrap();
    scene.think_tick(20);
    assert_eq!(drain(&mut scene), vec![StopHover, Release]);
}

// ==================== IDENTITY ====================

#[test]
fn test_ids_unique_across_lifecycle() {
    let mut scene = scene();
    let a = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    scene.despawn_node(a);
    let b = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    assert!(b.0 > a.0);
    assert!(scene.node(a).is_none());
    assert!(scene.node(NodeId(12345)).is_none());
    assert!(!scene.despawn_node(NodeId(12345)));
}

#[test]
fn test_reassign_collision_leaves_state_untouched() {
    let mut scene = scene();
    let a = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    let b = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    let (ea, eb) = (scene.node(a), scene.node(b));
    assert!(scene.reassign_node_id(a, Some(b)).is_err());
    assert_eq!(scene.node(a), ea);
    assert_eq!(scene.node(b), eb);
    assert_eq!(scene.node_ids(), vec![a, b]);

    let c = scene.reassign_node_id(a, None).unwrap();
    assert_eq!(scene.node_ids(), vec![b, c]);
    // a fresh id after a manual one never collides
    let d = scene.reassign_node_id(b, Some(NodeId(c.0 + 100))).unwrap();
    let e = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    assert!(e.0 > d.0);
}
