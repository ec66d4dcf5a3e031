//! Tween engine integration tests driven through the scene's think and
//! render cycles.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use nubscene::NodeBuilder;
use nubscene::Scene;
use nubscene::components::geometry::Geometry;
use nubscene::components::mapposition::MapPosition;
use nubscene::components::sceneid::{NodeId, TweenId};
use nubscene::components::tween::{Easing, Tween, TweenProperty};
use nubscene::systems::tween::play_tween;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn x_of(scene: &Scene, id: NodeId) -> f32 {
    scene.get::<MapPosition>(id).map(|p| p.pos.x).unwrap_or(f32::NAN)
}

/// Scene with one node at x = 0 and a tween moving it to `end` over
/// `duration_ms`, counting completion callbacks.
fn slide(end: f32, duration_ms: u64) -> (Scene, NodeId, TweenId, Arc<AtomicU32>) {
    let mut scene = Scene::default();
    let node = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    let finished = Arc::new(AtomicU32::new(0));
    let counter = finished.clone();
    let target = scene.node(node).unwrap();
    let tween = scene.spawn_tween(
        Tween::new(target, TweenProperty::PositionX, end, duration_ms).on_finish(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();
    (scene, node, tween, finished)
}

// ==================== ENDPOINTS ====================

#[test]
fn test_tween_lands_exactly_on_end_value() {
    let (mut scene, node, tween, finished) = slide(100.0, 300);
    assert!(scene.play_tween(tween));

    let mut now = 0;
    while now < 300 {
        now += 20;
        scene.think_tick(now);
        if now < 300 {
            assert!(scene.is_tween_running(tween));
            assert!(approx_eq(x_of(&scene, node), now as f32 / 3.0));
        }
    }
    assert_eq!(x_of(&scene, node), 100.0);
    assert!(!scene.is_tween_running(tween));
    assert_eq!(finished.load(Ordering::SeqCst), 1);

    // finished tweens stay inert
    scene.think_tick(400);
    assert_eq!(x_of(&scene, node), 100.0);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_play_between_ticks_starts_at_given_time() {
    let (mut scene, node, tween, finished) = slide(100.0, 100);
    scene.think_tick(140);
    assert!(scene.play_tween_at(tween, 150));
    assert_eq!(scene.tween(tween).unwrap().start_time_ms(), 150);

    scene.think_tick(200);
    assert!(approx_eq(x_of(&scene, node), 50.0));
    scene.think_tick(250);
    assert_eq!(x_of(&scene, node), 100.0);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_play_between_ticks_uses_last_cycle_time() {
    let (mut scene, node, tween, _) = slide(100.0, 100);
    scene.think_tick(140);
    assert!(scene.play_tween(tween));
    assert_eq!(scene.tween(tween).unwrap().start_time_ms(), 140);
    scene.think_tick(200);
    assert!(approx_eq(x_of(&scene, node), 60.0));
}

#[test]
fn test_late_tick_snaps_to_end() {
    let (mut scene, node, tween, finished) = slide(100.0, 300);
    scene.play_tween(tween);
    scene.think_tick(1000);
    assert_eq!(x_of(&scene, node), 100.0);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_zero_duration_finishes_on_first_update() {
    let (mut scene, node, tween, finished) = slide(42.0, 0);
    scene.play_tween(tween);
    scene.think_tick(0);
    assert_eq!(x_of(&scene, node), 42.0);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

// ==================== REPLAY ====================

#[test]
fn test_replay_mid_play_restarts_from_current_value() {
    let (mut scene, node, tween, finished) = slide(100.0, 300);
    scene.play_tween(tween);
    scene.think_tick(150);
    assert!(approx_eq(x_of(&scene, node), 50.0));

    assert!(scene.play_tween(tween));
    assert!(approx_eq(scene.tween(tween).unwrap().start_value(), 50.0));
    assert_eq!(scene.tween(tween).unwrap().start_time_ms(), 150);
    scene.think_tick(300);
    assert!(approx_eq(x_of(&scene, node), 75.0));
    scene.think_tick(450);
    assert_eq!(x_of(&scene, node), 100.0);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_replay_after_finish_recaptures_start() {
    let (mut scene, node, tween, finished) = slide(100.0, 100);
    scene.play_tween(tween);
    scene.think_tick(100);
    scene.set_position(node, 200.0, 0.0);
    scene.play_tween(tween);
    scene.think_tick(150);
    assert!(approx_eq(x_of(&scene, node), 150.0));
    scene.think_tick(200);
    assert_eq!(x_of(&scene, node), 100.0);
    assert_eq!(finished.load(Ordering::SeqCst), 2);
}

// ==================== STOP ====================

#[test]
fn test_stop_fires_once() {
    let (mut scene, node, tween, finished) = slide(100.0, 300);
    scene.play_tween(tween);
    scene.think_tick(60);
    assert!(scene.stop_tween(tween, false));
    assert!(approx_eq(x_of(&scene, node), 20.0));
    assert!(!scene.stop_tween(tween, true));
    assert_eq!(x_of(&scene, node), 20.0, "redundant stop must not write");
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stop_forced_to_end() {
    let (mut scene, node, tween, finished) = slide(100.0, 300);
    scene.play_tween(tween);
    assert!(scene.stop_tween(tween, true));
    assert_eq!(x_of(&scene, node), 100.0);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stop_of_inert_tween_does_nothing() {
    let (mut scene, node, tween, finished) = slide(100.0, 300);
    assert!(!scene.stop_tween(tween, true));
    assert_eq!(x_of(&scene, node), 0.0);
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

// ==================== TARGETS ====================

#[test]
fn test_despawned_target_is_ignored() {
    let (mut scene, node, tween, finished) = slide(100.0, 100);
    scene.play_tween(tween);
    scene.despawn_node(node);
    scene.think_tick(50);
    scene.think_tick(100);
    assert!(!scene.is_tween_running(tween));
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_play_without_target_value_fails() {
    let mut scene = Scene::default();
    let node = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    let target = scene.node(node).unwrap();
    let tween = scene.spawn_tween(Tween::new(target, TweenProperty::Radius, 5.0, 100)).unwrap();
    assert!(!scene.play_tween(tween));
    assert!(!scene.is_tween_running(tween));
    assert!(!scene.play_tween(TweenId(999)));
}

#[test]
fn test_callback_can_chain_another_tween() {
    let mut scene = Scene::default();
    let node = scene.spawn_node(NodeBuilder::circle(0.0, 0.0, 10.0)).unwrap();
    let target = scene.node(node).unwrap();
    let shrink = scene.spawn_tween(Tween::new(target, TweenProperty::Radius, 10.0, 100)).unwrap();
    let grow = scene.spawn_tween(
        Tween::new(target, TweenProperty::Radius, 20.0, 100)
            .with_easing(Easing::QuadOut)
            .on_finish(move |world, _| {
                play_tween(world, shrink);
            }),
    )
    .unwrap();
    scene.play_tween(grow);
    scene.think_tick(100);
    assert!(scene.is_tween_running(shrink));
    scene.think_tick(150);
    let radius = |scene: &Scene| match scene.get::<Geometry>(node) {
        Some(Geometry::Circle { radius }) => *radius,
        _ => f32::NAN,
    };
    assert!(approx_eq(radius(&scene), 15.0));
    scene.think_tick(200);
    assert_eq!(radius(&scene), 10.0);
}

#[test]
fn test_running_order_is_play_order() {
    let mut scene = Scene::default();
    let node = scene.spawn_node(NodeBuilder::rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    let target = scene.node(node).unwrap();
    // both write x; the later-played tween wins each update
    let a = scene.spawn_tween(Tween::new(target, TweenProperty::PositionX, 100.0, 100)).unwrap();
    let b = scene.spawn_tween(Tween::new(target, TweenProperty::PositionX, -100.0, 100)).unwrap();
    scene.play_tween(b);
    scene.play_tween(a);
    let order: Vec<u64> = scene.registry().running().ids().collect();
    assert_eq!(order, vec![b.0, a.0]);
    scene.think_tick(100);
    assert_eq!(x_of(&scene, node), 100.0);
}

// ==================== RENDER CYCLE ====================

#[test]
fn test_render_without_backend_still_advances() {
    let (mut scene, node, tween, _) = slide(100.0, 300);
    scene.play_tween(tween);
    assert!(!scene.render_frame(150));
    assert!(approx_eq(x_of(&scene, node), 50.0));
    assert_eq!(scene.time().frame_count, 1);
}
