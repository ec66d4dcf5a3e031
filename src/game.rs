//! Demo scene used by the binary.
//!
//! A button that slides a label across the surface on click, a label whose
//! text tracks the click count, and a field of random circles that pulse
//! when clicked. [`DemoStats`] collects what the callbacks saw so the host
//! can log a summary.
//!
//! Pointer traces are JSON arrays of [`TraceStep`]s:
//!
//! ```json
//! [
//!   { "at_ms": 0,   "input": { "kind": "moved", "x": 100.0, "y": 40.0 } },
//!   { "at_ms": 100, "input": { "kind": "pressed" } }
//! ]
//! ```

use std::path::Path;

use bevy_ecs::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::builder::NodeBuilder;
use crate::components::geometry::{FontSpec, Geometry};
use crate::components::handlers::PointerHandlers;
use crate::components::mapposition::MapPosition;
use crate::components::sceneid::NodeId;
use crate::components::tween::{Easing, Tween, TweenProperty};
use crate::error::SceneError;
use crate::events::pointer::{PointerEvent, PointerEventKind, PointerInput};
use crate::resources::backend::HeadlessBackend;
use crate::scene::Scene;
use crate::systems::tween::play_tween;

const BUTTON_POS: (f32, f32) = (20.0, 20.0);
const BUTTON_SIZE: (f32, f32) = (160.0, 40.0);
const LABEL_POS: (f32, f32) = (20.0, 80.0);
const LABEL_SLIDE_X: f32 = 220.0;
const SLIDE_MS: u64 = 400;
const PULSE_MS: u64 = 150;
const CIRCLE_MIN_RADIUS: f32 = 5.0;
const CIRCLE_MAX_RADIUS: f32 = 20.0;

/// What the demo callbacks observed.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct DemoStats {
    pub clicks: u32,
    pub releases: u32,
    pub hover_ticks: u64,
    pub hover_exits: u32,
    pub longest_hold: u32,
    pub tweens_finished: u32,
}

#[derive(Debug, Clone)]
pub struct DemoScene {
    pub button: NodeId,
    pub label: NodeId,
    pub circles: Vec<NodeId>,
}

fn label_text(clicks: u32) -> String {
    format!("clicks: {}", clicks)
}

fn count_finished(world: &mut World) {
    if let Some(mut stats) = world.get_resource_mut::<DemoStats>() {
        stats.tweens_finished += 1;
    }
}

fn record(world: &mut World, event: PointerEvent) {
    let Some(mut stats) = world.get_resource_mut::<DemoStats>() else {
        return;
    };
    match event {
        PointerEvent::Click => stats.clicks += 1,
        PointerEvent::ClickHold(ticks) => stats.longest_hold = stats.longest_hold.max(ticks),
        PointerEvent::Release => stats.releases += 1,
        PointerEvent::Hover => stats.hover_ticks += 1,
        PointerEvent::StopHover => stats.hover_exits += 1,
    }
}

/// Populate `scene` with the demo nodes and tweens.
pub fn build_demo_scene(
    scene: &mut Scene,
    shapes: usize,
    rng: &mut fastrand::Rng,
) -> Result<DemoScene, SceneError> {
    scene.world_mut().insert_resource(DemoStats::default());
    let font = FontSpec::new("Arial", 16.0);

    let label = scene.spawn_node(
        NodeBuilder::text(LABEL_POS.0, LABEL_POS.1, label_text(0), font)
            .on_think(|world, entity| {
                let Some(clicks) = world.get_resource::<DemoStats>().map(|s| s.clicks) else {
                    return;
                };
                if let Some(mut geometry) = world.get_mut::<Geometry>(entity) {
                    if let Geometry::Text { text, .. } = &mut *geometry {
                        let wanted = label_text(clicks);
                        if *text != wanted {
                            *text = wanted;
                        }
                    }
                }
            })
            .drawable(HeadlessBackend::painter()),
    )?;
    let label_entity = scene.node(label).unwrap_or(Entity::PLACEHOLDER);

    let slide_back = scene.spawn_tween(
        Tween::new(label_entity, TweenProperty::PositionX, LABEL_POS.0, SLIDE_MS)
            .with_easing(Easing::SmoothStep)
            .on_finish(|world, _| count_finished(world)),
    )?;
    let slide = scene.spawn_tween(
        Tween::new(label_entity, TweenProperty::PositionX, LABEL_SLIDE_X, SLIDE_MS)
            .with_easing(Easing::CubicOut)
            .on_finish(move |world, id| {
                debug!("{} finished, sliding back", id);
                count_finished(world);
                play_tween(world, slide_back);
            }),
    )?;

    let mut button = NodeBuilder::rect(BUTTON_POS.0, BUTTON_POS.1, BUTTON_SIZE.0, BUTTON_SIZE.1)
        .on(PointerEventKind::Click, move |world, _, event| {
            record(world, event);
            play_tween(world, slide);
        })
        .drawable(HeadlessBackend::painter());
    for kind in [
        PointerEventKind::ClickHold,
        PointerEventKind::Release,
        PointerEventKind::Hover,
        PointerEventKind::StopHover,
    ] {
        button = button.on(kind, |world, _, event| record(world, event));
    }
    let button = scene.spawn_node(button)?;

    let (width, height) = scene.config().surface_size();
    let mut circles = Vec::with_capacity(shapes);
    for _ in 0..shapes {
        let radius = CIRCLE_MIN_RADIUS + rng.f32() * (CIRCLE_MAX_RADIUS - CIRCLE_MIN_RADIUS);
        let x = radius + rng.f32() * (width as f32 - 2.0 * radius).max(0.0);
        let y = radius + rng.f32() * (height as f32 - 2.0 * radius).max(0.0);
        let id = scene.spawn_node(
            NodeBuilder::circle(x, y, radius).drawable(HeadlessBackend::painter()),
        )?;
        let entity = scene.node(id).unwrap_or(Entity::PLACEHOLDER);

        let shrink = scene.spawn_tween(
            Tween::new(entity, TweenProperty::Radius, radius, PULSE_MS)
                .on_finish(|world, _| count_finished(world)),
        )?;
        let grow = scene.spawn_tween(
            Tween::new(entity, TweenProperty::Radius, radius * 1.5, PULSE_MS)
                .with_easing(Easing::QuadOut)
                .on_finish(move |world, _| {
                    count_finished(world);
                    play_tween(world, shrink);
                }),
        )?;
        if let Some(mut handlers) = scene.get_mut::<PointerHandlers>(id) {
            handlers.set(PointerEventKind::Click, move |world, _, event| {
                record(world, event);
                play_tween(world, grow);
            });
        }
        circles.push(id);
    }

    info!(
        "demo scene: button {}, label {}, {} circles",
        button,
        label,
        circles.len()
    );
    Ok(DemoScene {
        button,
        label,
        circles,
    })
}

/// One recorded pointer input and when to deliver it, relative to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub at_ms: u64,
    pub input: PointerInput,
}

pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceStep>, SceneError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| SceneError::Trace(format!("{}: {}", path.display(), e)))?;
    let mut steps: Vec<TraceStep> = serde_json::from_str(&json)
        .map_err(|e| SceneError::Trace(format!("{}: {}", path.display(), e)))?;
    steps.sort_by_key(|step| step.at_ms);
    Ok(steps)
}

/// Built-in trace: click the button, then the first circle, then leave.
pub fn demo_trace(scene: &Scene, demo: &DemoScene) -> Vec<TraceStep> {
    let moved = |x: f32, y: f32| PointerInput::Moved { x, y };
    let center = |id: NodeId| {
        let pos = scene.get::<MapPosition>(id)?.pos;
        match scene.get::<Geometry>(id)? {
            Geometry::Rect { size } => Some((pos.x + size.x / 2.0, pos.y + size.y / 2.0)),
            _ => Some((pos.x, pos.y)),
        }
    };

    let mut steps = Vec::new();
    let mut push = |at_ms: u64, input: PointerInput| steps.push(TraceStep { at_ms, input });
    if let Some((x, y)) = center(demo.button) {
        push(0, moved(x, y));
        push(100, PointerInput::Pressed);
        push(300, PointerInput::Released);
    }
    if let Some((x, y)) = demo.circles.first().and_then(|&id| center(id)) {
        push(500, moved(x, y));
        push(560, PointerInput::Pressed);
        push(620, PointerInput::Released);
    }
    push(800, PointerInput::Left);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_demo_scene() {
        let mut scene = Scene::default();
        let mut rng = fastrand::Rng::with_seed(7);
        let demo = build_demo_scene(&mut scene, 5, &mut rng).unwrap();
        assert_eq!(demo.circles.len(), 5);
        assert_eq!(scene.node_ids().len(), 7);
        // two slide tweens plus a pulse pair per circle
        assert_eq!(scene.registry().tween_count(), 2 + 2 * 5);
        for id in &demo.circles {
            let pos = scene.get::<MapPosition>(*id).unwrap().pos;
            assert!(pos.x >= 0.0 && pos.x <= 640.0);
            assert!(pos.y >= 0.0 && pos.y <= 360.0);
        }
    }

    #[test]
    fn test_demo_click_updates_label() {
        let mut scene = Scene::default();
        let mut rng = fastrand::Rng::with_seed(1);
        let demo = build_demo_scene(&mut scene, 0, &mut rng).unwrap();
        scene.attach_backend(HeadlessBackend::new(640, 360));

        let tx = scene.pointer_sender();
        for step in demo_trace(&scene, &demo) {
            tx.send(step.input).unwrap();
            if matches!(step.input, PointerInput::Pressed) {
                break;
            }
        }
        scene.think_tick(0);
        scene.think_tick(20);

        let stats = scene.world().resource::<DemoStats>().clone();
        assert_eq!(stats.clicks, 1);
        assert_eq!(stats.longest_hold, 1);
        match scene.get::<Geometry>(demo.label).unwrap() {
            Geometry::Text { text, .. } => assert_eq!(text, "clicks: 1"),
            other => panic!("label geometry changed: {:?}", other),
        }
    }

    #[test]
    fn test_trace_json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(
            &path,
            r#"[
                {"at_ms": 50, "input": {"kind": "pressed"}},
                {"at_ms": 0, "input": {"kind": "moved", "x": 1.5, "y": 2.0}}
            ]"#,
        )
        .unwrap();
        let steps = load_trace(&path).unwrap();
        assert_eq!(steps[0].input, PointerInput::Moved { x: 1.5, y: 2.0 });
        assert_eq!(steps[1].at_ms, 50);
        assert!(matches!(
            load_trace(dir.path().join("missing.json")),
            Err(SceneError::Trace(_))
        ));
    }
}
