//! Interaction state machine system.
//!
//! Once per think tick, in registry insertion order, every node is evaluated
//! against the current [`PointerState`]:
//!
//! 1. Disabled nodes are forced back to idle without any callback.
//! 2. Enabled nodes are hit-tested and their [`Interaction`] stepped; the
//!    resulting [`PointerEvent`]s are dispatched to the node's
//!    [`PointerHandlers`] in order.
//! 3. The node's [`ThinkHandler`], if any, runs afterwards.
//!
//! Handlers run with full world access. The node list is snapshotted at the
//! start of the tick: nodes spawned by a handler are first evaluated on the
//! next tick, nodes despawned by a handler are skipped.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::handlers::{PointerHandlers, ThinkHandler};
use crate::components::interaction::Interaction;
use crate::components::node::Node;
use crate::events::pointer::PointerEvent;
use crate::resources::pointer::PointerState;
use crate::resources::registry::SceneRegistry;
use crate::systems::hittest::contains;

pub fn interaction_system(world: &mut World) {
    let pointer = world
        .get_resource::<PointerState>()
        .copied()
        .unwrap_or_default();
    let Some(registry) = world.get_resource::<SceneRegistry>() else {
        return;
    };
    let nodes = registry.nodes().snapshot();

    for (id, entity) in nodes {
        evaluate_node(world, id, entity, pointer);
        run_think_handler(world, entity);
    }
}

fn evaluate_node(world: &mut World, id: u64, entity: Entity, pointer: PointerState) {
    let Some(node) = world.get::<Node>(entity).copied() else {
        return;
    };
    if !node.enabled {
        if let Some(mut interaction) = world.get_mut::<Interaction>(entity) {
            if *interaction != Interaction::default() {
                trace!("node#{} disabled, interaction reset", id);
                interaction.reset();
            }
        }
        return;
    }

    let hit = contains(world, pointer.position, entity);
    let events = match world.get_mut::<Interaction>(entity) {
        Some(mut interaction) => interaction.step(hit, pointer.pressed),
        None => return,
    };
    for event in events {
        if !dispatch(world, id, entity, event) {
            break;
        }
    }
}

/// Run the handler for `event`. Returns `false` once the node is gone.
fn dispatch(world: &mut World, id: u64, entity: Entity, event: PointerEvent) -> bool {
    let kind = event.kind();
    let taken = match world.get_mut::<PointerHandlers>(entity) {
        Some(mut handlers) => handlers.take(kind),
        None => return world.get_entity(entity).is_ok(),
    };
    let Some(mut handler) = taken else {
        return true;
    };

    trace!("node#{} <- {:?}", id, event);
    handler(world, entity, event);

    match world.get_mut::<PointerHandlers>(entity) {
        Some(mut handlers) => {
            handlers.restore(kind, handler);
            true
        }
        None => world.get_entity(entity).is_ok(),
    }
}

fn run_think_handler(world: &mut World, entity: Entity) {
    let Some(mut think) = world
        .get_mut::<ThinkHandler>(entity)
        .and_then(|mut hook| hook.0.take())
    else {
        return;
    };
    think(world, entity);
    if let Some(mut hook) = world.get_mut::<ThinkHandler>(entity) {
        if hook.0.is_none() {
            hook.0 = Some(think);
        }
    }
}
