//! Node and tween lifecycle: spawn, look up, re-key, despawn.
//!
//! Every operation keeps [`SceneRegistry`] and the ECS world in step. Lookups
//! and despawns of unknown ids answer `None`/`false` rather than failing.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::builder::NodeBuilder;
use crate::components::interaction::Interaction;
use crate::components::sceneid::{NodeId, TweenId};
use crate::components::tween::Tween;
use crate::error::SceneError;
use crate::resources::registry::SceneRegistry;

fn next_id(world: &mut World) -> Result<u64, SceneError> {
    world.init_resource::<SceneRegistry>();
    world.resource_mut::<SceneRegistry>().next_id()
}

/// Run `register` for a freshly spawned `entity`, despawning it if that
/// fails so no unregistered object is left behind.
fn register_or_despawn(
    world: &mut World,
    entity: Entity,
    register: impl FnOnce(&mut SceneRegistry) -> Result<(), SceneError>,
) -> Result<(), SceneError> {
    let result = register(world.resource_mut::<SceneRegistry>().into_inner());
    if let Err(e) = &result {
        warn!("spawn failed, despawning {:?}: {}", entity, e);
        world.despawn(entity);
    }
    result
}

/// Spawn a node and register it at the end of the draw/think order.
///
/// The node starts idle; its first interaction evaluation happens on the
/// next think tick. Fails only when the id space is exhausted.
pub fn spawn_node(world: &mut World, builder: NodeBuilder) -> Result<NodeId, SceneError> {
    let id = NodeId(next_id(world)?);
    let NodeBuilder {
        position,
        geometry,
        node,
        handlers,
        think,
        extras,
    } = builder;

    let mut entity = world.spawn((id, position, geometry, node, Interaction::default(), handlers));
    if let Some(think) = think {
        entity.insert(think);
    }
    for extra in extras {
        extra(&mut entity);
    }
    let entity = entity.id();

    register_or_despawn(world, entity, |registry| registry.register_node(id, entity))?;
    debug!("spawned {}", id);
    Ok(id)
}

pub fn node_entity(world: &World, id: NodeId) -> Option<Entity> {
    world.get_resource::<SceneRegistry>()?.node(id)
}

/// Remove a node. Returns `false` if it was not live.
pub fn despawn_node(world: &mut World, id: NodeId) -> bool {
    let Some(entity) = world
        .get_resource_mut::<SceneRegistry>()
        .and_then(|mut registry| registry.unregister_node(id))
    else {
        return false;
    };
    world.despawn(entity);
    debug!("despawned {}", id);
    true
}

/// Move a node to `new_id`, or to a fresh id when `None`. The node keeps its
/// interaction state and moves to the end of the draw/think order.
pub fn reassign_node_id(
    world: &mut World,
    id: NodeId,
    new_id: Option<NodeId>,
) -> Result<NodeId, SceneError> {
    if node_entity(world, id).is_none() {
        return Err(SceneError::UnknownNode(id.0));
    }
    let new_id = match new_id {
        Some(new_id) => new_id,
        None => NodeId(next_id(world)?),
    };
    let entity = world
        .resource_mut::<SceneRegistry>()
        .rekey_node(id, new_id)
        .inspect_err(|e| warn!("reassign {} -> {}: {}", id, new_id, e))?;
    if let Some(mut stored) = world.get_mut::<NodeId>(entity) {
        *stored = new_id;
    }
    debug!("reassigned {} -> {}", id, new_id);
    Ok(new_id)
}

/// Spawn an inert tween. It does nothing until played.
pub fn spawn_tween(world: &mut World, tween: Tween) -> Result<TweenId, SceneError> {
    let id = TweenId(next_id(world)?);
    let entity = world.spawn((id, tween)).id();
    register_or_despawn(world, entity, |registry| registry.register_tween(id, entity))?;
    debug!("spawned {}", id);
    Ok(id)
}

pub fn tween_entity(world: &World, id: TweenId) -> Option<Entity> {
    world.get_resource::<SceneRegistry>()?.tween(id)
}

/// Remove a tween, playing or not, without firing its completion callback.
pub fn despawn_tween(world: &mut World, id: TweenId) -> bool {
    let Some(entity) = world
        .get_resource_mut::<SceneRegistry>()
        .and_then(|mut registry| registry.unregister_tween(id))
    else {
        return false;
    };
    world.despawn(entity);
    debug!("despawned {}", id);
    true
}

/// Move a tween to `new_id`, or to a fresh id when `None`.
pub fn reassign_tween_id(
    world: &mut World,
    id: TweenId,
    new_id: Option<TweenId>,
) -> Result<TweenId, SceneError> {
    if tween_entity(world, id).is_none() {
        return Err(SceneError::UnknownTween(id.0));
    }
    let new_id = match new_id {
        Some(new_id) => new_id,
        None => TweenId(next_id(world)?),
    };
    let entity = world
        .resource_mut::<SceneRegistry>()
        .rekey_tween(id, new_id)
        .inspect_err(|e| warn!("reassign {} -> {}: {}", id, new_id, e))?;
    if let Some(mut stored) = world.get_mut::<TweenId>(entity) {
        *stored = new_id;
    }
    debug!("reassigned {} -> {}", id, new_id);
    Ok(new_id)
}
