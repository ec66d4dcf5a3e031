//! Render pass.
//!
//! One frame: clear the surface, advance running tweens, then draw every
//! visible node that carries a [`Drawable`] for the attached backend, in
//! registry insertion order (later nodes draw on top).
//!
//! The pass is monomorphized per backend and installed as the scene's
//! [`RenderHook`](crate::resources::backend::RenderHook) by
//! [`attach_backend`](crate::resources::backend::attach_backend).

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::drawable::Drawable;
use crate::components::node::Node;
use crate::resources::backend::{Backend, RenderBackend, backend_mut};
use crate::resources::registry::SceneRegistry;
use crate::systems::tween::update_tweens;

/// Run one frame against backend `B`. Returns `false` when no backend of
/// that type is attached; tweens still advance in that case.
pub fn render_pass<B: RenderBackend>(world: &mut World) -> bool {
    let attached = match backend_mut::<B>(world) {
        Some(backend) => {
            backend.clear();
            true
        }
        None => false,
    };

    update_tweens(world);

    // a tween callback may have detached the backend
    let Some(mut slot) = attached
        .then(|| world.remove_non_send_resource::<Backend<B>>())
        .flatten()
    else {
        debug!("no backend attached, frame not drawn");
        return false;
    };
    draw_nodes(world, &mut slot.0);
    slot.0.present();
    world.insert_non_send_resource(slot);
    true
}

fn draw_nodes<B: RenderBackend>(world: &World, backend: &mut B) {
    let Some(registry) = world.get_resource::<SceneRegistry>() else {
        return;
    };
    for (_, entity) in registry.nodes().iter() {
        let Ok(node) = world.get_entity(entity) else {
            continue;
        };
        if !node.get::<Node>().map_or(true, |n| n.visible) {
            continue;
        }
        if let Some(drawable) = node.get::<Drawable<B>>() {
            drawable.draw(node, backend);
        }
    }
}
