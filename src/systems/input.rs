//! Pointer input system.
//!
//! [`update_pointer_state`] drains the [`PointerFeed`] into [`PointerState`]
//! at the start of each think tick, so the interaction system sees exactly
//! one pointer snapshot per tick.

use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::pointer::{PointerFeed, PointerState};

pub fn update_pointer_state(world: &mut World) {
    let Some(feed) = world.get_resource::<PointerFeed>().cloned() else {
        return;
    };
    let Some(mut state) = world.get_resource_mut::<PointerState>() else {
        return;
    };
    let applied = feed.drain_into(&mut state);
    if applied > 0 {
        trace!("applied {} pointer inputs -> {:?}", applied, *state);
    }
}
