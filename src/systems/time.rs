//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource from the scheduler clock before each think tick and render frame.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Set `elapsed_ms` to `now_ms`. The clock never runs backwards; an earlier
/// reading is ignored.
pub fn update_world_time(world: &mut World, now_ms: u64) {
    let mut wt = world.resource_mut::<WorldTime>();
    if now_ms > wt.elapsed_ms {
        wt.elapsed_ms = now_ms;
    }
}

pub fn count_tick(world: &mut World) -> u64 {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.tick_count += 1;
    wt.tick_count
}

pub fn count_frame(world: &mut World) -> u64 {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.frame_count += 1;
    wt.frame_count
}
