//! Tween engine.
//!
//! - [`play_tween`] – capture the start value and timestamp, register as running
//! - [`update_tweens`] – interpolate every running tween, in running order
//! - [`stop_tween`] – deregister, optionally snap to the end value, fire `on_finish`
//!
//! Progress is `elapsed / duration` against [`WorldTime::elapsed_ms`] and is
//! not clamped before interpolation; the overshoot of the last step is
//! overwritten by the forced end value in the same update.

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::sceneid::TweenId;
use crate::components::tween::{Easing, Tween};
use crate::math::lerp;
use crate::resources::registry::SceneRegistry;
use crate::resources::worldtime::WorldTime;
use crate::systems::lifecycle::tween_entity;

/// Apply an easing function to a progress value.
///
/// `Linear` passes `t` through untouched; every other curve clamps `t` to
/// [0.0, 1.0] first.
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    if e == Easing::Linear {
        return t;
    }
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
    }
}

fn now_ms(world: &World) -> u64 {
    world
        .get_resource::<WorldTime>()
        .map(|t| t.elapsed_ms)
        .unwrap_or(0)
}

/// Start (or restart) playback from the target's current value.
///
/// The start time is the current [`WorldTime::elapsed_ms`]: the running
/// cycle's time when called from a callback, the last cycle's time when
/// called by the host between cycles.
///
/// Returns `false` if the tween is unknown or its target has no value to
/// start from.
pub fn play_tween(world: &mut World, id: TweenId) -> bool {
    let Some(entity) = tween_entity(world, id) else {
        debug!("play: unknown {}", id);
        return false;
    };
    let now = now_ms(world);
    let Some((target, property)) = world.get::<Tween>(entity).map(|t| (t.target, t.property))
    else {
        return false;
    };
    let Some(start) = property.get(world, target) else {
        debug!("play: {} target has no value for {:?}", id, property);
        return false;
    };
    if let Some(mut tween) = world.get_mut::<Tween>(entity) {
        tween.start = start;
        tween.start_time_ms = now;
    }
    trace!("play {} from {} at {}ms", id, start, now);
    world.resource_mut::<SceneRegistry>().start_running(id)
}

/// Stop a running tween.
///
/// Deregisters it, writes the end value when `force_to_end` is set, then
/// fires `on_finish`. Stopping a tween that is not running does nothing and
/// returns `false`, so the callback fires once per play cycle.
pub fn stop_tween(world: &mut World, id: TweenId, force_to_end: bool) -> bool {
    let Some(entity) = tween_entity(world, id) else {
        return false;
    };
    if !world.resource_mut::<SceneRegistry>().stop_running(id) {
        trace!("stop: {} not running", id);
        return false;
    }

    if force_to_end {
        if let Some((target, property, end)) = world
            .get::<Tween>(entity)
            .map(|t| (t.target, t.property, t.end))
        {
            property.set(world, target, end);
        }
    }

    let finish = world
        .get_mut::<Tween>(entity)
        .and_then(|mut tween| tween.on_finish.take());
    if let Some(mut finish) = finish {
        finish(world, id);
        if let Some(mut tween) = world.get_mut::<Tween>(entity) {
            if tween.on_finish.is_none() {
                tween.on_finish = Some(finish);
            }
        }
    }
    debug!("stopped {}", id);
    true
}

/// Advance every running tween to the current time.
pub fn update_tweens(world: &mut World) {
    let now = now_ms(world);
    let Some(registry) = world.get_resource::<SceneRegistry>() else {
        return;
    };
    let running = registry.running().snapshot();

    for (id, entity) in running {
        let id = TweenId(id);
        // an earlier tween's callback may have stopped or re-keyed this one
        if !world.resource::<SceneRegistry>().is_running(id) {
            continue;
        }
        let Some(tween) = world.get::<Tween>(entity) else {
            continue;
        };
        let elapsed = now.saturating_sub(tween.start_time_ms);
        let progress = if tween.duration_ms == 0 {
            1.0
        } else {
            elapsed as f32 / tween.duration_ms as f32
        };
        let value = lerp(tween.start, tween.end, ease(tween.easing, progress));
        let (target, property) = (tween.target, tween.property);
        let done = elapsed >= tween.duration_ms;

        property.set(world, target, value);
        if done {
            stop_tween(world, id, true);
        }
    }
}
