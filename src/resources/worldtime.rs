use bevy_ecs::prelude::Resource;

/// Scene clock.
///
/// `elapsed_ms` is wall-clock time since the scheduler started and is what
/// tweens measure their progress against. The counters only ever grow.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldTime {
    pub elapsed_ms: u64,
    pub tick_count: u64,
    pub frame_count: u64,
}
