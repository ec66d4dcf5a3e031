//! Scene facade.
//!
//! [`Scene`] owns the ECS [`World`] that holds every node, tween and shared
//! resource, and exposes the host-facing operations. Independent scenes share
//! nothing, so tests and multiple surfaces can run side by side.
//!
//! The two cycle entry points are [`Scene::think_tick`] (pointer, interaction,
//! think hooks, tweens) and [`Scene::render_frame`] (tweens, then draw). The
//! [`Scheduler`](crate::scheduler::Scheduler) calls them at the right times;
//! hosts with their own loop may call them directly.

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;
use log::{debug, info, trace};

use crate::builder::NodeBuilder;
use crate::components::interaction::Interaction;
use crate::components::mapposition::MapPosition;
use crate::components::node::Node;
use crate::components::sceneid::{NodeId, TweenId};
use crate::components::tween::Tween;
use crate::error::SceneError;
use crate::events::pointer::PointerInput;
use crate::resources::backend::{self, RenderBackend, RenderHook};
use crate::resources::pointer::{PointerFeed, PointerState};
use crate::resources::registry::SceneRegistry;
use crate::resources::sceneconfig::SceneConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::input::update_pointer_state;
use crate::systems::interaction::interaction_system;
use crate::systems::lifecycle;
use crate::systems::time::{count_frame, count_tick, update_world_time};
use crate::systems::tween::{play_tween, stop_tween, update_tweens};

pub struct Scene {
    world: World,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::new())
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let mut world = World::new();
        info!(
            "scene: tick {}ms, fps cap {}, surface {}x{}",
            config.tick_rate_ms, config.target_fps, config.surface_width, config.surface_height
        );
        world.insert_resource(config);
        world.insert_resource(SceneRegistry::new());
        world.insert_resource(PointerState::default());
        world.insert_resource(PointerFeed::default());
        world.insert_resource(WorldTime::default());
        Self { world }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for hosts that need components beyond the facade.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SceneConfig {
        self.world.resource::<SceneConfig>()
    }

    pub fn registry(&self) -> &SceneRegistry {
        self.world.resource::<SceneRegistry>()
    }

    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    // ==================== Nodes ====================

    pub fn spawn_node(&mut self, builder: NodeBuilder) -> Result<NodeId, SceneError> {
        lifecycle::spawn_node(&mut self.world, builder)
    }

    pub fn node(&self, id: NodeId) -> Option<Entity> {
        lifecycle::node_entity(&self.world, id)
    }

    /// Live node ids in draw/think order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.registry().nodes().ids().map(NodeId).collect()
    }

    pub fn get<T: Component>(&self, id: NodeId) -> Option<&T> {
        self.world.get::<T>(self.node(id)?)
    }

    pub fn get_mut<T: Component<Mutability = Mutable>>(&mut self, id: NodeId) -> Option<Mut<'_, T>> {
        let entity = self.node(id)?;
        self.world.get_mut::<T>(entity)
    }

    pub fn interaction(&self, id: NodeId) -> Option<Interaction> {
        self.get::<Interaction>(id).copied()
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        self.get_mut::<Node>(id).map(|mut n| n.visible = visible).is_some()
    }

    /// Disabling takes effect at the next think tick, which resets the
    /// node's interaction without callbacks.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> bool {
        self.get_mut::<Node>(id).map(|mut n| n.enabled = enabled).is_some()
    }

    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        self.get_mut::<MapPosition>(id)
            .map(|mut p| *p = MapPosition::new(x, y))
            .is_some()
    }

    pub fn despawn_node(&mut self, id: NodeId) -> bool {
        lifecycle::despawn_node(&mut self.world, id)
    }

    pub fn reassign_node_id(
        &mut self,
        id: NodeId,
        new_id: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        lifecycle::reassign_node_id(&mut self.world, id, new_id)
    }

    // ==================== Tweens ====================

    pub fn spawn_tween(&mut self, tween: Tween) -> Result<TweenId, SceneError> {
        lifecycle::spawn_tween(&mut self.world, tween)
    }

    pub fn tween(&self, id: TweenId) -> Option<&Tween> {
        self.world.get::<Tween>(lifecycle::tween_entity(&self.world, id)?)
    }

    pub fn despawn_tween(&mut self, id: TweenId) -> bool {
        lifecycle::despawn_tween(&mut self.world, id)
    }

    pub fn reassign_tween_id(
        &mut self,
        id: TweenId,
        new_id: Option<TweenId>,
    ) -> Result<TweenId, SceneError> {
        lifecycle::reassign_tween_id(&mut self.world, id, new_id)
    }

    /// Play at the scene time of the last think tick or render frame.
    ///
    /// Between cycles that time lags the host clock; use
    /// [`Scene::play_tween_at`] to start at a precise time instead.
    pub fn play_tween(&mut self, id: TweenId) -> bool {
        play_tween(&mut self.world, id)
    }

    /// Advance the scene clock to `now_ms`, then play. An earlier `now_ms`
    /// leaves the clock where it is.
    pub fn play_tween_at(&mut self, id: TweenId, now_ms: u64) -> bool {
        update_world_time(&mut self.world, now_ms);
        play_tween(&mut self.world, id)
    }

    pub fn stop_tween(&mut self, id: TweenId, force_to_end: bool) -> bool {
        stop_tween(&mut self.world, id, force_to_end)
    }

    pub fn is_tween_running(&self, id: TweenId) -> bool {
        self.registry().is_running(id)
    }

    // ==================== Pointer ====================

    /// Overwrite the pointer snapshot read by the next think tick.
    pub fn set_pointer(&mut self, state: PointerState) {
        *self.world.resource_mut::<PointerState>() = state;
    }

    pub fn pointer(&self) -> PointerState {
        *self.world.resource::<PointerState>()
    }

    /// Sender for pointer input from any thread. Inputs are applied at the
    /// start of the next think tick.
    pub fn pointer_sender(&self) -> Sender<PointerInput> {
        self.world.resource::<PointerFeed>().sender()
    }

    // ==================== Backend ====================

    pub fn attach_backend<B: RenderBackend>(&mut self, backend: B) {
        backend::attach_backend(&mut self.world, backend);
    }

    pub fn detach_backend<B: RenderBackend>(&mut self) -> Option<B> {
        backend::detach_backend::<B>(&mut self.world)
    }

    pub fn backend<B: RenderBackend>(&self) -> Option<&B> {
        backend::backend::<B>(&self.world)
    }

    // ==================== Cycles ====================

    /// One think cycle at scene time `now_ms`.
    pub fn think_tick(&mut self, now_ms: u64) {
        update_world_time(&mut self.world, now_ms);
        let tick = count_tick(&mut self.world);
        trace!("think tick {} at {}ms", tick, now_ms);
        update_pointer_state(&mut self.world);
        interaction_system(&mut self.world);
        update_tweens(&mut self.world);
    }

    /// One render cycle at scene time `now_ms`. Returns whether a backend
    /// drew the frame; tweens advance either way.
    pub fn render_frame(&mut self, now_ms: u64) -> bool {
        update_world_time(&mut self.world, now_ms);
        let frame = count_frame(&mut self.world);
        trace!("render frame {} at {}ms", frame, now_ms);
        match self.world.get_resource::<RenderHook>().copied() {
            Some(hook) => hook.run(&mut self.world),
            None => {
                update_tweens(&mut self.world);
                debug!("no backend attached, frame not drawn");
                false
            }
        }
    }
}
