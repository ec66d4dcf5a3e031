//! Identity registry.
//!
//! [`SceneRegistry`] hands out ids from one monotonically increasing counter
//! shared by nodes and tweens and keeps the id → entity maps:
//! - `nodes` – live scene nodes, in insertion order (draw and think order)
//! - `tweens` – every live tween, playing or inert
//! - `running` – tweens currently playing, in insertion order
//!
//! Re-keying is delete-then-insert, so a re-keyed object moves to the end of
//! its ordered map. Claiming an id that is already live is rejected with
//! [`SceneError::IdInUse`]. `u64::MAX` is reserved: claiming it fails with
//! [`SceneError::IdReserved`], which keeps the counter from ever wrapping.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

use crate::components::sceneid::{NodeId, TweenId};
use crate::error::SceneError;

/// Id → entity map that remembers insertion order.
#[derive(Debug, Default, Clone)]
pub struct OrderedIds {
    order: Vec<u64>,
    map: FxHashMap<u64, Entity>,
}

impl OrderedIds {
    pub fn get(&self, id: u64) -> Option<Entity> {
        self.map.get(&id).copied()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.map.contains_key(&id)
    }

    /// Append `id`. Fails if it is already present.
    pub fn insert(&mut self, id: u64, entity: Entity) -> Result<(), SceneError> {
        if self.map.contains_key(&id) {
            return Err(SceneError::IdInUse(id));
        }
        self.map.insert(id, entity);
        self.order.push(id);
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Option<Entity> {
        let entity = self.map.remove(&id)?;
        self.order.retain(|&k| k != id);
        Some(entity)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    /// `(id, entity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Entity)> + '_ {
        self.order.iter().map(|id| (*id, self.map[id]))
    }

    /// `(id, entity)` pairs in insertion order, copied out so callers may
    /// mutate the registry while walking them.
    pub fn snapshot(&self) -> Vec<(u64, Entity)> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Never handed out; the counter stops here.
const RESERVED_ID: u64 = u64::MAX;

#[derive(Resource, Debug, Default)]
pub struct SceneRegistry {
    next_id: u64,
    nodes: OrderedIds,
    tweens: FxHashMap<u64, Entity>,
    running: OrderedIds,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh id, strictly greater than every id issued or claimed so far.
    pub fn next_id(&mut self) -> Result<u64, SceneError> {
        let id = self.next_id;
        if id == RESERVED_ID {
            return Err(SceneError::IdsExhausted);
        }
        self.next_id = id + 1;
        Ok(id)
    }

    fn check_claimable(id: u64) -> Result<(), SceneError> {
        if id == RESERVED_ID {
            return Err(SceneError::IdReserved(id));
        }
        Ok(())
    }

    /// Keep the counter ahead of a manually chosen id. `id < RESERVED_ID`.
    fn claim(&mut self, id: u64) {
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }

    // ==================== NODES ====================

    pub fn nodes(&self) -> &OrderedIds {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<Entity> {
        self.nodes.get(id.0)
    }

    pub fn register_node(&mut self, id: NodeId, entity: Entity) -> Result<(), SceneError> {
        Self::check_claimable(id.0)?;
        self.nodes.insert(id.0, entity)?;
        self.claim(id.0);
        Ok(())
    }

    pub fn unregister_node(&mut self, id: NodeId) -> Option<Entity> {
        self.nodes.remove(id.0)
    }

    /// Move a node from `old` to `new`. Returns the node entity.
    pub fn rekey_node(&mut self, old: NodeId, new: NodeId) -> Result<Entity, SceneError> {
        let entity = self.nodes.get(old.0).ok_or(SceneError::UnknownNode(old.0))?;
        if old == new {
            return Ok(entity);
        }
        Self::check_claimable(new.0)?;
        if self.nodes.contains(new.0) {
            return Err(SceneError::IdInUse(new.0));
        }
        self.nodes.remove(old.0);
        self.register_node(new, entity)?;
        Ok(entity)
    }

    // ==================== TWEENS ====================

    pub fn tween(&self, id: TweenId) -> Option<Entity> {
        self.tweens.get(&id.0).copied()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn register_tween(&mut self, id: TweenId, entity: Entity) -> Result<(), SceneError> {
        Self::check_claimable(id.0)?;
        if self.tweens.contains_key(&id.0) {
            return Err(SceneError::IdInUse(id.0));
        }
        self.tweens.insert(id.0, entity);
        self.claim(id.0);
        Ok(())
    }

    /// Forget a tween entirely, including any running registration.
    pub fn unregister_tween(&mut self, id: TweenId) -> Option<Entity> {
        self.running.remove(id.0);
        self.tweens.remove(&id.0)
    }

    /// Move a tween from `old` to `new`. A running tween stays running and
    /// moves to the end of the running order.
    pub fn rekey_tween(&mut self, old: TweenId, new: TweenId) -> Result<Entity, SceneError> {
        let entity = self.tween(old).ok_or(SceneError::UnknownTween(old.0))?;
        if old == new {
            return Ok(entity);
        }
        Self::check_claimable(new.0)?;
        if self.tweens.contains_key(&new.0) {
            return Err(SceneError::IdInUse(new.0));
        }
        let was_running = self.running.remove(old.0).is_some();
        self.tweens.remove(&old.0);
        self.register_tween(new, entity)?;
        if was_running {
            self.running.insert(new.0, entity)?;
        }
        Ok(entity)
    }

    pub fn running(&self) -> &OrderedIds {
        &self.running
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.running.contains(id.0)
    }

    /// Register `id` as playing. Already-running tweens keep their position.
    pub(crate) fn start_running(&mut self, id: TweenId) -> bool {
        let Some(entity) = self.tween(id) else {
            return false;
        };
        if !self.running.contains(id.0) {
            // cannot collide, checked just above
            let _ = self.running.insert(id.0, entity);
        }
        true
    }

    /// Deregister `id` from the running set. Returns whether it was running.
    pub(crate) fn stop_running(&mut self, id: TweenId) -> bool {
        self.running.remove(id.0).is_some()
    }
}
