//! Optional callback tables attached to nodes.
//!
//! - [`PointerHandlers`] – one optional handler per [`PointerEventKind`];
//!   missing entries are skipped.
//! - [`ThinkHandler`] – game-logic hook run once per think tick.
//!
//! Handlers receive the whole [`World`] so they can move nodes, toggle flags
//! or play and stop tweens. Structural changes they make (despawning nodes,
//! registering tweens) are visible to the rest of the current cycle.

use bevy_ecs::prelude::{Component, Entity, World};
use rustc_hash::FxHashMap;

use crate::events::pointer::{PointerEvent, PointerEventKind};

pub type PointerHandler = Box<dyn FnMut(&mut World, Entity, PointerEvent) + Send + Sync>;
pub type ThinkFn = Box<dyn FnMut(&mut World, Entity) + Send + Sync>;

/// Handler slot. `Running` marks a handler taken out for dispatch, so a
/// removal made by the callback itself sticks.
enum Slot {
    Ready(PointerHandler),
    Running,
}

#[derive(Component, Default)]
pub struct PointerHandlers {
    handlers: FxHashMap<PointerEventKind, Slot>,
}

impl PointerHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PointerHandlers::set`].
    pub fn with(
        mut self,
        kind: PointerEventKind,
        handler: impl FnMut(&mut World, Entity, PointerEvent) + Send + Sync + 'static,
    ) -> Self {
        self.set(kind, handler);
        self
    }

    /// Install or replace the handler for `kind`.
    pub fn set(
        &mut self,
        kind: PointerEventKind,
        handler: impl FnMut(&mut World, Entity, PointerEvent) + Send + Sync + 'static,
    ) {
        self.handlers.insert(kind, Slot::Ready(Box::new(handler)));
    }

    /// Drop the handler for `kind`, including one that is currently running.
    pub fn remove(&mut self, kind: PointerEventKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    pub fn contains(&self, kind: PointerEventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub(crate) fn take(&mut self, kind: PointerEventKind) -> Option<PointerHandler> {
        let slot = self.handlers.get_mut(&kind)?;
        match std::mem::replace(slot, Slot::Running) {
            Slot::Ready(handler) => Some(handler),
            Slot::Running => None,
        }
    }

    /// Put a handler back unless the callback replaced or removed it.
    pub(crate) fn restore(&mut self, kind: PointerEventKind, handler: PointerHandler) {
        if let Some(slot) = self.handlers.get_mut(&kind) {
            if matches!(slot, Slot::Running) {
                *slot = Slot::Ready(handler);
            }
        }
    }
}

#[derive(Component)]
pub struct ThinkHandler(pub(crate) Option<ThinkFn>);

impl ThinkHandler {
    pub fn new(f: impl FnMut(&mut World, Entity) + Send + Sync + 'static) -> Self {
        Self(Some(Box::new(f)))
    }
}
