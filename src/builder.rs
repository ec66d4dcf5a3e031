//! Fluent construction of scene nodes.
//!
//! ```ignore
//! let id = scene.spawn_node(
//!     NodeBuilder::rect(10.0, 10.0, 120.0, 32.0)
//!         .on(PointerEventKind::Click, |world, entity, _| { /* ... */ })
//!         .drawable(HeadlessBackend::painter()),
//! )?;
//! ```

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityWorldMut;

use crate::components::drawable::Drawable;
use crate::components::geometry::{FontSpec, Geometry};
use crate::components::handlers::{PointerHandlers, ThinkHandler};
use crate::components::mapposition::MapPosition;
use crate::components::node::Node;
use crate::events::pointer::{PointerEvent, PointerEventKind};

type Extra = Box<dyn FnOnce(&mut EntityWorldMut<'_>)>;

pub struct NodeBuilder {
    pub(crate) position: MapPosition,
    pub(crate) geometry: Geometry,
    pub(crate) node: Node,
    pub(crate) handlers: PointerHandlers,
    pub(crate) think: Option<ThinkHandler>,
    pub(crate) extras: Vec<Extra>,
}

impl NodeBuilder {
    pub fn new(position: MapPosition, geometry: Geometry) -> Self {
        Self {
            position,
            geometry,
            node: Node::default(),
            handlers: PointerHandlers::new(),
            think: None,
            extras: Vec::new(),
        }
    }

    /// Rectangle with its top-left corner at `(x, y)`.
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(MapPosition::new(x, y), Geometry::rect(w, h))
    }

    /// Circle centered at `(x, y)`.
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::new(MapPosition::new(x, y), Geometry::circle(radius))
    }

    /// Text anchored at `(x, y)`; its baseline sits one font height lower.
    pub fn text(x: f32, y: f32, text: impl Into<String>, font: FontSpec) -> Self {
        Self::new(MapPosition::new(x, y), Geometry::text(text, font))
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.node.visible = visible;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.node.enabled = enabled;
        self
    }

    pub fn on(
        mut self,
        kind: PointerEventKind,
        handler: impl FnMut(&mut World, Entity, PointerEvent) + Send + Sync + 'static,
    ) -> Self {
        self.handlers.set(kind, handler);
        self
    }

    pub fn on_think(mut self, f: impl FnMut(&mut World, Entity) + Send + Sync + 'static) -> Self {
        self.think = Some(ThinkHandler::new(f));
        self
    }

    pub fn drawable<B: 'static>(self, drawable: Drawable<B>) -> Self {
        self.with_component(drawable)
    }

    /// Insert any extra components alongside the node's own.
    pub fn with_component(mut self, bundle: impl Bundle) -> Self {
        self.extras.push(Box::new(move |entity: &mut EntityWorldMut<'_>| {
            entity.insert(bundle);
        }));
        self
    }
}
