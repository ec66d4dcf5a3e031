//! Draw capability of a node.
//!
//! The scene never draws by itself. A [`Drawable`] carries the strategy that
//! paints a node onto a concrete backend `B`; the render pass hands it the
//! node's components through an [`EntityRef`] so the strategy can read the
//! current (possibly tweened) position and geometry.

use bevy_ecs::prelude::Component;
use bevy_ecs::world::EntityRef;

type PaintFn<B> = Box<dyn Fn(EntityRef<'_>, &mut B) + Send + Sync>;

#[derive(Component)]
pub struct Drawable<B: 'static> {
    paint: PaintFn<B>,
}

impl<B: 'static> Drawable<B> {
    pub fn new(paint: impl Fn(EntityRef<'_>, &mut B) + Send + Sync + 'static) -> Self {
        Self {
            paint: Box::new(paint),
        }
    }

    pub fn draw(&self, node: EntityRef<'_>, backend: &mut B) {
        (self.paint)(node, backend);
    }
}
