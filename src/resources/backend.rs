//! Rendering backend boundary.
//!
//! The scene treats drawing as an opaque capability. A backend implements
//! [`RenderBackend`] and is attached with [`attach_backend`], which stores it
//! as a non-send resource (GPU and window handles are rarely `Send`) and
//! installs two monomorphized hooks so the rest of the crate stays
//! backend-agnostic:
//! - [`TextMeasurer`] – text extents for the hit-test oracle
//! - [`RenderHook`] – the render pass for this backend type
//!
//! [`HeadlessBackend`] is a recording backend with an ownership grid instead
//! of pixels, used by the demo binary and tests.

use std::any::TypeId;

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityRef;
use glam::Vec2;
use log::debug;

use crate::components::drawable::Drawable;
use crate::components::geometry::{FontSpec, Geometry, TextExtent};
use crate::components::mapposition::MapPosition;
use crate::components::sceneid::NodeId;
use crate::systems::render::render_pass;

pub trait RenderBackend: 'static {
    /// Wipe the drawing surface before a frame.
    fn clear(&mut self);

    /// Rendered width and font pixel height of `text`.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Option<TextExtent>;

    /// Called after every visible node has been drawn.
    fn present(&mut self) {}
}

/// Non-send slot holding the attached backend.
pub struct Backend<B>(pub B);

/// Text measurement through the attached backend.
#[derive(Resource, Clone, Copy)]
pub struct TextMeasurer {
    measure: fn(&World, &str, &FontSpec) -> Option<TextExtent>,
    owner: TypeId,
}

impl TextMeasurer {
    pub fn measure(&self, world: &World, text: &str, font: &FontSpec) -> Option<TextExtent> {
        (self.measure)(world, text, font)
    }
}

/// Render pass of the attached backend.
#[derive(Resource, Clone, Copy)]
pub struct RenderHook {
    render: fn(&mut World) -> bool,
    owner: TypeId,
}

impl RenderHook {
    pub fn run(&self, world: &mut World) -> bool {
        (self.render)(world)
    }
}

fn measure_with<B: RenderBackend>(
    world: &World,
    text: &str,
    font: &FontSpec,
) -> Option<TextExtent> {
    world
        .get_non_send_resource::<Backend<B>>()?
        .0
        .measure_text(text, font)
}

/// Attach `backend`, replacing any backend of the same type.
///
/// The hooks always point at the most recently attached backend type.
pub fn attach_backend<B: RenderBackend>(world: &mut World, backend: B) {
    let owner = TypeId::of::<B>();
    world.insert_non_send_resource(Backend(backend));
    world.insert_resource(TextMeasurer {
        measure: measure_with::<B>,
        owner,
    });
    world.insert_resource(RenderHook {
        render: render_pass::<B>,
        owner,
    });
    debug!("attached backend {}", std::any::type_name::<B>());
}

/// Detach and return the backend of type `B`, if one is attached.
///
/// The hooks are removed only if `B` installed them; hooks of a backend
/// attached later stay in place.
pub fn detach_backend<B: RenderBackend>(world: &mut World) -> Option<B> {
    let backend = world.remove_non_send_resource::<Backend<B>>()?;
    let owner = TypeId::of::<B>();
    if world
        .get_resource::<TextMeasurer>()
        .is_some_and(|m| m.owner == owner)
    {
        world.remove_resource::<TextMeasurer>();
    }
    if world
        .get_resource::<RenderHook>()
        .is_some_and(|h| h.owner == owner)
    {
        world.remove_resource::<RenderHook>();
    }
    debug!("detached backend {}", std::any::type_name::<B>());
    Some(backend.0)
}

pub fn backend<B: RenderBackend>(world: &World) -> Option<&B> {
    world.get_non_send_resource::<Backend<B>>().map(|b| &b.0)
}

pub fn backend_mut<B: RenderBackend>(world: &mut World) -> Option<&mut B> {
    world
        .get_non_send_resource_mut::<Backend<B>>()
        .map(|b| &mut b.into_inner().0)
}

/// Average glyph advance as a fraction of the font size.
const HEADLESS_GLYPH_ADVANCE: f32 = 0.5;

/// Backend that records draw order and paints node ids into a coarse grid.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    width: usize,
    height: usize,
    grid: Vec<Option<u64>>,
    drawn: Vec<u64>,
    pub clears: u64,
    pub frames: u64,
}

impl HeadlessBackend {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            grid: vec![None; width * height],
            drawn: Vec::new(),
            clears: 0,
            frames: 0,
        }
    }

    /// Node ids drawn since the last clear, in draw order.
    pub fn drawn(&self) -> &[u64] {
        &self.drawn
    }

    /// Id of the node that last painted the cell at `(x, y)`.
    pub fn owner_at(&self, x: u32, y: u32) -> Option<u64> {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid[y * self.width + x]
    }

    /// Paint every cell inside `[min, max]` with `id`.
    pub fn fill(&mut self, id: u64, min: Vec2, max: Vec2) {
        self.drawn.push(id);
        if self.width == 0 || self.height == 0 {
            return;
        }
        let last = Vec2::new((self.width - 1) as f32, (self.height - 1) as f32);
        if max.cmplt(Vec2::ZERO).any() || min.cmpgt(last).any() {
            return;
        }
        let lo = min.ceil().clamp(Vec2::ZERO, last);
        let hi = max.floor().clamp(Vec2::ZERO, last);
        for y in lo.y as usize..=hi.y as usize {
            for x in lo.x as usize..=hi.x as usize {
                self.grid[y * self.width + x] = Some(id);
            }
        }
    }

    /// Painter that fills the node's geometry bounds with its id. Text fills
    /// the glyph box above its baseline.
    pub fn painter() -> Drawable<HeadlessBackend> {
        Drawable::new(paint_bounds)
    }
}

fn paint_bounds(node: EntityRef<'_>, backend: &mut HeadlessBackend) {
    let (Some(id), Some(position), Some(geometry)) = (
        node.get::<NodeId>(),
        node.get::<MapPosition>(),
        node.get::<Geometry>(),
    ) else {
        return;
    };
    let bounds = match geometry {
        Geometry::Text { text, font } => backend.measure_text(text, font).map(|extent| {
            (
                position.pos,
                position.pos + extent.size(),
            )
        }),
        other => other.hit_bounds(position.pos, None),
    };
    if let Some((min, max)) = bounds {
        backend.fill(id.0, min, max);
    }
}

impl RenderBackend for HeadlessBackend {
    fn clear(&mut self) {
        self.grid.iter_mut().for_each(|cell| *cell = None);
        self.drawn.clear();
        self.clears += 1;
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> Option<TextExtent> {
        Some(TextExtent {
            width: text.chars().count() as f32 * font.size_px * HEADLESS_GLYPH_ADVANCE,
            height: font.size_px,
        })
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
