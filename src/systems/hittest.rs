//! Hit-test oracle.
//!
//! Decides whether the pointer lies inside a node's geometry. Every missing
//! piece (off-surface pointer, no position, no geometry, no backend to
//! measure text with) answers "not hovering" instead of failing.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::geometry::{Geometry, TextExtent};
use crate::components::mapposition::MapPosition;
use crate::resources::backend::TextMeasurer;

/// Whether `pointer` is inside the geometry of `entity`.
pub fn contains(world: &World, pointer: Option<Vec2>, entity: Entity) -> bool {
    let Some(point) = pointer else {
        return false;
    };
    let Ok(node) = world.get_entity(entity) else {
        return false;
    };
    let (Some(position), Some(geometry)) = (node.get::<MapPosition>(), node.get::<Geometry>())
    else {
        return false;
    };
    let extent = match geometry {
        Geometry::Text { text, font } => {
            let Some(measurer) = world.get_resource::<TextMeasurer>() else {
                return false;
            };
            let Some(measured) = measurer.measure(world, text, font) else {
                return false;
            };
            // width from the backend, height from the font size
            Some(TextExtent {
                width: measured.width,
                height: font.size_px,
            })
        }
        _ => None,
    };
    geometry.contains_point(position.pos, extent, point)
}
