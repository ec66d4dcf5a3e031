//! Hit geometry of a scene node.
//!
//! Exactly one [`Geometry`] variant applies to a node. The variant also
//! decides how [`MapPosition`](super::mapposition::MapPosition) is read:
//! rectangles and text anchor at the top-left corner, circles at their center.
//!
//! See [`crate::systems::hittest`] for the containment rules.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Font used by text nodes. Only the pixel size takes part in hit-testing;
/// the family is forwarded to the backend for measurement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", 16.0)
    }
}

/// Rendered extent of a string as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    /// Pixel height of the font.
    pub height: f32,
}

impl TextExtent {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// Axis-aligned rectangle of the given size.
    Rect { size: Vec2 },
    /// Circle of the given radius.
    Circle { radius: f32 },
    /// Text whose bounds come from backend measurement.
    Text { text: String, font: FontSpec },
}

impl Geometry {
    pub fn rect(w: f32, h: f32) -> Self {
        Geometry::Rect {
            size: Vec2::new(w, h),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Geometry::Circle { radius }
    }

    pub fn text(text: impl Into<String>, font: FontSpec) -> Self {
        Geometry::Text {
            text: text.into(),
            font,
        }
    }

    /// Inclusive hit rectangle `(min, max)` for a node anchored at `position`.
    ///
    /// Circles use the bounding square of the circle. Text needs a measured
    /// `extent`; without one there are no bounds.
    pub fn hit_bounds(
        &self,
        position: Vec2,
        extent: Option<TextExtent>,
    ) -> Option<(Vec2, Vec2)> {
        match self {
            Geometry::Rect { size } => {
                let p1 = position + *size;
                Some((position.min(p1), position.max(p1)))
            }
            Geometry::Circle { radius } => {
                let r = Vec2::splat(radius.abs());
                Some((position - r, position + r))
            }
            Geometry::Text { .. } => {
                let extent = extent?;
                // text is drawn from its baseline, one font height below the anchor
                let min = position + Vec2::new(0.0, extent.height);
                Some((min, min + extent.size()))
            }
        }
    }

    /// Point containment, inclusive on every edge.
    pub fn contains_point(
        &self,
        position: Vec2,
        extent: Option<TextExtent>,
        point: Vec2,
    ) -> bool {
        let Some((min, max)) = self.hit_bounds(position, extent) else {
            return false;
        };
        point.cmpge(min).all() && point.cmple(max).all()
    }
}
