//! Tween component for time-based property interpolation.
//!
//! A [`Tween`] lives on its own entity (tagged with a
//! [`TweenId`](super::sceneid::TweenId)) and points at a target entity plus a
//! typed [`TweenProperty`]. It is inert until played; while registered as
//! running it is advanced by [`crate::systems::tween::update_tweens`] and
//! removes itself once its duration has elapsed.
//!
//! The target is borrowed, not owned: despawning the target leaves the tween
//! writing into nothing until it finishes.

use std::fmt;

use bevy_ecs::prelude::{Component, Entity, World};

use crate::components::geometry::Geometry;
use crate::components::mapposition::MapPosition;
use crate::components::sceneid::TweenId;

/// Easing curves applied to the progress value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Identity, not clamped: progress past 1.0 overshoots.
    #[default]
    Linear,
    /// Hermite `3t² - 2t³`, slow start and end.
    SmoothStep,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
}

/// Getter/setter pair for a numeric field outside the built-in properties.
#[derive(Clone, Copy)]
pub struct PropertyAccessor {
    pub get: fn(&World, Entity) -> Option<f32>,
    pub set: fn(&mut World, Entity, f32),
}

impl fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PropertyAccessor")
    }
}

/// Numeric property a tween writes into.
#[derive(Clone, Copy, Debug)]
pub enum TweenProperty {
    PositionX,
    PositionY,
    /// Width of a rectangle.
    Width,
    /// Height of a rectangle.
    Height,
    /// Radius of a circle.
    Radius,
    /// Pixel size of a text node's font.
    FontSize,
    Custom(PropertyAccessor),
}

impl TweenProperty {
    /// Current value, or `None` when the target or field does not exist.
    pub fn get(&self, world: &World, target: Entity) -> Option<f32> {
        match self {
            TweenProperty::PositionX => world.get::<MapPosition>(target).map(|p| p.pos.x),
            TweenProperty::PositionY => world.get::<MapPosition>(target).map(|p| p.pos.y),
            TweenProperty::Width => match world.get::<Geometry>(target)? {
                Geometry::Rect { size } => Some(size.x),
                _ => None,
            },
            TweenProperty::Height => match world.get::<Geometry>(target)? {
                Geometry::Rect { size } => Some(size.y),
                _ => None,
            },
            TweenProperty::Radius => match world.get::<Geometry>(target)? {
                Geometry::Circle { radius } => Some(*radius),
                _ => None,
            },
            TweenProperty::FontSize => match world.get::<Geometry>(target)? {
                Geometry::Text { font, .. } => Some(font.size_px),
                _ => None,
            },
            TweenProperty::Custom(accessor) => (accessor.get)(world, target),
        }
    }

    /// Write `value`. Missing targets are ignored.
    pub fn set(&self, world: &mut World, target: Entity, value: f32) {
        match self {
            TweenProperty::PositionX => {
                if let Some(mut p) = world.get_mut::<MapPosition>(target) {
                    p.pos.x = value;
                }
            }
            TweenProperty::PositionY => {
                if let Some(mut p) = world.get_mut::<MapPosition>(target) {
                    p.pos.y = value;
                }
            }
            TweenProperty::Width | TweenProperty::Height => {
                if let Some(mut g) = world.get_mut::<Geometry>(target) {
                    if let Geometry::Rect { size } = &mut *g {
                        if matches!(self, TweenProperty::Width) {
                            size.x = value;
                        } else {
                            size.y = value;
                        }
                    }
                }
            }
            TweenProperty::Radius => {
                if let Some(mut g) = world.get_mut::<Geometry>(target) {
                    if let Geometry::Circle { radius } = &mut *g {
                        *radius = value;
                    }
                }
            }
            TweenProperty::FontSize => {
                if let Some(mut g) = world.get_mut::<Geometry>(target) {
                    if let Geometry::Text { font, .. } = &mut *g {
                        font.size_px = value;
                    }
                }
            }
            TweenProperty::Custom(accessor) => (accessor.set)(world, target, value),
        }
    }
}

pub type FinishFn = Box<dyn FnMut(&mut World, TweenId) + Send + Sync>;

/// Interpolates one property of `target` towards `end` over `duration_ms`.
#[derive(Component)]
pub struct Tween {
    pub target: Entity,
    pub property: TweenProperty,
    pub end: f32,
    pub duration_ms: u64,
    pub easing: Easing,
    /// Value captured from the target when playback began.
    pub(crate) start: f32,
    pub(crate) start_time_ms: u64,
    pub(crate) on_finish: Option<FinishFn>,
}

impl Tween {
    pub fn new(target: Entity, property: TweenProperty, end: f32, duration_ms: u64) -> Self {
        Tween {
            target,
            property,
            end,
            duration_ms,
            easing: Easing::Linear,
            start: 0.0,
            start_time_ms: 0,
            on_finish: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Callback fired once each time a playback cycle ends.
    pub fn on_finish(mut self, f: impl FnMut(&mut World, TweenId) + Send + Sync + 'static) -> Self {
        self.on_finish = Some(Box::new(f));
        self
    }

    pub fn start_value(&self) -> f32 {
        self.start
    }

    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::geometry::FontSpec;

    #[test]
    fn test_tween_new_defaults() {
        let tw = Tween::new(Entity::PLACEHOLDER, TweenProperty::PositionX, 100.0, 300);
        assert_eq!(tw.end, 100.0);
        assert_eq!(tw.duration_ms, 300);
        assert_eq!(tw.easing, Easing::Linear);
        assert!(tw.on_finish.is_none());
        assert_eq!(tw.start_time_ms(), 0);
    }

    #[test]
    fn test_tween_builder_chaining() {
        let tw = Tween::new(Entity::PLACEHOLDER, TweenProperty::Radius, 1.0, 10)
            .with_easing(Easing::CubicOut)
            .on_finish(|_, _| {});
        assert_eq!(tw.easing, Easing::CubicOut);
        assert!(tw.on_finish.is_some());
    }

    #[test]
    fn test_builtin_property_access() {
        let mut world = World::new();
        let rect = world
            .spawn((MapPosition::new(1.0, 2.0), Geometry::rect(10.0, 20.0)))
            .id();
        let circle = world.spawn(Geometry::circle(5.0)).id();
        let text = world
            .spawn(Geometry::text("hi", FontSpec::new("Mono", 12.0)))
            .id();

        assert_eq!(TweenProperty::PositionX.get(&world, rect), Some(1.0));
        assert_eq!(TweenProperty::PositionY.get(&world, rect), Some(2.0));
        assert_eq!(TweenProperty::Width.get(&world, rect), Some(10.0));
        assert_eq!(TweenProperty::Height.get(&world, rect), Some(20.0));
        assert_eq!(TweenProperty::Radius.get(&world, rect), None);
        assert_eq!(TweenProperty::Radius.get(&world, circle), Some(5.0));
        assert_eq!(TweenProperty::FontSize.get(&world, text), Some(12.0));

        TweenProperty::Height.set(&mut world, rect, 7.5);
        TweenProperty::Radius.set(&mut world, circle, 9.0);
        TweenProperty::PositionY.set(&mut world, circle, 3.0); // no position, ignored
        assert_eq!(TweenProperty::Height.get(&world, rect), Some(7.5));
        assert_eq!(TweenProperty::Width.get(&world, rect), Some(10.0));
        assert_eq!(TweenProperty::Radius.get(&world, circle), Some(9.0));
        assert_eq!(TweenProperty::PositionY.get(&world, circle), None);
    }

    #[derive(Component)]
    struct Opacity(f32);

    #[test]
    fn test_custom_accessor() {
        let mut world = World::new();
        let e = world.spawn(Opacity(0.25)).id();
        let prop = TweenProperty::Custom(PropertyAccessor {
            get: |w, e| w.get::<Opacity>(e).map(|o| o.0),
            set: |w, e, v| {
                if let Some(mut o) = w.get_mut::<Opacity>(e) {
                    o.0 = v;
                }
            },
        });
        assert_eq!(prop.get(&world, e), Some(0.25));
        prop.set(&mut world, e, 0.75);
        assert_eq!(prop.get(&world, e), Some(0.75));
    }
}
