//! Process-unique identifiers for scene nodes and tweens.
//!
//! Both id kinds are drawn from the single counter held by
//! [`SceneRegistry`](crate::resources::registry::SceneRegistry), so a node and a
//! tween never share a number within one registry.

use std::fmt;

use bevy_ecs::prelude::Component;

/// Identity of a scene node. Stored on the node entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Identity of a tween. Stored on the tween entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}
