//! Visibility and enablement flags for scene nodes.
//!
//! - `visible == false` – skipped by the render pass, still ticked.
//! - `enabled == false` – skipped by the interaction state machine, still
//!   drawn when visible.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub visible: bool,
    pub enabled: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
        }
    }
}
