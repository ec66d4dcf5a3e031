//! Nubscene library.
//!
//! A retained-mode 2D scene graph: nodes with geometry and pointer callbacks,
//! a hover/click state machine driven by polling the pointer against node
//! bounds, property tweens, and a scheduler running a fixed-rate think loop
//! next to a vsync-aligned render loop. Drawing is delegated to a pluggable
//! [`RenderBackend`](resources::backend::RenderBackend).
//!
//! Built on **bevy_ecs**: nodes and tweens are entities, the identity
//! registry and pointer state are resources, and [`scene::Scene`] owns the
//! world.

pub mod builder;
pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod math;
pub mod resources;
pub mod scene;
pub mod scheduler;
pub mod systems;

pub use builder::NodeBuilder;
pub use error::SceneError;
pub use scene::Scene;
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock};
