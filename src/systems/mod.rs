//! Scene systems.
//!
//! Every system is a plain function over `&mut World`, called in a fixed
//! order by [`Scene`](crate::scene::Scene).
//!
//! Submodules overview
//! - [`hittest`] – pointer-in-geometry oracle
//! - [`input`] – drain the pointer feed into [`crate::resources::pointer::PointerState`]
//! - [`interaction`] – per-node hover/click state machine and callback dispatch
//! - [`lifecycle`] – spawn, look up, re-key and despawn nodes and tweens
//! - [`render`] – clear, advance tweens, draw visible nodes in order
//! - [`time`] – update the scene clock and cycle counters
//! - [`tween`] – play, stop and advance tweens

pub mod hittest;
pub mod input;
pub mod interaction;
pub mod lifecycle;
pub mod render;
pub mod time;
pub mod tween;
