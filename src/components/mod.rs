//! ECS components for scene nodes and tweens.
//!
//! Submodules overview:
//! - [`drawable`] – backend-specific draw strategy of a node
//! - [`geometry`] – rectangle, circle and text shapes plus their hit bounds
//! - [`handlers`] – pointer callbacks and the per-tick think hook
//! - [`interaction`] – hover/click sub-state driven by the interaction system
//! - [`mapposition`] – surface-space anchor of a node
//! - [`node`] – `visible` and `enabled` flags
//! - [`sceneid`] – registry identities of nodes and tweens
//! - [`tween`] – timed interpolation of one numeric property

pub mod drawable;
pub mod geometry;
pub mod handlers;
pub mod interaction;
pub mod mapposition;
pub mod node;
pub mod sceneid;
pub mod tween;
