//! ECS resources shared by the scene systems.
//!
//! Overview
//! - `backend` – attached render backend, text measurement and render hooks
//! - `pointer` – polled pointer snapshot and the cross-thread input feed
//! - `registry` – id counter and the ordered node/tween maps
//! - `sceneconfig` – scheduler and surface settings loaded from INI
//! - `worldtime` – scene clock and cycle counters
pub mod backend;
pub mod pointer;
pub mod registry;
pub mod sceneconfig;
pub mod worldtime;
