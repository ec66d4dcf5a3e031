//! Error type for registry and configuration operations.
//!
//! Per-tick paths (hit-testing, interaction, rendering) never return these;
//! they degrade silently and log instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Another live object already holds the requested id.
    #[error("id {0} is already held by a live object")]
    IdInUse(u64),
    /// `u64::MAX` is never issued or accepted, so the counter cannot wrap.
    #[error("id {0} is reserved")]
    IdReserved(u64),
    #[error("id space exhausted")]
    IdsExhausted,
    #[error("no node with id {0}")]
    UnknownNode(u64),
    #[error("no tween with id {0}")]
    UnknownTween(u64),
    #[error("config error: {0}")]
    Config(String),
    #[error("pointer trace error: {0}")]
    Trace(String),
}
