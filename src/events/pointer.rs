//! Pointer events.
//!
//! Two directions of traffic:
//! - [`PointerInput`] – raw input delivered by the host's pointer adapter,
//!   usually through a [`PointerFeed`](crate::resources::pointer::PointerFeed).
//! - [`PointerEvent`] – callbacks dispatched to a node by the interaction
//!   state machine.

use serde::{Deserialize, Serialize};

/// Raw input from the pointer adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerInput {
    /// Pointer moved to surface coordinates.
    Moved { x: f32, y: f32 },
    Pressed,
    Released,
    /// Pointer left the surface. Also releases the button.
    Left,
}

/// Key into a node's handler table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Click,
    ClickHold,
    Release,
    Hover,
    StopHover,
}

/// Callback delivered to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Click,
    /// Button held over the node; carries the number of earlier hold ticks.
    ClickHold(u32),
    Release,
    /// Fired on every tick the pointer is over the node.
    Hover,
    StopHover,
}

impl PointerEvent {
    pub fn kind(&self) -> PointerEventKind {
        match self {
            PointerEvent::Click => PointerEventKind::Click,
            PointerEvent::ClickHold(_) => PointerEventKind::ClickHold,
            PointerEvent::Release => PointerEventKind::Release,
            PointerEvent::Hover => PointerEventKind::Hover,
            PointerEvent::StopHover => PointerEventKind::StopHover,
        }
    }
}
