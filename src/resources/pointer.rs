//! Pointer state polled by the interaction system.
//!
//! [`PointerState`] is the snapshot read once per think tick. Hosts either
//! write it directly (single-threaded) or push [`PointerInput`]s into a
//! [`PointerFeed`] from any thread; the feed is drained into the state at
//! the start of each think tick.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use glam::Vec2;
use log::debug;

use crate::events::pointer::PointerInput;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Surface coordinates, `None` while the pointer is off the surface.
    pub position: Option<Vec2>,
    /// Whether the primary button is held.
    pub pressed: bool,
}

impl PointerState {
    /// Build from raw coordinates where any negative axis means off-surface
    /// (the `(-1, -1)` sentinel used by canvas adapters).
    pub fn from_raw(x: f32, y: f32, pressed: bool) -> Self {
        let position = (x >= 0.0 && y >= 0.0).then_some(Vec2::new(x, y));
        Self { position, pressed }
    }

    pub fn apply(&mut self, input: PointerInput) {
        match input {
            PointerInput::Moved { x, y } => {
                *self = Self::from_raw(x, y, self.pressed);
            }
            PointerInput::Pressed => self.pressed = true,
            PointerInput::Released => self.pressed = false,
            PointerInput::Left => {
                self.position = None;
                self.pressed = false;
            }
        }
    }
}

/// Channel carrying pointer input from the host adapter into the scene.
#[derive(Resource, Debug, Clone)]
pub struct PointerFeed {
    tx: Sender<PointerInput>,
    rx: Receiver<PointerInput>,
}

impl Default for PointerFeed {
    fn default() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }
}

impl PointerFeed {
    /// Sender half for the input adapter. Cheap to clone, usable from any thread.
    pub fn sender(&self) -> Sender<PointerInput> {
        self.tx.clone()
    }

    /// Apply every pending input to `state` in arrival order. Returns the
    /// number of inputs applied.
    pub fn drain_into(&self, state: &mut PointerState) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(input) => {
                    state.apply(input);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("pointer feed disconnected");
                    break;
                }
            }
        }
        applied
    }
}
