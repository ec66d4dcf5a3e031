//! Per-node hover/click sub-state.
//!
//! Owned by the interaction system; hosts can read it but never set it. The
//! transition table lives in [`Interaction::step`]:
//!
//! ```text
//! Idle              -> Hovered            (pointer over node, button up)
//! Idle / Hovered    -> HoveredAndClicked  (pointer over node, button down)
//! HoveredAndClicked -> Hovered            (button released over node)
//! any               -> Idle               (pointer leaves node, or node disabled)
//! ```

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::events::pointer::PointerEvent;

/// Coarse view of the sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Hovered,
    HoveredAndClicked,
}

/// Callbacks produced by a single evaluation, in dispatch order.
pub type PointerEvents = SmallVec<[PointerEvent; 4]>;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    hovered: bool,
    clicked: bool,
    clicked_ticks: u32,
}

impl Interaction {
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_clicked(&self) -> bool {
        self.clicked
    }

    /// Hold ticks already reported through `ClickHold` in the current press.
    pub fn clicked_ticks(&self) -> u32 {
        self.clicked_ticks
    }

    pub fn phase(&self) -> InteractionPhase {
        match (self.hovered, self.clicked) {
            (true, true) => InteractionPhase::HoveredAndClicked,
            (true, false) => InteractionPhase::Hovered,
            _ => InteractionPhase::Idle,
        }
    }

    /// Hard reset to idle. Emits nothing.
    pub(crate) fn reset(&mut self) {
        *self = Interaction::default();
    }

    /// Advance one think tick.
    ///
    /// `Hover` is level-triggered (every tick over the node) while the hovered
    /// flag, `Click` and `StopHover` are edge-triggered.
    pub(crate) fn step(&mut self, hit: bool, pressed: bool) -> PointerEvents {
        let mut events = PointerEvents::new();
        if hit {
            self.hovered = true;
            events.push(PointerEvent::Hover);
            if pressed {
                if !self.clicked {
                    self.clicked = true;
                    self.clicked_ticks = 0;
                    events.push(PointerEvent::Click);
                }
                events.push(PointerEvent::ClickHold(self.clicked_ticks));
                self.clicked_ticks = self.clicked_ticks.saturating_add(1);
            } else {
                if self.clicked {
                    events.push(PointerEvent::Release);
                }
                self.clicked = false;
                self.clicked_ticks = 0;
            }
        } else {
            if self.hovered {
                events.push(PointerEvent::StopHover);
            }
            if self.clicked {
                events.push(PointerEvent::Release);
            }
            self.reset();
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointerEvent::*;

    #[test]
    fn test_default_is_idle() {
        let i = Interaction::default();
        assert_eq!(i.phase(), InteractionPhase::Idle);
        assert_eq!(i.clicked_ticks(), 0);
    }

    #[test]
    fn test_hover_fires_every_tick() {
        let mut i = Interaction::default();
        for _ in 0..5 {
            assert_eq!(i.step(true, false).as_slice(), &[Hover]);
        }
        assert_eq!(i.phase(), InteractionPhase::Hovered);
        assert_eq!(i.step(false, false).as_slice(), &[StopHover]);
        assert_eq!(i.step(false, false).as_slice(), &[]);
    }

    #[test]
    fn test_press_hold_release_inside() {
        let mut i = Interaction::default();
        assert_eq!(i.step(true, true).as_slice(), &[Hover, Click, ClickHold(0)]);
        assert_eq!(i.step(true, true).as_slice(), &[Hover, ClickHold(1)]);
        assert_eq!(i.step(true, true).as_slice(), &[Hover, ClickHold(2)]);
        assert_eq!(i.phase(), InteractionPhase::HoveredAndClicked);
        assert_eq!(i.clicked_ticks(), 3);
        assert_eq!(i.step(true, false).as_slice(), &[Hover, Release]);
        assert_eq!(i.phase(), InteractionPhase::Hovered);
        assert_eq!(i.clicked_ticks(), 0);
    }

    #[test]
    fn test_leaving_while_clicked_releases() {
        let mut i = Interaction::default();
        i.step(true, true);
        assert_eq!(i.step(false, true).as_slice(), &[StopHover, Release]);
        assert_eq!(i, Interaction::default());
        // still held but outside: nothing until the pointer comes back
        assert!(i.step(false, true).is_empty());
        assert_eq!(i.step(true, true).as_slice(), &[Hover, Click, ClickHold(0)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut i = Interaction::default();
        i.step(true, true);
        i.step(true, true);
        i.reset();
        assert_eq!(i.phase(), InteractionPhase::Idle);
        assert_eq!(i.clicked_ticks(), 0);
    }
}
