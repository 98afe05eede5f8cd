//! The dormant → idle ⇄ expanded mode machine.

use hand_gesture::Gesture;
use particle_field::Mode;

use crate::signal::{Signal, Signals};

#[derive(Debug, Default)]
pub struct ModeMachine {
    mode: Mode,
}

impl ModeMachine {
    pub fn mode(&self) -> Mode { self.mode }

    /// Leave dormant.  One-shot: returns false when already awake.
    pub fn wake(&mut self, signals: &mut Signals) -> bool {
        if self.mode != Mode::Dormant {
            return false;
        }
        self.enter(Mode::IdleFormation, signals);
        true
    }

    /// Apply the gesture hand's state.  Returns the new mode on a transition.
    pub fn apply_gesture(&mut self, gesture: Gesture, signals: &mut Signals) -> Option<Mode> {
        let next = match (self.mode, gesture) {
            (Mode::Dormant, _) | (_, Gesture::None) => return None,
            (Mode::ExpandedFormation, Gesture::Open) => return None,
            (Mode::IdleFormation, Gesture::Fist) => return None,
            (_, Gesture::Open) => Mode::ExpandedFormation,
            (_, Gesture::Fist) => Mode::IdleFormation,
        };
        self.enter(next, signals);
        Some(next)
    }

    fn enter(&mut self, next: Mode, signals: &mut Signals) {
        log::debug!("mode {} -> {}", self.mode.name(), next.name());
        self.mode = next;
        signals.emit(Signal::ModeChanged(next));
    }
}
